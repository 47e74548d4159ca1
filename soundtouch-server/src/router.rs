//! Route table for the façade
//!
//! Filters match the path before the method, so a known path with the wrong
//! method surfaces as 405 rather than 404.

use serde::de::DeserializeOwned;
use std::convert::Infallible;
use warp::{Filter, Rejection, Reply};

use crate::assets::Asset;
use crate::error::handle_rejection;
use crate::handlers;
use crate::state::AppState;

/// Largest JSON body accepted on any route
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

/// The complete application: device routes, image proxy and static assets
/// with error rendering, CORS and request tracing applied.
///
/// Route rejections are rendered inside the CORS layer so error replies still
/// carry CORS headers; the outer recover renders what CORS itself rejects.
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_header("content-type");

    device_routes(state.clone())
        .or(image_proxy(state.clone()))
        .or(static_assets(state))
        .recover(handle_rejection)
        .with(cors)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

/// `/device/*`
pub fn device_routes(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let configure = warp::path!("device" / "configure")
        .and(warp::post())
        .and(json_body::<handlers::ConfigureRequest>())
        .and(with_state(state.clone()))
        .and_then(handlers::configure);

    let status = warp::path!("device" / "status")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_status);

    let get_volume = warp::path!("device" / "volume")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_volume);

    let set_volume = warp::path!("device" / "volume")
        .and(warp::post())
        .and(json_body::<handlers::VolumeRequest>())
        .and(with_state(state.clone()))
        .and_then(handlers::set_volume);

    let preset = warp::path!("device" / "preset")
        .and(warp::post())
        .and(json_body::<handlers::PresetRequest>())
        .and(with_state(state.clone()))
        .and_then(handlers::set_preset);

    let power = warp::path!("device" / "power")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and_then(handlers::power);

    let play = warp::path!("device" / "play")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and_then(handlers::play);

    let pause = warp::path!("device" / "pause")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and_then(handlers::pause);

    let next = warp::path!("device" / "next")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and_then(handlers::next_track);

    let previous = warp::path!("device" / "previous")
        .and(warp::post())
        .and(with_state(state))
        .and_then(handlers::previous_track);

    configure
        .or(status)
        .or(get_volume)
        .or(set_volume)
        .or(preset)
        .or(power)
        .or(play)
        .or(pause)
        .or(next)
        .or(previous)
}

/// `GET /proxy/image?url=...`
pub fn image_proxy(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("proxy" / "image")
        .and(warp::get())
        .and(warp::query::<handlers::ImageQuery>())
        .and(with_state(state))
        .and_then(handlers::proxy_image)
}

/// `GET /`, `GET /script.js`, `GET /styles.css`
pub fn static_assets(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let asset = warp::path::end()
        .map(|| Asset::Index)
        .or(warp::path!("script.js").map(|| Asset::Script))
        .unify()
        .or(warp::path!("styles.css").map(|| Asset::Styles))
        .unify();

    asset
        .and(warp::get())
        .and(with_state(state))
        .and_then(handlers::serve_asset)
}
