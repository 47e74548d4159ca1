use soundtouch_client::{HttpTransport, XmlTransport, DEFAULT_TIMEOUT};
use std::time::Duration;

use crate::key::{key_payload, Key, KeyState};
use crate::model::{NowPlaying, Volume};
use crate::target::DeviceTarget;
use crate::validation::check_range;
use crate::Result;

const KEY_ENDPOINT: &str = "key";
const VOLUME_ENDPOINT: &str = "volume";
const NOW_PLAYING_ENDPOINT: &str = "now_playing";

/// A session with one SoundTouch device
///
/// The session owns its transport, so dropping it closes the underlying
/// connections; open one per unit of work and let it fall out of scope.
///
/// ```rust,no_run
/// use soundtouch_api::{DeviceTarget, SoundTouchClient};
///
/// # async fn run() -> soundtouch_api::Result<()> {
/// let target = DeviceTarget::new("192.168.1.20")?;
/// let client = SoundTouchClient::open(&target)?;
///
/// client.set_volume(25).await?;
/// client.set_preset(3).await?;
/// let status = client.get_status().await?;
/// println!("{:?} - {:?}", status.artist, status.track);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SoundTouchClient<T = HttpTransport> {
    transport: T,
}

impl SoundTouchClient<HttpTransport> {
    /// Open a session against `target` with the default 10 second deadline
    pub fn open(target: &DeviceTarget) -> Result<Self> {
        Self::open_with_timeout(target, DEFAULT_TIMEOUT)
    }

    /// Open a session against `target` with a custom per-request deadline
    pub fn open_with_timeout(target: &DeviceTarget, timeout: Duration) -> Result<Self> {
        let transport = HttpTransport::new(&target.hostname, target.port, timeout)?;
        tracing::debug!("Opened device session for {}", transport.base_url());
        Ok(Self { transport })
    }
}

impl<T: XmlTransport> SoundTouchClient<T> {
    /// Build a client over any transport (used to record wire traffic in tests)
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Current playback snapshot
    pub async fn get_status(&self) -> Result<NowPlaying> {
        let body = self.transport.get_xml(NOW_PLAYING_ENDPOINT).await?;
        NowPlaying::from_xml(&body)
    }

    /// Current target and actual volume
    pub async fn get_volume(&self) -> Result<Volume> {
        let body = self.transport.get_xml(VOLUME_ENDPOINT).await?;
        Volume::from_xml(&body)
    }

    /// Set the volume; `value` must be in `0..=100`
    ///
    /// Out-of-range values fail with `ApiError::InvalidParameter` before any
    /// request is sent.
    pub async fn set_volume(&self, value: i64) -> Result<()> {
        let value = check_range("volume", value, 0..=100)?;
        self.transport
            .post_xml(VOLUME_ENDPOINT, format!("<volume>{}</volume>", value))
            .await?;
        Ok(())
    }

    /// Select a stored preset; `value` must be in `1..=6`
    pub async fn set_preset(&self, value: i64) -> Result<()> {
        let key = Key::preset(value)?;
        self.press_and_release(key).await
    }

    /// Press then release `key`
    ///
    /// The release is only sent once the press succeeded. A failed press
    /// returns its error and leaves the release unsent.
    pub async fn press_and_release(&self, key: Key) -> Result<()> {
        tracing::debug!("Sending key {}", key);
        self.transport
            .post_xml(KEY_ENDPOINT, key_payload(key, KeyState::Press))
            .await?;
        self.transport
            .post_xml(KEY_ENDPOINT, key_payload(key, KeyState::Release))
            .await?;
        Ok(())
    }

    pub async fn play(&self) -> Result<()> {
        self.press_and_release(Key::Play).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.press_and_release(Key::Pause).await
    }

    /// Toggle standby
    pub async fn power(&self) -> Result<()> {
        self.press_and_release(Key::Power).await
    }

    pub async fn next_track(&self) -> Result<()> {
        self.press_and_release(Key::NextTrack).await
    }

    pub async fn previous_track(&self) -> Result<()> {
        self.press_and_release(Key::PrevTrack).await
    }

    pub async fn thumbs_up(&self) -> Result<()> {
        self.press_and_release(Key::ThumbsUp).await
    }

    pub async fn thumbs_down(&self) -> Result<()> {
        self.press_and_release(Key::ThumbsDown).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiError;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use soundtouch_client::TransportError;
    use std::sync::Mutex;

    /// Records every request and answers from canned values
    #[derive(Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<(String, String, String)>>,
        get_body: String,
        fail_posts: bool,
    }

    impl RecordingTransport {
        fn answering(body: &str) -> Self {
            Self {
                get_body: body.to_string(),
                ..Default::default()
            }
        }

        fn failing() -> Self {
            Self {
                fail_posts: true,
                ..Default::default()
            }
        }

        fn requests(&self) -> Vec<(String, String, String)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl XmlTransport for RecordingTransport {
        async fn get_xml(&self, endpoint: &str) -> soundtouch_client::Result<String> {
            self.requests
                .lock()
                .unwrap()
                .push(("GET".to_string(), endpoint.to_string(), String::new()));
            Ok(self.get_body.clone())
        }

        async fn post_xml(&self, endpoint: &str, body: String) -> soundtouch_client::Result<()> {
            self.requests
                .lock()
                .unwrap()
                .push(("POST".to_string(), endpoint.to_string(), body));
            if self.fail_posts {
                Err(TransportError::Status(500))
            } else {
                Ok(())
            }
        }
    }

    fn post(endpoint: &str, body: &str) -> (String, String, String) {
        ("POST".to_string(), endpoint.to_string(), body.to_string())
    }

    #[tokio::test]
    async fn test_press_then_release() {
        let client = SoundTouchClient::with_transport(RecordingTransport::default());

        client.play().await.unwrap();

        assert_eq!(
            client.transport().requests(),
            vec![
                post("key", r#"<key state="press" sender="Gabbo">PLAY</key>"#),
                post("key", r#"<key state="release" sender="Gabbo">PLAY</key>"#),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_press_skips_release() {
        let client = SoundTouchClient::with_transport(RecordingTransport::failing());

        let err = client.power().await.unwrap_err();

        assert!(matches!(err, ApiError::DeviceStatus(500)));
        assert_eq!(
            client.transport().requests(),
            vec![post("key", r#"<key state="press" sender="Gabbo">POWER</key>"#)]
        );
    }

    #[tokio::test]
    async fn test_track_and_rating_keys() {
        let client = SoundTouchClient::with_transport(RecordingTransport::default());

        client.next_track().await.unwrap();
        client.previous_track().await.unwrap();
        client.thumbs_up().await.unwrap();
        client.thumbs_down().await.unwrap();
        client.pause().await.unwrap();

        let keys: Vec<String> = client
            .transport()
            .requests()
            .into_iter()
            .step_by(2)
            .map(|(_, _, body)| body)
            .collect();
        assert_eq!(
            keys,
            vec![
                r#"<key state="press" sender="Gabbo">NEXT_TRACK</key>"#,
                r#"<key state="press" sender="Gabbo">PREV_TRACK</key>"#,
                r#"<key state="press" sender="Gabbo">THUMBS_UP</key>"#,
                r#"<key state="press" sender="Gabbo">THUMBS_DOWN</key>"#,
                r#"<key state="press" sender="Gabbo">PAUSE</key>"#,
            ]
        );
    }

    #[tokio::test]
    async fn test_get_volume_hits_volume_endpoint() {
        let client = SoundTouchClient::with_transport(RecordingTransport::answering(
            "<volume><targetvolume>40</targetvolume><actualvolume>38</actualvolume></volume>",
        ));

        let volume = client.get_volume().await.unwrap();

        assert_eq!(volume, Volume { target: 40, actual: 38 });
        assert_eq!(client.transport().requests()[0].1, "volume");
    }

    #[tokio::test]
    async fn test_get_status_parse_failure() {
        let client = SoundTouchClient::with_transport(RecordingTransport::answering("not xml"));

        let err = client.get_status().await.unwrap_err();

        assert!(err.is_protocol_error());
        assert_eq!(client.transport().requests()[0].1, "now_playing");
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    proptest! {
        #[test]
        fn prop_set_volume_in_range_posts_value(value in 0i64..=100) {
            let client = SoundTouchClient::with_transport(RecordingTransport::default());
            runtime().block_on(client.set_volume(value)).unwrap();

            let requests = client.transport().requests();
            prop_assert_eq!(requests.len(), 1);
            let body = &requests[0].2;
            let decoded: i64 = body
                .trim_start_matches("<volume>")
                .trim_end_matches("</volume>")
                .parse()
                .unwrap();
            prop_assert_eq!(decoded, value);
            prop_assert_eq!(&requests[0].1, "volume");
        }

        #[test]
        fn prop_set_volume_out_of_range_sends_nothing(
            value in prop_oneof![i64::MIN..0i64, 101i64..=i64::MAX]
        ) {
            let client = SoundTouchClient::with_transport(RecordingTransport::default());
            let result = runtime().block_on(client.set_volume(value));

            prop_assert!(matches!(result, Err(ApiError::InvalidParameter(_))));
            prop_assert!(client.transport().requests().is_empty());
        }

        #[test]
        fn prop_set_preset_presses_then_releases(value in 1i64..=6) {
            let client = SoundTouchClient::with_transport(RecordingTransport::default());
            runtime().block_on(client.set_preset(value)).unwrap();

            let expected = vec![
                post("key", &format!(r#"<key state="press" sender="Gabbo">PRESET_{}</key>"#, value)),
                post("key", &format!(r#"<key state="release" sender="Gabbo">PRESET_{}</key>"#, value)),
            ];
            prop_assert_eq!(client.transport().requests(), expected);
        }

        #[test]
        fn prop_set_preset_out_of_range_sends_nothing(
            value in prop_oneof![i64::MIN..1i64, 7i64..=i64::MAX]
        ) {
            let client = SoundTouchClient::with_transport(RecordingTransport::default());
            let result = runtime().block_on(client.set_preset(value));

            prop_assert!(matches!(result, Err(ApiError::InvalidParameter(_))));
            prop_assert!(client.transport().requests().is_empty());
        }
    }
}
