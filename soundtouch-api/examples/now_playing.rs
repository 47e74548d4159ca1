//! Print what a SoundTouch speaker is playing
//!
//! ```bash
//! cargo run -p soundtouch-api --example now_playing -- 192.168.1.20
//! ```

use soundtouch_api::{DeviceTarget, SoundTouchClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let hostname = std::env::args()
        .nth(1)
        .ok_or("usage: now_playing <hostname>")?;

    let client = SoundTouchClient::open(&DeviceTarget::new(&hostname)?)?;

    let status = client.get_status().await?;
    let volume = client.get_volume().await?;

    println!("Device:  {}", status.device_id);
    println!("Source:  {}", status.source);
    if let Some(name) = &status.content_item.name {
        println!("Item:    {}", name);
    }
    if let Some(track) = status.track.as_ref().or(status.station_name.as_ref()) {
        println!("Playing: {}", track);
    }
    if let Some(artist) = &status.artist {
        println!("Artist:  {}", artist);
    }
    println!("Volume:  {} (target {})", volume.actual, volume.target);

    Ok(())
}
