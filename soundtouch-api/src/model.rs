//! Device state snapshots and their XML decoding
//!
//! The device answers two query shapes: `<volume>` and `<nowPlaying>`. Each
//! has a private wire struct deserialized with quick-xml and a public model
//! that the rest of the workspace (and the JSON surface) uses.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Descriptor of the content currently playing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlayingContentItem {
    /// Source identifier, e.g. `SPOTIFY` or `INTERNET_RADIO`; empty when absent
    pub source: String,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub is_presetable: bool,
    /// Display name (`itemName`)
    pub name: Option<String>,
    /// Artwork URL of the containing album or station (`containerArt`)
    pub container_art: Option<String>,
}

/// Snapshot of the device's playback state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub device_id: String,
    pub source: String,
    pub source_account: Option<String>,
    pub content_item: NowPlayingContentItem,
    pub track: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub station_name: Option<String>,
}

/// Target and actual volume, both in `0..=100`
///
/// `actual` may lag `target` while the device ramps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub target: u8,
    pub actual: u8,
}

#[derive(Debug, Deserialize)]
struct ContentItemXml {
    #[serde(rename = "@source", default)]
    source: String,
    #[serde(rename = "@type")]
    content_type: Option<String>,
    #[serde(rename = "@location")]
    location: Option<String>,
    #[serde(rename = "@isPresetable", default)]
    is_presetable: bool,
    #[serde(rename = "itemName")]
    item_name: Option<String>,
    #[serde(rename = "containerArt")]
    container_art: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NowPlayingXml {
    #[serde(rename = "@deviceID", default)]
    device_id: String,
    #[serde(rename = "@source", default)]
    source: String,
    #[serde(rename = "@sourceAccount")]
    source_account: Option<String>,
    #[serde(rename = "ContentItem")]
    content_item: Option<ContentItemXml>,
    track: Option<String>,
    artist: Option<String>,
    album: Option<String>,
    #[serde(rename = "stationName")]
    station_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VolumeXml {
    targetvolume: Option<u8>,
    actualvolume: Option<u8>,
}

/// Element text, with empty elements such as `<album />` treated as absent
fn text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<ContentItemXml> for NowPlayingContentItem {
    fn from(xml: ContentItemXml) -> Self {
        Self {
            source: xml.source,
            content_type: xml.content_type,
            location: xml.location,
            is_presetable: xml.is_presetable,
            name: text(xml.item_name),
            container_art: text(xml.container_art),
        }
    }
}

impl From<NowPlayingXml> for NowPlaying {
    fn from(xml: NowPlayingXml) -> Self {
        Self {
            device_id: xml.device_id,
            source: xml.source,
            source_account: xml.source_account,
            content_item: xml.content_item.map(Into::into).unwrap_or_default(),
            track: text(xml.track),
            artist: text(xml.artist),
            album: text(xml.album),
            station_name: text(xml.station_name),
        }
    }
}

impl NowPlaying {
    /// Decode a `now_playing` response body
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ParseError` if the body is not XML or its root
    /// element is not `nowPlaying`.
    pub fn from_xml(xml: &str) -> Result<Self> {
        expect_root(xml, "nowPlaying")?;
        let parsed: NowPlayingXml = quick_xml::de::from_str(xml)?;
        Ok(parsed.into())
    }
}

impl Volume {
    /// Decode a `volume` response body; missing values default to 0
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ParseError` if the body is not XML, its root element
    /// is not `volume`, or a volume value is not an integer in `0..=255`.
    pub fn from_xml(xml: &str) -> Result<Self> {
        expect_root(xml, "volume")?;
        let parsed: VolumeXml = quick_xml::de::from_str(xml)?;
        Ok(Self {
            target: parsed.targetvolume.unwrap_or(0),
            actual: parsed.actualvolume.unwrap_or(0),
        })
    }
}

/// Fail unless the first element of `xml` is named `expected`
fn expect_root(xml: &str, expected: &str) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                let name = element.local_name();
                return if name.as_ref() == expected.as_bytes() {
                    Ok(())
                } else {
                    Err(ApiError::ParseError(format!(
                        "Expected <{}> document, found <{}>",
                        expected,
                        String::from_utf8_lossy(name.as_ref())
                    )))
                };
            }
            Ok(Event::Eof) => {
                return Err(ApiError::ParseError(format!(
                    "Expected <{}> document, found empty body",
                    expected
                )))
            }
            Ok(_) => continue,
            Err(e) => return Err(ApiError::ParseError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPOTIFY_NOW_PLAYING: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<nowPlaying deviceID="689E19B8BB8A" source="SPOTIFY" sourceAccount="listener@example.com">
  <ContentItem source="SPOTIFY" type="uri" location="spotify:playlist:37i9dQZF1DX" sourceAccount="listener@example.com" isPresetable="true">
    <itemName>Morning Acoustic</itemName>
    <containerArt>https://i.scdn.co/image/ab67616d0000b273</containerArt>
  </ContentItem>
  <track>Holocene</track>
  <artist>Bon Iver</artist>
  <album>Bon Iver, Bon Iver</album>
  <art artImageStatus="IMAGE_PRESENT">https://i.scdn.co/image/ab67616d0000b273</art>
  <time total="337">12</time>
  <playStatus>PLAY_STATE</playStatus>
</nowPlaying>"#;

    #[test]
    fn test_now_playing_full_document() {
        let status = NowPlaying::from_xml(SPOTIFY_NOW_PLAYING).unwrap();

        assert_eq!(status.device_id, "689E19B8BB8A");
        assert_eq!(status.source, "SPOTIFY");
        assert_eq!(status.source_account.as_deref(), Some("listener@example.com"));
        assert_eq!(status.track.as_deref(), Some("Holocene"));
        assert_eq!(status.artist.as_deref(), Some("Bon Iver"));
        assert_eq!(status.album.as_deref(), Some("Bon Iver, Bon Iver"));
        assert_eq!(status.station_name, None);

        let item = &status.content_item;
        assert_eq!(item.source, "SPOTIFY");
        assert_eq!(item.content_type.as_deref(), Some("uri"));
        assert_eq!(item.location.as_deref(), Some("spotify:playlist:37i9dQZF1DX"));
        assert!(item.is_presetable);
        assert_eq!(item.name.as_deref(), Some("Morning Acoustic"));
        assert_eq!(
            item.container_art.as_deref(),
            Some("https://i.scdn.co/image/ab67616d0000b273")
        );
    }

    #[test]
    fn test_now_playing_without_item_name() {
        let xml = r#"<nowPlaying deviceID="689E19B8BB8A" source="TUNEIN">
  <ContentItem source="TUNEIN" type="stationurl" location="/v1/playback/station/s24896" isPresetable="true" />
  <stationName>SomaFM Groove Salad</stationName>
</nowPlaying>"#;

        let status = NowPlaying::from_xml(xml).unwrap();

        assert_eq!(status.content_item.name, None);
        assert_eq!(status.content_item.container_art, None);
        assert_eq!(status.station_name.as_deref(), Some("SomaFM Groove Salad"));
        assert_eq!(status.track, None);
    }

    #[test]
    fn test_now_playing_empty_elements_are_absent() {
        let xml = r#"<nowPlaying deviceID="689E19B8BB8A" source="AUX">
  <ContentItem source="AUX" sourceAccount="AUX" isPresetable="false">
    <itemName/>
    <containerArt />
  </ContentItem>
  <track></track>
  <artist>  </artist>
  <album />
</nowPlaying>"#;

        let status = NowPlaying::from_xml(xml).unwrap();

        assert_eq!(status.content_item.name, None);
        assert_eq!(status.content_item.container_art, None);
        assert_eq!(status.track, None);
        assert_eq!(status.artist, None);
        assert_eq!(status.album, None);

        let json = serde_json::to_value(&status).unwrap();
        assert!(json["content_item"]["container_art"].is_null());
        assert!(json["album"].is_null());
    }

    #[test]
    fn test_now_playing_standby_without_content_item() {
        let xml = r#"<nowPlaying deviceID="689E19B8BB8A" source="STANDBY"></nowPlaying>"#;

        let status = NowPlaying::from_xml(xml).unwrap();

        assert_eq!(status.source, "STANDBY");
        assert_eq!(status.content_item, NowPlayingContentItem::default());
        assert!(!status.content_item.is_presetable);
    }

    #[test]
    fn test_now_playing_wrong_root() {
        let xml = r#"<volume><targetvolume>10</targetvolume></volume>"#;
        let err = NowPlaying::from_xml(xml).unwrap_err();
        assert!(matches!(err, ApiError::ParseError(_)));
    }

    #[test]
    fn test_volume_document() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" ?>
<volume deviceID="689E19B8BB8A">
  <targetvolume>32</targetvolume>
  <actualvolume>28</actualvolume>
  <muteenabled>false</muteenabled>
</volume>"#;

        let volume = Volume::from_xml(xml).unwrap();
        assert_eq!(volume, Volume { target: 32, actual: 28 });
    }

    #[test]
    fn test_volume_missing_target_defaults_to_zero() {
        let xml = r#"<volume deviceID="689E19B8BB8A"><actualvolume>15</actualvolume></volume>"#;

        let volume = Volume::from_xml(xml).unwrap();
        assert_eq!(volume.target, 0);
        assert_eq!(volume.actual, 15);
    }

    #[test]
    fn test_volume_non_numeric_is_parse_error() {
        let xml = r#"<volume><targetvolume>loud</targetvolume></volume>"#;
        assert!(matches!(Volume::from_xml(xml), Err(ApiError::ParseError(_))));
    }

    #[test]
    fn test_garbage_body_is_parse_error() {
        assert!(matches!(Volume::from_xml(""), Err(ApiError::ParseError(_))));
        assert!(matches!(
            NowPlaying::from_xml("<html><body>Not Found"),
            Err(ApiError::ParseError(_))
        ));
    }

    #[test]
    fn test_json_field_names() {
        let status = NowPlaying::from_xml(SPOTIFY_NOW_PLAYING).unwrap();
        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["device_id"], "689E19B8BB8A");
        assert_eq!(json["content_item"]["name"], "Morning Acoustic");
        assert_eq!(json["content_item"]["is_presetable"], true);
        assert!(json["station_name"].is_null());
    }
}
