//! Key events: the device's remote-control buttons
//!
//! Every action the device exposes through its `key` endpoint is a button.
//! A button is always sent as a press followed by a release of the same key.

use std::fmt;

use crate::validation::{check_range, ValidationError};

/// Sender identifier carried in every key event
pub const SENDER: &str = "Gabbo";

/// Remote-control keys understood by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Play,
    Pause,
    Power,
    PrevTrack,
    NextTrack,
    ThumbsUp,
    ThumbsDown,
    Preset1,
    Preset2,
    Preset3,
    Preset4,
    Preset5,
    Preset6,
}

/// Preset keys indexed by `preset number - 1`
const PRESETS: [Key; 6] = [
    Key::Preset1,
    Key::Preset2,
    Key::Preset3,
    Key::Preset4,
    Key::Preset5,
    Key::Preset6,
];

impl Key {
    /// Canonical wire name, as it appears in the element text
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Play => "PLAY",
            Key::Pause => "PAUSE",
            Key::Power => "POWER",
            Key::PrevTrack => "PREV_TRACK",
            Key::NextTrack => "NEXT_TRACK",
            Key::ThumbsUp => "THUMBS_UP",
            Key::ThumbsDown => "THUMBS_DOWN",
            Key::Preset1 => "PRESET_1",
            Key::Preset2 => "PRESET_2",
            Key::Preset3 => "PRESET_3",
            Key::Preset4 => "PRESET_4",
            Key::Preset5 => "PRESET_5",
            Key::Preset6 => "PRESET_6",
        }
    }

    /// Preset key for a preset number in `1..=6`
    pub fn preset(number: i64) -> Result<Key, ValidationError> {
        let number = check_range("preset", number, 1..=6)?;
        Ok(PRESETS[(number - 1) as usize])
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase of a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Press,
    Release,
}

impl KeyState {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyState::Press => "press",
            KeyState::Release => "release",
        }
    }
}

/// Build the XML body for one key event
///
/// Produces e.g. `<key state="press" sender="Gabbo">PLAY</key>`.
pub fn key_payload(key: Key, state: KeyState) -> String {
    format!(
        r#"<key state="{}" sender="{}">{}</key>"#,
        state.as_str(),
        SENDER,
        key.as_str()
    )
}
