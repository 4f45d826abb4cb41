//! Piano key classification
//!
//! Keys are numbered 1-88 from the low A0. Adding 20 gives the MIDI note
//! number, whose value mod 12 is the chromatic position (C = 0).

use serde::{Deserialize, Serialize};

/// Lowest key on a standard keyboard
pub const FIRST_KEY: u32 = 1;

/// Highest key on a standard keyboard
pub const LAST_KEY: u32 = 88;

/// Offset from key number to MIDI note number
const MIDI_OFFSET: u32 = 20;

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Which sides of a white key carry a shoulder step cut for a neighbouring black key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShoulderType {
    None,
    Left,
    Right,
    Both,
}

impl ShoulderType {
    pub fn has_left(self) -> bool {
        matches!(self, ShoulderType::Left | ShoulderType::Both)
    }

    pub fn has_right(self) -> bool {
        matches!(self, ShoulderType::Right | ShoulderType::Both)
    }
}

impl std::fmt::Display for ShoulderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShoulderType::None => write!(f, "none"),
            ShoulderType::Left => write!(f, "left"),
            ShoulderType::Right => write!(f, "right"),
            ShoulderType::Both => write!(f, "both"),
        }
    }
}

/// Chromatic position of a key, C = 0
fn chroma(key: u32) -> usize {
    ((key + MIDI_OFFSET) % 12) as usize
}

/// Note name of a key without octave, e.g. `"A"` for key 1
pub fn note_name(key: u32) -> &'static str {
    NOTE_NAMES[chroma(key)]
}

/// True if the key is a natural (white) key
pub fn is_white_key(key: u32) -> bool {
    !note_name(key).ends_with('#')
}

/// Shoulder topology of a key
///
/// Key 1 has no left neighbour and key 88 has no right neighbour, so both are
/// special-cased before the note rules apply.
pub fn key_shoulders(key: u32) -> ShoulderType {
    if key == FIRST_KEY {
        return ShoulderType::Right;
    }
    if key == LAST_KEY {
        return ShoulderType::None;
    }

    match note_name(key) {
        "B" | "E" => ShoulderType::Left,
        "F" | "C" => ShoulderType::Right,
        "D" | "G" | "A" => ShoulderType::Both,
        _ => ShoulderType::None,
    }
}
