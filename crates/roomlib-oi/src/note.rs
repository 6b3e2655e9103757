//! Songs and notes.
//!
//! The robot stores up to four songs of up to sixteen notes each. Notes use
//! MIDI numbering (31 = G1 through 127 = G9) and durations are counted in
//! 1/64ths of a second.

use std::time::Duration;

/// Lowest playable MIDI note number.
pub const MIN_NOTE: u8 = 31;
/// Highest playable MIDI note number.
pub const MAX_NOTE: u8 = 127;
/// Number of song slots on the robot (slots `0..=3`).
pub const SONG_SLOTS: u8 = 4;
/// Maximum number of notes in one song.
pub const MAX_SONG_NOTES: usize = 16;
/// Duration ticks per second.
pub const TICKS_PER_SECOND: u32 = 64;

/// A single note. Any number is representable; only `31..=127` is
/// accepted in a [`Song`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Note {
    /// MIDI note number.
    pub number: u8,
    /// Length in 1/64 s.
    pub duration: u8,
}

impl Note {
    pub const fn new(number: u8, duration: u8) -> Self {
        Note { number, duration }
    }

    /// Returns `true` if the note number is in the playable range.
    pub const fn is_valid(&self) -> bool {
        self.number >= MIN_NOTE && self.number <= MAX_NOTE
    }

    pub fn length(&self) -> Duration {
        Duration::from_millis(self.duration as u64 * 1000 / TICKS_PER_SECOND as u64)
    }
}

/// A song destined for one of the robot's song slots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Song {
    pub slot: u8,
    pub notes: Vec<Note>,
}

impl Song {
    pub fn new(slot: u8, notes: impl Into<Vec<Note>>) -> Self {
        Song {
            slot,
            notes: notes.into(),
        }
    }

    /// Total playing time.
    pub fn length(&self) -> Duration {
        let ticks: u64 = self.notes.iter().map(|n| n.duration as u64).sum();
        Duration::from_millis(ticks * 1000 / TICKS_PER_SECOND as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_validity_bounds() {
        assert!(!Note::new(30, 16).is_valid());
        assert!(Note::new(31, 16).is_valid());
        assert!(Note::new(127, 16).is_valid());
        assert!(!Note::new(128, 16).is_valid());
        assert!(!Note::new(0, 0).is_valid());
        assert!(!Note::new(255, 0).is_valid());
    }

    #[test]
    fn note_length() {
        assert_eq!(Note::new(60, 64).length(), Duration::from_secs(1));
        assert_eq!(Note::new(60, 32).length(), Duration::from_millis(500));
    }

    #[test]
    fn song_length_sums_notes() {
        let song = Song::new(0, [Note::new(60, 32), Note::new(62, 32), Note::new(64, 64)]);
        assert_eq!(song.length(), Duration::from_secs(2));
    }
}
