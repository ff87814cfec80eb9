// Theory tables: keys, modes, roman-numeral degree tables, genre
// progressions, and the emotion-to-tempo table.
//
// Everything here is constant data behind total lookup functions. Where an
// unknown name has a documented default (unknown chord symbol -> tonic,
// unknown genre -> I-IV-V-I, unknown emotion -> 100 bpm), the lookup returns
// the default directly instead of an `Option`, so the fallback policy is part
// of the function's signature rather than something each caller re-decides.
//
// Used by scale.rs to build concrete pitches and by compose.rs for the
// per-request progression and tempo.

use serde::{Deserialize, Serialize};

/// Octave that anchors the tonic of every scale and chord (C4 = MIDI 60).
pub const TONIC_OCTAVE: u8 = 4;

/// Progression used when the requested genre is unknown.
pub const FALLBACK_PROGRESSION: &[&str] = &["I", "IV", "V", "I"];

/// Tempo used when the requested emotion is unknown.
pub const DEFAULT_TEMPO: u32 = 100;

/// One of the twelve pitch classes, spelled with sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl Key {
    pub const ALL: [Key; 12] = [
        Key::C,
        Key::Cs,
        Key::D,
        Key::Ds,
        Key::E,
        Key::F,
        Key::Fs,
        Key::G,
        Key::Gs,
        Key::A,
        Key::As,
        Key::B,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Key::C => "C",
            Key::Cs => "C#",
            Key::D => "D",
            Key::Ds => "D#",
            Key::E => "E",
            Key::F => "F",
            Key::Fs => "F#",
            Key::G => "G",
            Key::Gs => "G#",
            Key::A => "A",
            Key::As => "A#",
            Key::B => "B",
        }
    }

    /// Pitch class, 0 (C) through 11 (B).
    pub fn pitch_class(self) -> u8 {
        self as u8
    }

    /// Parse a key name such as "C", "f#", or "Bb".
    ///
    /// Flats are accepted and mapped to their sharp enharmonic. Returns `None`
    /// for anything that isn't a pitch class; the caller decides what to do.
    pub fn from_name(name: &str) -> Option<Key> {
        let mut chars = name.trim().chars();
        let letter = chars.next()?.to_ascii_uppercase();
        let natural: i8 = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        let accidental: i8 = match chars.as_str() {
            "" => 0,
            "#" | "s" | "S" => 1,
            "b" => -1,
            _ => return None,
        };
        let pc = (natural + accidental).rem_euclid(12) as usize;
        Some(Key::ALL[pc])
    }

    /// Absolute (MIDI) pitch of this key in the given octave.
    ///
    /// Follows scientific pitch notation: C4 = 60, A4 = 69.
    pub fn midi_number(self, octave: u8) -> u8 {
        (octave + 1) * 12 + self.pitch_class()
    }
}

/// Major or (natural) minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Major,
    Minor,
}

/// Roman-numeral symbol to semitone offset from the tonic, major mode.
const MAJOR_DEGREES: [(&str, u8); 7] = [
    ("I", 0),
    ("ii", 2),
    ("iii", 4),
    ("IV", 5),
    ("V", 7),
    ("vi", 9),
    ("bVII", 10),
];

/// Roman-numeral symbol to semitone offset from the tonic, minor mode.
const MINOR_DEGREES: [(&str, u8); 7] = [
    ("i", 0),
    ("ii", 2),
    ("III", 3),
    ("iv", 5),
    ("v", 7),
    ("VI", 8),
    ("bVII", 10),
];

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Major, Mode::Minor];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "Major",
            Mode::Minor => "Minor",
        }
    }

    /// Case-insensitive parse of "Major" / "Minor".
    pub fn from_name(name: &str) -> Option<Mode> {
        Mode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Semitone intervals from the tonic to each of the 7 scale degrees.
    pub fn intervals(self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }

    /// Root, third, fifth intervals of the triad built on any degree.
    ///
    /// Every chord in a mode uses the same quality: all major triads in
    /// Major, all minor triads in Minor.
    pub fn triad_intervals(self) -> [u8; 3] {
        match self {
            Mode::Major => [0, 4, 7],
            Mode::Minor => [0, 3, 7],
        }
    }

    /// The roman-numeral vocabulary of this mode.
    pub fn degree_table(self) -> &'static [(&'static str, u8)] {
        match self {
            Mode::Major => &MAJOR_DEGREES,
            Mode::Minor => &MINOR_DEGREES,
        }
    }

    /// Semitone offset of a chord symbol from the tonic.
    ///
    /// Symbols outside this mode's vocabulary resolve to the tonic (0). This
    /// includes upper-case major symbols like "IV" in Minor mode.
    pub fn degree_offset(self, symbol: &str) -> u8 {
        self.degree_table()
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|&(_, offset)| offset)
            .unwrap_or(0)
    }

    /// Whether `symbol` is part of this mode's vocabulary.
    pub fn knows_symbol(self, symbol: &str) -> bool {
        self.degree_table().iter().any(|(s, _)| *s == symbol)
    }
}

const POP_PROGRESSIONS: &[&[&str]] = &[&["I", "V", "vi", "IV"], &["I", "vi", "IV", "V"]];
const JAZZ_PROGRESSIONS: &[&[&str]] = &[&["ii", "V", "I", "vi"]];
const ROCK_PROGRESSIONS: &[&[&str]] = &[&["I", "IV", "V", "I"], &["I", "bVII", "IV", "I"]];
const CLASSICAL_PROGRESSIONS: &[&[&str]] = &[
    &["I", "IV", "V", "I"],
    &["I", "V", "vi", "iii", "IV", "I"],
];

/// Genres with built-in chord progressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Pop,
    Jazz,
    Rock,
    Classical,
}

impl Genre {
    pub const ALL: [Genre; 4] = [Genre::Pop, Genre::Jazz, Genre::Rock, Genre::Classical];

    pub fn name(self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Jazz => "Jazz",
            Genre::Rock => "Rock",
            Genre::Classical => "Classical",
        }
    }

    /// Exact-match lookup by display name.
    pub fn from_name(name: &str) -> Option<Genre> {
        Genre::ALL.into_iter().find(|g| g.name() == name)
    }

    /// Every progression variant for this genre, in table order.
    pub fn progressions(self) -> &'static [&'static [&'static str]] {
        match self {
            Genre::Pop => POP_PROGRESSIONS,
            Genre::Jazz => JAZZ_PROGRESSIONS,
            Genre::Rock => ROCK_PROGRESSIONS,
            Genre::Classical => CLASSICAL_PROGRESSIONS,
        }
    }

    /// The progression the composer plays: always the first variant.
    pub fn primary_progression(self) -> &'static [&'static str] {
        self.progressions()[0]
    }
}

/// Chord progression for a genre name, or [`FALLBACK_PROGRESSION`] if the
/// name isn't a known genre.
pub fn progression_for_genre(name: &str) -> &'static [&'static str] {
    Genre::from_name(name)
        .map(Genre::primary_progression)
        .unwrap_or(FALLBACK_PROGRESSION)
}

/// Emotions with a fixed tempo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    Happy,
    Sad,
    Mysterious,
    Excited,
}

impl Emotion {
    pub const ALL: [Emotion; 4] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Mysterious,
        Emotion::Excited,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Mysterious => "Mysterious",
            Emotion::Excited => "Excited",
        }
    }

    pub fn from_name(name: &str) -> Option<Emotion> {
        Emotion::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Tempo in beats per minute.
    pub fn tempo(self) -> u32 {
        match self {
            Emotion::Happy => 120,
            Emotion::Sad => 70,
            Emotion::Mysterious => 90,
            Emotion::Excited => 140,
        }
    }
}

/// Tempo for an emotion name, or [`DEFAULT_TEMPO`] if the name is unknown.
pub fn tempo_for_emotion(name: &str) -> u32 {
    Emotion::from_name(name)
        .map(Emotion::tempo)
        .unwrap_or(DEFAULT_TEMPO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_midi_numbers() {
        assert_eq!(Key::C.midi_number(4), 60);
        assert_eq!(Key::A.midi_number(4), 69);
        assert_eq!(Key::B.midi_number(4), 71);
        assert_eq!(Key::C.midi_number(0), 12);
    }

    #[test]
    fn test_key_names_roundtrip() {
        for key in Key::ALL {
            assert_eq!(Key::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn test_key_flats_and_case() {
        assert_eq!(Key::from_name("Bb"), Some(Key::As));
        assert_eq!(Key::from_name("db"), Some(Key::Cs));
        assert_eq!(Key::from_name("Cb"), Some(Key::B));
        assert_eq!(Key::from_name("f#"), Some(Key::Fs));
        assert_eq!(Key::from_name("H"), None);
        assert_eq!(Key::from_name(""), None);
        assert_eq!(Key::from_name("C##"), None);
    }

    #[test]
    fn test_degree_tables_are_total() {
        assert_eq!(Mode::Major.degree_offset("vi"), 9);
        assert_eq!(Mode::Minor.degree_offset("VI"), 8);
        assert_eq!(Mode::Major.degree_offset("bVII"), 10);
        // Unknown or other-mode symbols fall back to the tonic.
        assert_eq!(Mode::Major.degree_offset("vii°"), 0);
        assert_eq!(Mode::Minor.degree_offset("IV"), 0);
        assert_eq!(Mode::Minor.degree_offset("V"), 0);
        assert!(!Mode::Minor.knows_symbol("I"));
        assert!(Mode::Minor.knows_symbol("i"));
    }

    #[test]
    fn test_mode_from_name() {
        assert_eq!(Mode::from_name("major"), Some(Mode::Major));
        assert_eq!(Mode::from_name("Minor"), Some(Mode::Minor));
        assert_eq!(Mode::from_name("Dorian"), None);
    }

    #[test]
    fn test_progression_uses_first_variant() {
        assert_eq!(progression_for_genre("Pop"), &["I", "V", "vi", "IV"]);
        assert_eq!(progression_for_genre("Jazz"), &["ii", "V", "I", "vi"]);
        assert_eq!(Genre::Classical.progressions().len(), 2);
    }

    #[test]
    fn test_unknown_genre_falls_back() {
        assert_eq!(progression_for_genre("Blues"), FALLBACK_PROGRESSION);
        assert_eq!(progression_for_genre(""), &["I", "IV", "V", "I"]);
    }

    #[test]
    fn test_emotion_tempos() {
        assert_eq!(tempo_for_emotion("Happy"), 120);
        assert_eq!(tempo_for_emotion("Sad"), 70);
        assert_eq!(tempo_for_emotion("Mysterious"), 90);
        assert_eq!(tempo_for_emotion("Excited"), 140);
        assert_eq!(tempo_for_emotion("Melancholic"), DEFAULT_TEMPO);
    }
}
