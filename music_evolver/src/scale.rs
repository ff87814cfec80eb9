// Scale and chord resolution: symbolic (key, mode, roman numeral) to
// concrete MIDI pitches.
//
// A `Scale` keeps its seven pitches in scale-degree order, not sorted by
// pitch. The melody walk in evolve.rs moves by index, so degree order is the
// invariant that matters even if a pitch ever wraps past 127.
//
// Nothing here fails: unknown chord symbols resolve to the tonic triad (see
// `Mode::degree_offset`).

use crate::theory::{Key, Mode, TONIC_OCTAVE};
use serde::{Deserialize, Serialize};

/// Size of the MIDI pitch space; all resolved pitches wrap modulo this.
const PITCH_SPACE: u16 = 128;

/// Seven absolute pitches in degree order 1..7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scale([u8; 7]);

impl Scale {
    pub fn pitches(&self) -> &[u8; 7] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a scale has exactly seven degrees.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index (0-based degree) of a pitch, if it belongs to this scale.
    pub fn index_of(&self, pitch: u8) -> Option<usize> {
        self.0.iter().position(|&p| p == pitch)
    }

    pub fn contains(&self, pitch: u8) -> bool {
        self.0.contains(&pitch)
    }

    /// Pitch at a degree index. Panics if `index >= 7`.
    pub fn at(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Highest valid degree index.
    pub fn last_index(&self) -> usize {
        self.0.len() - 1
    }
}

/// A three-note chord as absolute pitches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triad {
    pub root: u8,
    pub third: u8,
    pub fifth: u8,
}

impl Triad {
    pub fn pitches(&self) -> [u8; 3] {
        [self.root, self.third, self.fifth]
    }
}

fn wrap_pitch(pitch: u16) -> u8 {
    (pitch % PITCH_SPACE) as u8
}

/// Build the scale for a key and mode, anchored at octave 4.
pub fn resolve_scale(key: Key, mode: Mode) -> Scale {
    let tonic = u16::from(key.midi_number(TONIC_OCTAVE));
    Scale(mode.intervals().map(|iv| wrap_pitch(tonic + u16::from(iv))))
}

/// Resolve a roman-numeral chord symbol to a triad.
///
/// The root is `(tonic + degree offset) % 128`; the third and fifth stack the
/// mode's triad intervals on that root. A symbol missing from the mode's
/// table produces the tonic triad.
pub fn resolve_chord(symbol: &str, key: Key, mode: Mode) -> Triad {
    let tonic = u16::from(key.midi_number(TONIC_OCTAVE));
    let root = wrap_pitch(tonic + u16::from(mode.degree_offset(symbol)));
    let [_, third, fifth] = mode.triad_intervals();
    Triad {
        root,
        third: root + third,
        fifth: root + fifth,
    }
}
