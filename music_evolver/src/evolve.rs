// Melody evolution: a bounded random walk over scale-degree indices.
//
// Each call continues from the last pitch of the previous segment and takes
// `length` steps. A step moves the cursor -2..=+2 scale degrees; the index is
// clamped at both ends of the scale, so a walk that reaches the top or
// bottom degree stays there instead of jumping an octave. Every produced
// pitch is a member of the scale by construction.
//
// A cursor pitch that isn't in the scale (e.g. a tail borrowed from a
// different key) is treated as degree 0 rather than rejected.

use crate::error::{Error, Result};
use crate::scale::Scale;
use music_evolver_prng::SeededRng;

/// Degree steps the walk draws from, uniformly.
pub const STEP_CHOICES: [i8; 5] = [-2, -1, 0, 1, 2];

/// Move one step from `cursor` and return the new pitch.
///
/// Deterministic given the step; `evolve` supplies the randomness.
pub fn walk_step(scale: &Scale, cursor: u8, step: i8) -> u8 {
    let index = scale.index_of(cursor).unwrap_or(0) as isize;
    let next = (index + step as isize).clamp(0, scale.last_index() as isize);
    scale.at(next as usize)
}

/// Produce the next `length` melody pitches, continuing from
/// `previous_tail`.
///
/// If the tail is empty the walk starts from a uniformly random scale pitch.
/// Returns `Error::InvalidMelodyLength` for a zero length.
pub fn evolve(
    previous_tail: &[u8],
    scale: &Scale,
    length: usize,
    rng: &mut SeededRng,
) -> Result<Vec<u8>> {
    if length == 0 {
        return Err(Error::InvalidMelodyLength(length));
    }

    let mut cursor = match previous_tail.last() {
        Some(&pitch) => pitch,
        None => random_scale_pitch(scale, rng),
    };

    let mut melody = Vec::with_capacity(length);
    for _ in 0..length {
        let step = STEP_CHOICES[rng.range_usize(0, STEP_CHOICES.len())];
        cursor = walk_step(scale, cursor, step);
        melody.push(cursor);
    }
    Ok(melody)
}

/// A uniformly chosen pitch from the scale.
pub fn random_scale_pitch(scale: &Scale, rng: &mut SeededRng) -> u8 {
    scale.at(rng.range_usize(0, scale.len()))
}
