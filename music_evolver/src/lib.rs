// Music Evolver
//
// Generates short pieces from a genre's chord progression plus a melody that
// evolves chord by chord as a clamped random walk over the scale. Inputs are
// genre, key, mode, emotion (which sets the tempo), and the number of
// generations (passes over the progression).
//
// Architecture:
// - theory.rs: Keys, modes, roman-numeral degree tables, genre progressions,
//   emotion tempos. Unknown names resolve to documented defaults.
// - scale.rs: Scale and triad resolution to absolute MIDI pitches
// - evolve.rs: Melody evolution (bounded walk over scale-degree indices)
// - compose.rs: Composition driver producing timed chord + melody notes
// - config.rs: Note timing and velocity settings, loadable from JSON
// - midi.rs: Single-track MIDI file output
// - plot.rs: SVG scatter plot of the melody line
// - error.rs: Error type shared by the above
//
// The generator is deterministic given a seed: all randomness comes from a
// caller-owned `SeededRng` from the `music_evolver_prng` crate.

pub mod compose;
pub mod config;
pub mod error;
pub mod evolve;
pub mod midi;
pub mod plot;
pub mod scale;
pub mod theory;

pub use music_evolver_prng::SeededRng;
