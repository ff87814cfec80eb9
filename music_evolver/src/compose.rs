// Composition driver: genre + key + mode + emotion -> timed notes and tempo.
//
// The piece is `generations` passes over the genre's chord progression. Each
// chord contributes a block triad followed by a short melody fragment evolved
// from the previous fragment's last note, and advances the clock by one
// chord slot. Notes are emitted in strict chronological emission order
// (triad first, then its melody notes by ascending onset), which streaming
// consumers rely on.
//
// All randomness comes from the caller's `SeededRng`: one draw for the
// melody seed, then one per melody step. Same seed, same piece.
//
// See also: evolve.rs for the walk, midi.rs and plot.rs for the consumers of
// `Composition`.

use log::{debug, info, warn};
use music_evolver_prng::SeededRng;
use serde::{Deserialize, Serialize};

use crate::config::ComposerConfig;
use crate::error::{Error, Result};
use crate::evolve::{evolve, random_scale_pitch};
use crate::scale::{resolve_chord, resolve_scale};
use crate::theory::{Emotion, Genre, Key, Mode, progression_for_genre, tempo_for_emotion};

/// Which line of the arrangement a note belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteRole {
    Chord,
    Melody,
}

/// A note placed on the timeline. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedNote {
    pub pitch: u8,
    pub start: f64,
    pub duration: f64,
    pub velocity: u8,
    pub role: NoteRole,
}

impl TimedNote {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// A finished piece: notes in emission order plus the tempo they play at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub notes: Vec<TimedNote>,
    pub tempo_bpm: u32,
}

impl Composition {
    /// `(onset, pitch)` of every melody note, in emission order.
    pub fn melody_points(&self) -> Vec<(f64, u8)> {
        self.notes
            .iter()
            .filter(|n| n.role == NoteRole::Melody)
            .map(|n| (n.start, n.pitch))
            .collect()
    }

    /// Time at which the last note stops sounding.
    pub fn duration_seconds(&self) -> f64 {
        self.notes.iter().map(TimedNote::end).fold(0.0, f64::max)
    }
}

/// The five inputs a presentation layer supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeRequest {
    pub genre: String,
    pub key: Key,
    pub mode: Mode,
    pub emotion: String,
    pub generations: u32,
}

impl Default for ComposeRequest {
    fn default() -> Self {
        Self {
            genre: Genre::Pop.name().to_string(),
            key: Key::C,
            mode: Mode::Major,
            emotion: Emotion::Happy.name().to_string(),
            generations: 4,
        }
    }
}

/// Compose a piece with the default note timing.
pub fn generate(
    genre: &str,
    key: Key,
    mode: Mode,
    emotion: &str,
    generations: u32,
    rng: &mut SeededRng,
) -> Result<Composition> {
    let request = ComposeRequest {
        genre: genre.to_string(),
        key,
        mode,
        emotion: emotion.to_string(),
        generations,
    };
    generate_with_config(&request, &ComposerConfig::default(), rng)
}

/// Compose a piece, taking note timing and velocities from `config`.
pub fn generate_with_config(
    request: &ComposeRequest,
    config: &ComposerConfig,
    rng: &mut SeededRng,
) -> Result<Composition> {
    if request.generations == 0 {
        return Err(Error::InvalidGenerations(request.generations));
    }
    config.validate()?;

    if Genre::from_name(&request.genre).is_none() {
        warn!(
            "Unknown genre '{}', using the default I-IV-V-I progression",
            request.genre
        );
    }
    if Emotion::from_name(&request.emotion).is_none() {
        warn!(
            "Unknown emotion '{}', using the default tempo",
            request.emotion
        );
    }

    let tempo_bpm = tempo_for_emotion(&request.emotion);
    let scale = resolve_scale(request.key, request.mode);
    let progression = progression_for_genre(&request.genre);

    let mut unknown: Vec<&str> = progression
        .iter()
        .copied()
        .filter(|s| !request.mode.knows_symbol(s))
        .collect();
    unknown.sort_unstable();
    unknown.dedup();
    if !unknown.is_empty() {
        warn!(
            "Chord symbol(s) {:?} not in the {} vocabulary, playing the tonic triad instead",
            unknown,
            request.mode.name()
        );
    }

    let chord_count = request.generations as usize * progression.len();
    let mut notes = Vec::with_capacity(chord_count * (3 + config.melody_notes_per_chord));
    let mut melody = vec![random_scale_pitch(&scale, rng)];
    let mut time = 0.0_f64;

    for generation in 0..request.generations {
        debug!(
            "Generation {}/{}: {} chords from t={:.2}s",
            generation + 1,
            request.generations,
            progression.len(),
            time
        );
        for &symbol in progression {
            let triad = resolve_chord(symbol, request.key, request.mode);
            for pitch in triad.pitches() {
                notes.push(TimedNote {
                    pitch,
                    start: time,
                    duration: config.chord_duration,
                    velocity: config.chord_velocity,
                    role: NoteRole::Chord,
                });
            }

            melody = evolve(&melody, &scale, config.melody_notes_per_chord, rng)?;
            for (i, &pitch) in melody.iter().enumerate() {
                notes.push(TimedNote {
                    pitch,
                    start: time + i as f64 * config.melody_spacing,
                    duration: config.melody_duration,
                    velocity: config.melody_velocity,
                    role: NoteRole::Melody,
                });
            }

            time += config.seconds_per_chord;
        }
    }

    info!(
        "Composed {} notes over {} generation(s) at {} bpm",
        notes.len(),
        request.generations,
        tempo_bpm
    );
    Ok(Composition { notes, tempo_bpm })
}
