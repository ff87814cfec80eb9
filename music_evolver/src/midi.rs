// MIDI output from compositions.
//
// Converts a Composition into a Standard MIDI File (SMF) for playback in any
// player or DAW. Everything goes on one track (SMF Format 0): track name,
// tempo, a program change to program 0 (acoustic grand) on channel 0, then
// note on/off pairs for both the chords and the melody.
//
// Note times are in seconds; they map to ticks at the composition's tempo.
// Chord tones and melody notes overlap, so events are collected with absolute
// ticks first, sorted, then delta-encoded. At equal ticks note-offs sort before
// note-ons so a repeated pitch re-attacks cleanly.
//
// Uses the `midly` crate for MIDI writing.

use crate::compose::Composition;
use crate::error::Result;
use log::debug;
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use std::path::Path;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Instrument program for the single track.
const PROGRAM: u8 = 0;

const TRACK_NAME: &[u8] = b"Music Evolver";

/// Convert a Composition to SMF bytes.
pub fn composition_to_smf_bytes(composition: &Composition) -> Result<Vec<u8>> {
    let smf = composition_to_smf(composition);
    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    Ok(buf)
}

/// Convert a Composition to MIDI and write it to a file.
pub fn write_midi(composition: &Composition, path: &Path) -> Result<()> {
    let buf = composition_to_smf_bytes(composition)?;
    std::fs::write(path, &buf)?;
    debug!("Wrote {} bytes of MIDI to {}", buf.len(), path.display());
    Ok(())
}

/// Seconds to ticks at the given tempo, rounded to the nearest tick.
fn seconds_to_ticks(seconds: f64, tempo_bpm: u32) -> u32 {
    let beats = seconds * f64::from(tempo_bpm) / 60.0;
    (beats * f64::from(TICKS_PER_QUARTER)).round().max(0.0) as u32
}

/// A note event at an absolute tick, before delta encoding.
#[derive(Debug, Clone, Copy)]
struct TimedEvent {
    tick: u32,
    /// 0 for note-off, 1 for note-on; sorts offs first at equal ticks.
    order: u8,
    message: MidiMessage,
}

/// Convert a Composition to an in-memory SMF.
fn composition_to_smf(composition: &Composition) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));
    let channel = u4::new(0);
    let tempo_bpm = composition.tempo_bpm.max(1);

    let mut track: Track<'static> = Vec::new();
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(TRACK_NAME)),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(60_000_000 / tempo_bpm))),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: u7::new(PROGRAM),
            },
        },
    });

    let mut events = Vec::with_capacity(composition.notes.len() * 2);
    for note in &composition.notes {
        let key = u7::new(note.pitch.min(127));
        let on_tick = seconds_to_ticks(note.start, tempo_bpm);
        let off_tick = seconds_to_ticks(note.end(), tempo_bpm).max(on_tick + 1);
        events.push(TimedEvent {
            tick: on_tick,
            order: 1,
            message: MidiMessage::NoteOn {
                key,
                vel: u7::new(note.velocity.min(127)),
            },
        });
        events.push(TimedEvent {
            tick: off_tick,
            order: 0,
            message: MidiMessage::NoteOff {
                key,
                vel: u7::new(0),
            },
        });
    }
    // Stable sort keeps emission order among simultaneous note-ons.
    events.sort_by_key(|e| (e.tick, e.order));

    let mut last_tick = 0;
    for event in events {
        track.push(TrackEvent {
            delta: u28::new(event.tick - last_tick),
            kind: TrackEventKind::Midi {
                channel,
                message: event.message,
            },
        });
        last_tick = event.tick;
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}
