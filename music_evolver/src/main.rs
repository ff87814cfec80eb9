// Music Evolver — CLI entry point.
//
// Composes a piece from genre/key/mode/emotion, writes it to MIDI, and
// optionally plots the melody line to SVG.
// The pipeline: tempo + scale + progression lookup → per-chord melody
// evolution → MIDI (+ SVG) output.
//
// Usage:
//   cargo run -p music_evolver -- [output.mid] [--svg PATH] [--genre G]
//     [--key K] [--mode M] [--emotion E] [--generations N] [--seed N]
//     [--config PATH]
//
// Genres: Pop, Jazz, Rock, Classical (anything else plays I-IV-V-I)
// Emotions: Happy, Sad, Mysterious, Excited (anything else is 100 bpm)
// Set RUST_LOG=debug for per-generation progress.

use music_evolver::SeededRng;
use music_evolver::compose::{ComposeRequest, generate_with_config};
use music_evolver::config::ComposerConfig;
use music_evolver::midi::write_midi;
use music_evolver::plot::write_melody_svg;
use music_evolver::scale::resolve_scale;
use music_evolver::theory::{Emotion, Genre, Key, Mode, progression_for_genre};
use std::path::Path;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("generated_music.mid");
    let svg_path: Option<String> = flag_or_exit(&args, "--svg");
    let seed: Option<u64> = flag_or_exit(&args, "--seed");
    let config_path: Option<String> = flag_or_exit(&args, "--config");

    let defaults = ComposeRequest::default();
    let key_name: String = flag_or_exit(&args, "--key").unwrap_or_else(|| defaults.key.name().to_string());
    let mode_name: String = flag_or_exit(&args, "--mode").unwrap_or_else(|| defaults.mode.name().to_string());
    let request = ComposeRequest {
        genre: flag_or_exit(&args, "--genre").unwrap_or(defaults.genre),
        key: parse_key(&key_name),
        mode: parse_mode(&mode_name),
        emotion: flag_or_exit(&args, "--emotion").unwrap_or(defaults.emotion),
        generations: flag_or_exit(&args, "--generations").unwrap_or(defaults.generations),
    };

    let config = match config_path {
        Some(path) => match ComposerConfig::load(Path::new(&path)) {
            Ok(c) => c.sanitized(),
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => ComposerConfig::default(),
    };

    let (mut rng, seed) = match seed {
        Some(s) => (SeededRng::new(s), s),
        None => SeededRng::from_entropy(),
    };

    println!("=== Music Evolver ===");
    println!("Output: {}", output_path);
    println!("Genre: {}{}", request.genre, known_or_default(Genre::from_name(&request.genre).is_some()));
    println!("Key: {} {}", request.key.name(), request.mode.name());
    println!("Emotion: {}{}", request.emotion, known_or_default(Emotion::from_name(&request.emotion).is_some()));
    println!("Generations: {}", request.generations);
    println!("Seed: {}", seed);
    println!();

    println!("[1/3] Composing...");
    println!("  Progression: {}", progression_for_genre(&request.genre).join(" - "));
    println!("  Scale: {:?}", resolve_scale(request.key, request.mode).pitches());
    let composition = match generate_with_config(&request, &config, &mut rng) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("  Error: {}", e);
            std::process::exit(1);
        }
    };
    println!("  {} notes ({} melody) at {} bpm",
        composition.notes.len(), composition.melody_points().len(), composition.tempo_bpm);

    println!("[2/3] Writing MIDI to {}...", output_path);
    if let Err(e) = write_midi(&composition, Path::new(output_path)) {
        eprintln!("  Error writing MIDI: {}", e);
        std::process::exit(1);
    }
    println!("  Done! Duration: {:.1}s", composition.duration_seconds());

    match svg_path {
        Some(path) => {
            println!("[3/3] Plotting melody to {}...", path);
            if let Err(e) = write_melody_svg(&composition, Path::new(&path)) {
                eprintln!("  Error writing plot: {}", e);
                std::process::exit(1);
            }
        }
        None => println!("[3/3] Skipping melody plot (pass --svg PATH to enable)."),
    }

    println!();
    println!("Open {} in your favorite DAW, MuseScore, or any MIDI player to listen!", output_path);
}

fn known_or_default(known: bool) -> &'static str {
    if known { "" } else { " (unknown, using default)" }
}

fn parse_key(name: &str) -> Key {
    Key::from_name(name).unwrap_or_else(|| {
        eprintln!("Unknown key '{}'. Expected one of C, C#, D, ... B.", name);
        std::process::exit(1);
    })
}

fn parse_mode(name: &str) -> Mode {
    Mode::from_name(name).unwrap_or_else(|| {
        eprintln!("Unknown mode '{}'. Using Major.", name);
        Mode::Major
    })
}

/// Look up `flag`'s value. An absent flag is `Ok(None)`; a flag with a
/// missing or unparsable value is an error naming both.
fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>, String> {
    let Some(i) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    let value = args.get(i + 1)
        .ok_or_else(|| format!("{} requires a value", flag))?;
    value.parse()
        .map(Some)
        .map_err(|_| format!("Invalid value '{}' for {}", value, flag))
}

/// `parse_flag`, exiting with status 1 on a bad value.
fn flag_or_exit<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    parse_flag(args, flag).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("generate")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_absent_flag_is_none() {
        let a = args(&["out.mid", "--seed", "7"]);
        assert_eq!(parse_flag::<u32>(&a, "--generations"), Ok(None));
    }

    #[test]
    fn test_valid_values_parse() {
        let a = args(&["--generations", "3", "--seed", "42", "--genre", "Jazz"]);
        assert_eq!(parse_flag::<u32>(&a, "--generations"), Ok(Some(3)));
        assert_eq!(parse_flag::<u64>(&a, "--seed"), Ok(Some(42)));
        assert_eq!(parse_flag::<String>(&a, "--genre"), Ok(Some("Jazz".to_string())));
    }

    #[test]
    fn test_negative_generations_is_an_error() {
        let a = args(&["o.mid", "--generations", "-1", "--seed", "1"]);
        let err = parse_flag::<u32>(&a, "--generations").unwrap_err();
        assert!(err.contains("--generations") && err.contains("-1"), "{err}");
    }

    #[test]
    fn test_non_numeric_values_are_errors() {
        let a = args(&["--generations", "two", "--seed", "abc"]);
        assert!(parse_flag::<u32>(&a, "--generations").is_err());
        let err = parse_flag::<u64>(&a, "--seed").unwrap_err();
        assert!(err.contains("abc"), "{err}");
    }

    #[test]
    fn test_trailing_flag_without_value_is_an_error() {
        let a = args(&["out.mid", "--seed"]);
        let err = parse_flag::<u64>(&a, "--seed").unwrap_err();
        assert!(err.contains("--seed requires a value"), "{err}");
    }
}
