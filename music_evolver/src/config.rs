// Data-driven note timing configuration.
//
// `ComposerConfig` holds the velocities, durations, and spacing that
// compose.rs uses when laying chords and melody fragments onto the timeline.
// The defaults reproduce the standard arrangement: a 0.9 s chord at
// velocity 70 every second, with four 0.2 s melody notes at velocity 100
// spaced a quarter second apart.
//
// Loaded from JSON when the `generate` binary is given `--config`. Every field
// has a default, so a config file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Velocity (0–127) of every chord tone.
    pub chord_velocity: u8,
    /// How long each chord sounds, in seconds.
    pub chord_duration: f64,
    /// Velocity (0–127) of every melody note.
    pub melody_velocity: u8,
    /// How long each melody note sounds, in seconds.
    pub melody_duration: f64,
    /// Gap between consecutive melody note onsets, in seconds.
    pub melody_spacing: f64,
    /// Number of melody notes evolved for each chord.
    pub melody_notes_per_chord: usize,
    /// Time between chord onsets, in seconds.
    pub seconds_per_chord: f64,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            chord_velocity: 70,
            chord_duration: 0.9,
            melody_velocity: 100,
            melody_duration: 0.2,
            melody_spacing: 0.25,
            melody_notes_per_chord: 4,
            seconds_per_chord: 1.0,
        }
    }
}

impl ComposerConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Check the values that drive iteration counts and the timeline.
    ///
    /// Times must be finite and non-negative so notes stay in emission order,
    /// and each chord needs at least one melody note.
    pub fn validate(&self) -> Result<()> {
        if self.melody_notes_per_chord == 0 {
            return Err(Error::InvalidMelodyLength(self.melody_notes_per_chord));
        }
        let timings = [
            ("chord_duration", self.chord_duration),
            ("melody_duration", self.melody_duration),
            ("melody_spacing", self.melody_spacing),
            ("seconds_per_chord", self.seconds_per_chord),
        ];
        for (field, value) in timings {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidTiming { field, value });
            }
        }
        Ok(())
    }

    /// Clamp velocities into the MIDI range.
    pub fn sanitized(mut self) -> Self {
        self.chord_velocity = self.chord_velocity.min(127);
        self.melody_velocity = self.melody_velocity.min(127);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = ComposerConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let restored: ComposerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{ "chord_velocity": 55, "melody_notes_per_chord": 8 }"#;
        let config: ComposerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.chord_velocity, 55);
        assert_eq!(config.melody_notes_per_chord, 8);
        assert_eq!(config.melody_velocity, 100);
        assert_eq!(config.seconds_per_chord, 1.0);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("composer.json");
        std::fs::write(&path, r#"{ "melody_spacing": 0.125 }"#).unwrap();
        let config = ComposerConfig::load(&path).unwrap();
        assert_eq!(config.melody_spacing, 0.125);
        assert_eq!(config.chord_duration, 0.9);
    }

    #[test]
    fn load_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(ComposerConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(ComposerConfig::load(&path), Err(Error::Io(_))));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(ComposerConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_and_non_finite_times() {
        let negative = ComposerConfig {
            melody_spacing: -0.25,
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(Error::InvalidTiming { field: "melody_spacing", .. })
        ));

        let nan = ComposerConfig {
            seconds_per_chord: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(Error::InvalidTiming { field: "seconds_per_chord", .. })
        ));

        let infinite = ComposerConfig {
            chord_duration: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            infinite.validate(),
            Err(Error::InvalidTiming { field: "chord_duration", .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_melody_segment() {
        let config = ComposerConfig {
            melody_notes_per_chord: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidMelodyLength(0))));
    }

    #[test]
    fn sanitized_clamps_velocity() {
        let config = ComposerConfig {
            chord_velocity: 200,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.chord_velocity, 127);
        assert_eq!(config.melody_velocity, 100);
    }
}
