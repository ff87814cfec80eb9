// Error type for the music evolver.
//
// Only two kinds of failure exist: invalid numeric input (a non-positive
// iteration count or a negative/non-finite timing value), and I/O or parse
// errors from the adapters and config loader. Unknown genres, emotions, and
// chord symbols are not errors; they resolve to defaults in theory.rs.

/// Errors surfaced by composition, export, and config loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("generations must be at least 1 (got {0})")]
    InvalidGenerations(u32),

    #[error("melody segment length must be at least 1 (got {0})")]
    InvalidMelodyLength(usize),

    #[error("{field} must be a finite, non-negative number of seconds (got {value})")]
    InvalidTiming { field: &'static str, value: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
