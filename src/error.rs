use thiserror::Error;

/// Errors surfaced by the analysis core. Validation happens before any
/// processing begins; nothing here is retried internally.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Invalid filter parameters or an unsupported channel layout.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Source samples or a record file could not be obtained.
    #[error("audio data unavailable: {0}")]
    DataUnavailable(String),

    /// A playback-synced lookup landed past the stored sequence.
    #[error("window index {index} past end of sequence ({len} records)")]
    IndexOutOfRange { index: usize, len: usize },
}
