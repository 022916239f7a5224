use lmx_core::settings::SettingsError;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("no candidate #{index} (have {available})")]
    NoSuchCandidate { index: usize, available: usize },
}
