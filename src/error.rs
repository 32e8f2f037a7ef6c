use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum KeyviewError {
    // ========================================================================
    // Backend Errors
    // ========================================================================
    #[error("Secret store is unavailable: {details}")]
    #[diagnostic(
        code(keyview::backend::unavailable),
        help(
            "Make sure a Secret Service provider (gnome-keyring, KeePassXC, kwallet) is running on the session bus and that the collection is unlocked"
        )
    )]
    BackendUnavailable { details: String },

    #[error("Failed to fetch the secret for '{label}': {details}")]
    #[diagnostic(
        code(keyview::backend::fetch_failed),
        help("The item may be locked, or the access prompt was dismissed")
    )]
    SecretFetchFailed { label: String, details: String },

    // ========================================================================
    // Terminal & Logging Errors
    // ========================================================================
    #[error("Terminal error: {0}")]
    #[diagnostic(code(keyview::terminal))]
    Terminal(String),

    #[error("Failed to open log file {}", path.display())]
    #[diagnostic(
        code(keyview::log_file),
        help("Check that the parent directory exists and is writable")
    )]
    LogFile {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, KeyviewError>;

impl KeyviewError {
    pub fn backend_unavailable(details: impl std::fmt::Display) -> Self {
        KeyviewError::BackendUnavailable {
            details: details.to_string(),
        }
    }
}
