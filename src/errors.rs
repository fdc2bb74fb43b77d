use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Secure store errors ---
    #[error("Secure store rejected the operation: {0}")]
    Store(String),

    // --- Vault errors ---
    #[error("Vault data unreadable: {0}")]
    Decode(String),

    #[error("Credential '{0}' not found")]
    CredentialNotFound(String),

    #[error("'{0}' matches more than one credential — pick one with `list` and use --at")]
    AmbiguousTitle(String),

    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    // --- Session errors ---
    #[error("Failed to unlock. Please try again.")]
    UnlockRefused,

    #[error("No unlock phrase enrolled — run `passvault auth enroll` first")]
    GateNotEnrolled,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
