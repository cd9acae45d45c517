use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for scripting against the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DataFileMissing,
    InvalidData,
    ConfigParseError,
    ModuleNotFound,
    TranslationUnavailable,
    InvalidTranslation,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::DataFileMissing => "E1001",
            Self::InvalidData => "E1002",
            Self::ConfigParseError => "E1003",
            Self::ModuleNotFound => "E2001",
            Self::TranslationUnavailable => "E3001",
            Self::InvalidTranslation => "E3002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::DataFileMissing => "Dependency data file not found",
            Self::InvalidData => "Dependency data file is malformed",
            Self::ConfigParseError => "Config file parse error",
            Self::ModuleNotFound => "Module not found",
            Self::TranslationUnavailable => "Translation resource unavailable",
            Self::InvalidTranslation => "Translation resource is malformed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint surfaced next to the error.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::DataFileMissing => {
                Some("Pass --data <path> or set MODMAP_DATA to the extractor's JSON output.")
            }
            Self::InvalidData => {
                Some("The data file must be a JSON object mapping module ids to arrays of ids.")
            }
            Self::ConfigParseError => Some("Fix syntax in .modmap/config.toml and retry."),
            Self::ModuleNotFound => Some("Use `modmap search <text>` to find the exact module id."),
            Self::TranslationUnavailable => {
                Some("Check [translation].source; labels stay untranslated until it loads.")
            }
            Self::InvalidTranslation => {
                Some("Translation files must be a JSON object of string to string.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised at modmap's I/O and lookup seams.
///
/// The graph algorithms themselves never fail; only loading data, config
/// and translation resources, or looking up a module the user typed, can.
#[derive(Debug, thiserror::Error)]
pub enum ModmapError {
    #[error("data file not found: {}", path.display())]
    DataFileMissing { path: PathBuf },

    #[error("invalid dependency data in {}: {reason}", path.display())]
    InvalidData { path: PathBuf, reason: String },

    #[error("failed to parse config {}: {reason}", path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("module not found: {0}")]
    ModuleNotFound(String),

    #[error("translation '{language}' unavailable: {reason}")]
    TranslationUnavailable { language: String, reason: String },

    #[error("translation '{language}' is not a string map: {reason}")]
    InvalidTranslation { language: String, reason: String },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ModmapError {
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::DataFileMissing { .. } => ErrorCode::DataFileMissing,
            Self::InvalidData { .. } => ErrorCode::InvalidData,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Self::ModuleNotFound(_) => ErrorCode::ModuleNotFound,
            Self::TranslationUnavailable { .. } => ErrorCode::TranslationUnavailable,
            Self::InvalidTranslation { .. } => ErrorCode::InvalidTranslation,
            Self::Io { .. } => ErrorCode::InternalUnexpected,
        }
    }

    /// Remediation hint for the error, falling back to the generic message.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or(code.message()).to_string()
    }
}
