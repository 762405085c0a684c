use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("API error: {0}")]
    Api(String),

    #[error(
        "Missing API key. Pass --api-key or set one of: GEMINI_API_KEY/GOOGLE_API_KEY (gemini), ANTHROPIC_API_KEY/CLAUDE_API_KEY (claude)"
    )]
    MissingApiKey,

    #[error("Template error: {0}")]
    Template(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Command error: {0}")]
    Command(String),

    #[error("Server error: {0}")]
    Server(String),
}
