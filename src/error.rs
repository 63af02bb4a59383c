use std::path::PathBuf;

use thiserror::Error;

/// Why an analysis response from the provider was rejected.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The response was not valid JSON.
    #[error("failed to parse the AI's response, the format was invalid: {0}")]
    InvalidFormat(#[source] serde_json::Error),

    /// Valid JSON, but a required field is missing or not a string.
    #[error("AI response did not match the expected format: {0}")]
    UnexpectedShape(#[source] serde_json::Error),
}

impl AnalysisError {
    /// The single message shown to the user for any rejected analysis.
    /// Every failure is treated as retryable by resubmitting.
    pub fn user_message(&self) -> String {
        format!("An error occurred while analyzing the code. Please try again. (Details: {self})")
    }
}

/// Errors from compiling Typst markup into PDF or SVG.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to save last analyzed code to `{path}`: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
