use thiserror::Error;

/// Why a generation request could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some bullet points or task updates to generate content.")]
    EmptyInput,

    #[error("Please select both tone and format for generation.")]
    MissingSelection,
}

impl ValidationError {
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "Input Required",
            ValidationError::MissingSelection => "Selection Required",
        }
    }
}

/// Why a file was refused by the importer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Please upload a .txt or .csv file.")]
    UnsupportedExtension(String),

    #[error("Please upload a file smaller than 5MB.")]
    TooLarge(u64),
}

impl ImportError {
    pub fn title(&self) -> &'static str {
        match self {
            ImportError::UnsupportedExtension(_) => "Invalid File Type",
            ImportError::TooLarge(_) => "File Too Large",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

pub type Result<T> = std::result::Result<T, AppError>;
