use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Formal,
    Friendly,
    Urgent,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Formal, Tone::Friendly, Tone::Urgent];

    /// Wording used inside the prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Friendly => "friendly",
            Tone::Urgent => "urgent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Friendly => "Friendly",
            Tone::Urgent => "Urgent",
        }
    }

    /// Next tone in picker order; an unset picker starts at the first one.
    pub fn cycle(current: Option<Self>) -> Self {
        match current {
            None => Tone::Formal,
            Some(Tone::Formal) => Tone::Friendly,
            Some(Tone::Friendly) => Tone::Urgent,
            Some(Tone::Urgent) => Tone::Formal,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tone '{}' (expected formal, friendly or urgent)", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Email,
    StatusReport,
    Summary,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Email, Format::StatusReport, Format::Summary];

    /// Wording used inside the prompt.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Email => "email",
            Format::StatusReport => "status report",
            Format::Summary => "summary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Format::Email => "Email",
            Format::StatusReport => "Status Report",
            Format::Summary => "Summary",
        }
    }

    pub fn cycle(current: Option<Self>) -> Self {
        match current {
            None => Format::Email,
            Some(Format::Email) => Format::StatusReport,
            Some(Format::StatusReport) => Format::Summary,
            Some(Format::Summary) => Format::Email,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], " ");
        Format::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                format!(
                    "unknown format '{}' (expected email, status-report or summary)",
                    s
                )
            })
    }
}

/// A validated request: non-blank text with both selections made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub input: String,
    pub tone: Tone,
    pub format: Format,
}

impl GenerationRequest {
    pub fn new(
        input: &str,
        tone: Option<Tone>,
        format: Option<Format>,
    ) -> Result<Self, ValidationError> {
        if input.trim().is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        let (Some(tone), Some(format)) = (tone, format) else {
            return Err(ValidationError::MissingSelection);
        };

        Ok(Self {
            input: input.to_string(),
            tone,
            format,
        })
    }

    pub fn prompt(&self) -> String {
        format!(
            "You are a professional content generator. Convert the user's input into a well-structured {format} with a {tone} tone. Format the output professionally and make it ready to use.\n\n\
Please convert these bullet points/notes into a {format} with a {tone} tone:\n\n\
{input}",
            format = self.format,
            tone = self.tone,
            input = self.input,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContent {
    pub text: String,
    pub model_version: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    NotGenerated,
    Generating,
    Generated,
    Failed,
    NoApiKey,
}
