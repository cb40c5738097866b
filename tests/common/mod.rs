//! Shared test utilities.

#![allow(dead_code)]

pub mod mock_gemini;

use std::path::Path;
use std::sync::{Arc, Mutex};

use autodraft::app::App;
use autodraft::config::Config;
use autodraft::error::{AppError, Result};
use autodraft::models::{Format, Tone};
use autodraft::services::Desktop;

/// Records clipboard writes and opened URLs instead of touching the system.
#[derive(Clone, Default)]
pub struct FakeDesktop {
    pub clipboard: Arc<Mutex<Option<String>>>,
    pub opened: Arc<Mutex<Vec<String>>>,
    pub fail_clipboard: bool,
    pub fail_opener: bool,
}

impl FakeDesktop {
    pub fn failing_clipboard() -> Self {
        Self {
            fail_clipboard: true,
            ..Self::default()
        }
    }

    pub fn failing_opener() -> Self {
        Self {
            fail_opener: true,
            ..Self::default()
        }
    }

    pub fn clipboard_text(&self) -> Option<String> {
        self.clipboard.lock().unwrap().clone()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Desktop for FakeDesktop {
    fn set_clipboard(&mut self, text: &str) -> Result<()> {
        if self.fail_clipboard {
            return Err(AppError::Clipboard("no display".to_string()));
        }
        *self.clipboard.lock().unwrap() = Some(text.to_string());
        Ok(())
    }

    fn open_url(&mut self, url: &str) -> Result<()> {
        if self.fail_opener {
            return Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no mail handler",
            )));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Config pointing at `base_url` with downloads going to `download_dir`.
pub fn test_config(base_url: &str, download_dir: &Path) -> Config {
    Config {
        gemini_api_key: Some("test-key".to_string()),
        model: "gemini-test".to_string(),
        api_base_url: base_url.to_string(),
        request_timeout_secs: 5,
        download_dir: download_dir.to_string_lossy().to_string(),
        ..Config::default()
    }
}

pub fn test_app(config: &Config, desktop: &FakeDesktop) -> App {
    App::with_desktop(config, Box::new(desktop.clone())).unwrap()
}

/// An app with content already generated, without any network traffic.
pub fn app_with_content(config: &Config, desktop: &FakeDesktop, text: &str) -> App {
    let mut app = test_app(config, desktop);
    app.generated = Some(autodraft::models::GeneratedContent {
        text: text.to_string(),
        model_version: "gemini-test".to_string(),
        generated_at: chrono::Utc::now(),
    });
    app
}

pub fn fill_form(app: &mut App, input: &str, tone: Tone, format: Format) {
    app.input_text = input.to_string();
    app.tone = Some(tone);
    app.format = Some(format);
}
