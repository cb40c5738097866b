use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::ai::Generator;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    Format, GeneratedContent, GenerationRequest, GenerationStatus, Notification, Tone,
};
use crate::services::{self, Desktop, SystemDesktop};
use crate::tui::{AppAction, InputMode};

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

// Message for a finished generation
pub struct GenerationResult {
    pub result: std::result::Result<(String, String), String>, // (content, model) or error
}

// Message for a finished file import
pub struct ImportResult {
    pub path: PathBuf,
    pub result: Result<Option<String>>,
}

pub struct App {
    // Data
    pub input_text: String,
    pub tone: Option<Tone>,
    pub format: Option<Format>,
    pub generated: Option<GeneratedContent>,

    // UI State
    pub mode: InputMode,
    pub path_input: String,
    pub show_help: bool,
    pub output_scroll: u16,
    pub output_max_scroll: u16,
    pub notifications: Vec<Notification>,
    spinner_index: usize,
    copied_until: Option<Instant>,

    // Async state
    pub is_generating: bool,
    pub is_importing: bool,
    pub status: GenerationStatus,
    generation_rx: mpsc::Receiver<GenerationResult>,
    generation_tx: mpsc::Sender<GenerationResult>,
    import_rx: mpsc::Receiver<ImportResult>,
    import_tx: mpsc::Sender<ImportResult>,

    // Services
    generator: Option<Arc<Generator>>,
    desktop: Box<dyn Desktop>,
    download_dir: PathBuf,
    copied_reset: Duration,
    notification_ttl: Duration,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_desktop(config, Box::new(SystemDesktop::new()))
    }

    pub fn with_desktop(config: &Config, desktop: Box<dyn Desktop>) -> Result<Self> {
        let generator = match config.api_key() {
            Some(key) => Some(Arc::new(Generator::new(key.to_string(), config)?)),
            None => None,
        };

        let (generation_tx, generation_rx) = mpsc::channel(1);
        let (import_tx, import_rx) = mpsc::channel(1);

        Ok(Self {
            input_text: String::new(),
            tone: None,
            format: None,
            generated: None,
            mode: InputMode::Normal,
            path_input: String::new(),
            show_help: false,
            output_scroll: 0,
            output_max_scroll: 0,
            notifications: Vec::new(),
            spinner_index: 0,
            copied_until: None,
            is_generating: false,
            is_importing: false,
            status: if generator.is_some() {
                GenerationStatus::NotGenerated
            } else {
                GenerationStatus::NoApiKey
            },
            generation_rx,
            generation_tx,
            import_rx,
            import_tx,
            generator,
            desktop,
            download_dir: PathBuf::from(&config.download_dir),
            copied_reset: Duration::from_millis(config.copied_reset_ms),
            notification_ttl: Duration::from_millis(config.notification_ttl_ms),
        })
    }

    /// Text of the last successful generation, empty if none yet.
    pub fn generated_content(&self) -> &str {
        self.generated.as_ref().map(|g| g.text.as_str()).unwrap_or("")
    }

    pub fn is_copied(&self) -> bool {
        self.copied_until.is_some_and(|until| Instant::now() < until)
    }

    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.last()
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_index % SPINNER_FRAMES.len()]
    }

    fn notify(&mut self, notification: Notification) {
        if notification.is_error() {
            tracing::warn!("{}: {}", notification.title, notification.description);
        } else {
            tracing::info!("{}: {}", notification.title, notification.description);
        }
        self.notifications.push(notification);
    }

    pub async fn handle_action(&mut self, action: AppAction) -> Result<bool> {
        match action {
            AppAction::Quit => return Ok(true),

            AppAction::StartEditing => {
                self.mode = InputMode::Editing;
            }

            AppAction::StopEditing => {
                self.mode = InputMode::Normal;
            }

            AppAction::InputChar(c) => {
                self.input_text.push(c);
            }

            AppAction::InputNewline => {
                self.input_text.push('\n');
            }

            AppAction::InputBackspace => {
                self.input_text.pop();
            }

            AppAction::Paste(text) => match self.mode {
                InputMode::PathInput => {
                    // Paths are single-line
                    self.path_input.push_str(text.trim_end_matches(['\r', '\n']));
                }
                _ => {
                    self.input_text.push_str(&text.replace("\r\n", "\n"));
                }
            },

            AppAction::CycleTone => {
                self.tone = Some(Tone::cycle(self.tone));
            }

            AppAction::CycleFormat => {
                self.format = Some(Format::cycle(self.format));
            }

            AppAction::Generate => {
                self.generate();
            }

            AppAction::CopyContent => {
                self.copy_content();
            }

            AppAction::DownloadContent => {
                self.download_content();
            }

            AppAction::EmailContent => {
                self.email_content();
            }

            AppAction::ScrollUp => {
                self.output_scroll = self.output_scroll.saturating_sub(1);
            }

            AppAction::ScrollDown => {
                if self.output_scroll < self.output_max_scroll {
                    self.output_scroll += 1;
                }
            }

            AppAction::ShowHelp => {
                self.show_help = true;
            }

            AppAction::HideHelp => {
                self.show_help = false;
            }

            AppAction::PathInputStart => {
                if self.is_importing {
                    return Ok(false);
                }
                self.mode = InputMode::PathInput;
                self.path_input.clear();
            }

            AppAction::PathInputChar(c) => {
                self.path_input.push(c);
            }

            AppAction::PathInputBackspace => {
                self.path_input.pop();
            }

            AppAction::PathInputConfirm => {
                let path = expand_home(self.path_input.trim());
                self.mode = InputMode::Normal;
                self.path_input.clear();
                if !path.as_os_str().is_empty() {
                    self.import_file(path);
                }
            }

            AppAction::PathInputCancel => {
                self.mode = InputMode::Normal;
                self.path_input.clear();
            }
        }

        Ok(false)
    }

    /// Validate the form and, if it passes, start one generation request.
    ///
    /// Returns `true` when a request was issued.
    pub fn generate(&mut self) -> bool {
        if self.is_generating {
            return false;
        }

        let request = match GenerationRequest::new(&self.input_text, self.tone, self.format) {
            Ok(request) => request,
            Err(e) => {
                self.notify(Notification::error(e.title(), e.to_string()));
                return false;
            }
        };

        let Some(generator) = self.generator.clone() else {
            self.status = GenerationStatus::NoApiKey;
            self.notify(Notification::error(
                "API Key Missing",
                format!(
                    "Add gemini_api_key to {} or set {}.",
                    Config::config_path().display(),
                    crate::config::API_KEY_ENV
                ),
            ));
            return false;
        };

        self.is_generating = true;
        self.status = GenerationStatus::Generating;

        // Spawn background task for generation
        let tx = self.generation_tx.clone();

        tokio::spawn(async move {
            let result = match generator.generate(&request).await {
                Ok(text) => Ok((text, generator.model_version().to_string())),
                Err(e) => Err(e.to_string()),
            };

            let _ = tx.send(GenerationResult { result }).await;
        });

        true
    }

    /// Poll for a completed generation (non-blocking)
    pub fn poll_generation_result(&mut self) {
        if let Ok(result) = self.generation_rx.try_recv() {
            self.apply_generation_result(result);
        }
    }

    /// Wait for the in-flight generation, if any, to finish.
    pub async fn finish_generation(&mut self) {
        if !self.is_generating {
            return;
        }
        if let Some(result) = self.generation_rx.recv().await {
            self.apply_generation_result(result);
        }
    }

    fn apply_generation_result(&mut self, result: GenerationResult) {
        match result.result {
            Ok((text, model)) => {
                self.generated = Some(GeneratedContent {
                    text,
                    model_version: model,
                    generated_at: chrono::Utc::now(),
                });
                self.status = GenerationStatus::Generated;
                self.output_scroll = 0;
                self.notify(Notification::info(
                    "Content Generated!",
                    "Your content has been generated successfully.",
                ));
            }
            Err(e) => {
                tracing::error!("Failed to generate content: {}", e);
                self.status = GenerationStatus::Failed;
                self.notify(Notification::error(
                    "Generation Failed",
                    "There was an error generating content. Please try again.",
                ));
            }
        }
        self.is_generating = false;
    }

    /// Start reading `path` in the background; the text lands in the input on completion.
    ///
    /// Ignored while another import is still running. Returns `true` when a read was started.
    pub fn import_file(&mut self, path: PathBuf) -> bool {
        if self.is_importing {
            return false;
        }

        let tx = self.import_tx.clone();
        self.is_importing = true;

        tokio::spawn(async move {
            let result = services::import_file(&path).await;
            let _ = tx.send(ImportResult { path, result }).await;
        });

        true
    }

    /// Poll for a completed import (non-blocking)
    pub fn poll_import_result(&mut self) {
        if let Ok(result) = self.import_rx.try_recv() {
            self.apply_import_result(result);
        }
    }

    pub async fn finish_import(&mut self) {
        if !self.is_importing {
            return;
        }
        if let Some(result) = self.import_rx.recv().await {
            self.apply_import_result(result);
        }
    }

    fn apply_import_result(&mut self, result: ImportResult) {
        self.is_importing = false;

        match result.result {
            Ok(Some(content)) => {
                self.input_text = content;
                self.notify(Notification::info(
                    "File Uploaded",
                    "File content has been loaded into the input area.",
                ));
            }
            Ok(None) => {
                tracing::debug!("{} is empty, input left unchanged", result.path.display());
            }
            Err(AppError::Import(e)) => {
                self.notify(Notification::error(e.title(), e.to_string()));
            }
            Err(e) => {
                self.notify(Notification::error(
                    "Import Failed",
                    format!("Could not read {}: {}", result.path.display(), e),
                ));
            }
        }
    }

    pub fn copy_content(&mut self) {
        if self.generated_content().is_empty() {
            return;
        }

        let text = self.generated_content().to_string();
        match self.desktop.set_clipboard(&text) {
            Ok(()) => {
                self.copied_until = Some(Instant::now() + self.copied_reset);
                self.notify(Notification::info(
                    "Copied!",
                    "Content has been copied to clipboard.",
                ));
            }
            Err(e) => {
                tracing::error!("Clipboard write failed: {}", e);
                self.notify(Notification::error(
                    "Copy Failed",
                    "Failed to copy content to clipboard.",
                ));
            }
        }
    }

    /// Save the content to the download directory, returning the written path.
    pub fn download_content(&mut self) -> Option<PathBuf> {
        if self.generated_content().is_empty() {
            return None;
        }

        match services::save_download(&self.download_dir, self.generated_content()) {
            Ok(path) => {
                self.notify(Notification::info(
                    "Downloaded!",
                    format!("Content has been saved to {}.", path.display()),
                ));
                Some(path)
            }
            Err(e) => {
                self.notify(Notification::error(
                    "Download Failed",
                    format!("Could not save content: {}", e),
                ));
                None
            }
        }
    }

    pub fn email_content(&mut self) {
        if self.generated_content().is_empty() {
            return;
        }

        let link = services::mailto_link(self.generated_content());
        if let Err(e) = self.desktop.open_url(&link) {
            self.notify(Notification::error(
                "Email Failed",
                format!("Could not open mail client: {}", e),
            ));
        }
    }

    /// Advance animations and expire transient state.
    pub fn tick(&mut self) {
        self.spinner_index = self.spinner_index.wrapping_add(1);

        if self.copied_until.is_some() && !self.is_copied() {
            self.copied_until = None;
        }

        let ttl = self.notification_ttl;
        self.notifications.retain(|n| n.created_at.elapsed() < ttl);
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| Path::new(path).to_path_buf()),
        None => PathBuf::from(path),
    }
}
