//! Side effects offered on generated content: clipboard, file download, mail handoff.

use std::path::{Path, PathBuf};

use arboard::Clipboard;

use crate::error::{AppError, Result};

pub const DOWNLOAD_FILE_NAME: &str = "generated-content.txt";
pub const EMAIL_SUBJECT: &str = "Generated Content";

/// Platform hooks the app needs. Swapped out in tests.
pub trait Desktop {
    fn set_clipboard(&mut self, text: &str) -> Result<()>;
    fn open_url(&mut self, url: &str) -> Result<()>;
}

/// Real clipboard and URL opener.
#[derive(Default)]
pub struct SystemDesktop {
    clipboard: Option<Clipboard>,
}

impl SystemDesktop {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Desktop for SystemDesktop {
    fn set_clipboard(&mut self, text: &str) -> Result<()> {
        // Opened lazily; a headless session has no clipboard at all.
        if self.clipboard.is_none() {
            let clipboard = Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }

        match self.clipboard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| AppError::Clipboard(format!("Failed to set clipboard text: {}", e))),
            None => Err(AppError::Clipboard("clipboard unavailable".to_string())),
        }
    }

    fn open_url(&mut self, url: &str) -> Result<()> {
        open::that(url)?;
        Ok(())
    }
}

/// `mailto:` link with the content as body.
pub fn mailto_link(content: &str) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(EMAIL_SUBJECT),
        urlencoding::encode(content)
    )
}

/// First free name in `dir`: `generated-content.txt`, then `generated-content (1).txt`, ...
fn unique_download_path(dir: &Path) -> PathBuf {
    let candidate = dir.join(DOWNLOAD_FILE_NAME);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = DOWNLOAD_FILE_NAME
        .rsplit_once('.')
        .unwrap_or((DOWNLOAD_FILE_NAME, ""));

    (1u32..)
        .map(|n| dir.join(format!("{stem} ({n}).{ext}")))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// Write `content` unchanged to a new file in `dir` and return its path.
pub fn save_download(dir: &Path, content: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = unique_download_path(dir);
    std::fs::write(&path, content.as_bytes())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailto_percent_encodes_subject_and_body() {
        let link = mailto_link("Hi team,\nDone & dusted: 100%?");
        assert_eq!(
            link,
            "mailto:?subject=Generated%20Content&body=Hi%20team%2C%0ADone%20%26%20dusted%3A%20100%25%3F"
        );
    }

    #[test]
    fn download_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let content = "Subject: Update\r\n\r\nüñí  trailing  \n";

        let path = save_download(dir.path(), content).unwrap();

        assert_eq!(path.file_name().unwrap(), DOWNLOAD_FILE_NAME);
        assert_eq!(std::fs::read(&path).unwrap(), content.as_bytes());
    }

    #[test]
    fn download_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();

        let first = save_download(dir.path(), "one").unwrap();
        let second = save_download(dir.path(), "two").unwrap();
        let third = save_download(dir.path(), "three").unwrap();

        assert_eq!(second.file_name().unwrap(), "generated-content (1).txt");
        assert_eq!(third.file_name().unwrap(), "generated-content (2).txt");
        assert_eq!(std::fs::read_to_string(first).unwrap(), "one");
        assert_eq!(std::fs::read_to_string(third).unwrap(), "three");
    }

    #[test]
    fn download_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let path = save_download(&nested, "x").unwrap();
        assert!(path.starts_with(&nested));
    }
}
