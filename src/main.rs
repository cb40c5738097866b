use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Context};
use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use autodraft::ai::Generator;
use autodraft::app::App;
use autodraft::config::Config;
use autodraft::models::{Format, GenerationRequest, Tone};
use autodraft::services;
use autodraft::tui::{draw, handle_key_event, AppAction};

const USAGE: &str = "Usage:
  autodraft [--import <file>]
  autodraft --generate <tone> <format> <file>

Tones: formal, friendly, urgent
Formats: email, status-report, summary";

fn init_logging() {
    // Warnings and errors only by default; the TUI owns the terminal, so log to a file
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    let log_path = Config::log_path();
    let file = log_path
        .parent()
        .map(std::fs::create_dir_all)
        .transpose()
        .and_then(|_| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
        });

    match file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    let config = Config::load().context("failed to load configuration")?;

    // Headless generation: print the result and exit
    if args.len() >= 2 && args[1] == "--generate" {
        if args.len() != 5 {
            bail!("{USAGE}");
        }
        return generate_headless(&config, &args[2], &args[3], Path::new(&args[4])).await;
    }

    let import_path = if args.len() >= 3 && args[1] == "--import" {
        Some(PathBuf::from(&args[2]))
    } else {
        None
    };

    let mut app = App::new(&config)?;

    if let Some(path) = import_path {
        app.import_file(path);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Advance spinner and expire transient flags
        app.tick();

        // Poll for completed background work
        app.poll_generation_result();
        app.poll_import_result();

        // Poll for events with timeout to allow async operations
        if event::poll(Duration::from_millis(100))? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(key, app.mode, app.show_help)
                }
                Event::Paste(text) => Some(AppAction::Paste(text)),
                _ => None,
            };

            if let Some(action) = action {
                let should_quit = app.handle_action(action).await?;
                if should_quit {
                    return Ok(());
                }
            }
        }
    }
}

async fn generate_headless(
    config: &Config,
    tone: &str,
    format: &str,
    path: &Path,
) -> anyhow::Result<()> {
    let tone: Tone = tone.parse().map_err(anyhow::Error::msg)?;
    let format: Format = format.parse().map_err(anyhow::Error::msg)?;

    let Some(api_key) = config.api_key() else {
        bail!(
            "Gemini API key not configured; add gemini_api_key to {} or set GEMINI_API_KEY",
            Config::config_path().display()
        );
    };

    let input = services::import_file(path)
        .await
        .with_context(|| format!("failed to import {}", path.display()))?
        .unwrap_or_default();

    let request = GenerationRequest::new(&input, Some(tone), Some(format))?;
    let generator = Generator::new(api_key.to_string(), config)?;

    let content = generator
        .generate(&request)
        .await
        .context("Generation failed")?;

    println!("{content}");
    Ok(())
}
