use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
    PathInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    StartEditing,
    StopEditing,
    InputChar(char),
    InputNewline,
    InputBackspace,
    Paste(String),
    CycleTone,
    CycleFormat,
    Generate,
    CopyContent,
    DownloadContent,
    EmailContent,
    ScrollUp,
    ScrollDown,
    ShowHelp,
    HideHelp,
    // File path prompt actions
    PathInputStart,
    PathInputChar(char),
    PathInputBackspace,
    PathInputConfirm,
    PathInputCancel,
}

pub fn handle_key_event(key: KeyEvent, mode: InputMode, show_help: bool) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    // Ctrl-C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(AppAction::Quit);
    }

    match mode {
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(AppAction::StopEditing),
            KeyCode::Enter => Some(AppAction::InputNewline),
            KeyCode::Backspace => Some(AppAction::InputBackspace),
            KeyCode::Tab => Some(AppAction::InputChar('\t')),
            KeyCode::Char(c) => Some(AppAction::InputChar(c)),
            _ => None,
        },

        InputMode::PathInput => match key.code {
            KeyCode::Enter => Some(AppAction::PathInputConfirm),
            KeyCode::Esc => Some(AppAction::PathInputCancel),
            KeyCode::Backspace => Some(AppAction::PathInputBackspace),
            KeyCode::Char(c) => Some(AppAction::PathInputChar(c)),
            _ => None,
        },

        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(AppAction::Quit),

            KeyCode::Char('i') => Some(AppAction::StartEditing),
            KeyCode::Char('o') => Some(AppAction::PathInputStart),
            KeyCode::Char('t') => Some(AppAction::CycleTone),
            KeyCode::Char('f') => Some(AppAction::CycleFormat),

            KeyCode::Enter | KeyCode::Char('g') => Some(AppAction::Generate),

            KeyCode::Char('c') => Some(AppAction::CopyContent),
            KeyCode::Char('s') => Some(AppAction::DownloadContent),
            KeyCode::Char('e') => Some(AppAction::EmailContent),

            KeyCode::Char('j') | KeyCode::Down => Some(AppAction::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(AppAction::ScrollUp),

            KeyCode::Char('?') => Some(AppAction::ShowHelp),

            _ => None,
        },
    }
}
