use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::models::{GenerationStatus, NotificationLevel, Tone};
use crate::tui::InputMode;

const INPUT_PLACEHOLDER: &str = "Enter your bullet points, task updates, or meeting notes here...\n\n\
• Project milestone completed\n\
• Team meeting scheduled for Friday\n\
• Budget review pending\n\
• Client feedback received\n\n\
Press 'i' to type, 'o' to import a .txt or .csv file.";

pub fn draw(frame: &mut Frame, app: &mut App) {
    // Main horizontal split: input on the left, output on the right
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(frame.area());

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Input text
            Constraint::Length(3), // Tone / format pickers
            Constraint::Length(1), // Status line
        ])
        .split(main_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Generated content
            Constraint::Length(1), // Export actions
        ])
        .split(main_chunks[1]);

    render_header(frame, left_chunks[0]);
    render_input(frame, app, left_chunks[1]);
    render_settings(frame, app, left_chunks[2]);
    render_left_status(frame, app, left_chunks[3]);

    render_output(frame, app, right_chunks[0]);
    render_right_status(frame, app, right_chunks[1]);

    if app.mode == InputMode::PathInput {
        render_path_input(frame, app);
    }

    if app.show_help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" AutoMail & ReportGen ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(" Turn notes into emails, status reports and summaries")
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == InputMode::Editing;

    let title = if editing {
        " Input Content [editing, Esc to finish] "
    } else {
        " Input Content "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { Color::Yellow } else { Color::Blue }));

    let paragraph = if app.input_text.is_empty() && !editing {
        Paragraph::new(INPUT_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else if editing {
        Paragraph::new(format!("{}_", app.input_text)).style(Style::default().fg(Color::White))
    } else {
        Paragraph::new(app.input_text.as_str()).style(Style::default().fg(Color::White))
    };

    // Keep the end of long input visible
    let inner_height = area.height.saturating_sub(2);
    let inner_width = area.width.saturating_sub(2);
    let shown = if editing {
        format!("{}_", app.input_text)
    } else {
        app.input_text.clone()
    };
    let scroll = wrapped_line_count(&shown, inner_width).saturating_sub(inner_height);

    frame.render_widget(
        paragraph
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        area,
    );
}

fn render_settings(frame: &mut Frame, app: &App, area: Rect) {
    let unset = Style::default().fg(Color::DarkGray);

    let tone = match app.tone {
        Some(t) => {
            let color = match t {
                Tone::Formal => Color::Blue,
                Tone::Friendly => Color::Green,
                Tone::Urgent => Color::Red,
            };
            Span::styled(t.label(), Style::default().fg(color).add_modifier(Modifier::BOLD))
        }
        None => Span::styled("Select tone", unset),
    };
    let format = match app.format {
        Some(f) => Span::styled(f.label(), Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)),
        None => Span::styled("Select format", unset),
    };

    let line = Line::from(vec![
        Span::raw(" Tone (t): "),
        tone,
        Span::raw("   Format (f): "),
        format,
    ]);

    let block = Block::default()
        .title(" Generation Settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_left_status(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = if app.is_generating {
        Paragraph::new(format!("{} Generating with Gemini...", app.spinner()))
            .style(Style::default().fg(Color::Yellow))
    } else if let Some(n) = app.latest_notification() {
        let color = match n.level {
            NotificationLevel::Info => Color::Green,
            NotificationLevel::Error => Color::Red,
        };
        Paragraph::new(format!("{}: {}", n.title, n.description))
            .style(Style::default().fg(color))
    } else if app.is_importing {
        Paragraph::new("Reading file...").style(Style::default().fg(Color::Yellow))
    } else {
        Paragraph::new("i:edit  o:open file  t:tone  f:format  g:generate  ?:help  q:quit")
            .style(Style::default().fg(Color::DarkGray))
    };

    frame.render_widget(paragraph, area);
}

fn render_output(frame: &mut Frame, app: &mut App, area: Rect) {
    let content = match app.status {
        GenerationStatus::NoApiKey => format!(
            "Gemini API key not configured.\n\nPlease add your API key to:\n{}\n\nExample:\ngemini_api_key = \"AIza...\"\n\nor set GEMINI_API_KEY.",
            crate::config::Config::config_path().display()
        ),
        _ if !app.generated_content().is_empty() => app.generated_content().to_string(),
        GenerationStatus::Generating => "Generating content...".to_string(),
        GenerationStatus::Failed => "Failed to generate content. Press 'g' to retry.".to_string(),
        _ => "No Content Generated Yet\n\nEnter your content and press 'g' to see the generated output here.".to_string(),
    };

    let title = match &app.generated {
        Some(g) => format!(
            " Generated Content ({} at {}) ",
            g.model_version,
            g.generated_at.with_timezone(&chrono::Local).format("%H:%M")
        ),
        None => " Generated Content ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner_height = area.height.saturating_sub(2);
    let inner_width = area.width.saturating_sub(2);
    app.output_max_scroll =
        wrapped_line_count(&content, inner_width).saturating_sub(inner_height);
    app.output_scroll = app.output_scroll.min(app.output_max_scroll);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.output_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_right_status(frame: &mut Frame, app: &App, area: Rect) {
    let text = if app.generated_content().is_empty() {
        String::new()
    } else {
        let copy = if app.is_copied() { "✓ Copied" } else { "c:copy" };
        format!("{copy}  s:save  e:email  j/k:scroll")
    };

    let paragraph = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn render_path_input(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 20, frame.area());

    let block = Block::default()
        .title(" Import file (.txt or .csv, max 5MB) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);

    // Clear the area first
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let input_text = format!("> {}_", app.path_input);
    let paragraph = Paragraph::new(input_text).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = [
        "",
        " Input:",
        "   i        Edit input (Esc to finish)",
        "   o        Import a .txt / .csv file",
        "   t        Cycle tone",
        "   f        Cycle format",
        "",
        " Output:",
        "   g/Enter  Generate content",
        "   c        Copy to clipboard",
        "   s        Save as text file",
        "   e        Open in mail client",
        "   j / ↓    Scroll down",
        "   k / ↑    Scroll up",
        "",
        " General:",
        "   ?        Toggle this help",
        "   q        Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Number of rows `text` occupies when rendered with the same wrapping as the panes.
pub(crate) fn wrapped_line_count(text: &str, width: u16) -> u16 {
    let rows = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .line_count(width);

    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
