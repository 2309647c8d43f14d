use crate::analysis::AnalysisStatus;
use crate::app::{App, Focus};
use crate::entry::Entry;
use crate::storage::KeyValueStore;
use color_eyre::Result;
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    ToggleFocus,
    Analyze,
    SaveEntry,
    SaveMood,
    ClearJournal,
    Browse,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Main,
    Browse(usize),
    Detail(usize),
}

pub struct UI {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    screen: Screen,
}

impl UI {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(UI {
            terminal,
            screen: Screen::Main,
        })
    }

    pub fn display<S: KeyValueStore>(&mut self, app: &App<S>) -> Result<()> {
        let screen = self.screen;
        self.terminal.draw(|f| match screen {
            Screen::Main => draw_main(f, app),
            Screen::Browse(selected) => draw_browse(f, app.store.entries(), selected),
            Screen::Detail(index) => {
                if let Some(entry) = app.store.entries().get(index) {
                    draw_detail(f, entry);
                }
            }
        })?;

        Ok(())
    }

    /// Browser navigation is handled here; main-screen keys come back as actions.
    pub fn handle_key<S: KeyValueStore>(&mut self, key: KeyEvent, app: &App<S>) -> Option<Action> {
        let count = app.store.entries().len();
        match self.screen {
            Screen::Main => {
                let action = main_screen_action(key, app.focus);
                if action == Some(Action::Browse) {
                    if count > 0 {
                        self.screen = Screen::Browse(0);
                    }
                    return None;
                }
                action
            }
            Screen::Browse(selected) => {
                match key.code {
                    KeyCode::Up => self.screen = Screen::Browse(selected.saturating_sub(1)),
                    KeyCode::Down => {
                        if selected + 1 < count {
                            self.screen = Screen::Browse(selected + 1);
                        }
                    }
                    KeyCode::Enter => self.screen = Screen::Detail(selected),
                    KeyCode::Esc => self.screen = Screen::Main,
                    _ => {}
                }
                None
            }
            Screen::Detail(index) => {
                self.screen = Screen::Browse(index);
                None
            }
        }
    }
}

/// Maps a key on the main screen to an action.
pub fn main_screen_action(key: KeyEvent, focus: Focus) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('a') => Some(Action::Analyze),
            KeyCode::Char('s') => Some(Action::SaveEntry),
            KeyCode::Char('l') => Some(Action::ClearJournal),
            KeyCode::Char('v') => Some(Action::Browse),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::ToggleFocus),
        KeyCode::Enter => match focus {
            Focus::Journal => Some(Action::Newline),
            Focus::Mood => Some(Action::SaveMood),
        },
        KeyCode::Char(c) => Some(Action::Insert(c)),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        _ => None,
    }
}

fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn input_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title)
}

fn draw_main<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let status = app.analysis_status();
    let insight_height = if status == AnalysisStatus::Idle { 0 } else { 4 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Min(5),
                Constraint::Length(insight_height),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    let header = Paragraph::new(vec![
        Line::from(Span::styled("🧠 MindMend", title_style())),
        Line::from("Your personal AI mental health journal"),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, chunks[0]);

    let journal = Paragraph::new(app.journal.text().to_string()).block(input_block(
        "Type your thoughts or feelings here...",
        app.focus == Focus::Journal,
    ));
    f.render_widget(journal, chunks[1]);

    if status != AnalysisStatus::Idle {
        let insight = Paragraph::new(status.display_text().to_string())
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("AI Insight"));
        f.render_widget(insight, chunks[2]);
    }

    if let Some(error) = app.error() {
        let error = Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red));
        f.render_widget(error, chunks[3]);
    }

    let mood = Paragraph::new(app.mood.text().to_string()).block(input_block(
        "Quick Mood Check-in: how are you feeling right now?",
        app.focus == Focus::Mood,
    ));
    f.render_widget(mood, chunks[4]);

    if let Some(last_mood) = app.store.last_mood() {
        f.render_widget(
            Paragraph::new(format!("Last mood saved: {}", last_mood)),
            chunks[5],
        );
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(chunks[6]);
    draw_entries(f, app.store.entries(), body[0]);
    draw_tips(f, app.tips(), body[1]);

    let controls = Line::from(vec![
        Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" switch input, "),
        Span::styled("Ctrl-A", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" analyze, "),
        Span::styled("Ctrl-S", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" save entry, "),
        Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" save mood, "),
        Span::styled("Ctrl-L", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" clear, "),
        Span::styled("Ctrl-V", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" browse, "),
        Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" quit"),
    ]);
    let controls_paragraph = Paragraph::new(controls)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(controls_paragraph, chunks[7]);

    let (input, area) = match app.focus {
        Focus::Journal => (&app.journal, chunks[1]),
        Focus::Mood => (&app.mood, chunks[4]),
    };
    f.set_cursor_position(cursor_position(area, cursor_offset(input.before_cursor())));
}

fn cursor_offset(before: &str) -> (u16, u16) {
    let row = before.matches('\n').count();
    let col = before.rsplit('\n').next().unwrap_or("").width();
    (
        u16::try_from(col).unwrap_or(u16::MAX),
        u16::try_from(row).unwrap_or(u16::MAX),
    )
}

/// Places the cursor inside the block border of `area`.
fn cursor_position(area: Rect, (x, y): (u16, u16)) -> (u16, u16) {
    (
        area.x
            .saturating_add(1)
            .saturating_add(x)
            .min(area.right().saturating_sub(2)),
        area.y
            .saturating_add(1)
            .saturating_add(y)
            .min(area.bottom().saturating_sub(2)),
    )
}

fn draw_entries(f: &mut Frame, entries: &[Entry], area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Your Past Entries & Moods");

    if entries.is_empty() {
        f.render_widget(Paragraph::new("No entries yet.").block(block), area);
        return;
    }

    let width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = entries.iter().map(|e| entry_item(e, width)).collect();
    f.render_widget(List::new(items).block(block), area);
}

fn entry_item(entry: &Entry, width: usize) -> ListItem<'static> {
    let mut lines = vec![Line::from(truncate_to_width(&entry.summary(), width))];
    if let Entry::Journal(journal) = entry {
        if !journal.analysis.is_empty() {
            lines.push(Line::from(Span::styled(
                truncate_to_width(&format!("  Insight: {}", journal.analysis), width),
                Style::default().fg(Color::Green),
            )));
        }
    }
    ListItem::new(lines)
}

fn draw_tips(f: &mut Frame, tips: &[String], area: Rect) {
    let lines: Vec<Line> = tips
        .iter()
        .map(|tip| Line::from(format!("💡 {}", tip)))
        .collect();
    let tips = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Self-Care Tips"));
    f.render_widget(tips, area);
}

fn draw_browse(f: &mut Frame, entries: &[Entry], selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new("View Entries")
        .style(title_style())
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let width = chunks[1].width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = entries.iter().map(|e| entry_item(e, width)).collect();
    let entries_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Entries"))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    f.render_stateful_widget(
        entries_list,
        chunks[1],
        &mut ListState::default().with_selected(Some(selected)),
    );

    let instructions = Paragraph::new("Up/Down: Navigate, Enter: View full entry, Esc: Back")
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(instructions, chunks[2]);
}

fn draw_detail(f: &mut Frame, entry: &Entry) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new(format!("Entry from {}", entry.date()))
        .style(title_style())
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let body = match entry {
        Entry::Journal(journal) if journal.analysis.is_empty() => journal.text.clone(),
        Entry::Journal(journal) => format!("{}\n\nInsight: {}", journal.text, journal.analysis),
        Entry::Mood(mood) => format!("Mood: {}", mood.mood),
    };
    let content = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Content"));
    f.render_widget(content, chunks[1]);

    let instructions = Paragraph::new("Any key: Back")
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(instructions, chunks[2]);
}

fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

impl Drop for UI {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            log::error!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = stdout().execute(LeaveAlternateScreen) {
            log::error!("Failed to leave alternate screen: {}", e);
        }
    }
}
