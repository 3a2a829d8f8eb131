use crate::error::{LedgerError, Result};
use crate::models::transaction::TransactionType;
use crate::operations::ledger::FinanceCore;
use crate::ui::console::capitalize;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::{Alignment, Color, Constraint, Direction, Layout, Rect, Style},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use std::io;

const INVALID_INPUT: &str = "Invalid input. Please enter valid details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddIncome,
    AddExpense,
    ViewReport,
    ViewHistory,
    Exit,
}

impl Action {
    const ALL: [Action; 5] = [
        Action::AddIncome,
        Action::AddExpense,
        Action::ViewReport,
        Action::ViewHistory,
        Action::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::AddIncome => "Add Income",
            Action::AddExpense => "Add Expense",
            Action::ViewReport => "View Report",
            Action::ViewHistory => "View History",
            Action::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Amount,
    Category,
    Button(usize),
}

impl Focus {
    const COUNT: usize = 2 + Action::ALL.len();

    fn index(self) -> usize {
        match self {
            Focus::Amount => 0,
            Focus::Category => 1,
            Focus::Button(i) => 2 + i,
        }
    }

    fn from_index(idx: usize) -> Self {
        match idx % Self::COUNT {
            0 => Focus::Amount,
            1 => Focus::Category,
            i => Focus::Button(i - 2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub kind: ModalKind,
    pub title: String,
    pub lines: Vec<String>,
    /// First visible row. Clamped to the content when drawn.
    pub scroll: u16,
}

impl Modal {
    const PAGE: u16 = 10;

    fn handle_scroll(&mut self, code: KeyCode) {
        self.scroll = match code {
            KeyCode::Up => self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll.saturating_sub(Self::PAGE),
            KeyCode::PageDown => self.scroll.saturating_add(Self::PAGE),
            KeyCode::Home => 0,
            KeyCode::End => u16::MAX,
            _ => self.scroll,
        };
    }
}

#[derive(Debug)]
pub struct FormState {
    pub amount: String,
    pub category: String,
    pub focus: Focus,
    pub modal: Option<Modal>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            amount: String::new(),
            category: String::new(),
            focus: Focus::Amount,
            modal: None,
        }
    }
}

impl FormState {
    fn move_focus(&mut self, forward: bool) {
        let idx = self.focus.index();
        let next = if forward { idx + 1 } else { idx + Focus::COUNT - 1 };
        self.focus = Focus::from_index(next);
    }

    fn active_field(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Amount => Some(&mut self.amount),
            Focus::Category => Some(&mut self.category),
            Focus::Button(_) => None,
        }
    }

    fn show(&mut self, kind: ModalKind, title: &str, lines: Vec<String>) {
        self.modal = Some(Modal {
            kind,
            title: title.to_string(),
            lines,
            scroll: 0,
        });
    }

    /// Applies one key press. Returns the action the user triggered, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Many terminals emit both a Press and a Release event.
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) && self.modal.is_some() {
            self.modal = None;
            return None;
        }
        if let Some(modal) = &mut self.modal {
            modal.handle_scroll(key.code);
            return None;
        }

        match key.code {
            KeyCode::Esc => return Some(Action::Exit),
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Left if matches!(self.focus, Focus::Button(_)) => self.move_focus(false),
            KeyCode::Right if matches!(self.focus, Focus::Button(_)) => self.move_focus(true),
            KeyCode::Enter => match self.focus {
                Focus::Button(i) => return Some(Action::ALL[i]),
                _ => self.move_focus(true),
            },
            KeyCode::Backspace => {
                if let Some(field) = self.active_field() {
                    field.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let Some(field) = self.active_field() {
                    field.push(ch);
                }
            }
            _ => {}
        }

        None
    }
}

/// Runs `action` against the core and records the outcome as a modal.
/// Returns `true` when the form should close.
pub fn perform<C: FinanceCore>(core: &mut C, state: &mut FormState, action: Action) -> bool {
    match action {
        Action::AddIncome => add_from_fields(core, state, TransactionType::Income),
        Action::AddExpense => add_from_fields(core, state, TransactionType::Expense),
        Action::ViewReport => {
            let mut buffer = Vec::<u8>::new();
            match core.generate_report(&mut buffer) {
                Ok(_) => {
                    let mut lines = buffer_lines(&buffer);
                    lines.push(String::new());
                    lines.push(format!(
                        "Report generated and saved to {}",
                        core.report_path().display()
                    ));
                    state.show(ModalKind::Info, "Report", lines);
                }
                Err(e) => state.show(ModalKind::Error, "Error", vec![e.to_string()]),
            }
        }
        Action::ViewHistory => {
            let mut buffer = Vec::<u8>::new();
            match core.view_history(&mut buffer) {
                Ok(_) => state.show(ModalKind::Info, "History", buffer_lines(&buffer)),
                Err(e) => state.show(ModalKind::Error, "Error", vec![e.to_string()]),
            }
        }
        Action::Exit => return true,
    }
    false
}

fn add_from_fields<C: FinanceCore>(core: &mut C, state: &mut FormState, transaction_type: TransactionType) {
    let category = state.category.trim().to_string();
    if category.is_empty() {
        tracing::debug!("Rejected form input: {}", LedgerError::EmptyCategory);
        state.show(ModalKind::Error, "Error", vec![INVALID_INPUT.to_string()]);
        return;
    }

    match core.add_transaction(&state.amount, &category, transaction_type) {
        Ok(_) => state.show(
            ModalKind::Info,
            "Success",
            vec![format!("{} added successfully!", capitalize(transaction_type.as_str()))],
        ),
        Err(LedgerError::InvalidAmount(_)) => {
            state.show(ModalKind::Error, "Error", vec![INVALID_INPUT.to_string()])
        }
        Err(e) => state.show(ModalKind::Error, "Error", vec![e.to_string()]),
    }
}

fn buffer_lines(buffer: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(buffer)
        .lines()
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn run_form<C: FinanceCore>(mut core: C) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = (|| -> Result<()> {
        let backend = ratatui::backend::CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;
        let mut state = FormState::default();

        loop {
            terminal.draw(|frame| render_form(frame, &mut state))?;

            if event::poll(std::time::Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if let Some(action) = state.handle_key(key) {
                        if perform(&mut core, &mut state, action) {
                            break;
                        }
                    }
                }
            }
        }

        Ok(())
    })();

    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;

    result?;
    core.close()
}

fn render_form(frame: &mut ratatui::Frame, state: &mut FormState) {
    let size = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let title = Paragraph::new(Line::from(Span::styled(
        "Personal Finance Tracker",
        Style::default().fg(Color::Cyan).bold(),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    render_field(frame, layout[1], "Amount", &state.amount, state.focus == Focus::Amount);
    render_field(frame, layout[2], "Category", &state.category, state.focus == Focus::Category);
    render_buttons(frame, layout[3], state);

    let hint = "Tab/↑/↓ move  Enter press/next  Esc exit";
    frame.render_widget(
        Paragraph::new(hint).alignment(Alignment::Left).wrap(Wrap { trim: true }),
        layout[5],
    );

    if let Some(modal) = &mut state.modal {
        render_modal(frame, size, modal);
    }
}

fn render_field(frame: &mut ratatui::Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let text = if focused { format!("{}_", value) } else { value.to_string() };

    let paragraph = Paragraph::new(text)
        .block(Block::default().title(label).borders(Borders::ALL).border_style(style));
    frame.render_widget(paragraph, area);
}

fn render_buttons(frame: &mut ratatui::Frame, area: Rect, state: &FormState) {
    let constraints = vec![Constraint::Ratio(1, Action::ALL.len() as u32); Action::ALL.len()];
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, action) in Action::ALL.iter().enumerate() {
        let style = if state.focus == Focus::Button(i) {
            Style::default().bg(Color::DarkGray).fg(Color::White).bold()
        } else {
            Style::default().fg(Color::White)
        };
        let button = Paragraph::new(action.label())
            .style(style)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        frame.render_widget(button, cells[i]);
    }
}

fn render_modal(frame: &mut ratatui::Frame, area: Rect, modal: &mut Modal) {
    let popup_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup_area);

    let color = match modal.kind {
        ModalKind::Info => Color::Green,
        ModalKind::Error => Color::Red,
    };

    let mut lines: Vec<Line> = modal.lines.iter().map(|l| Line::from(l.as_str())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ PgUp/PgDn scroll  Enter/Esc close",
        Style::default().fg(Color::DarkGray),
    )));

    // Rows after wrapping, estimated from display width.
    let inner_width = usize::from(popup_area.width.saturating_sub(2)).max(1);
    let inner_height = usize::from(popup_area.height.saturating_sub(2));
    let rows: usize = lines.iter().map(|l| l.width().div_ceil(inner_width).max(1)).sum();
    let max_scroll = u16::try_from(rows.saturating_sub(inner_height)).unwrap_or(u16::MAX);
    modal.scroll = modal.scroll.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(modal.title.as_str())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: false })
        .scroll((modal.scroll, 0));
    frame.render_widget(paragraph, popup_area);
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
