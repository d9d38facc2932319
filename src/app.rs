use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use unicode_segmentation::UnicodeSegmentation;

use crate::api::format_score;
use crate::config::Settings;
use crate::error::SentiscopeError;
use crate::runner::{AppCommand, AppEvent};
use crate::session::{AnalysisSession, Phase};

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Presentation layer around the analysis session. Owns the cursor, the
/// spinner and the channels to the worker loop; every state change still goes
/// through the session's transitions.
pub struct App {
    pub session: AnalysisSession,
    pub cursor_g: usize,

    pub tx: UnboundedSender<AppCommand>,
    pub rx: UnboundedReceiver<AppEvent>,

    pub spinner_phase: usize,
    pub last_spinner_tick: Instant,

    pub service_note: Option<String>,
    pub endpoint_label: String,
}

impl App {
    pub fn new(
        tx: UnboundedSender<AppCommand>,
        rx: UnboundedReceiver<AppEvent>,
        settings: &Settings,
    ) -> Self {
        Self {
            session: AnalysisSession::new(),
            cursor_g: 0,
            tx,
            rx,
            spinner_phase: 0,
            last_spinner_tick: Instant::now(),
            service_note: None,
            endpoint_label: settings.endpoint.to_string(),
        }
    }

    pub fn tick_spinner(&mut self) {
        if self.session.is_loading()
            && self.last_spinner_tick.elapsed() >= Duration::from_millis(120)
        {
            self.spinner_phase = (self.spinner_phase + 1) % SPINNER_FRAMES.len();
            self.last_spinner_tick = Instant::now();
        }
    }

    /// Handle one terminal event. Returns true when the app should quit.
    pub fn on_event(&mut self, ev: crossterm::event::Event) -> bool {
        use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
        match ev {
            Event::Key(k) => {
                if k.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(k.code, KeyCode::Char('c'))
                {
                    return true;
                }
                if k.kind == KeyEventKind::Press {
                    match k.code {
                        KeyCode::Enter => {
                            if k.modifiers.contains(KeyModifiers::SHIFT) {
                                self.insert_char('\n');
                            } else {
                                self.submit();
                            }
                        }
                        KeyCode::Char(c) => {
                            if !k.modifiers.contains(KeyModifiers::CONTROL) {
                                self.insert_char(c);
                            }
                        }
                        KeyCode::Backspace => self.backspace(),
                        KeyCode::Left => self.left(),
                        KeyCode::Right => self.right(),
                        KeyCode::F(2) => self.check_service(),
                        KeyCode::Esc => return true,
                        _ => {}
                    }
                }
            }
            Event::Paste(s) => {
                let mut text = self.session.input().to_string();
                text.push_str(&s);
                self.session.set_input(text);
                self.cursor_g = self.session.input().graphemes(true).count();
            }
            _ => {}
        }
        false
    }

    /// Drain worker events into the session. Runs on the loop thread between
    /// draws, so a frame never observes a half-applied transition.
    pub fn poll_async(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            match ev {
                AppEvent::Analysis(outcome) => self.session.resolve(outcome),
                AppEvent::Health(Ok(health)) => {
                    self.service_note = Some(format!("service: {}", health.status));
                }
                AppEvent::Health(Err(err)) => {
                    self.service_note = Some(match err {
                        SentiscopeError::Service { status, .. } => {
                            format!("service error (HTTP {})", status)
                        }
                        _ => "service unreachable".to_string(),
                    });
                }
            }
        }
    }

    fn submit(&mut self) {
        if let Some(text) = self.session.submit() {
            self.spinner_phase = 0;
            let _ = self.tx.send(AppCommand::Analyze { text });
        }
    }

    fn check_service(&mut self) {
        self.service_note = Some("checking service...".to_string());
        let _ = self.tx.send(AppCommand::CheckHealth);
    }

    fn left(&mut self) {
        if self.cursor_g > 0 {
            self.cursor_g -= 1;
        }
    }

    fn right(&mut self) {
        let n = self.session.input().graphemes(true).count();
        if self.cursor_g < n {
            self.cursor_g += 1;
        }
    }

    fn insert_char(&mut self, c: char) {
        let mut text = self.session.input().to_string();
        let bi = byte_idx_for_g(&text, self.cursor_g);
        text.insert(bi, c);
        self.session.set_input(text);
        self.right();
    }

    fn backspace(&mut self) {
        if self.cursor_g == 0 {
            return;
        }
        let mut text = self.session.input().to_string();
        let l = byte_idx_for_g(&text, self.cursor_g - 1);
        let r = byte_idx_for_g(&text, self.cursor_g);
        text.replace_range(l..r, "");
        self.session.set_input(text);
        self.left();
    }

    pub fn render(&self, f: &mut Frame) {
        let layout = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(7),
            Constraint::Length(1),
        ]);
        let chunks = layout.split(f.area());
        self.render_header(f, chunks[0]);
        self.render_outcome(f, chunks[1]);
        self.render_input(f, chunks[2]);
        self.render_footer(f, chunks[3]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new("Sentiment Analysis AI")
            .style(Style::default().fg(Color::Cyan).bold())
            .centered()
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(header, area);
    }

    fn render_outcome(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("📊 Analysis Result")
            .title_style(Style::default().fg(Color::Blue).bold());

        let body = match self.session.phase() {
            Phase::Idle => Text::from(Line::styled(
                "Enter text here to analyze its sentiment...",
                Style::default().fg(Color::Gray).italic(),
            )),
            Phase::Loading => Text::from(Line::from(vec![
                Span::styled(
                    SPINNER_FRAMES[self.spinner_phase],
                    Style::default().fg(Color::Yellow).bold(),
                ),
                Span::styled(" Loading results...", Style::default().fg(Color::Yellow)),
            ])),
            Phase::Failed => Text::from(Line::styled(
                self.session.error().unwrap_or_default().to_string(),
                Style::default().fg(Color::Red).bold(),
            )),
            Phase::Succeeded => {
                let mut lines: Vec<Line> = Vec::new();
                if let Some(result) = self.session.result() {
                    lines.push(Line::from(vec![
                        Span::raw("Overall Sentiment: "),
                        Span::styled(
                            result.display_label(),
                            Style::default()
                                .fg(sentiment_color(&result.sentiment))
                                .bold(),
                        ),
                    ]));
                    lines.push(Line::from(format!(
                        "Compound Score: {}",
                        result.display_score()
                    )));
                    if let Some(detail) = &result.scores {
                        lines.push(Line::styled(
                            format!(
                                "Positive: {}  Neutral: {}  Negative: {}",
                                format_score(Some(detail.pos)),
                                format_score(Some(detail.neu)),
                                format_score(Some(detail.neg)),
                            ),
                            Style::default().fg(Color::Gray),
                        ));
                    }
                }
                Text::from(lines)
            }
        };

        let para = Paragraph::new(body).block(block).wrap(Wrap { trim: false });
        f.render_widget(para, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let input_block = Block::default()
            .borders(Borders::ALL)
            .title("✍️ Input (Enter=analyze, Shift+Enter=newline, Ctrl+C=quit)")
            .title_style(Style::default().fg(Color::Green).bold());

        let input = Paragraph::new(self.session.input())
            .style(Style::default().fg(Color::Yellow))
            .block(input_block)
            .wrap(Wrap { trim: false });
        f.render_widget(input, area);

        // Caret sits where the next grapheme would land, line/column wise.
        let caret = byte_idx_for_g(self.session.input(), self.cursor_g);
        let before = &self.session.input()[..caret];
        let lines: Vec<&str> = before.split('\n').collect();
        let current_line = lines.len().saturating_sub(1);
        let current_col = lines.last().map(|l| l.graphemes(true).count()).unwrap_or(0);

        let cx = area.x + 1 + current_col as u16;
        let cy = area.y + 1 + current_line as u16;
        f.set_cursor_position(Position::new(cx, cy));
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "F2=service check  Esc=quit",
            Style::default().fg(Color::Gray),
        )];
        if let Some(note) = &self.service_note {
            spans.push(Span::raw("  |  "));
            spans.push(Span::styled(
                note.clone(),
                Style::default().fg(Color::Gray).italic(),
            ));
        }
        spans.push(Span::raw("  |  "));
        spans.push(Span::styled(
            format!("endpoint: {}", self.endpoint_label),
            Style::default().fg(Color::DarkGray),
        ));
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn sentiment_color(sentiment: &str) -> Color {
    match sentiment.to_lowercase().as_str() {
        "positive" => Color::Green,
        "negative" => Color::Red,
        "neutral" => Color::Yellow,
        _ => Color::White,
    }
}

fn byte_idx_for_g(s: &str, g: usize) -> usize {
    s.grapheme_indices(true)
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()))
        .nth(g)
        .unwrap_or(s.len())
}
