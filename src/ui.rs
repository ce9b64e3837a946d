use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{session::Correctness, App, AppState, TIME_OPTIONS};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            AppState::Typing => render_typing(self, area, buf),
            AppState::Results => render_results(self, area, buf),
        }
    }
}

fn render_typing(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let theme = &app.theme;

    let dim_style = Style::default().fg(theme.dim);
    let accent_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // status
            Constraint::Length(1), // progress gauge
            Constraint::Length(1), // padding
            Constraint::Min(3),    // target words
            Constraint::Length(1), // hints
        ])
        .split(area);

    let status = match (session.budget_secs, session.remaining_secs) {
        (Some(_), Some(remaining)) => format!("{remaining}s remaining"),
        _ => format!("{}/{} words", session.index, session.target.len()),
    };
    Paragraph::new(Span::styled(status, accent_style))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(theme.accent).bg(theme.dim))
        .ratio((session.progress() / 100.0).clamp(0.0, 1.0))
        .label("")
        .render(chunks[1], buf);

    let spans = word_spans(app);
    let prompt_width = session.target.iter().join(" ").width();
    let fits_one_line = prompt_width <= chunks[3].width as usize;

    Paragraph::new(Line::from(spans))
        .alignment(if fits_one_line {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);

    let hints = if !session.has_started() && session.is_timed() {
        let presets = TIME_OPTIONS
            .iter()
            .enumerate()
            .map(|(i, secs)| format!("({}) {}s", i + 1, secs))
            .join("  ");
        format!("set timer: {presets}  |  start typing to begin")
    } else if !session.has_started() {
        "start typing to begin  |  space submits a word  |  (esc)ape".to_string()
    } else {
        "(←) next test  (→) reset all content  (esc)ape".to_string()
    };
    Paragraph::new(Span::styled(
        hints,
        dim_style.add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}

/// One span per target word (plus separators): submitted words colored by
/// their outcome, the current word colored character-by-character against
/// the pending input, everything ahead dimmed.
fn word_spans(app: &App) -> Vec<Span<'_>> {
    let session = &app.session;
    let theme = &app.theme;

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let correct_style = bold.fg(theme.correct);
    let incorrect_style = bold.fg(theme.incorrect);
    let dim_style = Style::default().fg(theme.dim);
    let cursor_style = dim_style
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::UNDERLINED);

    let mut spans: Vec<Span> = Vec::new();

    for (i, word) in session.target.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }

        if i < session.index {
            let style = match session.outcomes[i] {
                Correctness::Correct => correct_style,
                Correctness::Incorrect => incorrect_style,
                Correctness::Pending => dim_style,
            };
            spans.push(Span::styled(word.as_str(), style));
        } else if i == session.index {
            let typed: Vec<char> = session.pending.chars().collect();
            for (pos, expected) in word.chars().enumerate() {
                let style = match typed.get(pos) {
                    Some(c) if *c == expected => correct_style,
                    Some(_) => incorrect_style,
                    None if pos == typed.len() => cursor_style,
                    None => dim_style.add_modifier(Modifier::BOLD),
                };
                spans.push(Span::styled(expected.to_string(), style));
            }
            // Anything typed past the end of the word is overflow
            if typed.len() > word.chars().count() {
                let overflow: String = typed.iter().skip(word.chars().count()).collect();
                spans.push(Span::styled(
                    overflow.replace(' ', "·"),
                    incorrect_style.add_modifier(Modifier::CROSSED_OUT),
                ));
            }
        } else {
            spans.push(Span::styled(word.as_str(), dim_style));
        }
    }

    spans
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let theme = &app.theme;

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(theme.dim);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // padding
            Constraint::Length(1), // stats
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
            Constraint::Min(1),    // padding
        ])
        .split(area);

    let secs = match session.budget_secs {
        Some(budget) => budget as f64,
        None => session.elapsed_secs(),
    };

    let stats = Paragraph::new(Span::styled(
        format!(
            "{} wpm   {}% acc   {:.0}s",
            session.wpm(),
            session.accuracy(),
            secs
        ),
        bold.fg(theme.fg),
    ))
    .alignment(Alignment::Center);
    stats.render(chunks[1], buf);

    let legend = Paragraph::new(Span::styled(
        "(n)ext test  (f)ull reset  (esc)ape",
        dim_style.add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[3], buf);
}
