pub mod config;
pub mod content;
pub mod runtime;
pub mod session;
pub mod theme;
pub mod ui;

use crate::{
    config::{ConfigStore, FileConfigStore},
    content::{ContentKind, ContentSet, Sampler},
    runtime::{AppEvent, FixedTicker, Runner, TerminalEventSource},
    session::{parse_time_budget, Advance, Session, DEFAULT_TIME_BUDGET_SECS},
    theme::Theme,
};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

/// Preset budgets offered before a timed session starts.
pub const TIME_OPTIONS: [u64; 4] = [15, 30, 60, 120];

/// Timed sessions draw more words than anyone is likely to clear.
const TIME_MODE_WORD_BANK: usize = 100;

/// terminal typing speed test
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing speed test. Type the highlighted word and press space to advance; finish the sequence (or run out the clock) to see words per minute and accuracy."
)]
pub struct Cli {
    /// what to type: sampled words, a timed run, a quote, or a paragraph
    #[clap(short = 'm', long, value_enum, default_value_t = Mode::Words)]
    mode: Mode,

    /// number of words to use in word mode
    #[clap(short = 'w', long, default_value_t = 25)]
    number_of_words: usize,

    /// seconds for time mode; invalid input falls back to 30
    #[clap(short = 's', long)]
    secs: Option<String>,

    /// visual theme to use (persisted for future runs)
    #[clap(short = 't', long)]
    theme: Option<String>,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum, strum_macros::Display)]
pub enum Mode {
    Words,
    Time,
    Quote,
    Paragraph,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

#[derive(Debug)]
pub struct App {
    pub cli: Cli,
    pub sampler: Sampler,
    pub session: Session,
    pub state: AppState,
    pub theme: Theme,
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

impl App {
    pub fn new(cli: Cli, theme: Theme) -> Self {
        let mut sampler = Sampler::new(ContentSet::embedded());
        let session = Self::sample_session(&cli, &mut sampler);
        Self {
            cli,
            sampler,
            session,
            state: AppState::Typing,
            theme,
        }
    }

    fn sample_session(cli: &Cli, sampler: &mut Sampler) -> Session {
        match cli.mode {
            Mode::Words => Session::new(
                sampler.sample(ContentKind::Words, cli.number_of_words),
                None,
            ),
            Mode::Time => {
                let budget = cli
                    .secs
                    .as_deref()
                    .map(parse_time_budget)
                    .unwrap_or(DEFAULT_TIME_BUDGET_SECS);
                Session::new(
                    sampler.sample(ContentKind::Words, TIME_MODE_WORD_BANK),
                    Some(budget),
                )
            }
            Mode::Quote => {
                let quote = sampler.sample_one(ContentKind::Quotes).unwrap_or_default();
                Session::new(split_words(&quote), None)
            }
            Mode::Paragraph => {
                let paragraph = sampler
                    .sample_one(ContentKind::Paragraphs)
                    .unwrap_or_default();
                Session::new(split_words(&paragraph), None)
            }
        }
    }

    /// Start the next test: fresh content, used-set accounting preserved.
    pub fn next_test(&mut self) {
        self.session = Self::sample_session(&self.cli, &mut self.sampler);
        self.state = AppState::Typing;
    }

    /// Full reset: forget everything handed out, then start the next test.
    /// Previously seen content may reappear immediately.
    pub fn full_reset(&mut self) {
        self.sampler.reset_all();
        self.next_test();
    }

    /// Route one typed character into the session. Space submits the
    /// pending word when there is one; otherwise it is input like any
    /// other character. Digit keys pick a preset budget while a timed
    /// session is still idle.
    pub fn on_char(&mut self, c: char) {
        if self.session.has_finished() {
            return;
        }

        if !self.session.has_started() && self.session.is_timed() {
            if let Some(preset) = preset_for_key(c) {
                self.session.set_budget(preset);
                return;
            }
        }

        if c == ' ' && !self.session.pending.trim().is_empty() {
            if let Advance::Finished = self.session.submit() {
                self.state = AppState::Results;
            }
        } else {
            self.session.strike(c);
        }
    }

    /// One second elapsed; timed sessions may run out here.
    pub fn on_tick(&mut self) {
        if let Advance::Finished = self.session.on_tick() {
            self.state = AppState::Results;
        }
    }
}

fn preset_for_key(c: char) -> Option<u64> {
    let slot = c.to_digit(10)? as usize;
    if (1..=TIME_OPTIONS.len()).contains(&slot) {
        Some(TIME_OPTIONS[slot - 1])
    } else {
        None
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    if let Some(theme_id) = &cli.theme {
        config.theme = theme_id.clone();
        let _ = store.save(&config);
    }
    let theme = Theme::by_id(&config.theme);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli, theme);
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(TerminalEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            AppEvent::Tick => {
                app.on_tick();
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Backspace => {
                    if app.state == AppState::Typing {
                        app.session.erase();
                    }
                }
                KeyCode::Left => app.next_test(),
                KeyCode::Right => app.full_reset(),
                KeyCode::Char(c) => match app.state {
                    AppState::Typing => app.on_char(c),
                    AppState::Results => match c {
                        'n' => app.next_test(),
                        'f' => app.full_reset(),
                        _ => {}
                    },
                },
                _ => {}
            },
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Phase;

    fn cli_for(mode: Mode) -> Cli {
        Cli {
            mode,
            number_of_words: 10,
            secs: None,
            theme: None,
        }
    }

    fn test_app(mode: Mode) -> App {
        App::new(cli_for(mode), Theme::default_theme())
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["takt"]);

        assert_eq!(cli.mode, Mode::Words);
        assert_eq!(cli.number_of_words, 25);
        assert_eq!(cli.secs, None);
        assert_eq!(cli.theme, None);
    }

    #[test]
    fn test_cli_mode_values() {
        let cli = Cli::parse_from(["takt", "-m", "time"]);
        assert_eq!(cli.mode, Mode::Time);

        let cli = Cli::parse_from(["takt", "--mode", "quote"]);
        assert_eq!(cli.mode, Mode::Quote);

        let cli = Cli::parse_from(["takt", "--mode", "paragraph"]);
        assert_eq!(cli.mode, Mode::Paragraph);
    }

    #[test]
    fn test_cli_number_of_words() {
        let cli = Cli::parse_from(["takt", "-w", "50"]);
        assert_eq!(cli.number_of_words, 50);

        let cli = Cli::parse_from(["takt", "--number-of-words", "5"]);
        assert_eq!(cli.number_of_words, 5);
    }

    #[test]
    fn test_cli_secs_is_free_text() {
        // The parse-with-fallback happens later, so clap accepts anything.
        let cli = Cli::parse_from(["takt", "-m", "time", "-s", "banana"]);
        assert_eq!(cli.secs, Some("banana".to_string()));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Words.to_string(), "Words");
        assert_eq!(Mode::Time.to_string(), "Time");
        assert_eq!(Mode::Quote.to_string(), "Quote");
        assert_eq!(Mode::Paragraph.to_string(), "Paragraph");
    }

    #[test]
    fn test_app_new_word_mode() {
        let app = test_app(Mode::Words);

        assert_eq!(app.session.target.len(), 10);
        assert_eq!(app.session.budget_secs, None);
        assert_eq!(app.state, AppState::Typing);
        assert_eq!(app.session.phase, Phase::Idle);
    }

    #[test]
    fn test_app_new_time_mode_defaults_to_thirty() {
        let app = test_app(Mode::Time);

        assert_eq!(app.session.budget_secs, Some(DEFAULT_TIME_BUDGET_SECS));
        assert_eq!(app.session.target.len(), 100);
    }

    #[test]
    fn test_app_new_time_mode_with_custom_secs() {
        let mut cli = cli_for(Mode::Time);
        cli.secs = Some("45".to_string());
        let app = App::new(cli, Theme::default_theme());

        assert_eq!(app.session.budget_secs, Some(45));
    }

    #[test]
    fn test_app_new_time_mode_with_invalid_secs_falls_back() {
        let mut cli = cli_for(Mode::Time);
        cli.secs = Some("not-a-number".to_string());
        let app = App::new(cli, Theme::default_theme());

        assert_eq!(app.session.budget_secs, Some(DEFAULT_TIME_BUDGET_SECS));
    }

    #[test]
    fn test_app_new_quote_mode_splits_on_whitespace() {
        let app = test_app(Mode::Quote);

        assert!(app.session.target.len() > 1);
        for word in &app.session.target {
            assert!(!word.contains(char::is_whitespace));
        }
    }

    #[test]
    fn test_app_new_paragraph_mode() {
        let app = test_app(Mode::Paragraph);

        assert!(app.session.target.len() > 10);
        assert_eq!(app.session.budget_secs, None);
    }

    #[test]
    fn test_next_test_resamples_without_clearing_used() {
        let mut app = test_app(Mode::Words);
        let first: Vec<String> = app.session.target.clone();

        app.session.strike('x');
        app.next_test();

        // Replaced session is idle with fresh content; the used-set grew.
        assert_eq!(app.session.phase, Phase::Idle);
        assert_eq!(app.state, AppState::Typing);
        assert!(app.sampler.used_len(ContentKind::Words) >= first.len());
        let overlap = app
            .session
            .target
            .iter()
            .filter(|w| first.contains(*w))
            .count();
        assert_eq!(overlap, 0, "next test repeated unexhausted content");
    }

    #[test]
    fn test_full_reset_clears_used_sets() {
        let mut app = test_app(Mode::Words);

        app.next_test();
        assert!(app.sampler.used_len(ContentKind::Words) >= 20);

        app.full_reset();

        // Only the freshly sampled target is accounted as used.
        assert_eq!(
            app.sampler.used_len(ContentKind::Words),
            app.session.target.len()
        );
        assert_eq!(app.state, AppState::Typing);
    }

    #[test]
    fn test_on_char_space_submits_pending_word() {
        let mut app = test_app(Mode::Words);
        let word = app.session.target[0].clone();

        for c in word.chars() {
            app.on_char(c);
        }
        app.on_char(' ');

        assert_eq!(app.session.index, 1);
        assert!(app.session.pending.is_empty());
    }

    #[test]
    fn test_on_char_space_with_empty_pending_is_input() {
        let mut app = test_app(Mode::Words);

        app.on_char(' ');

        assert_eq!(app.session.index, 0);
        assert_eq!(app.session.pending, " ");
        assert_eq!(app.session.keystrokes, 1);
    }

    #[test]
    fn test_finishing_last_word_moves_to_results() {
        let mut cli = cli_for(Mode::Words);
        cli.number_of_words = 1;
        let mut app = App::new(cli, Theme::default_theme());
        let word = app.session.target[0].clone();

        for c in word.chars() {
            app.on_char(c);
        }
        app.on_char(' ');

        assert_eq!(app.state, AppState::Results);
        assert!(app.session.has_finished());
    }

    #[test]
    fn test_timer_expiry_moves_to_results() {
        let mut cli = cli_for(Mode::Time);
        cli.secs = Some("2".to_string());
        let mut app = App::new(cli, Theme::default_theme());

        app.on_char('x');
        app.on_tick();
        assert_eq!(app.state, AppState::Typing);
        app.on_tick();

        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.session.remaining_secs, Some(0));
    }

    #[test]
    fn test_preset_keys_select_budget_while_idle() {
        let mut app = test_app(Mode::Time);

        app.on_char('1');
        assert_eq!(app.session.budget_secs, Some(15));
        app.on_char('4');
        assert_eq!(app.session.budget_secs, Some(120));

        // Preset keys are plain input once the session is running.
        app.on_char('x');
        app.on_char('2');
        assert_eq!(app.session.budget_secs, Some(120));
        assert_eq!(app.session.pending, "x2");
    }

    #[test]
    fn test_preset_keys_are_plain_input_outside_time_mode() {
        let mut app = test_app(Mode::Words);

        app.on_char('1');

        assert_eq!(app.session.pending, "1");
        assert!(app.session.has_started());
    }

    #[test]
    fn test_preset_for_key_bounds() {
        assert_eq!(preset_for_key('1'), Some(15));
        assert_eq!(preset_for_key('2'), Some(30));
        assert_eq!(preset_for_key('3'), Some(60));
        assert_eq!(preset_for_key('4'), Some(120));
        assert_eq!(preset_for_key('0'), None);
        assert_eq!(preset_for_key('5'), None);
        assert_eq!(preset_for_key('a'), None);
    }

    #[test]
    fn test_input_after_finish_is_ignored() {
        let mut cli = cli_for(Mode::Words);
        cli.number_of_words = 1;
        let mut app = App::new(cli, Theme::default_theme());
        let word = app.session.target[0].clone();

        for c in word.chars() {
            app.on_char(c);
        }
        app.on_char(' ');
        let keystrokes = app.session.keystrokes;

        app.on_char('z');

        assert_eq!(app.session.keystrokes, keystrokes);
    }

    #[test]
    fn test_split_words() {
        assert_eq!(
            split_words("the quick  brown\tfox"),
            vec!["the", "quick", "brown", "fox"]
        );
        assert!(split_words("   ").is_empty());
    }

    #[test]
    fn test_integration_complete_word_session() {
        let mut cli = cli_for(Mode::Words);
        cli.number_of_words = 3;
        let mut app = App::new(cli, Theme::default_theme());

        let target = app.session.target.clone();
        for word in &target {
            for c in word.chars() {
                app.on_char(c);
            }
            app.on_char(' ');
        }

        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.session.correct_words(), 3);
        assert_eq!(app.session.accuracy(), 100);
        assert_eq!(app.session.progress(), 100.0);

        app.next_test();
        assert_eq!(app.state, AppState::Typing);
        assert!(!app.session.has_started());
    }
}
