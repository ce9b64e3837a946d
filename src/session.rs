use std::time::SystemTime;

/// Budget used when a custom time string cannot be parsed into a positive
/// number of seconds.
pub const DEFAULT_TIME_BUDGET_SECS: u64 = 30;

/// Parse a custom time budget. Non-numeric or non-positive input falls back
/// to the default rather than rejecting the action.
pub fn parse_time_budget(input: &str) -> u64 {
    input
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|&secs| secs > 0)
        .unwrap_or(DEFAULT_TIME_BUDGET_SECS)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// Per-word correctness. Words at or beyond the current index stay `Pending`
/// until submitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Correctness {
    Pending,
    Correct,
    Incorrect,
}

/// Outcome of a transition that may end the session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    Continue,
    Finished,
}

/// One typing attempt: a target word sequence, the input typed against it,
/// and the counters the metrics are derived from.
#[derive(Debug, Clone)]
pub struct Session {
    pub target: Vec<String>,
    pub outcomes: Vec<Correctness>,
    pub index: usize,
    pub pending: String,
    pub phase: Phase,
    pub started_at: Option<SystemTime>,
    pub ended_at: Option<SystemTime>,
    pub keystrokes: u64,
    pub errors: u64,
    pub budget_secs: Option<u64>,
    pub remaining_secs: Option<u64>,
}

impl Session {
    pub fn new(target: Vec<String>, budget_secs: Option<u64>) -> Self {
        let outcomes = vec![Correctness::Pending; target.len()];
        Self {
            target,
            outcomes,
            index: 0,
            pending: String::new(),
            phase: Phase::Idle,
            started_at: None,
            ended_at: None,
            keystrokes: 0,
            errors: 0,
            budget_secs,
            remaining_secs: budget_secs,
        }
    }

    pub fn has_started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn has_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_timed(&self) -> bool {
        self.budget_secs.is_some()
    }

    /// Replace the time budget. Only meaningful before the first keystroke;
    /// a running countdown is never adjusted.
    pub fn set_budget(&mut self, secs: u64) {
        if self.phase == Phase::Idle && self.budget_secs.is_some() {
            self.budget_secs = Some(secs);
            self.remaining_secs = Some(secs);
        }
    }

    fn start(&mut self) {
        self.phase = Phase::Running;
        self.started_at = Some(SystemTime::now());
        self.keystrokes = 0;
        self.errors = 0;
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.ended_at = Some(SystemTime::now());
    }

    /// True when any position of the pending input disagrees with the
    /// current target word, or the pending input has run past its end.
    fn pending_mismatches(&self) -> bool {
        let Some(word) = self.target.get(self.index) else {
            return true;
        };
        let mut expected = word.chars();
        for typed in self.pending.chars() {
            match expected.next() {
                Some(c) if c == typed => continue,
                _ => return true,
            }
        }
        false
    }

    /// One change event: a keystroke is counted, and at most one error event
    /// is added when the new pending input mismatches the target word.
    fn record_edit(&mut self) {
        self.keystrokes += 1;
        if self.pending_mismatches() {
            self.errors += 1;
        }
    }

    /// Append a character to the pending input. The first strike of an idle
    /// session starts it.
    pub fn strike(&mut self, c: char) {
        match self.phase {
            Phase::Finished => return,
            Phase::Idle => self.start(),
            Phase::Running => {}
        }
        self.pending.push(c);
        self.record_edit();
    }

    /// Remove the last pending character. A deletion is a change event like
    /// any other: it counts a keystroke and re-runs the mismatch check.
    pub fn erase(&mut self) {
        if self.phase != Phase::Running || self.pending.is_empty() {
            return;
        }
        self.pending.pop();
        self.record_edit();
    }

    /// Submit the pending word. Records correctness at the current index,
    /// then either advances to the next word or finishes the session when
    /// the last word was just judged.
    pub fn submit(&mut self) -> Advance {
        if self.phase != Phase::Running || self.index >= self.target.len() {
            return Advance::Continue;
        }

        let correct = self.pending.trim() == self.target[self.index];
        self.outcomes[self.index] = if correct {
            Correctness::Correct
        } else {
            Correctness::Incorrect
        };

        self.index += 1;
        self.pending.clear();

        if self.index == self.target.len() {
            self.finish();
            Advance::Finished
        } else {
            Advance::Continue
        }
    }

    /// One second of a timed session elapsing. Ticks reaching a session that
    /// is not running are no-ops, so a stale tick can never mutate a
    /// replaced session.
    pub fn on_tick(&mut self) -> Advance {
        if self.phase != Phase::Running {
            return Advance::Continue;
        }
        let Some(remaining) = self.remaining_secs else {
            return Advance::Continue;
        };
        let remaining = remaining.saturating_sub(1);
        self.remaining_secs = Some(remaining);
        if remaining == 0 {
            self.finish();
            Advance::Finished
        } else {
            Advance::Continue
        }
    }

    pub fn correct_words(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == Correctness::Correct)
            .count()
    }

    /// Wall-clock seconds between start and end; zero while either
    /// timestamp is missing.
    pub fn elapsed_secs(&self) -> f64 {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => {
                end.duration_since(start).unwrap_or_default().as_secs_f64()
            }
            _ => 0.0,
        }
    }

    /// Correctly typed words per minute, rounded. Timed sessions are judged
    /// against the configured budget; otherwise against wall-clock elapsed
    /// time. Zero when elapsed time is zero or unknown.
    pub fn wpm(&self) -> u32 {
        let minutes = match self.budget_secs {
            Some(budget) => budget as f64 / 60.0,
            None => self.elapsed_secs() / 60.0,
        };
        if minutes <= 0.0 {
            return 0;
        }
        (self.correct_words() as f64 / minutes).round() as u32
    }

    /// Share of change events that were error-free, as a rounded percentage.
    /// Defined as 100 before any keystroke lands.
    pub fn accuracy(&self) -> u32 {
        if self.keystrokes == 0 {
            return 100;
        }
        (100.0 - (self.errors as f64 / self.keystrokes as f64) * 100.0).round() as u32
    }

    /// Completion percentage: words submitted for word-count sessions, time
    /// consumed for timed ones.
    pub fn progress(&self) -> f64 {
        match (self.budget_secs, self.remaining_secs) {
            (Some(budget), Some(remaining)) if budget > 0 => {
                (budget - remaining.min(budget)) as f64 / budget as f64 * 100.0
            }
            _ => {
                if self.target.is_empty() {
                    0.0
                } else {
                    self.index as f64 / self.target.len() as f64 * 100.0
                }
            }
        }
    }
}
