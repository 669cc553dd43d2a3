use crate::celebration::Confetti;
use crate::score::{ScoreStore, HIGH_SCORE_KEY};
use crate::words::WordBank;
use chrono::prelude::*;
use directories::ProjectDirs;
use std::fs::OpenOptions;
use std::io::{self, Write};

/// Seconds on the clock at the start of a round, and the cap for bonuses.
pub const ROUND_SECS: u64 = 30;
/// Seconds added to the clock per correct submission.
pub const TIME_BONUS_SECS: u64 = 2;
/// At or below this many seconds the timer readout turns urgent.
pub const LOW_TIME_SECS: u64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Countdown suspended; clock, score, and combo preserved.
    Idle,
    /// Countdown running, input accepted.
    Active,
    /// Round over; only restart leaves this state.
    Ended,
}

/// Cosmetic classification of a final score, highest tier first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Medal {
    Platinum,
    Gold,
    Silver,
    Bronze,
    Participant,
}

impl Medal {
    pub fn for_score(score: u32) -> Self {
        if score >= 50 {
            Medal::Platinum
        } else if score >= 30 {
            Medal::Gold
        } else if score >= 20 {
            Medal::Silver
        } else if score >= 10 {
            Medal::Bronze
        } else {
            Medal::Participant
        }
    }
}

/// One typing-challenge session: the full mutable state of a round plus
/// the injected persistence boundary for the best score.
pub struct Game {
    bank: WordBank,
    pub current_word: String,
    pub input: String,
    pub time_left: u64,
    pub score: u32,
    pub high_score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub phase: Phase,
    new_record: bool,
    store: Box<dyn ScoreStore>,
    pub celebration: Confetti,
}

impl Game {
    /// Build a fresh session. The best score is read from the store once,
    /// here; absent or unparseable values read as 0.
    pub fn new(bank: WordBank, store: Box<dyn ScoreStore>) -> Self {
        let high_score = store
            .get(HIGH_SCORE_KEY)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);
        let current_word = bank.pick();

        Self {
            bank,
            current_word,
            input: String::new(),
            time_left: ROUND_SECS,
            score: 0,
            high_score,
            combo: 0,
            max_combo: 0,
            phase: Phase::Idle,
            new_record: false,
            store,
            celebration: Confetti::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Set only at round end, against the best score from before the round.
    pub fn is_new_record(&self) -> bool {
        self.new_record
    }

    pub fn is_low_time(&self) -> bool {
        self.time_left <= LOW_TIME_SECS
    }

    pub fn medal(&self) -> Medal {
        Medal::for_score(self.score)
    }

    /// Toggle between Idle and Active. No-op once the round has ended.
    pub fn start_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Idle => Phase::Active,
            Phase::Active => Phase::Idle,
            Phase::Ended => Phase::Ended,
        };
    }

    /// One elapsed second of countdown. Outside Active this does nothing,
    /// so a straggling tick after pause or game over can never fire.
    pub fn tick(&mut self) {
        if self.phase != Phase::Active {
            return;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end_round();
        }
    }

    /// Append a typed character to the attempt. Input is raw and unfiltered.
    pub fn write(&mut self, c: char) {
        if self.phase != Phase::Active {
            return;
        }
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        self.input.pop();
    }

    /// Judge the current attempt against the target word, trimmed and
    /// case-folded. A miss resets the combo but leaves the attempt in
    /// place for the player to keep editing.
    pub fn submit(&mut self) {
        if self.phase != Phase::Active {
            return;
        }

        if self.input.trim().to_lowercase() == self.current_word.to_lowercase() {
            self.score += 1;
            self.combo += 1;
            if self.combo > self.max_combo {
                self.max_combo = self.combo;
            }
            self.time_left = (self.time_left + TIME_BONUS_SECS).min(ROUND_SECS);
            self.current_word = self.bank.pick();
            self.input.clear();
        } else {
            self.combo = 0;
        }
    }

    /// Reset everything except the best score and re-enter Idle.
    pub fn restart(&mut self) {
        self.current_word = self.bank.pick();
        self.input.clear();
        self.time_left = ROUND_SECS;
        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.phase = Phase::Idle;
        self.new_record = false;
        self.celebration.stop();
    }

    pub fn start_celebration_if_record(&mut self, width: u16, height: u16) {
        if self.new_record {
            self.celebration.start(width, height);
        }
    }

    pub fn update_celebration(&mut self) {
        self.celebration.update();
    }

    fn end_round(&mut self) {
        self.phase = Phase::Ended;
        self.new_record = self.score > self.high_score;
        if self.new_record {
            self.high_score = self.score;
            let _ = self
                .store
                .set(HIGH_SCORE_KEY, &self.high_score.to_string());
        }
        let _ = self.save_round();
    }

    /// Append the finished round to the results log.
    fn save_round(&self) -> io::Result<()> {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "wordrush") {
            let config_dir = proj_dirs.config_dir();
            let log_path = config_dir.join("log.csv");

            std::fs::create_dir_all(config_dir)?;

            // If the log file doesn't exist yet, we need to emit a header
            let needs_header = !log_path.exists();

            let mut log_file = OpenOptions::new()
                .append(true)
                .create(true)
                .open(log_path)?;

            if needs_header {
                writeln!(log_file, "date,score,max_combo,high_score")?;
            }

            writeln!(
                log_file,
                "{},{},{},{}",
                Local::now().format("%c"),
                self.score,
                self.max_combo,
                self.high_score,
            )?;
        }

        Ok(())
    }
}
