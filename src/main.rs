pub mod celebration;
pub mod config;
pub mod game;
pub mod runtime;
pub mod score;
pub mod ui;
pub mod words;

use crate::{
    config::{ConfigStore, FileConfigStore},
    game::Game,
    runtime::{CrosstermEventSource, GameEvent, Runner},
    score::{FileScoreStore, ScoreStore, HIGH_SCORE_KEY},
    words::WordBank,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
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
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;
const TICKS_PER_SECOND: u64 = 1000 / TICK_RATE_MS;

/// terminal word-typing challenge
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the displayed word and press enter before the clock runs out. Correct words score points, build combo streaks, and buy back time; beat your stored best for a new record."
)]
pub struct Cli {
    /// custom word list file, one word per line (remembered for next time)
    #[clap(short = 'l', long)]
    list: Option<PathBuf>,

    /// print the stored best score and exit
    #[clap(long)]
    best: bool,
}

pub struct App {
    pub cli: Option<Cli>,
    pub game: Game,
    /// Runner ticks since the last whole-second countdown step.
    pub second_ticks: u64,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self, Box<dyn Error>> {
        Self::with_config_store(cli, &FileConfigStore::new())
    }

    pub fn with_config_store(
        cli: Cli,
        config_store: &dyn ConfigStore,
    ) -> Result<Self, Box<dyn Error>> {
        let mut cfg = config_store.load();

        // An explicitly requested list must load, and is only remembered
        // once it has; a remembered one may have moved since last run, so
        // fall back to the built-in set.
        let bank = if let Some(list) = &cli.list {
            let bank = WordBank::from_file(list)?;
            cfg.word_list = Some(list.display().to_string());
            let _ = config_store.save(&cfg);
            bank
        } else if let Some(list) = &cfg.word_list {
            WordBank::from_file(list).unwrap_or_else(|_| WordBank::builtin())
        } else {
            WordBank::builtin()
        };

        let game = Game::new(bank, Box::new(FileScoreStore::new()));

        Ok(Self {
            cli: Some(cli),
            game,
            second_ticks: 0,
        })
    }

    /// Advance the animation and the whole-second countdown by one runner
    /// tick. Returns true when the screen needs repainting.
    pub fn on_tick(&mut self, width: u16, height: u16) -> bool {
        let mut round_just_ended = false;

        if self.game.is_running() {
            self.second_ticks += 1;
            if self.second_ticks >= TICKS_PER_SECOND {
                self.second_ticks = 0;
                self.game.tick();

                if self.game.is_over() {
                    round_just_ended = true;
                    self.game.start_celebration_if_record(width, height);
                }
            }
        }

        self.game.update_celebration();

        // The tick that ends the round must paint the summary even when no
        // celebration follows; otherwise repaint only while something moves.
        round_just_ended || self.game.celebration.is_active || self.game.is_running()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.best {
        let store = FileScoreStore::new();
        let best: u32 = store
            .get(HIGH_SCORE_KEY)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);
        println!("{best}");
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(cli)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            GameEvent::Tick => {
                let size = terminal.size().unwrap_or_default();
                if app.on_tick(size.width, size.height) {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            GameEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            GameEvent::Key(key) => {
                match key.code {
                    KeyCode::Esc => {
                        break;
                    }
                    KeyCode::Tab => {
                        app.game.start_pause();
                        // Resumed games get a full second before the next decrement
                        app.second_ticks = 0;
                    }
                    KeyCode::Enter => {
                        app.game.submit();
                    }
                    KeyCode::Backspace => {
                        app.game.backspace();
                    }
                    KeyCode::Char(c) => {
                        if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'c' {
                            break;
                        }

                        if app.game.is_over() {
                            if c == 'r' {
                                app.game.restart();
                                app.second_ticks = 0;
                            }
                        } else {
                            app.game.write(c);
                        }
                    }
                    _ => {}
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
