mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::{Duration, Instant},
};
use tracing::{debug, info};

use mediawise::{
    catalog::CatalogError,
    celebration::Celebration,
    config::{Config, ConfigStore, FileConfigStore},
    games::{ActiveGame, Choice, GameMode},
    leaderboard::{Leaderboards, Tab},
    logging,
    navigation::{Screen, DAILY_CHALLENGE},
    profile::UserProfile,
    round::{Advance, Completion, Phase},
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Pacer, Runner, Ticker},
    session::Session,
};

/// media literacy quiz games in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Sharpen your media literacy: spot fake headlines, AI images, clickbait and unreliable sources against the clock, and level up as you go."
)]
pub struct Cli {
    /// open a game directly instead of the dashboard
    #[clap(short = 'm', long, value_enum)]
    mode: Option<GameMode>,

    /// player name shown on the profile and leaderboard
    #[clap(short = 'u', long)]
    username: Option<String>,

    /// start from an empty level 1 profile instead of the demo player
    #[clap(long)]
    fresh: bool,

    /// seconds allowed per question, for every game
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    round_secs: Option<u32>,

    /// log debug events to the log file
    #[clap(short = 'v', long)]
    verbose: bool,

    /// write the merged settings to the config file
    #[clap(long)]
    save_config: bool,

    /// print the session results and profile as JSON on exit
    #[clap(long)]
    print_summary: bool,
}

impl Cli {
    /// Flags take precedence over the stored config.
    fn settings(&self, base: Config) -> Config {
        Config {
            username: self.username.clone().unwrap_or(base.username),
            fresh_profile: self.fresh || base.fresh_profile,
            round_secs: self.round_secs.or(base.round_secs),
            start_mode: self.mode.or(base.start_mode),
            tick_rate_ms: base.tick_rate_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Map a key onto an answer for `mode`. Image comparisons only take `1`/`2`.
fn choice_for(mode: GameMode, comparison: bool, code: KeyCode) -> Option<Choice> {
    let KeyCode::Char(c) = code else {
        return None;
    };
    match (mode, c) {
        (GameMode::SpotFakeNews, 'a') => Some(Choice::First),
        (GameMode::SpotFakeNews, 'b') => Some(Choice::Second),
        (GameMode::ImageDetective, '1') => Some(Choice::First),
        (GameMode::ImageDetective, '2') => Some(Choice::Second),
        (GameMode::ImageDetective, 'r') if !comparison => Some(Choice::First),
        (GameMode::ImageDetective, 'f') if !comparison => Some(Choice::Second),
        (GameMode::ClickbaitBuster, 'c') => Some(Choice::First),
        (GameMode::ClickbaitBuster, 'l') => Some(Choice::Second),
        (GameMode::SourceSleuth, 'c') => Some(Choice::First),
        (GameMode::SourceSleuth, 'n') => Some(Choice::Second),
        _ => None,
    }
}

#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub screen: Screen,
    pub game: Option<ActiveGame>,
    pub show_hint: bool,
    pub leaderboards: Leaderboards,
    pub tab: Tab,
    pub celebration: Celebration,
    pub last_completion: Option<Completion>,
    pub round_secs: Option<u32>,
    pub viewport: (u16, u16),
    pacer: Pacer,
}

impl App {
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        let profile = if config.fresh_profile {
            UserProfile::fresh(config.username.clone())
        } else {
            UserProfile {
                username: config.username.clone(),
                ..UserProfile::demo()
            }
        };

        let mut app = Self {
            session: Session::new(profile),
            screen: Screen::Dashboard,
            game: None,
            show_hint: false,
            leaderboards: Leaderboards::load()?,
            tab: Tab::default(),
            celebration: Celebration::new(),
            last_completion: None,
            round_secs: config.round_secs,
            viewport: (80, 24),
            pacer: Pacer::new(Instant::now()),
        };

        if let Some(mode) = config.start_mode {
            app.open_game(mode)?;
        }
        Ok(app)
    }

    /// Switch screens. Leaving a game drops its round.
    pub fn go(&mut self, screen: Screen) {
        if matches!(self.screen, Screen::Game(_)) && self.screen != screen {
            self.game = None;
            self.last_completion = None;
            self.show_hint = false;
            self.celebration.stop();
        }
        debug!(from = ?self.screen, to = ?screen, "navigate");
        self.screen = screen;
    }

    pub fn open_game(&mut self, mode: GameMode) -> Result<(), CatalogError> {
        let game = ActiveGame::start(mode, self.round_secs)?;
        self.go(Screen::Game(mode));
        self.game = Some(game);
        self.last_completion = None;
        self.show_hint = false;
        self.pacer.reset(Instant::now());
        info!(%mode, "game started");
        Ok(())
    }

    pub fn advance(&mut self) -> Option<Advance> {
        let game = self.game.as_mut()?;
        let advance = game.advance(&mut self.session)?;

        match &advance {
            Advance::Next { .. } => {
                self.show_hint = false;
                self.pacer.reset(Instant::now());
            }
            Advance::Completed(completion) => {
                if completion.result.accuracy == 100 {
                    self.celebration.start(self.viewport.0, self.viewport.1);
                }
                self.last_completion = Some(completion.clone());
            }
        }
        Some(advance)
    }

    pub fn restart(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.restart();
            self.last_completion = None;
            self.show_hint = false;
            self.celebration.stop();
            self.pacer.reset(Instant::now());
        }
    }

    /// Feed whole elapsed seconds to the running round.
    pub fn tick_seconds(&mut self, secs: u32) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        for _ in 0..secs {
            if game.on_tick().is_some() {
                break;
            }
        }
    }

    fn catch_up(&mut self, now: Instant) {
        let secs = self.pacer.whole_seconds(now);
        self.tick_seconds(secs);
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.celebration.update();
        self.catch_up(now);
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Result<Control, CatalogError> {
        self.on_key_at(key, Instant::now())
    }

    /// Handle a key pressed at `now`. Seconds elapsed since the last tick
    /// are applied first so an expired challenge is forfeited before the
    /// key is judged.
    pub fn on_key_at(&mut self, key: KeyEvent, now: Instant) -> Result<Control, CatalogError> {
        self.catch_up(now);

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Control::Quit);
        }

        match (self.screen, key.code) {
            (_, KeyCode::Char('q')) | (Screen::Dashboard, KeyCode::Esc) => {
                return Ok(Control::Quit)
            }
            (screen, KeyCode::Esc) => self.go(screen.back()),
            (Screen::Dashboard, KeyCode::Char('g')) => self.go(Screen::Games),
            (Screen::Dashboard, KeyCode::Char('p')) => self.go(Screen::Profile),
            (Screen::Dashboard, KeyCode::Char('l')) => self.go(Screen::Leaderboard),
            (Screen::Dashboard, KeyCode::Char('d')) => {
                if let Some(mode) = DAILY_CHALLENGE.mode {
                    self.open_game(mode)?;
                }
            }
            (Screen::Games, KeyCode::Char(c @ '1'..='4')) => {
                let idx = c as usize - '1' as usize;
                self.open_game(GameMode::ALL[idx])?;
            }
            (Screen::Leaderboard, KeyCode::Tab | KeyCode::Right) => self.tab = self.tab.next(),
            (Screen::Game(_), code) => self.on_game_key(code),
            _ => {}
        }
        Ok(Control::Continue)
    }

    fn on_game_key(&mut self, code: KeyCode) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        match game.phase() {
            Phase::Playing => {
                if code == KeyCode::Char('h') && game.mode().hint().is_some() {
                    self.show_hint = !self.show_hint;
                } else if let Some(choice) = choice_for(game.mode(), game.is_comparison(), code) {
                    game.choose(choice);
                }
            }
            Phase::Feedback => {
                if matches!(code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.advance();
                }
            }
            Phase::Completed => match code {
                KeyCode::Char('r') => self.restart(),
                KeyCode::Enter => self.go(Screen::Games),
                _ => {}
            },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let config = cli.settings(store.load());
    if cli.save_config {
        store.save(&config)?;
    }

    let log_path = logging::init(cli.verbose)?;
    info!(?log_path, username = %config.username, fresh = config.fresh_profile, "starting");

    let mut app = App::new(&config)?;
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(config.tick_rate_ms.max(10))),
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    outcome?;

    info!(games = app.session.summary().results.len(), "exiting");
    if cli.print_summary {
        println!("{}", serde_json::to_string_pretty(&app.session.summary())?);
    }

    Ok(())
}

fn start_tui<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        let size = terminal.size()?;
        app.viewport = (size.width, size.height);
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            AppEvent::Tick => app.on_tick(Instant::now()),
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if app.on_key(key)? == Control::Quit {
                    return Ok(());
                }
            }
        }
    }
}
