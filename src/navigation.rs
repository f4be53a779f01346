use crate::games::GameMode;

/// Top-level views of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Dashboard,
    Games,
    Game(GameMode),
    Profile,
    Leaderboard,
}

impl Screen {
    /// Where `Esc` leads. Games return to the selector, everything else to
    /// the dashboard.
    pub fn back(self) -> Screen {
        match self {
            Screen::Game(_) => Screen::Games,
            _ => Screen::Dashboard,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Screen::Dashboard => "Dashboard".to_string(),
            Screen::Games => "Games".to_string(),
            Screen::Game(mode) => mode.to_string(),
            Screen::Profile => "Profile".to_string(),
            Screen::Leaderboard => "Leaderboard".to_string(),
        }
    }
}

/// A featured challenge advertised on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedChallenge {
    pub title: &'static str,
    pub description: &'static str,
    pub reward_xp: u32,
    /// Game opened when the challenge is started. `None` for mixed challenges.
    pub mode: Option<GameMode>,
}

pub const DAILY_CHALLENGE: FeaturedChallenge = FeaturedChallenge {
    title: "Trending Topics Truth Check",
    description: "Analyze 5 trending news stories and identify which ones are legitimate",
    reward_xp: 50,
    mode: Some(GameMode::SpotFakeNews),
};

pub const WEEKLY_CHALLENGE: FeaturedChallenge = FeaturedChallenge {
    title: "Master Detective Challenge",
    description: "Complete challenges across all 4 game modes to prove your media literacy mastery",
    reward_xp: 200,
    mode: None,
};
