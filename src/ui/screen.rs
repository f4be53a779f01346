use ratatui::{buffer::Buffer, layout::Rect};

use mediawise::navigation::Screen;

use crate::{
    ui::{dashboard, game, leaderboard, profile},
    App,
};

/// A UI screen boundary: draws the body of one `Screen` and names its keys.
pub trait View {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
    fn legend(&self, app: &App) -> String;
}

pub struct DashboardView;

impl View for DashboardView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        dashboard::render_dashboard(app, area, buf);
    }

    fn legend(&self, _app: &App) -> String {
        "(g)ames / (d)aily challenge / (p)rofile / (l)eaderboard / (q)uit".to_string()
    }
}

pub struct GamesView;

impl View for GamesView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        dashboard::render_selector(app, area, buf);
    }

    fn legend(&self, _app: &App) -> String {
        "(1-4) play / (esc) back / (q)uit".to_string()
    }
}

pub struct GameView;

impl View for GameView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        game::render_game(app, area, buf);
    }

    fn legend(&self, app: &App) -> String {
        game::legend(app)
    }
}

pub struct ProfileView;

impl View for ProfileView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        profile::render_profile(app, area, buf);
    }

    fn legend(&self, _app: &App) -> String {
        "(esc) back / (q)uit".to_string()
    }
}

pub struct LeaderboardView;

impl View for LeaderboardView {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        leaderboard::render_leaderboard(app, area, buf);
    }

    fn legend(&self, _app: &App) -> String {
        "(tab) switch board / (esc) back / (q)uit".to_string()
    }
}

/// Helper to construct the renderer for the current screen
pub fn current_view(screen: &Screen) -> Box<dyn View> {
    match screen {
        Screen::Dashboard => Box::new(DashboardView),
        Screen::Games => Box::new(GamesView),
        Screen::Game(_) => Box::new(GameView),
        Screen::Profile => Box::new(ProfileView),
        Screen::Leaderboard => Box::new(LeaderboardView),
    }
}
