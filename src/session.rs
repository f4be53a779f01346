use chrono::{DateTime, Local};
use itertools::Itertools;
use serde::Serialize;
use tracing::info;

use crate::games::GameMode;
use crate::profile::{Achievement, StatsUpdate, UserProfile};
use crate::util::mean;

/// Record of one completed round. Never modified once logged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResult {
    pub mode: GameMode,
    pub score: u32,
    pub accuracy: u32,
    pub time_spent_secs: u32,
    pub challenges_attempted: usize,
    pub challenges_correct: usize,
    pub completed_at: DateTime<Local>,
}

/// Owner of the player profile, as seen by game rounds.
pub trait UserStore {
    fn user(&self) -> &UserProfile;
    fn update_user_stats(&mut self, score: u32, accuracy: u32) -> StatsUpdate;
    fn add_achievement(&mut self, achievement: Achievement);
}

/// Append-only log of completed rounds.
pub trait GameLog {
    fn game_results(&self) -> &[GameResult];
    fn add_game_result(&mut self, result: GameResult);
}

/// All state that outlives a single round.
#[derive(Debug, Clone)]
pub struct Session {
    profile: UserProfile,
    results: Vec<GameResult>,
}

#[derive(Debug, Serialize)]
pub struct SessionSummary<'a> {
    pub profile: &'a UserProfile,
    pub results: &'a [GameResult],
    pub by_mode: Vec<ModeBreakdown>,
}

/// Per-mode totals over this session's results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeBreakdown {
    pub mode: GameMode,
    pub games: usize,
    pub best_score: u32,
    pub avg_accuracy: f64,
}

/// Group results by mode, in `GameMode::ALL` order. Unplayed modes are left out.
pub fn mode_breakdown(results: &[GameResult]) -> Vec<ModeBreakdown> {
    let mut groups = results.iter().into_group_map_by(|r| r.mode);

    GameMode::ALL
        .iter()
        .filter_map(|mode| {
            let games = groups.remove(mode)?;
            let accuracies: Vec<f64> = games.iter().map(|r| r.accuracy as f64).collect();
            Some(ModeBreakdown {
                mode: *mode,
                games: games.len(),
                best_score: games.iter().map(|r| r.score).max().unwrap_or(0),
                avg_accuracy: mean(&accuracies).unwrap_or(0.0),
            })
        })
        .collect()
}

impl Session {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            results: Vec::new(),
        }
    }

    pub fn demo() -> Self {
        Self::new(UserProfile::demo())
    }

    pub fn fresh(username: impl Into<String>) -> Self {
        Self::new(UserProfile::fresh(username))
    }

    /// Best score logged for `mode` this session.
    pub fn best_score(&self, mode: GameMode) -> Option<u32> {
        self.results
            .iter()
            .filter(|r| r.mode == mode)
            .map(|r| r.score)
            .max()
    }

    pub fn summary(&self) -> SessionSummary<'_> {
        SessionSummary {
            profile: &self.profile,
            results: &self.results,
            by_mode: mode_breakdown(&self.results),
        }
    }
}

impl UserStore for Session {
    fn user(&self) -> &UserProfile {
        &self.profile
    }

    fn update_user_stats(&mut self, score: u32, accuracy: u32) -> StatsUpdate {
        let update = self.profile.update_stats(score, accuracy);
        if update.leveled_up {
            info!(level = update.level, xp = self.profile.xp, "level up");
        }
        update
    }

    fn add_achievement(&mut self, achievement: Achievement) {
        info!(title = %achievement.title, "achievement unlocked");
        self.profile.add_achievement(achievement);
    }
}

impl GameLog for Session {
    fn game_results(&self) -> &[GameResult] {
        &self.results
    }

    fn add_game_result(&mut self, result: GameResult) {
        self.results.push(result);
    }
}
