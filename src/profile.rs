use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

pub const XP_PER_LEVEL: u32 = 1000;

/// Level reached with `xp` experience points.
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub unlocked_at: DateTime<Local>,
}

impl Achievement {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            unlocked_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    /// Running average of per-game accuracy, in percent.
    pub accuracy: u32,
    pub games_played: u32,
    pub total_xp: u32,
}

/// Outcome of folding one finished game into the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsUpdate {
    pub xp_gained: u32,
    pub previous_level: u32,
    pub level: u32,
    pub leveled_up: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub level: u32,
    pub xp: u32,
    pub next_level_xp: u32,
    pub streak: u32,
    pub rank: u32,
    pub stats: ProfileStats,
    pub achievements: Vec<Achievement>,
}

impl UserProfile {
    /// A brand new player at level 1.
    pub fn fresh(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: String::new(),
            level: 1,
            xp: 0,
            next_level_xp: XP_PER_LEVEL,
            streak: 0,
            rank: 0,
            stats: ProfileStats {
                accuracy: 0,
                games_played: 0,
                total_xp: 0,
            },
            achievements: Vec::new(),
        }
    }

    /// The seeded demo player. Its level (3) is stored as authored and does
    /// not follow `level_for_xp(850)`; the first update recomputes it.
    pub fn demo() -> Self {
        Self {
            username: "MediaMaster".to_string(),
            email: "user@example.com".to_string(),
            level: 3,
            xp: 850,
            next_level_xp: 1000,
            streak: 7,
            rank: 142,
            stats: ProfileStats {
                accuracy: 78,
                games_played: 23,
                total_xp: 850,
            },
            achievements: vec![
                seeded_achievement("First Steps", "Complete your first game", (2024, 3, 1)),
                seeded_achievement(
                    "Streak Master",
                    "Maintain a 7-day playing streak",
                    (2024, 3, 10),
                ),
                seeded_achievement(
                    "Fake News Hunter",
                    "Score 100% accuracy in Spot the Fake News",
                    (2024, 3, 12),
                ),
            ],
        }
    }

    /// Fold a completed game into the cumulative stats.
    pub fn update_stats(&mut self, score: u32, accuracy: u32) -> StatsUpdate {
        let previous_level = self.level;
        let games_before = self.stats.games_played;
        let games_after = games_before + 1;

        self.xp += score;
        self.level = level_for_xp(self.xp);
        self.next_level_xp = self.level * XP_PER_LEVEL;
        self.stats.accuracy = ((self.stats.accuracy as f64 * games_before as f64
            + accuracy as f64)
            / games_after as f64)
            .round() as u32;
        self.stats.games_played = games_after;
        self.stats.total_xp = self.xp;

        StatsUpdate {
            xp_gained: score,
            previous_level,
            level: self.level,
            leveled_up: self.level > previous_level,
        }
    }

    pub fn add_achievement(&mut self, achievement: Achievement) {
        self.achievements.push(achievement);
    }

    pub fn has_achievement(&self, title: &str) -> bool {
        self.achievements.iter().any(|a| a.title == title)
    }

    /// Progress towards `next_level_xp`, clamped to 0..=1.
    pub fn level_progress(&self) -> f64 {
        if self.next_level_xp == 0 {
            return 0.0;
        }
        (self.xp as f64 / self.next_level_xp as f64).clamp(0.0, 1.0)
    }
}

fn seeded_achievement(title: &str, description: &str, (y, m, d): (i32, u32, u32)) -> Achievement {
    let unlocked_at = Local
        .with_ymd_and_hms(y, m, d, 0, 0, 0)
        .earliest()
        .unwrap_or_else(Local::now);

    Achievement {
        title: title.to_string(),
        description: description.to_string(),
        unlocked_at,
    }
}
