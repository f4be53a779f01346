use serde::{Deserialize, Serialize};

use crate::catalog::{read_content, CatalogError};
use crate::profile::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum Tab {
    #[default]
    Global,
    Friends,
    #[strum(serialize = "This Week")]
    Weekly,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Global, Tab::Friends, Tab::Weekly];

    pub fn next(self) -> Tab {
        match self {
            Tab::Global => Tab::Friends,
            Tab::Friends => Tab::Weekly,
            Tab::Weekly => Tab::Global,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub rank: u32,
    pub username: String,
    pub level: u32,
    pub xp: u32,
    pub accuracy: u32,
    pub streak: u32,
    #[serde(default)]
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub entries: Vec<Entry>,
    /// Fixed position of the player on this board. `None` uses the profile rank.
    #[serde(default)]
    pub player_rank: Option<u32>,
    #[serde(default)]
    pub player_xp: Option<u32>,
    #[serde(default)]
    pub player_streak: Option<u32>,
}

/// A rendered leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub entry: Entry,
    pub is_player: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Leaderboards {
    global: Board,
    friends: Board,
    weekly: Board,
}

impl Leaderboards {
    pub fn load() -> Result<Self, CatalogError> {
        read_content("leaderboard.json")
    }

    pub fn board(&self, tab: Tab) -> &Board {
        match tab {
            Tab::Global => &self.global,
            Tab::Friends => &self.friends,
            Tab::Weekly => &self.weekly,
        }
    }

    /// Board rows with the live player spliced in at their rank. Unranked
    /// players (rank 0) go last.
    pub fn rows(&self, tab: Tab, profile: &UserProfile) -> Vec<Row> {
        let board = self.board(tab);
        let player = Entry {
            rank: board.player_rank.unwrap_or(profile.rank),
            username: profile.username.clone(),
            level: profile.level,
            xp: board.player_xp.unwrap_or(profile.xp),
            accuracy: profile.stats.accuracy,
            streak: board.player_streak.unwrap_or(profile.streak),
            badge: None,
        };

        let mut rows: Vec<Row> = board
            .entries
            .iter()
            .map(|entry| Row {
                entry: entry.clone(),
                is_player: false,
            })
            .collect();

        let at = match player.rank {
            0 => rows.len(),
            rank => rows
                .iter()
                .position(|r| r.entry.rank > rank)
                .unwrap_or(rows.len()),
        };
        rows.insert(
            at,
            Row {
                entry: player,
                is_player: true,
            },
        );
        rows
    }
}
