use std::collections::HashSet;

use crate::games::GameMode;
use crate::profile::{Achievement, StatsUpdate, UserProfile};
use crate::session::{GameLog, GameResult, UserStore};

struct Context<'a> {
    profile: &'a UserProfile,
    results: &'a [GameResult],
    result: &'a GameResult,
    stats: &'a StatsUpdate,
}

struct Rule {
    title: &'static str,
    description: &'static str,
    unlocked: fn(&Context) -> bool,
}

fn perfect_in(ctx: &Context, mode: GameMode) -> bool {
    ctx.result.mode == mode && ctx.result.accuracy == 100
}

const RULES: &[Rule] = &[
    Rule {
        title: "First Steps",
        description: "Complete your first game",
        unlocked: |ctx| ctx.profile.stats.games_played >= 1,
    },
    Rule {
        title: "Fake News Hunter",
        description: "Score 100% accuracy in Spot the Fake News",
        unlocked: |ctx| perfect_in(ctx, GameMode::SpotFakeNews),
    },
    Rule {
        title: "Pixel Detective",
        description: "Score 100% accuracy in Image Detective",
        unlocked: |ctx| perfect_in(ctx, GameMode::ImageDetective),
    },
    Rule {
        title: "Clickbait Crusher",
        description: "Score 100% accuracy in Clickbait Buster",
        unlocked: |ctx| perfect_in(ctx, GameMode::ClickbaitBuster),
    },
    Rule {
        title: "Source Sage",
        description: "Score 100% accuracy in Source Sleuth",
        unlocked: |ctx| perfect_in(ctx, GameMode::SourceSleuth),
    },
    Rule {
        title: "Master Detective",
        description: "Complete all 4 game modes in one session",
        unlocked: |ctx| {
            let played: HashSet<GameMode> = ctx.results.iter().map(|r| r.mode).collect();
            GameMode::ALL.iter().all(|m| played.contains(m))
        },
    },
    Rule {
        title: "Level Up",
        description: "Reach a new level",
        unlocked: |ctx| ctx.stats.leveled_up,
    },
];

/// Unlock every achievement earned by the game just logged. Each title is
/// unlocked at most once per profile.
pub fn award<S: UserStore + GameLog>(
    session: &mut S,
    result: &GameResult,
    stats: &StatsUpdate,
) -> Vec<Achievement> {
    let earned: Vec<Achievement> = {
        let ctx = Context {
            profile: session.user(),
            results: session.game_results(),
            result,
            stats,
        };
        RULES
            .iter()
            .filter(|rule| !ctx.profile.has_achievement(rule.title))
            .filter(|rule| (rule.unlocked)(&ctx))
            .map(|rule| Achievement::new(rule.title, rule.description))
            .collect()
    };

    for achievement in &earned {
        session.add_achievement(achievement.clone());
    }

    earned
}
