use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::catalog::{
    self, CatalogError, HeadlineChallenge, ImageAnswer, ImageChallenge, NewsItem, PairChoice,
    SourceChallenge,
};
use crate::round::{Advance, Phase, Round, RoundConfig, Verdict};
use crate::session::{GameLog, UserStore};
use crate::timer::RoundTimer;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    #[strum(serialize = "Spot the Fake News")]
    SpotFakeNews,
    #[strum(serialize = "Image Detective")]
    ImageDetective,
    #[strum(serialize = "Clickbait Buster")]
    ClickbaitBuster,
    #[strum(serialize = "Source Sleuth")]
    SourceSleuth,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::SpotFakeNews,
        GameMode::ImageDetective,
        GameMode::ClickbaitBuster,
        GameMode::SourceSleuth,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            GameMode::SpotFakeNews => "spot-fake-news",
            GameMode::ImageDetective => "image-detective",
            GameMode::ClickbaitBuster => "clickbait-buster",
            GameMode::SourceSleuth => "source-sleuth",
        }
    }

    /// Seconds allowed per challenge.
    pub fn round_secs(&self) -> u32 {
        match self {
            GameMode::SpotFakeNews => 30,
            GameMode::ImageDetective => 45,
            GameMode::ClickbaitBuster => 25,
            GameMode::SourceSleuth => 60,
        }
    }

    /// Points for a standard correct answer. Image comparisons pay more.
    pub fn points_per_correct(&self) -> u32 {
        match self {
            GameMode::SpotFakeNews => 10,
            GameMode::ImageDetective => catalog::SINGLE_IMAGE_POINTS,
            GameMode::ClickbaitBuster => 12,
            GameMode::SourceSleuth => 20,
        }
    }

    /// Catalog positions consumed per round. Spot the Fake News walks its
    /// headlines in pairs.
    pub fn step(&self) -> usize {
        match self {
            GameMode::SpotFakeNews => 2,
            _ => 1,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GameMode::SpotFakeNews => {
                "Compare real and fake headlines to test your detection skills"
            }
            GameMode::ImageDetective => {
                "Identify AI-generated and manipulated images using detective skills"
            }
            GameMode::ClickbaitBuster => "Learn to identify manipulative headlines and thumbnails",
            GameMode::SourceSleuth => {
                "Investigate source credibility and cross-reference information"
            }
        }
    }

    pub fn difficulty(&self) -> &'static str {
        match self {
            GameMode::SpotFakeNews => "Beginner to Advanced",
            GameMode::ImageDetective => "Intermediate",
            GameMode::ClickbaitBuster => "Beginner",
            GameMode::SourceSleuth => "Advanced",
        }
    }

    pub fn avg_time(&self) -> &'static str {
        match self {
            GameMode::SpotFakeNews => "3-5 min",
            GameMode::ImageDetective => "5-7 min",
            GameMode::ClickbaitBuster => "2-4 min",
            GameMode::SourceSleuth => "7-10 min",
        }
    }

    pub fn badge(&self) -> Option<&'static str> {
        match self {
            GameMode::SpotFakeNews => Some("Most Popular"),
            GameMode::ImageDetective => Some("New!"),
            GameMode::ClickbaitBuster => None,
            GameMode::SourceSleuth => Some("Challenge Mode"),
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            GameMode::SpotFakeNews => Some(
                "Look for credible sources, reasonable claims, named authors, and recent dates. \
                 Be suspicious of anonymous authors, extraordinary claims, and unfamiliar websites.",
            ),
            _ => None,
        }
    }

    /// Label of the advance action while another challenge is left.
    pub fn next_label(&self) -> &'static str {
        match self {
            GameMode::SpotFakeNews => "Next Round",
            GameMode::ImageDetective => "Next Case",
            GameMode::ClickbaitBuster => "Next Headline",
            GameMode::SourceSleuth => "Next Investigation",
        }
    }

    /// Title of the summary screen once a round is over.
    pub fn completion_title(&self) -> &'static str {
        match self {
            GameMode::SpotFakeNews => "Game Complete!",
            GameMode::ImageDetective => "Detective Work Complete!",
            GameMode::ClickbaitBuster => "Clickbait Busted!",
            GameMode::SourceSleuth => "Investigation Complete!",
        }
    }
}

/// Player input, before it is mapped onto a mode's answer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// First option: real headline A, authentic image / left image,
    /// clickbait, credible source.
    First,
    /// Second option: headline B, AI image / right image, legitimate,
    /// not credible.
    Second,
}

/// Snapshot of a round that does not depend on the challenge type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundStatus {
    pub mode: GameMode,
    pub phase: Phase,
    pub score: u32,
    pub lives: u32,
    pub seconds_remaining: u32,
    pub timer_ratio_pct: u16,
    pub round_number: usize,
    pub total_rounds: usize,
    pub has_next: bool,
    pub accuracy: u32,
}

/// The round currently on screen, one variant per game mode.
#[derive(Debug)]
pub enum ActiveGame {
    SpotFakeNews(Round<NewsItem>),
    ImageDetective(Round<ImageChallenge>),
    ClickbaitBuster(Round<HeadlineChallenge>),
    SourceSleuth(Round<SourceChallenge>),
}

macro_rules! with_round {
    ($game:expr, $round:ident => $body:expr) => {
        match $game {
            ActiveGame::SpotFakeNews($round) => $body,
            ActiveGame::ImageDetective($round) => $body,
            ActiveGame::ClickbaitBuster($round) => $body,
            ActiveGame::SourceSleuth($round) => $body,
        }
    };
}

impl ActiveGame {
    /// Open a fresh round of `mode`, optionally overriding the per-challenge
    /// time limit.
    pub fn start(mode: GameMode, round_secs: Option<u32>) -> Result<Self, CatalogError> {
        let mut config = RoundConfig::for_mode(mode);
        if let Some(secs) = round_secs {
            config = config.with_round_secs(secs);
        }

        Ok(match mode {
            GameMode::SpotFakeNews => {
                ActiveGame::SpotFakeNews(Round::new(config, catalog::spot_fake_news()?))
            }
            GameMode::ImageDetective => {
                ActiveGame::ImageDetective(Round::new(config, catalog::image_detective()?))
            }
            GameMode::ClickbaitBuster => {
                ActiveGame::ClickbaitBuster(Round::new(config, catalog::clickbait_buster()?))
            }
            GameMode::SourceSleuth => {
                ActiveGame::SourceSleuth(Round::new(config, catalog::source_sleuth()?))
            }
        })
    }

    pub fn mode(&self) -> GameMode {
        with_round!(self, round => round.mode())
    }

    pub fn phase(&self) -> Phase {
        with_round!(self, round => round.phase())
    }

    /// Map a player choice onto the current challenge and submit it.
    pub fn choose(&mut self, choice: Choice) -> Option<Verdict> {
        let first = choice == Choice::First;
        match self {
            ActiveGame::SpotFakeNews(round) => round.submit(if first {
                PairChoice::OptionA
            } else {
                PairChoice::OptionB
            }),
            ActiveGame::ImageDetective(round) => {
                let answer = match round.current() {
                    Some(c) if c.is_comparison() => ImageAnswer::Pick(if first { 0 } else { 1 }),
                    _ => ImageAnswer::Authentic(first),
                };
                round.submit(answer)
            }
            ActiveGame::ClickbaitBuster(round) => round.submit(first),
            ActiveGame::SourceSleuth(round) => round.submit(first),
        }
    }

    /// True when the current challenge asks to pick one of several images.
    pub fn is_comparison(&self) -> bool {
        match self {
            ActiveGame::ImageDetective(round) => round.current().is_some_and(|c| c.is_comparison()),
            _ => false,
        }
    }

    pub fn on_tick(&mut self) -> Option<Verdict> {
        with_round!(self, round => round.on_tick())
    }

    pub fn advance<S: UserStore + GameLog>(&mut self, session: &mut S) -> Option<Advance> {
        with_round!(self, round => round.advance(session))
    }

    pub fn restart(&mut self) {
        with_round!(self, round => round.restart())
    }

    pub fn verdict(&self) -> Option<Verdict> {
        with_round!(self, round => round.verdict())
    }

    pub fn explanation(&self) -> Option<&str> {
        use crate::round::Challenge;
        with_round!(self, round => round.current().map(|c| c.explanation()))
    }

    pub fn timer(&self) -> &RoundTimer {
        with_round!(self, round => round.timer())
    }

    pub fn status(&self) -> RoundStatus {
        with_round!(self, round => RoundStatus {
            mode: round.mode(),
            phase: round.phase(),
            score: round.score(),
            lives: round.lives(),
            seconds_remaining: round.timer().remaining_secs(),
            timer_ratio_pct: (round.timer().ratio_remaining() * 100.0).round() as u16,
            round_number: round.round_number(),
            total_rounds: round.total_rounds(),
            has_next: round.has_next(),
            accuracy: round.accuracy(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use assert_matches::assert_matches;

    #[test]
    fn test_mode_display_and_slug() {
        assert_eq!(GameMode::SpotFakeNews.to_string(), "Spot the Fake News");
        assert_eq!(GameMode::SourceSleuth.slug(), "source-sleuth");
        assert_eq!(
            GameMode::from_str("clickbait-buster", true).unwrap(),
            GameMode::ClickbaitBuster
        );
    }

    #[test]
    fn test_mode_timings_and_points() {
        let secs: Vec<_> = GameMode::ALL.iter().map(|m| m.round_secs()).collect();
        assert_eq!(secs, vec![30, 45, 25, 60]);
        let points: Vec<_> = GameMode::ALL.iter().map(|m| m.points_per_correct()).collect();
        assert_eq!(points, vec![10, 15, 12, 20]);
        assert_eq!(GameMode::SpotFakeNews.step(), 2);
        assert_eq!(GameMode::SourceSleuth.step(), 1);
    }

    #[test]
    fn test_start_every_mode() {
        for mode in GameMode::ALL {
            let game = ActiveGame::start(mode, None).unwrap();
            let status = game.status();
            assert_eq!(status.mode, mode);
            assert_eq!(status.phase, Phase::Playing);
            assert_eq!(status.seconds_remaining, mode.round_secs());
            assert_eq!(status.lives, 3);
            assert_eq!(status.timer_ratio_pct, 100);
        }
    }

    #[test]
    fn test_round_secs_override() {
        let game = ActiveGame::start(GameMode::SourceSleuth, Some(5)).unwrap();
        assert_eq!(game.status().seconds_remaining, 5);
    }

    #[test]
    fn test_spot_fake_news_choices() {
        // first headline is real, so option A is right
        let mut game = ActiveGame::start(GameMode::SpotFakeNews, None).unwrap();
        assert_eq!(game.choose(Choice::First), Some(Verdict::Correct { points: 10 }));
        assert_eq!(game.status().total_rounds, 2);
    }

    #[test]
    fn test_image_choice_maps_to_comparison_pick() {
        let mut session = Session::fresh("p");
        let mut game = ActiveGame::start(GameMode::ImageDetective, None).unwrap();

        // 1: real single, 2: fake single, 3: comparison with the real one first
        assert!(game.choose(Choice::First).unwrap().is_correct());
        game.advance(&mut session);
        assert!(game.choose(Choice::Second).unwrap().is_correct());
        game.advance(&mut session);
        assert_eq!(game.choose(Choice::First), Some(Verdict::Correct { points: 25 }));
        assert_eq!(game.status().score, 55);
    }

    #[test]
    fn test_clickbait_full_clear() {
        let mut session = Session::fresh("p");
        let mut game = ActiveGame::start(GameMode::ClickbaitBuster, None).unwrap();
        let answers = [true, false, true, false, true];

        for (i, is_bait) in answers.iter().enumerate() {
            let choice = if *is_bait { Choice::First } else { Choice::Second };
            assert!(game.choose(choice).unwrap().is_correct());
            let advance = game.advance(&mut session);
            if i + 1 < answers.len() {
                assert_matches!(advance, Some(Advance::Next { .. }));
            } else {
                assert_matches!(advance, Some(Advance::Completed(c)) if c.result.score == 60 && c.result.accuracy == 100);
            }
        }
        assert_eq!(game.phase(), Phase::Completed);
    }

    #[test]
    fn test_explanation_follows_current_challenge() {
        let game = ActiveGame::start(GameMode::SourceSleuth, None).unwrap();
        assert!(game.explanation().unwrap().contains("high credibility"));
    }
}
