use std::fmt;

use chrono::Local;
use tracing::{debug, info};

use crate::achievements;
use crate::games::GameMode;
use crate::profile::{Achievement, StatsUpdate};
use crate::session::{GameLog, GameResult, UserStore};
use crate::timer::{RoundTimer, TimerTick};

pub const STARTING_LIVES: u32 = 3;

/// One quiz item with a fixed correct answer.
pub trait Challenge {
    type Answer: Copy + PartialEq + fmt::Debug;

    fn is_correct(&self, answer: Self::Answer) -> bool;
    /// Points awarded for a correct answer to this item.
    fn points(&self) -> u32;
    fn explanation(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    pub mode: GameMode,
    pub round_secs: u32,
    pub lives: u32,
    /// How far the catalog index moves per round.
    pub step: usize,
}

impl RoundConfig {
    pub fn for_mode(mode: GameMode) -> Self {
        Self {
            mode,
            round_secs: mode.round_secs(),
            lives: STARTING_LIVES,
            step: mode.step(),
        }
    }

    pub fn with_round_secs(mut self, round_secs: u32) -> Self {
        self.round_secs = round_secs;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Feedback,
    Completed,
}

/// What the player did with the current challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission<A> {
    Answered(A),
    /// The timer ran out before any answer.
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct { points: u32 },
    Incorrect,
    TimedOut,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct { .. })
    }
}

/// Everything committed when a round completes.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub result: GameResult,
    pub stats: StatsUpdate,
    pub unlocked: Vec<Achievement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Next { index: usize },
    Completed(Completion),
}

/// State machine for one playthrough of a game mode.
#[derive(Debug)]
pub struct Round<C: Challenge> {
    config: RoundConfig,
    catalog: Vec<C>,
    index: usize,
    score: u32,
    lives: u32,
    timer: RoundTimer,
    phase: Phase,
    submission: Option<Submission<C::Answer>>,
    verdict: Option<Verdict>,
    attempted: usize,
    correct: usize,
    attainable_points: u32,
    seconds_spent: u32,
}

impl<C: Challenge> Round<C> {
    pub fn new(config: RoundConfig, catalog: Vec<C>) -> Self {
        Self {
            config,
            catalog,
            index: 0,
            score: 0,
            lives: config.lives,
            timer: RoundTimer::new(config.round_secs),
            phase: Phase::Playing,
            submission: None,
            verdict: None,
            attempted: 0,
            correct: 0,
            attainable_points: 0,
            seconds_spent: 0,
        }
    }

    /// Judge the player's answer. Ignored unless playing.
    pub fn submit(&mut self, answer: C::Answer) -> Option<Verdict> {
        if self.phase != Phase::Playing {
            return None;
        }
        let challenge = self.catalog.get(self.index)?;
        let points = challenge.points();

        let verdict = if challenge.is_correct(answer) {
            self.score += points;
            self.correct += 1;
            Verdict::Correct { points }
        } else {
            self.lives = self.lives.saturating_sub(1);
            Verdict::Incorrect
        };

        debug!(
            mode = %self.config.mode,
            index = self.index,
            ?answer,
            ?verdict,
            score = self.score,
            lives = self.lives,
            "answer submitted"
        );

        self.enter_feedback(Submission::Answered(answer), verdict, points);
        Some(verdict)
    }

    /// Feed one elapsed second to the challenge timer. Returns the forfeit
    /// verdict when the timer runs out on this tick.
    pub fn on_tick(&mut self) -> Option<Verdict> {
        if self.phase != Phase::Playing {
            return None;
        }

        match self.timer.on_tick() {
            TimerTick::Expired => Some(self.time_out()),
            TimerTick::Running(_) | TimerTick::Suspended => None,
        }
    }

    fn time_out(&mut self) -> Verdict {
        let points = self.current().map_or(0, |c| c.points());
        self.lives = self.lives.saturating_sub(1);

        debug!(
            mode = %self.config.mode,
            index = self.index,
            lives = self.lives,
            "challenge timed out"
        );

        self.enter_feedback(Submission::TimedOut, Verdict::TimedOut, points);
        Verdict::TimedOut
    }

    fn enter_feedback(&mut self, submission: Submission<C::Answer>, verdict: Verdict, points: u32) {
        self.timer.suspend();
        self.attempted += 1;
        self.attainable_points += points;
        self.seconds_spent += self.timer.elapsed_secs();
        self.submission = Some(submission);
        self.verdict = Some(verdict);
        self.phase = Phase::Feedback;
    }

    /// Leave the feedback view: either move on to the next challenge or
    /// complete the round and commit its result to the session.
    pub fn advance<S: UserStore + GameLog>(&mut self, session: &mut S) -> Option<Advance> {
        if self.phase != Phase::Feedback {
            return None;
        }

        if self.has_next() {
            self.index += self.config.step;
            self.timer.reset();
            self.submission = None;
            self.verdict = None;
            self.phase = Phase::Playing;

            debug!(mode = %self.config.mode, index = self.index, "next challenge");
            return Some(Advance::Next { index: self.index });
        }

        self.phase = Phase::Completed;

        let result = GameResult {
            mode: self.config.mode,
            score: self.score,
            accuracy: self.accuracy(),
            time_spent_secs: self.seconds_spent,
            challenges_attempted: self.attempted,
            challenges_correct: self.correct,
            completed_at: Local::now(),
        };

        session.add_game_result(result.clone());
        let stats = session.update_user_stats(result.score, result.accuracy);
        let unlocked = achievements::award(session, &result, &stats);

        info!(
            mode = %result.mode,
            score = result.score,
            accuracy = result.accuracy,
            attempted = result.challenges_attempted,
            xp = session.user().xp,
            level = session.user().level,
            "round completed"
        );

        Some(Advance::Completed(Completion {
            result,
            stats,
            unlocked,
        }))
    }

    /// Start over from the first challenge. Results already committed stay.
    pub fn restart(&mut self) {
        self.index = 0;
        self.score = 0;
        self.lives = self.config.lives;
        self.timer.reset();
        self.phase = Phase::Playing;
        self.submission = None;
        self.verdict = None;
        self.attempted = 0;
        self.correct = 0;
        self.attainable_points = 0;
        self.seconds_spent = 0;

        debug!(mode = %self.config.mode, "round restarted");
    }

    /// True when an advance from feedback would show another challenge.
    pub fn has_next(&self) -> bool {
        self.lives > 0 && self.index + self.config.step < self.catalog.len()
    }

    /// Percentage of attainable points scored over the attempted challenges.
    pub fn accuracy(&self) -> u32 {
        if self.attainable_points == 0 {
            return 0;
        }
        ((self.score as f64 / self.attainable_points as f64) * 100.0).round() as u32
    }

    pub fn current(&self) -> Option<&C> {
        self.catalog.get(self.index)
    }

    pub fn catalog(&self) -> &[C] {
        &self.catalog
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn timer(&self) -> &RoundTimer {
        &self.timer
    }

    pub fn submission(&self) -> Option<Submission<C::Answer>> {
        self.submission
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn attempted(&self) -> usize {
        self.attempted
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    /// 1-based round counter shown to the player.
    pub fn round_number(&self) -> usize {
        self.index / self.config.step.max(1) + 1
    }

    pub fn total_rounds(&self) -> usize {
        let step = self.config.step.max(1);
        self.catalog.len().div_ceil(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use assert_matches::assert_matches;

    #[derive(Debug, Clone)]
    struct Quiz {
        answer: bool,
        points: u32,
    }

    impl Challenge for Quiz {
        type Answer = bool;

        fn is_correct(&self, answer: bool) -> bool {
            answer == self.answer
        }

        fn points(&self) -> u32 {
            self.points
        }

        fn explanation(&self) -> &str {
            "because"
        }
    }

    fn quiz_round(len: usize) -> Round<Quiz> {
        let catalog = (0..len)
            .map(|i| Quiz {
                answer: i % 2 == 0,
                points: 10,
            })
            .collect();
        Round::new(
            RoundConfig {
                mode: GameMode::ClickbaitBuster,
                round_secs: 5,
                lives: STARTING_LIVES,
                step: 1,
            },
            catalog,
        )
    }

    fn right_answer(round: &Round<Quiz>) -> bool {
        round.current().unwrap().answer
    }

    #[test]
    fn test_round_initial_state() {
        let round = quiz_round(5);
        assert_eq!(round.phase(), Phase::Playing);
        assert_eq!(round.index(), 0);
        assert_eq!(round.score(), 0);
        assert_eq!(round.lives(), 3);
        assert_eq!(round.timer().remaining_secs(), 5);
        assert_eq!(round.submission(), None);
        assert_eq!(round.round_number(), 1);
        assert_eq!(round.total_rounds(), 5);
    }

    #[test]
    fn test_correct_answer_scores_and_keeps_lives() {
        let mut round = quiz_round(3);
        let answer = right_answer(&round);

        let verdict = round.submit(answer);

        assert_eq!(verdict, Some(Verdict::Correct { points: 10 }));
        assert_eq!(round.score(), 10);
        assert_eq!(round.lives(), 3);
        assert_eq!(round.phase(), Phase::Feedback);
        assert_eq!(round.submission(), Some(Submission::Answered(answer)));
    }

    #[test]
    fn test_wrong_answer_costs_a_life() {
        let mut round = quiz_round(3);
        let answer = !right_answer(&round);

        assert_eq!(round.submit(answer), Some(Verdict::Incorrect));
        assert_eq!(round.score(), 0);
        assert_eq!(round.lives(), 2);
        assert_eq!(round.phase(), Phase::Feedback);
    }

    #[test]
    fn test_submit_ignored_outside_playing() {
        let mut round = quiz_round(3);
        let answer = right_answer(&round);
        round.submit(answer);

        assert_eq!(round.submit(answer), None);
        assert_eq!(round.score(), 10);
    }

    #[test]
    fn test_timer_stops_once_answered() {
        let mut round = quiz_round(3);
        round.on_tick();
        round.submit(right_answer(&round));

        for _ in 0..10 {
            assert_eq!(round.on_tick(), None);
        }
        assert_eq!(round.lives(), 3);
        assert_eq!(round.timer().remaining_secs(), 4);
    }

    #[test]
    fn test_timeout_is_a_forfeit() {
        let mut round = quiz_round(3);
        let verdicts: Vec<_> = (0..5).filter_map(|_| round.on_tick()).collect();

        assert_eq!(verdicts, vec![Verdict::TimedOut]);
        assert_eq!(round.lives(), 2);
        assert_eq!(round.score(), 0);
        assert_eq!(round.phase(), Phase::Feedback);
        assert_eq!(round.submission(), Some(Submission::TimedOut));

        // no second forfeit for the same challenge
        assert_eq!(round.on_tick(), None);
        assert_eq!(round.lives(), 2);
    }

    #[test]
    fn test_advance_moves_to_next_challenge() {
        let mut session = Session::fresh("tester");
        let mut round = quiz_round(3);
        round.on_tick();
        round.submit(right_answer(&round));

        let advance = round.advance(&mut session);

        assert_eq!(advance, Some(Advance::Next { index: 1 }));
        assert_eq!(round.phase(), Phase::Playing);
        assert_eq!(round.timer().remaining_secs(), 5);
        assert_eq!(round.submission(), None);
        assert!(session.game_results().is_empty());
    }

    #[test]
    fn test_advance_ignored_while_playing() {
        let mut session = Session::fresh("tester");
        let mut round = quiz_round(3);
        assert_eq!(round.advance(&mut session), None);
        assert_eq!(round.index(), 0);
    }

    #[test]
    fn test_last_life_still_shows_feedback() {
        let mut session = Session::fresh("tester");
        let mut round = quiz_round(5);

        for _ in 0..2 {
            round.submit(!right_answer(&round));
            round.advance(&mut session);
        }
        round.submit(!right_answer(&round));

        assert_eq!(round.lives(), 0);
        assert_eq!(round.phase(), Phase::Feedback);
        assert!(!round.has_next());

        assert_matches!(round.advance(&mut session), Some(Advance::Completed(_)));
        assert_eq!(round.phase(), Phase::Completed);
    }

    #[test]
    fn test_completion_commits_once() {
        let mut session = Session::fresh("tester");
        let mut round = quiz_round(1);
        round.submit(right_answer(&round));

        let completion = match round.advance(&mut session) {
            Some(Advance::Completed(c)) => c,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(completion.result.score, 10);
        assert_eq!(completion.result.accuracy, 100);
        assert_eq!(completion.stats.xp_gained, 10);

        assert_eq!(round.advance(&mut session), None);
        assert_eq!(session.game_results().len(), 1);
        assert_eq!(session.user().stats.games_played, 1);
    }

    #[test]
    fn test_time_spent_counts_consumed_seconds() {
        let mut session = Session::fresh("tester");
        let mut round = quiz_round(2);

        round.on_tick();
        round.on_tick();
        round.submit(right_answer(&round));
        round.advance(&mut session);
        for _ in 0..5 {
            round.on_tick();
        }

        assert_eq!(round.phase(), Phase::Feedback);
        match round.advance(&mut session) {
            Some(Advance::Completed(c)) => assert_eq!(c.result.time_spent_secs, 7),
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn test_restart_resets_round_only() {
        let mut session = Session::fresh("tester");
        let mut round = quiz_round(1);
        round.submit(right_answer(&round));
        round.advance(&mut session);
        let xp = session.user().xp;

        round.restart();

        assert_eq!(round.phase(), Phase::Playing);
        assert_eq!(round.index(), 0);
        assert_eq!(round.score(), 0);
        assert_eq!(round.lives(), 3);
        assert_eq!(round.attempted(), 0);
        assert!(round.timer().is_running());
        assert_eq!(session.game_results().len(), 1);
        assert_eq!(session.user().xp, xp);
    }

    #[test]
    fn test_restart_from_timed_out_feedback() {
        let mut round = quiz_round(3);
        while round.on_tick().is_none() {}
        assert_eq!(round.phase(), Phase::Feedback);
        assert!(!round.timer().is_running());

        round.restart();

        assert_eq!(round.phase(), Phase::Playing);
        assert_eq!(round.lives(), 3);
        assert_eq!(round.submission(), None);
        assert_eq!(round.verdict(), None);
        assert_eq!(round.attempted(), 0);
        assert!(round.timer().is_running());
        assert_eq!(round.timer().remaining_secs(), 5);

        // the fresh timer counts down and expires again
        assert_eq!(round.on_tick(), None);
        assert_eq!(round.timer().remaining_secs(), 4);
    }

    #[test]
    fn test_restart_mid_playing() {
        let mut session = Session::fresh("tester");
        let mut round = quiz_round(3);
        round.submit(right_answer(&round));
        round.advance(&mut session);
        round.on_tick();
        round.on_tick();
        assert_eq!(round.index(), 1);
        assert_eq!(round.timer().remaining_secs(), 3);

        round.restart();

        assert_eq!(round.phase(), Phase::Playing);
        assert_eq!(round.index(), 0);
        assert_eq!(round.score(), 0);
        assert!(round.timer().is_running());
        assert_eq!(round.timer().remaining_secs(), 5);
        assert!(session.game_results().is_empty());
    }

    #[test]
    fn test_timeout_on_last_life_completes_on_advance() {
        let mut session = Session::fresh("tester");
        let mut round = quiz_round(5);

        for _ in 0..2 {
            round.submit(!right_answer(&round));
            round.advance(&mut session);
        }
        let verdicts: Vec<_> = (0..5).filter_map(|_| round.on_tick()).collect();

        assert_eq!(verdicts, vec![Verdict::TimedOut]);
        assert_eq!(round.lives(), 0);
        assert_eq!(round.phase(), Phase::Feedback);
        assert!(session.game_results().is_empty());

        match round.advance(&mut session) {
            Some(Advance::Completed(c)) => {
                assert_eq!(c.result.challenges_attempted, 3);
                assert_eq!(c.result.accuracy, 0);
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(round.phase(), Phase::Completed);
        assert_eq!(session.game_results().len(), 1);
    }

    #[test]
    fn test_step_two_traversal() {
        let mut session = Session::fresh("tester");
        let catalog = (0..4)
            .map(|_| Quiz {
                answer: true,
                points: 10,
            })
            .collect();
        let mut round = Round::new(
            RoundConfig {
                mode: GameMode::SpotFakeNews,
                round_secs: 30,
                lives: STARTING_LIVES,
                step: 2,
            },
            catalog,
        );
        assert_eq!(round.total_rounds(), 2);

        round.submit(true);
        assert_eq!(round.advance(&mut session), Some(Advance::Next { index: 2 }));
        assert_eq!(round.round_number(), 2);

        round.submit(true);
        match round.advance(&mut session) {
            Some(Advance::Completed(c)) => {
                assert_eq!(c.result.challenges_attempted, 2);
                assert_eq!(c.result.accuracy, 100);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn test_accuracy_over_mixed_point_values() {
        let mut session = Session::fresh("tester");
        let catalog = vec![
            Quiz {
                answer: true,
                points: 15,
            },
            Quiz {
                answer: true,
                points: 25,
            },
        ];
        let mut round = Round::new(RoundConfig::for_mode(GameMode::ImageDetective), catalog);

        round.submit(false);
        round.advance(&mut session);
        round.submit(true);

        assert_eq!(round.score(), 25);
        // 25 of 40 attainable
        assert_eq!(round.accuracy(), 63);
    }
}
