use assert_matches::assert_matches;

use mediawise::games::GameMode;
use mediawise::profile::UserProfile;
use mediawise::round::{Advance, Challenge, Phase, Round, RoundConfig, Verdict, STARTING_LIVES};
use mediawise::session::{GameLog, Session, UserStore};

#[derive(Debug, Clone)]
struct TrueOrFalse {
    answer: bool,
}

impl Challenge for TrueOrFalse {
    type Answer = bool;

    fn is_correct(&self, answer: bool) -> bool {
        answer == self.answer
    }

    fn points(&self) -> u32 {
        10
    }

    fn explanation(&self) -> &str {
        ""
    }
}

fn five_challenges() -> Round<TrueOrFalse> {
    let catalog = (0..5).map(|i| TrueOrFalse { answer: i % 3 == 0 }).collect();
    Round::new(
        RoundConfig {
            mode: GameMode::ClickbaitBuster,
            round_secs: 30,
            lives: STARTING_LIVES,
            step: 1,
        },
        catalog,
    )
}

fn right(round: &Round<TrueOrFalse>) -> bool {
    round.current().unwrap().answer
}

#[test]
fn all_correct_round_scores_fifty() {
    let mut session = Session::fresh("scenario");
    let mut round = five_challenges();

    let mut last = None;
    while round.phase() != Phase::Completed {
        let answer = right(&round);
        assert_matches!(round.submit(answer), Some(Verdict::Correct { points: 10 }));
        last = round.advance(&mut session);
    }

    let completion = match last {
        Some(Advance::Completed(c)) => c,
        other => panic!("expected completion, got {other:?}"),
    };
    assert_eq!(completion.result.score, 50);
    assert_eq!(completion.result.accuracy, 100);
    assert_eq!(completion.result.challenges_attempted, 5);
    assert_eq!(session.game_results().len(), 1);
    assert_eq!(session.game_results()[0].score, 50);
    assert_eq!(session.game_results()[0].accuracy, 100);
}

#[test]
fn three_wrong_answers_end_the_round() {
    let mut session = Session::fresh("scenario");
    let mut round = five_challenges();

    for n in 1..=3 {
        let answer = !right(&round);
        assert_eq!(round.submit(answer), Some(Verdict::Incorrect));
        let advance = round.advance(&mut session);
        if n < 3 {
            assert_matches!(advance, Some(Advance::Next { .. }));
        } else {
            assert_matches!(advance, Some(Advance::Completed(c)) if c.result.challenges_attempted == 3);
        }
    }

    assert_eq!(round.phase(), Phase::Completed);
    assert_eq!(round.lives(), 0);
    assert_eq!(session.game_results()[0].accuracy, 0);
}

#[test]
fn demo_profile_gains_two_hundred_xp() {
    let mut session = Session::new(UserProfile::demo());
    let update = session.update_user_stats(200, 100);

    assert_eq!(session.user().xp, 1050);
    assert_eq!(session.user().level, 2);
    assert_eq!(update.previous_level, 3);
}

#[test]
fn score_and_lives_move_in_opposite_directions() {
    let mut session = Session::fresh("scenario");
    let mut round = five_challenges();

    while round.phase() != Phase::Completed {
        let (score, lives) = (round.score(), round.lives());
        // alternate right and wrong answers
        let answer = if round.index() % 2 == 0 {
            right(&round)
        } else {
            !right(&round)
        };
        let verdict = round.submit(answer).unwrap();

        if verdict.is_correct() {
            assert!(round.score() > score);
            assert_eq!(round.lives(), lives);
        } else {
            assert_eq!(round.score(), score);
            assert!(round.lives() < lives);
        }
        round.advance(&mut session);
    }

    assert_eq!(round.score(), 30);
    assert_eq!(session.user().level, session.user().xp / 1000 + 1);
}
