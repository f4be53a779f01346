use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};

use mediawise::catalog::{
    decoy_for, HeadlineChallenge, ImageChallenge, ImageKind, NewsItem, SourceChallenge,
};
use mediawise::games::{ActiveGame, GameMode, RoundStatus};
use mediawise::round::{Phase, Round, Verdict};
use mediawise::session::UserStore;

use crate::ui::{accent, bold, dim, italic, panel};
use crate::App;

fn verdict_title(mode: GameMode, verdict: Verdict) -> &'static str {
    match (mode, verdict) {
        (_, Verdict::TimedOut) => "Time's up!",
        (GameMode::ImageDetective, Verdict::Correct { .. }) => "Excellent Detection!",
        (GameMode::SourceSleuth, Verdict::Correct { .. }) => "Excellent Investigation!",
        (_, Verdict::Correct { .. }) => "Correct!",
        (GameMode::ImageDetective, Verdict::Incorrect) => "Incorrect Analysis",
        (GameMode::SourceSleuth, Verdict::Incorrect) => "Incorrect Assessment",
        (_, Verdict::Incorrect) => "Incorrect",
    }
}

fn verdict_style(verdict: Verdict) -> Style {
    let color = match verdict {
        Verdict::Correct { .. } => Color::Green,
        Verdict::Incorrect | Verdict::TimedOut => Color::Red,
    };
    bold().fg(color)
}

fn bullets<'a>(heading: &'a str, items: &'a [String], color: Color) -> Vec<Line<'a>> {
    if items.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Line::from(Span::styled(heading, bold().fg(color)))];
    lines.extend(
        items
            .iter()
            .map(|item| Line::from(Span::raw(format!("  • {item}")))),
    );
    lines
}

pub fn render_game(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(game) = app.game.as_ref() else {
        Paragraph::new(Span::styled("No game in progress", italic())).render(area, buf);
        return;
    };
    let status = game.status();

    if status.phase == Phase::Completed {
        render_completed(app, status, area, buf);
        return;
    }

    let hint_lines = match (app.show_hint, status.mode.hint()) {
        (true, Some(_)) => 4,
        _ => 0,
    };
    let feedback_lines = if status.phase == Phase::Feedback { 9 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status line
            Constraint::Length(1), // timer
            Constraint::Min(4),    // challenge
            Constraint::Length(hint_lines),
            Constraint::Length(feedback_lines),
        ])
        .split(area);

    render_status(status, chunks[0], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(if status.seconds_remaining <= 5 {
            Color::Red
        } else {
            Color::Blue
        }))
        .percent(status.timer_ratio_pct.min(100))
        .label(format!("{}s", status.seconds_remaining))
        .render(chunks[1], buf);

    let challenge = match game {
        ActiveGame::SpotFakeNews(round) => spot_fake_news_lines(round),
        ActiveGame::ImageDetective(round) => image_lines(round),
        ActiveGame::ClickbaitBuster(round) => clickbait_lines(round),
        ActiveGame::SourceSleuth(round) => source_lines(round),
    };
    Paragraph::new(challenge)
        .wrap(Wrap { trim: true })
        .block(panel(&status.mode.to_string()))
        .render(chunks[2], buf);

    if let (true, Some(hint)) = (app.show_hint, status.mode.hint()) {
        Paragraph::new(Span::raw(hint))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Yellow))
            .block(panel("Hint"))
            .render(chunks[3], buf);
    }

    if let Some(verdict) = game.verdict() {
        let mut lines = vec![Line::from(Span::styled(
            verdict_title(status.mode, verdict),
            verdict_style(verdict),
        ))];
        if let Some(explanation) = game.explanation() {
            lines.push(Line::from(Span::raw(explanation.to_string())));
        }
        lines.extend(feedback_details(game));
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel("Feedback"))
            .render(chunks[4], buf);
    }
}

fn render_status(status: RoundStatus, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Round {} of {}", status.round_number, status.total_rounds),
            bold(),
        ),
        Span::styled(format!("   Score: {}", status.score), accent()),
        Span::styled(
            format!("   {}", "♥ ".repeat(status.lives as usize)),
            Style::default().fg(Color::Red),
        ),
    ]))
    .render(area, buf);
}

fn spot_fake_news_lines(round: &Round<NewsItem>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Which headline is real?", italic())),
        Line::from(""),
    ];
    let pair = [
        ("(a)", round.current()),
        ("(b)", decoy_for(round.catalog(), round.index())),
    ];
    for (key, item) in pair {
        let Some(item) = item else { continue };
        lines.push(Line::from(vec![
            Span::styled(format!("{key} "), accent()),
            Span::styled(item.headline.clone(), bold()),
        ]));
        lines.push(Line::from(Span::styled(
            format!("    {} · {} · {}", item.source, item.date, item.author),
            dim(),
        )));
        lines.push(Line::from(""));
    }
    lines
}

fn image_lines(round: &Round<ImageChallenge>) -> Vec<Line<'static>> {
    let Some(challenge) = round.current() else {
        return Vec::new();
    };
    let mut lines = vec![
        Line::from(Span::styled(challenge.title.clone(), bold())),
        Line::from(""),
    ];
    match &challenge.kind {
        ImageKind::Single { image_url, .. } => {
            lines.push(Line::from(Span::styled(image_url.clone(), dim())));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Is this image authentic or AI-generated?",
                italic(),
            )));
        }
        ImageKind::Comparison { images } => {
            for (idx, image) in images.iter().enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(format!("({}) ", idx + 1), accent()),
                    Span::styled(image.url.clone(), dim()),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Which image is the real photograph?",
                italic(),
            )));
        }
    }
    lines
}

fn clickbait_lines(round: &Round<HeadlineChallenge>) -> Vec<Line<'static>> {
    let Some(challenge) = round.current() else {
        return Vec::new();
    };
    vec![
        Line::from(Span::styled(challenge.headline.clone(), bold())),
        Line::from(""),
        Line::from(Span::styled(
            "Clickbait or legitimate journalism?",
            italic(),
        )),
    ]
}

fn source_lines(round: &Round<SourceChallenge>) -> Vec<Line<'static>> {
    let Some(challenge) = round.current() else {
        return Vec::new();
    };
    let field = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{label}: "), dim()),
            Span::raw(value.to_string()),
        ])
    };
    let mut lines = vec![
        Line::from(Span::styled(challenge.title.clone(), bold())),
        field("Website", &challenge.website),
        field("URL", &challenge.url),
        field("About", &challenge.about_info),
        field("Author", &challenge.author_credentials),
        field("Published", &challenge.publication_date),
    ];
    if !challenge.sources.is_empty() {
        lines.push(field("Sources", &challenge.sources.join("; ")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Is this source credible?",
        italic(),
    )));
    lines
}

fn feedback_details(game: &ActiveGame) -> Vec<Line<'_>> {
    match game {
        ActiveGame::SpotFakeNews(_) => Vec::new(),
        ActiveGame::ImageDetective(round) => round
            .current()
            .map(|c| bullets("Red flags:", &c.red_flags, Color::Red))
            .unwrap_or_default(),
        ActiveGame::ClickbaitBuster(round) => {
            let Some(c) = round.current() else {
                return Vec::new();
            };
            let mut lines = vec![Line::from(Span::styled(
                format!("Clickbait score: {}/10", c.clickbait_score),
                bold(),
            ))];
            lines.extend(bullets("Techniques used:", &c.techniques, Color::Red));
            if let Some(better) = &c.legitimate_version {
                lines.push(Line::from(vec![
                    Span::styled("Better headline: ", bold().fg(Color::Green)),
                    Span::raw(better.as_str()),
                ]));
            }
            lines
        }
        ActiveGame::SourceSleuth(round) => {
            let Some(c) = round.current() else {
                return Vec::new();
            };
            let mut lines = vec![Line::from(Span::styled(
                format!("Credibility score: {}/10", c.credibility_score),
                bold(),
            ))];
            lines.extend(bullets("Red flags:", &c.red_flags, Color::Red));
            lines.extend(bullets("Good signs:", &c.good_signs, Color::Green));
            lines
        }
    }
}

fn render_completed(app: &App, status: RoundStatus, area: Rect, buf: &mut Buffer) {
    let user = app.session.user();
    let mut lines = vec![
        Line::from(Span::styled(status.mode.completion_title(), accent())),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("Final Score: {}", status.score), bold()),
            Span::styled(format!("   Accuracy: {}%", status.accuracy), bold()),
            Span::styled(
                format!("   +{} XP", status.score),
                bold().fg(Color::Magenta),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "Level {}  ·  {} / {} XP",
                user.level, user.xp, user.next_level_xp
            ),
            dim(),
        )),
    ];

    if let Some(completion) = &app.last_completion {
        if completion.stats.leveled_up {
            lines.push(Line::from(Span::styled(
                format!("Level up! You reached level {}", completion.stats.level),
                bold().fg(Color::Yellow),
            )));
        }
        for achievement in &completion.unlocked {
            lines.push(Line::from(vec![
                Span::styled("Achievement unlocked: ", bold().fg(Color::Yellow)),
                Span::raw(achievement.title.clone()),
            ]));
        }
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel("Results"))
        .render(area, buf);
}

/// Keys for the current game phase.
pub fn legend(app: &App) -> String {
    let Some(game) = app.game.as_ref() else {
        return "(esc) back".to_string();
    };
    let mode = game.mode();
    match game.phase() {
        Phase::Playing => {
            let answer = match mode {
                GameMode::SpotFakeNews => "(a)/(b) pick the real one / (h)int",
                GameMode::ImageDetective if game.is_comparison() => "(1)/(2) pick the real image",
                GameMode::ImageDetective => "(r)eal / (f)ake",
                GameMode::ClickbaitBuster => "(c)lickbait / (l)egit",
                GameMode::SourceSleuth => "(c)redible / (n)ot credible",
            };
            format!("{answer} / (esc) back")
        }
        Phase::Feedback => {
            let next = if game.status().has_next {
                mode.next_label()
            } else {
                "View Results"
            };
            format!("(enter) {next} / (esc) back")
        }
        Phase::Completed => "(r) play again / (enter) back to games / (q)uit".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{buffer_text, test_app};
    use mediawise::games::Choice;

    fn render(app: &App) -> String {
        let area = Rect::new(0, 0, 100, 32);
        let mut buffer = Buffer::empty(area);
        render_game(app, area, &mut buffer);
        buffer_text(&buffer)
    }

    #[test]
    fn test_verdict_titles() {
        assert_eq!(
            verdict_title(GameMode::ImageDetective, Verdict::Correct { points: 15 }),
            "Excellent Detection!"
        );
        assert_eq!(
            verdict_title(GameMode::SourceSleuth, Verdict::Incorrect),
            "Incorrect Assessment"
        );
        assert_eq!(
            verdict_title(GameMode::SpotFakeNews, Verdict::TimedOut),
            "Time's up!"
        );
    }

    #[test]
    fn test_spot_fake_news_shows_pair_and_hint() {
        let mut app = test_app();
        app.open_game(GameMode::SpotFakeNews).unwrap();
        app.show_hint = true;

        let text = render(&app);
        assert!(text.contains("Round 1 of 2"));
        assert!(text.contains("(a)"));
        assert!(text.contains("(b)"));
        assert!(text.contains("named authors"));
        assert!(text.contains("30s"));
    }

    #[test]
    fn test_feedback_after_answer() {
        let mut app = test_app();
        app.open_game(GameMode::ClickbaitBuster).unwrap();
        app.game.as_mut().unwrap().choose(Choice::Second);

        let text = render(&app);
        assert!(text.contains("Incorrect"));
        assert!(text.contains("Clickbait score"));
        assert!(legend(&app).contains("Next Headline"));
    }

    #[test]
    fn test_comparison_lists_both_images() {
        let mut app = test_app();
        app.open_game(GameMode::ImageDetective).unwrap();
        for _ in 0..2 {
            app.game.as_mut().unwrap().choose(Choice::First);
            app.advance();
        }

        let text = render(&app);
        assert!(text.contains("(1)"));
        assert!(text.contains("(2)"));
        assert!(legend(&app).contains("pick the real image"));
    }

    #[test]
    fn test_results_screen() {
        let mut app = test_app();
        app.open_game(GameMode::SourceSleuth).unwrap();
        for answer in [Choice::First, Choice::Second, Choice::First, Choice::Second] {
            app.game.as_mut().unwrap().choose(answer);
            app.advance();
        }

        let text = render(&app);
        assert!(text.contains("Investigation Complete!"));
        assert!(text.contains("Final Score: 80"));
        assert!(text.contains("Accuracy: 100%"));
        assert!(text.contains("Source Sage"));
        assert!(legend(&app).contains("play again"));
    }

    #[test]
    fn test_no_game_renders_placeholder() {
        let app = test_app();
        assert!(render(&app).contains("No game in progress"));
    }
}
