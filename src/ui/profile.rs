use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget},
};

use mediawise::session::{mode_breakdown, GameLog, UserStore};
use mediawise::util::format_secs;

use crate::ui::{
    accent, bold,
    charting::{accuracy_points, compute_chart_params, format_label},
    dim, italic, panel,
};
use crate::App;

pub fn render_profile(app: &App, area: Rect, buf: &mut Buffer) {
    let user = app.session.user();
    let results = app.session.game_results();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(cols[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(cols[1]);

    let email = if user.email.is_empty() {
        "-"
    } else {
        user.email.as_str()
    };
    Paragraph::new(vec![
        Line::from(Span::styled(user.username.clone(), accent())),
        Line::from(Span::styled(email, dim())),
        Line::from(format!(
            "Level {}  ·  {} / {} XP",
            user.level, user.xp, user.next_level_xp
        )),
        Line::from(format!("Accuracy {}%", user.stats.accuracy)),
        Line::from(format!("Games played {}", user.stats.games_played)),
        Line::from(format!("Streak {} days  ·  Rank #{}", user.streak, user.rank)),
    ])
    .block(panel("Player"))
    .render(left[0], buf);

    let achievements: Vec<Line> = if user.achievements.is_empty() {
        vec![Line::from(Span::styled("None yet", italic()))]
    } else {
        user.achievements
            .iter()
            .map(|a| {
                Line::from(vec![
                    Span::styled(format!("★ {}", a.title), bold()),
                    Span::styled(
                        format!("  {}", a.unlocked_at.format("%Y-%m-%d")),
                        dim(),
                    ),
                ])
            })
            .collect()
    };
    Paragraph::new(achievements)
        .block(panel("Achievements"))
        .render(left[1], buf);

    let breakdown = mode_breakdown(results);
    let summary: Vec<Line> = if breakdown.is_empty() {
        vec![Line::from(Span::styled(
            "No games played this session",
            italic(),
        ))]
    } else {
        breakdown
            .iter()
            .map(|b| {
                Line::from(format!(
                    "{:<20} {} played  best {}  avg {:.0}%",
                    b.mode.to_string(),
                    b.games,
                    b.best_score,
                    b.avg_accuracy
                ))
            })
            .chain(std::iter::once(Line::from(Span::styled(
                format!(
                    "time played {}",
                    format_secs(results.iter().map(|r| r.time_spent_secs).sum())
                ),
                dim(),
            ))))
            .collect()
    };
    Paragraph::new(summary)
        .block(panel("This session"))
        .render(right[0], buf);

    render_accuracy_chart(app, right[1], buf);
}

fn render_accuracy_chart(app: &App, area: Rect, buf: &mut Buffer) {
    let points = accuracy_points(app.session.game_results().iter().map(|r| r.accuracy));
    if points.is_empty() {
        panel("Accuracy per game").render(area, buf);
        return;
    }
    let (games, ceiling) = compute_chart_params(&points);

    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(Color::Magenta))
        .graph_type(GraphType::Line)
        .data(&points)];

    Chart::new(datasets)
        .block(panel("Accuracy per game"))
        .x_axis(
            Axis::default()
                .title("game")
                .bounds([1.0, games])
                .labels(vec![
                    Span::styled("1", bold()),
                    Span::styled(format_label(games), bold()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("%")
                .bounds([0.0, ceiling])
                .labels(vec![
                    Span::styled("0", bold()),
                    Span::styled(format_label(ceiling), bold()),
                ]),
        )
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{buffer_text, test_app};
    use mediawise::games::{Choice, GameMode};

    fn render(app: &App) -> String {
        let area = Rect::new(0, 0, 110, 24);
        let mut buffer = Buffer::empty(area);
        render_profile(app, area, &mut buffer);
        buffer_text(&buffer)
    }

    #[test]
    fn test_profile_before_any_game() {
        let app = test_app();
        let text = render(&app);
        assert!(text.contains("user@example.com"));
        assert!(text.contains("Streak Master"));
        assert!(text.contains("2024-03-12"));
        assert!(text.contains("No games played this session"));
    }

    #[test]
    fn test_profile_after_a_game() {
        let mut app = test_app();
        app.open_game(GameMode::ClickbaitBuster).unwrap();
        // three wrong calls end the round
        for answer in [Choice::Second, Choice::First, Choice::Second] {
            app.game.as_mut().unwrap().choose(answer);
            app.advance();
        }

        let text = render(&app);
        assert!(text.contains("Clickbait Buster"));
        assert!(text.contains("1 played"));
        assert!(text.contains("Games played 24"));
        assert!(text.contains("Accuracy per game"));
    }
}
