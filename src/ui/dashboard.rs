use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};

use mediawise::games::GameMode;
use mediawise::navigation::{FeaturedChallenge, DAILY_CHALLENGE, WEEKLY_CHALLENGE};
use mediawise::session::UserStore;

use crate::ui::{accent, bold, centered, dim, italic, panel};
use crate::App;

pub fn render_dashboard(app: &App, area: Rect, buf: &mut Buffer) {
    let user = app.session.user();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // welcome
            Constraint::Length(3), // stats
            Constraint::Length(5), // featured challenges
            Constraint::Length(3), // level progress
            Constraint::Min(0),    // achievements
        ])
        .split(area);

    Paragraph::new(vec![
        Line::from(Span::styled(
            centered(&format!("Welcome back, {}!", user.username), area.width),
            bold(),
        )),
        Line::from(Span::styled(
            centered(
                "Ready to sharpen your media literacy skills today?",
                area.width,
            ),
            dim(),
        )),
    ])
    .render(rows[0], buf);

    let stats = [
        ("Accuracy Rate", format!("{}%", user.stats.accuracy)),
        ("Games Played", user.stats.games_played.to_string()),
        ("Current Streak", format!("{} days", user.streak)),
        ("Rank", format!("#{}", user.rank)),
    ];
    let stat_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);
    for ((label, value), col) in stats.iter().zip(stat_cols.iter()) {
        Paragraph::new(Span::styled(value.clone(), accent()))
            .block(panel(label))
            .render(*col, buf);
    }

    let featured = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2); 2])
        .split(rows[2]);
    render_featured("Daily Challenge", &DAILY_CHALLENGE, featured[0], buf);
    render_featured("Weekly Tournament", &WEEKLY_CHALLENGE, featured[1], buf);

    Gauge::default()
        .block(panel(&format!("Level {} progress", user.level)))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(user.level_progress())
        .label(format!("{} / {} XP", user.xp, user.next_level_xp))
        .render(rows[3], buf);

    let achievements: Vec<Line> = if user.achievements.is_empty() {
        vec![Line::from(Span::styled(
            "Complete challenges to earn achievements!",
            italic(),
        ))]
    } else {
        user.achievements
            .iter()
            .rev()
            .take(3)
            .map(|a| {
                Line::from(vec![
                    Span::styled(format!("★ {}", a.title), bold()),
                    Span::styled(format!("  {}", a.description), dim()),
                ])
            })
            .collect()
    };
    Paragraph::new(achievements)
        .block(panel("Recent Achievements"))
        .render(rows[4], buf);
}

fn render_featured(heading: &str, challenge: &FeaturedChallenge, area: Rect, buf: &mut Buffer) {
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled(challenge.title, bold()),
            Span::styled(
                format!("  +{} XP", challenge.reward_xp),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(Span::styled(challenge.description, dim())),
    ])
    .wrap(Wrap { trim: true })
    .block(panel(heading))
    .render(area, buf);
}

/// Game mode selector.
pub fn render_selector(app: &App, area: Rect, buf: &mut Buffer) {
    let cards = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5); 4])
        .split(area);

    for (idx, (mode, card)) in GameMode::ALL.iter().zip(cards.iter()).enumerate() {
        let mut title = vec![
            Span::styled(format!("({}) ", idx + 1), accent()),
            Span::styled(mode.to_string(), bold()),
        ];
        if let Some(badge) = mode.badge() {
            title.push(Span::styled(
                format!("  [{badge}]"),
                Style::default().fg(Color::Magenta),
            ));
        }

        let best = app
            .session
            .best_score(*mode)
            .map(|s| format!("  best this session: {s}"))
            .unwrap_or_default();

        Paragraph::new(vec![
            Line::from(title),
            Line::from(Span::raw(mode.description())),
            Line::from(Span::styled(
                format!(
                    "{} · {} · {}s per question{}",
                    mode.difficulty(),
                    mode.avg_time(),
                    app.round_secs.unwrap_or(mode.round_secs()),
                    best
                ),
                dim(),
            )),
        ])
        .block(panel(mode.slug()))
        .render(*card, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{buffer_text, test_app};

    #[test]
    fn test_dashboard_shows_stats_and_challenges() {
        let app = test_app();
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);

        render_dashboard(&app, area, &mut buffer);

        let text = buffer_text(&buffer);
        assert!(text.contains("Welcome back, MediaMaster!"));
        assert!(text.contains("78%"));
        assert!(text.contains("#142"));
        assert!(text.contains("Trending Topics Truth Check"));
        assert!(text.contains("+200 XP"));
        assert!(text.contains("850 / 1000 XP"));
        assert!(text.contains("Fake News Hunter"));
    }

    #[test]
    fn test_selector_lists_all_modes() {
        let app = test_app();
        let area = Rect::new(0, 0, 100, 22);
        let mut buffer = Buffer::empty(area);

        render_selector(&app, area, &mut buffer);

        let text = buffer_text(&buffer);
        for mode in GameMode::ALL {
            assert!(text.contains(&mode.to_string()));
        }
        assert!(text.contains("[Most Popular]"));
        assert!(text.contains("60s per question"));
    }
}
