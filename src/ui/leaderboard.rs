use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Widget},
};

use mediawise::leaderboard::Tab;
use mediawise::session::UserStore;

use crate::ui::{accent, bold, dim, panel};
use crate::App;

fn rank_style(rank: u32) -> Style {
    match rank {
        1 => Style::default().fg(Color::Yellow),
        2 => Style::default().fg(Color::Gray),
        3 => Style::default().fg(Color::LightRed),
        _ => Style::default(),
    }
}

pub fn render_leaderboard(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let tabs: Vec<Span> = Tab::ALL
        .iter()
        .flat_map(|tab| {
            let style = if *tab == app.tab { accent() } else { dim() };
            [Span::styled(format!(" {tab} "), style), Span::raw(" ")]
        })
        .collect();
    Paragraph::new(Line::from(tabs)).render(chunks[0], buf);

    let header = Row::new(vec![
        Cell::from("Rank"),
        Cell::from("Player"),
        Cell::from("Level"),
        Cell::from("XP"),
        Cell::from("Accuracy"),
        Cell::from("Streak"),
    ])
    .style(bold().fg(Color::Yellow));

    let rows: Vec<Row> = app
        .leaderboards
        .rows(app.tab, app.session.user())
        .into_iter()
        .map(|row| {
            let entry = row.entry;
            let rank = if entry.rank == 0 {
                "-".to_string()
            } else {
                format!("#{}", entry.rank)
            };
            let name = match (&entry.badge, row.is_player) {
                (_, true) => format!("{} (You)", entry.username),
                (Some(badge), false) => format!("{} [{badge}]", entry.username),
                (None, false) => entry.username.clone(),
            };
            let style = if row.is_player {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                rank_style(entry.rank)
            };

            Row::new(vec![
                Cell::from(rank),
                Cell::from(name),
                Cell::from(entry.level.to_string()),
                Cell::from(entry.xp.to_string()),
                Cell::from(format!("{}%", entry.accuracy)),
                Cell::from(format!("{} days", entry.streak)),
            ])
            .style(style)
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(panel(&app.tab.to_string()))
    .render(chunks[1], buf);
}
