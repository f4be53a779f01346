pub mod charting;
pub mod dashboard;
pub mod game;
pub mod leaderboard;
pub mod profile;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use mediawise::celebration::Celebration;
use mediawise::session::UserStore;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 2;

pub fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

pub fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub fn accent() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

/// Block with a title, used by every panel.
pub fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(format!(" {title} "), bold()))
}

/// Left-pad `text` so it sits centred in `width` columns.
pub fn centered(text: &str, width: u16) -> String {
    let pad = (width as usize).saturating_sub(text.width()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(1),    // screen
                Constraint::Length(1), // key legend
            ])
            .split(area);

        render_header(self, chunks[0], buf);

        let view = screen::current_view(&self.screen);
        view.render(self, chunks[1], buf);

        Paragraph::new(Span::styled(view.legend(self), italic())).render(chunks[2], buf);

        if self.celebration.is_active() {
            render_celebration(&self.celebration, area, buf);
        }
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let user = app.session.user();
    let line = Line::from(vec![
        Span::styled("MediaWise", accent()),
        Span::styled(format!("  {}  ", app.screen.title()), bold()),
        Span::styled(
            format!(
                "{}  L{}  {} XP  {}-day streak",
                user.username, user.level, user.xp, user.streak
            ),
            dim(),
        ),
    ]);
    Paragraph::new(line).render(area, buf);
}

/// Draw confetti and the banner over whatever is already in `buf`.
fn render_celebration(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::LightRed,
        Color::LightBlue,
    ];

    for particle in &celebration.particles {
        if particle.x < 0.0 || particle.y < 0.0 {
            continue;
        }
        let (x, y) = (particle.x as u16, particle.y as u16);
        if x >= area.width || y >= area.height {
            continue;
        }
        if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
            cell.set_symbol(&particle.symbol.to_string());
            cell.set_style(Style::default().fg(colors[particle.color_index % colors.len()]));
        }
    }

    let banner_area = Rect::new(area.x, area.y + area.height / 3, area.width, 1);
    Paragraph::new(Span::styled(
        celebration.banner,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(banner_area, buf);
}
