use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::snake::CollisionKind;

const TITLE_STYLE: Style = Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD);
const PROMPT_STYLE: Style = Style::new().fg(Color::Gray);

/// Draws the title screen shown before the first run.
pub fn render_start_screen(frame: &mut Frame<'_>, area: Rect, high_score: u32) {
    let lines = vec![
        Line::styled("SNAKE GAME", TITLE_STYLE),
        Line::from(""),
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::styled("[Enter]/[Space] Play", PROMPT_STYLE),
        Line::styled("Arrows/WASD to steer, [Q] to quit", PROMPT_STYLE),
    ];
    render_popup(frame, area, " start ", lines);
}

/// Draws the game-over notice on top of the final board.
pub fn render_game_over(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    cause: Option<CollisionKind>,
) {
    let is_best = score > 0 && score == high_score;
    let lines = vec![
        Line::styled("GAME OVER", TITLE_STYLE.fg(Color::LightRed)),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(format!("High score: {high_score}")),
        Line::from(match cause {
            Some(CollisionKind::Wall) => "Cause: hit the wall",
            Some(CollisionKind::SelfCollision) => "Cause: bit yourself",
            None => "",
        }),
        Line::from(if is_best { "New high score!" } else { "" }),
        Line::styled("Press any key to restart", PROMPT_STYLE),
    ];
    render_popup(frame, area, " game over ", lines);
}

/// Draws the notice shown when the snake has filled the whole board.
pub fn render_victory(frame: &mut Frame<'_>, area: Rect, score: u32) {
    let lines = vec![
        Line::styled("YOU WIN", TITLE_STYLE.fg(Color::LightYellow)),
        Line::from(""),
        Line::from(format!("The board is full. Score: {score}")),
        Line::from(""),
        Line::styled("Press any key to restart", PROMPT_STYLE),
    ];
    render_popup(frame, area, " victory ", lines);
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'_>>) {
    let popup = popup_area(area, &lines);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

/// Sizes a centered popup to its widest line plus border and padding,
/// clamped to `area`.
fn popup_area(area: Rect, lines: &[Line<'_>]) -> Rect {
    let widest = lines.iter().map(Line::width).max().unwrap_or(0);
    let width = u16::try_from(widest + 6).unwrap_or(u16::MAX).min(area.width);
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX).min(area.height);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    popup
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;
    use ratatui::text::Line;

    use super::popup_area;

    #[test]
    fn popup_fits_widest_line() {
        let lines = vec![Line::from("GAME OVER"), Line::from("Press any key to restart")];
        let popup = popup_area(Rect::new(0, 0, 60, 20), &lines);

        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 4);
        assert_eq!(popup.x, 15);
        assert_eq!(popup.y, 8);
    }

    #[test]
    fn popup_is_clamped_to_area() {
        let lines = vec![Line::from("x".repeat(100))];
        let popup = popup_area(Rect::new(2, 3, 40, 2), &lines);

        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 2);
    }
}
