use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

const HUD_STYLE: Style = Style::new().fg(Color::Black).bg(Color::White);

/// Renders the one-line score bar and returns the remaining play area below it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, score: u32, high_score: u32) -> Rect {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    let line = score_line(score, high_score, usize::from(hud_area.width));
    frame.render_widget(Paragraph::new(line).style(HUD_STYLE), hud_area);

    play_area
}

/// Lays out the score on the left and the high score on the right of a
/// `width`-column line. Falls back to a single space between them when the
/// line is too narrow.
#[must_use]
pub fn score_line(score: u32, high_score: u32, width: usize) -> String {
    let left = format!(" Score: {score}");
    let right = format!("High Score: {high_score} ");
    let used = left.width() + right.width();
    let gap = width.saturating_sub(used).max(1);

    format!("{left}{}{right}", " ".repeat(gap))
}
