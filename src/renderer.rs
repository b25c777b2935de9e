use rand::Rng;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::game::{GameEngine, GameStatus};
use crate::grid::{Cell, GridSize};
use crate::input::Direction;
use crate::ui::hud::render_hud;
use crate::ui::overlay::{render_game_over, render_start_screen, render_victory};

/// Terminal columns per grid cell; two columns make a cell roughly square.
pub const CELL_COLUMNS: u16 = 2;

const GLYPH_CELL: &str = "██";
const GLYPH_CRASH: &str = "✖✖";
const GLYPH_DEBRIS: &str = "░░";

const SNAKE_HEAD_STYLE: Style = Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD);
const SNAKE_BODY_STYLE: Style = Style::new().fg(Color::Green);
const FOOD_STYLE: Style = Style::new().fg(Color::Red);
const CRASH_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .bg(Color::Red)
    .add_modifier(Modifier::BOLD);
const DEBRIS_STYLE: Style = Style::new().fg(Color::LightYellow);
const BORDER_STYLE: Style = Style::new().fg(Color::White);

/// Renders the full game frame from immutable engine state.
pub fn render<R: Rng>(frame: &mut Frame<'_>, engine: &GameEngine<R>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, engine.score(), engine.high_score());

    let grid = engine.grid();
    let Some(board) = board_area(play_area, grid) else {
        render_too_small(frame, play_area, grid);
        return;
    };

    let block = Block::bordered()
        .title(" snake ")
        .border_style(BORDER_STYLE);
    let inner = block.inner(board);
    frame.render_widget(block, board);

    if let Some(food) = engine.food() {
        paint_cell(frame, inner, grid, food, GLYPH_CELL, FOOD_STYLE);
    }
    for (index, cell) in engine.snake().cells().enumerate() {
        let style = if index == 0 {
            SNAKE_HEAD_STYLE
        } else {
            SNAKE_BODY_STYLE
        };
        paint_cell(frame, inner, grid, *cell, GLYPH_CELL, style);
    }

    match engine.status() {
        GameStatus::NotStarted => render_start_screen(frame, board, engine.high_score()),
        GameStatus::Running => {}
        GameStatus::GameOver => {
            if let Some(crash) = engine.crash() {
                render_burst(frame, inner, grid, crash.head);
            }
            render_game_over(
                frame,
                board,
                engine.score(),
                engine.high_score(),
                engine.crash().map(|crash| crash.cause),
            );
        }
        GameStatus::Won => render_victory(frame, board, engine.score()),
    }
}

/// Returns the bordered board rectangle centered in `area`, or `None` when
/// the grid does not fit.
#[must_use]
pub fn board_area(area: Rect, grid: GridSize) -> Option<Rect> {
    let width = grid.width.checked_mul(CELL_COLUMNS)?.checked_add(2)?;
    let height = grid.height.checked_add(2)?;
    if width > area.width || height > area.height {
        return None;
    }

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    Some(board)
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, grid: GridSize) {
    let message = format!(
        "Enlarge the terminal to fit the {}x{} board",
        grid.width, grid.height
    );
    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::new().fg(Color::Yellow)),
        area,
    );
}

/// Marks the crash cell and scatters debris over its in-board neighbours.
fn render_burst(frame: &mut Frame<'_>, inner: Rect, grid: GridSize, head: Cell) {
    for direction in [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ] {
        paint_cell(frame, inner, grid, head.step(direction), GLYPH_DEBRIS, DEBRIS_STYLE);
    }
    paint_cell(frame, inner, grid, head, GLYPH_CRASH, CRASH_STYLE);
}

fn paint_cell(frame: &mut Frame<'_>, inner: Rect, grid: GridSize, cell: Cell, glyph: &str, style: Style) {
    let Some((x, y)) = logical_to_terminal(inner, grid, cell) else {
        return;
    };
    frame.buffer_mut().set_string(x, y, glyph, style);
}

fn logical_to_terminal(inner: Rect, grid: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !grid.contains(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
