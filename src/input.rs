use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::GameStatus;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// High-level commands the engine and host loop understand.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Steer(Direction),
    Start,
    Restart,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Translates one raw key event into a command for the current game status.
///
/// Quit keys win in every state. After the game ends any other key restarts;
/// before the first start only Enter or Space begins play, though movement
/// keys are still buffered so the first tick can already turn.
#[must_use]
pub fn route_key(status: GameStatus, key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if is_quit_key(key) {
        return Some(GameInput::Quit);
    }

    match status {
        GameStatus::GameOver | GameStatus::Won => Some(GameInput::Restart),
        GameStatus::NotStarted => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Start),
            code => movement_key(code).map(GameInput::Steer),
        },
        GameStatus::Running => movement_key(key.code).map(GameInput::Steer),
    }
}

fn is_quit_key(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char(c) => c.eq_ignore_ascii_case(&'q'),
        _ => false,
    }
}

fn movement_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            's' => Some(Direction::Down),
            'a' => Some(Direction::Left),
            'd' => Some(Direction::Right),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{Direction, GameInput, direction_change_is_valid, route_key};
    use crate::game::GameStatus;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn reversal_is_not_a_valid_change() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn arrows_and_wasd_steer_while_running() {
        assert_eq!(
            route_key(GameStatus::Running, press(KeyCode::Left)),
            Some(GameInput::Steer(Direction::Left))
        );
        assert_eq!(
            route_key(GameStatus::Running, press(KeyCode::Char('W'))),
            Some(GameInput::Steer(Direction::Up))
        );
        assert_eq!(route_key(GameStatus::Running, press(KeyCode::Enter)), None);
    }

    #[test]
    fn enter_or_space_starts_a_fresh_game() {
        assert_eq!(
            route_key(GameStatus::NotStarted, press(KeyCode::Enter)),
            Some(GameInput::Start)
        );
        assert_eq!(
            route_key(GameStatus::NotStarted, press(KeyCode::Char(' '))),
            Some(GameInput::Start)
        );
        assert_eq!(
            route_key(GameStatus::NotStarted, press(KeyCode::Char('x'))),
            None
        );
    }

    #[test]
    fn any_key_restarts_after_the_game_ends() {
        for status in [GameStatus::GameOver, GameStatus::Won] {
            assert_eq!(
                route_key(status, press(KeyCode::Char('x'))),
                Some(GameInput::Restart)
            );
            assert_eq!(
                route_key(status, press(KeyCode::Left)),
                Some(GameInput::Restart)
            );
        }
    }

    #[test]
    fn quit_keys_take_priority_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        for status in [
            GameStatus::NotStarted,
            GameStatus::Running,
            GameStatus::GameOver,
        ] {
            assert_eq!(route_key(status, ctrl_c), Some(GameInput::Quit));
            assert_eq!(route_key(status, press(KeyCode::Esc)), Some(GameInput::Quit));
            assert_eq!(
                route_key(status, press(KeyCode::Char('q'))),
                Some(GameInput::Quit)
            );
        }
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };

        assert_eq!(route_key(GameStatus::Running, release), None);
    }
}
