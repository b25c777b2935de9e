use std::collections::{HashSet, VecDeque};

use crate::grid::{Cell, GridSize};
use crate::input::Direction;

/// Head position of a freshly started snake.
pub const INITIAL_HEAD: Cell = Cell::new(5, 5);

/// Segment count of a freshly started snake.
pub const INITIAL_LENGTH: usize = 3;

/// Heading of a freshly started snake.
pub const INITIAL_HEADING: Direction = Direction::Right;

/// Why the next head position is fatal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CollisionKind {
    Wall,
    SelfCollision,
}

/// Ordered snake body plus a set mirror for constant-time occupancy checks.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupied: HashSet<Cell>,
    heading: Direction,
}

impl Snake {
    /// Creates the three-cell starting snake, laid out behind
    /// [`INITIAL_HEAD`] and heading right.
    #[must_use]
    pub fn initial() -> Self {
        let tail_direction = INITIAL_HEADING.opposite();
        let cells = std::iter::successors(Some(INITIAL_HEAD), |cell| {
            Some(cell.step(tail_direction))
        })
        .take(INITIAL_LENGTH)
        .collect();

        Self::from_cells(cells, INITIAL_HEADING)
    }

    /// Creates a snake from explicit cells (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `cells` is empty or contains the same cell twice.
    #[must_use]
    pub fn from_cells(cells: Vec<Cell>, heading: Direction) -> Self {
        let body = VecDeque::from(cells);
        let occupied: HashSet<Cell> = body.iter().copied().collect();
        assert!(!body.is_empty(), "snake needs at least one cell");
        assert_eq!(occupied.len(), body.len(), "snake cells must be distinct");

        Self {
            body,
            occupied,
            heading,
        }
    }

    /// Returns the head cell offset by one step in `direction`.
    #[must_use]
    pub fn peek_next_head(&self, direction: Direction) -> Cell {
        self.head().step(direction)
    }

    /// Reports whether moving the head onto `next_head` is fatal.
    ///
    /// The tail still counts as occupied: chasing your own tail into the
    /// cell it is about to vacate ends the game.
    #[must_use]
    pub fn would_collide(&self, next_head: Cell, grid: GridSize) -> Option<CollisionKind> {
        if !grid.contains(next_head) {
            Some(CollisionKind::Wall)
        } else if self.occupies(next_head) {
            Some(CollisionKind::SelfCollision)
        } else {
            None
        }
    }

    /// Moves one cell in `direction`, keeping the tail when `grew` is set.
    pub fn advance(&mut self, direction: Direction, grew: bool) {
        let next_head = self.peek_next_head(direction);
        self.heading = direction;

        self.body.push_front(next_head);
        self.occupied.insert(next_head);

        if !grew {
            if let Some(tail) = self.body.pop_back() {
                self.occupied.remove(&tail);
            }
        }

        debug_assert_eq!(self.occupied.len(), self.body.len());
    }

    /// Returns the current head cell.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Returns the current tail cell.
    #[must_use]
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Set of every cell the body covers.
    #[must_use]
    pub fn occupied(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the heading committed on the last move.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Iterates over body cells from head to tail.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
