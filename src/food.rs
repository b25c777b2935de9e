use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::grid::{Cell, GridSize};

/// Every cell of the board is already occupied.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("no free cell left on the {}x{} board", grid.width, grid.height)]
pub struct NoSpaceError {
    pub grid: GridSize,
}

/// Places food on free board cells using an owned random source.
#[derive(Debug, Clone)]
pub struct FoodSpawner<R = StdRng> {
    grid: GridSize,
    rng: R,
}

impl<R: Rng> FoodSpawner<R> {
    #[must_use]
    pub fn new(grid: GridSize, rng: R) -> Self {
        Self { grid, rng }
    }

    /// Picks a cell uniformly among those not in `occupied`.
    ///
    /// Draws from the list of free cells rather than retrying random cells,
    /// so a nearly full board costs one pass instead of an unbounded loop.
    pub fn spawn(&mut self, occupied: &HashSet<Cell>) -> Result<Cell, NoSpaceError> {
        let free: Vec<Cell> = self
            .grid
            .cells()
            .filter(|cell| !occupied.contains(cell))
            .collect();

        if free.is_empty() {
            return Err(NoSpaceError { grid: self.grid });
        }

        let index = self.rng.gen_range(0..free.len());
        Ok(free[index])
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{FoodSpawner, NoSpaceError};
    use crate::grid::{Cell, GridSize};

    #[test]
    fn spawn_never_lands_on_occupied_cells() {
        let grid = GridSize::new(8, 6);
        let mut spawner = FoodSpawner::new(grid, StdRng::seed_from_u64(7));
        let occupied: HashSet<Cell> = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]
            .into_iter()
            .collect();

        for _ in 0..200 {
            let food = spawner.spawn(&occupied).expect("board has free cells");
            assert!(grid.contains(food));
            assert!(!occupied.contains(&food));
        }
    }

    #[test]
    fn spawn_finds_the_single_free_cell() {
        let grid = GridSize::new(3, 3);
        let mut spawner = FoodSpawner::new(grid, StdRng::seed_from_u64(11));
        let occupied: HashSet<Cell> = grid.cells().filter(|c| *c != Cell::new(2, 1)).collect();

        assert_eq!(spawner.spawn(&occupied), Ok(Cell::new(2, 1)));
    }

    #[test]
    fn spawn_on_full_board_reports_no_space() {
        let grid = GridSize::new(2, 2);
        let mut spawner = FoodSpawner::new(grid, StdRng::seed_from_u64(3));
        let occupied: HashSet<Cell> = grid.cells().collect();

        assert_eq!(spawner.spawn(&occupied), Err(NoSpaceError { grid }));
    }

    #[test]
    fn spawn_reaches_every_free_cell() {
        let grid = GridSize::new(3, 2);
        let mut spawner = FoodSpawner::new(grid, StdRng::seed_from_u64(5));
        let occupied = HashSet::from([Cell::new(0, 0)]);

        let seen: HashSet<Cell> = (0..500)
            .map(|_| spawner.spawn(&occupied).expect("board has free cells"))
            .collect();

        assert_eq!(seen.len(), grid.total_cells() - 1);
    }
}
