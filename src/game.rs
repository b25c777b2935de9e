use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, EngineConfig};
use crate::food::FoodSpawner;
use crate::grid::{Cell, GridSize};
use crate::input::{Direction, GameInput, direction_change_is_valid};
use crate::snake::{CollisionKind, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    NotStarted,
    Running,
    GameOver,
    /// The snake filled the board and no cell is left for food.
    Won,
}

/// Identifies one run of the game, from a start or restart until it ends.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct RunId(u64);

/// Asks the host to call [`GameEngine::on_tick`] with `run` after `delay`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickRequest {
    pub run: RunId,
    pub delay: Duration,
}

/// Where and why the last run ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Crash {
    /// Head cell at the moment of the crash.
    pub head: Cell,
    pub cause: CollisionKind,
}

/// Complete mutable game state for one session.
///
/// The engine never sleeps or owns a timer: every operation that (re)starts
/// ticking returns a [`TickRequest`] and the host decides how to wait.
#[derive(Debug, Clone)]
pub struct GameEngine<R = StdRng> {
    config: EngineConfig,
    snake: Snake,
    food: Option<Cell>,
    spawner: FoodSpawner<R>,
    pending: Option<Direction>,
    score: u32,
    high_score: u32,
    tick_interval: Duration,
    tick_count: u64,
    status: GameStatus,
    crash: Option<Crash>,
    run: RunId,
}

impl GameEngine<StdRng> {
    /// Creates an engine seeded from the operating system.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible sessions.
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Creates a not-yet-started engine with the initial snake and food.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut spawner = FoodSpawner::new(config.grid, rng);
        let snake = Snake::initial();
        let food = spawner
            .spawn(snake.occupied())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(Self::assemble(config, snake, food, spawner))
    }

    /// Creates a not-yet-started engine with an explicit board layout.
    ///
    /// Used to replay or test specific mid-game situations.
    pub fn with_layout(
        config: EngineConfig,
        snake: Snake,
        food: Cell,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if let Some(outside) = snake.cells().find(|cell| !config.grid.contains(**cell)) {
            return Err(ConfigError::Invalid(format!(
                "snake cell {outside:?} lies outside the board"
            )));
        }
        if !config.grid.contains(food) || snake.occupies(food) {
            return Err(ConfigError::Invalid(format!(
                "food {food:?} must be on a free board cell"
            )));
        }

        let spawner = FoodSpawner::new(config.grid, rng);
        Ok(Self::assemble(config, snake, food, spawner))
    }

    fn assemble(config: EngineConfig, snake: Snake, food: Cell, spawner: FoodSpawner<R>) -> Self {
        Self {
            config,
            snake,
            food: Some(food),
            spawner,
            pending: None,
            score: 0,
            high_score: 0,
            tick_interval: config.tick_interval,
            tick_count: 0,
            status: GameStatus::NotStarted,
            crash: None,
            run: RunId::default(),
        }
    }

    /// Begins the first run. Does nothing once the game has started.
    pub fn start(&mut self) -> Option<TickRequest> {
        if self.status != GameStatus::NotStarted {
            return None;
        }

        self.status = GameStatus::Running;
        self.run = RunId(self.run.0 + 1);
        info!("game started on a {}x{} board", self.config.grid.width, self.config.grid.height);
        Some(self.next_tick())
    }

    /// Resets the board after a finished run and begins a new one.
    ///
    /// The high score survives; everything else returns to its initial value.
    pub fn restart(&mut self) -> Option<TickRequest> {
        if !matches!(self.status, GameStatus::GameOver | GameStatus::Won) {
            return None;
        }

        self.snake = Snake::initial();
        self.pending = None;
        self.score = 0;
        self.tick_interval = self.config.tick_interval;
        self.tick_count = 0;
        self.crash = None;
        self.status = GameStatus::Running;
        self.run = RunId(self.run.0 + 1);
        self.respawn_food();
        info!("game restarted (high score {})", self.high_score);

        (self.status == GameStatus::Running).then(|| self.next_tick())
    }

    /// Buffers a heading change for the next tick.
    ///
    /// A reversal of the committed heading is ignored, and only the latest
    /// accepted request before a tick takes effect.
    pub fn set_direction(&mut self, direction: Direction) {
        if direction_change_is_valid(self.snake.heading(), direction) {
            self.pending = Some(direction);
        } else {
            debug!("ignoring reversal to {direction:?}");
        }
    }

    /// Applies one routed input and returns a tick request if play (re)started.
    pub fn apply_input(&mut self, input: GameInput) -> Option<TickRequest> {
        match input {
            GameInput::Steer(direction) => {
                self.set_direction(direction);
                None
            }
            GameInput::Start => self.start(),
            GameInput::Restart => self.restart(),
            GameInput::Quit => None,
        }
    }

    /// Timer entry point: advances only if `run` is still the live run.
    pub fn on_tick(&mut self, run: RunId) -> Option<TickRequest> {
        if run != self.run {
            debug!("dropping tick for stale run {run:?}");
            return None;
        }
        self.advance()
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Returns the request for the following tick, or `None` once the run is
    /// over (or was not running to begin with).
    pub fn advance(&mut self) -> Option<TickRequest> {
        if self.status != GameStatus::Running {
            return None;
        }

        let heading = self.pending.take().unwrap_or(self.snake.heading());
        let next_head = self.snake.peek_next_head(heading);

        if let Some(cause) = self.snake.would_collide(next_head, self.config.grid) {
            let crash = Crash {
                head: self.snake.head(),
                cause,
            };
            info!(
                "game over: {cause:?} at {:?} after {} ticks, score {}",
                crash.head, self.tick_count, self.score
            );
            self.crash = Some(crash);
            self.status = GameStatus::GameOver;
            return None;
        }

        let grew = self.food == Some(next_head);
        self.snake.advance(heading, grew);
        self.tick_count += 1;

        if grew {
            self.eat();
        }

        (self.status == GameStatus::Running).then(|| self.next_tick())
    }

    fn eat(&mut self) {
        self.score += self.config.points_per_food;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        debug!("food eaten, score {}, length {}", self.score, self.snake.len());

        if self.score % self.config.speed_threshold == 0 {
            self.speed_up();
        }

        self.respawn_food();
    }

    fn speed_up(&mut self) {
        let faster = self
            .tick_interval
            .saturating_sub(self.config.speed_step)
            .max(self.config.min_tick_interval);
        if faster != self.tick_interval {
            info!("speed up: tick interval now {}ms", faster.as_millis());
        }
        self.tick_interval = faster;
    }

    fn respawn_food(&mut self) {
        match self.spawner.spawn(self.snake.occupied()) {
            Ok(cell) => self.food = Some(cell),
            Err(error) => {
                info!("{error}; game won with score {}", self.score);
                self.food = None;
                self.status = GameStatus::Won;
            }
        }
    }

    fn next_tick(&self) -> TickRequest {
        TickRequest {
            run: self.run,
            delay: self.tick_interval,
        }
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food cell; `None` only after the board has been filled.
    #[must_use]
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Best score of this process; kept across restarts.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Crash details, present only while the status is `GameOver`.
    #[must_use]
    pub fn crash(&self) -> Option<Crash> {
        self.crash
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Returns the committed heading (not any buffered request).
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.snake.heading()
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.config.grid
    }

    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run
    }
}
