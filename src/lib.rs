//! Grid arcade Snake.
//!
//! The game core ([`game::GameEngine`] and the modules it builds on) is
//! headless: it never sleeps, draws, or reads the keyboard. A host feeds it
//! routed key presses and timer ticks and re-arms its timer with the
//! [`game::TickRequest`] each operation hands back. The binary is one such
//! host, drawing with ratatui in a crossterm terminal.

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod timer;
pub mod ui;
