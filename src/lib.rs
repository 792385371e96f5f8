//! Minimal snake game hosted in a reveal/hide layer, drawn in the terminal.
//!
//! The board logic ([`game`], [`snake`], [`apple`]) and its fixed-timestep
//! driver ([`stepper`]) are independent of the terminal; [`renderer`] turns
//! the board into draw commands and [`app`] wires both to `crossterm`.

pub mod app;
pub mod apple;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod session;
pub mod snake;
pub mod stepper;
pub mod terminal_runtime;
pub mod ui;
