use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use log::{debug, info};

use crate::config::GameConfig;
use crate::game::GridState;
use crate::input::GameInput;
use crate::stepper::Stepper;

/// Visibility of the game layer.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Layer hidden, no frames scheduled.
    Idle,
    /// Layer visible, stepper running.
    Running,
}

/// Whether the event loop should keep going after an input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Control {
    Continue,
    Quit,
}

/// Requests sent through a [`LayerHandle`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LayerCommand {
    Open,
    Close,
}

/// Cloneable handle that opens or closes the layer from outside the loop.
#[derive(Debug, Clone)]
pub struct LayerHandle {
    sender: Sender<LayerCommand>,
}

impl LayerHandle {
    /// Requests the layer to open; ignored once the session is gone.
    pub fn open(&self) {
        let _ = self.sender.send(LayerCommand::Open);
    }

    /// Requests the layer to close; ignored once the session is gone.
    pub fn close(&self) {
        let _ = self.sender.send(LayerCommand::Close);
    }
}

/// Idle/Running state machine owning the board and its stepper.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    grid: GridState,
    stepper: Stepper,
    commands: Receiver<LayerCommand>,
    sender: Sender<LayerCommand>,
}

impl Session {
    /// Creates an idle session for `config`.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let grid = match config.seed() {
            Some(seed) => GridState::new_with_seed(config.grid(), seed),
            None => GridState::new(config.grid()),
        };
        let (sender, commands) = mpsc::channel();

        Self {
            phase: Phase::Idle,
            grid,
            stepper: Stepper::new(config.step_interval()),
            commands,
            sender,
        }
    }

    /// Returns a handle for opening and closing the layer externally.
    #[must_use]
    pub fn handle(&self) -> LayerHandle {
        LayerHandle {
            sender: self.sender.clone(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// Mutable board access for scripted setups.
    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    /// Reveals the layer with a fresh board; no effect while running.
    pub fn open(&mut self, now: Instant) {
        if self.phase == Phase::Running {
            return;
        }

        self.grid.reset();
        self.stepper.start(now);
        self.phase = Phase::Running;
        info!("layer opened");
    }

    /// Hides the layer and cancels the frame schedule.
    pub fn close(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }

        self.stepper.stop();
        self.phase = Phase::Idle;
        info!("layer closed with score {}", self.grid.score);
    }

    /// Applies one mapped input according to the current phase.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> Control {
        match (self.phase, input) {
            (_, GameInput::Interrupt) | (Phase::Idle, GameInput::Quit) => return Control::Quit,
            (Phase::Idle, GameInput::Reveal) => self.open(now),
            (Phase::Running, GameInput::Direction(direction)) => {
                self.grid.buffer_direction(direction);
            }
            (Phase::Running, GameInput::Reset) => {
                debug!("reset requested");
                self.grid.reset();
            }
            (Phase::Running, GameInput::Close) => self.close(),
            _ => {}
        }

        Control::Continue
    }

    /// Applies every pending [`LayerHandle`] request.
    pub fn drain_commands(&mut self, now: Instant) {
        while let Ok(command) = self.commands.try_recv() {
            match command {
                LayerCommand::Open => self.open(now),
                LayerCommand::Close => self.close(),
            }
        }
    }

    /// Runs one display frame of simulation; returns steps taken.
    pub fn frame(&mut self, now: Instant) -> usize {
        self.stepper.advance(now, &mut self.grid)
    }
}
