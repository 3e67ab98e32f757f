#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::trace;
use std::time::Duration;

use crate::Time;
use crate::components::{Board, Command, GameState, PieceRng};
use crate::config::Config;
use crate::snapshot::Snapshot;
use crate::systems::{apply_command, game_tick_system};

/// Host-facing handle on the simulation: feed it commands and frame time, read back
/// snapshots.
pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub show_ghost: bool,
}

impl App {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(PieceRng::new())
    }

    /// An app whose piece sequence is fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(PieceRng::with_seed(seed))
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let rng = config
            .game
            .seed
            .map_or_else(PieceRng::new, PieceRng::with_seed);

        let mut app = Self::with_rng(rng);
        app.show_ghost = config.display.show_ghost;
        app
    }

    fn with_rng(rng: PieceRng) -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Board::default());
        world.insert_resource(GameState::default());
        world.insert_resource(rng);

        Self {
            world,
            should_quit: false,
            show_ghost: true,
        }
    }

    pub fn handle_command(&mut self, command: Command) {
        if command == Command::Start {
            // Gravity of the new round counts from now, not from the previous frame
            self.world.insert_resource(Time::new());
        }
        apply_command(&mut self.world, command);
    }

    /// Runs gravity for an explicit frame delta.
    pub fn on_tick(&mut self, delta: Duration) {
        game_tick_system(&mut self.world, delta);
    }

    /// Samples the wall clock and runs gravity for the time since the last frame.
    pub fn on_frame(&mut self) {
        let delta = {
            let mut time = self.world.resource_mut::<Time>();
            time.update();
            time.delta()
        };
        trace!("Frame delta {delta:?}");
        self.on_tick(delta);
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        self.world.resource::<GameState>()
    }

    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot::capture(&mut self.world)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
