//! The text adventure: room state machine and game loop
//!
//! Progress is loaded from the save file (or defaulted), handed to the
//! handler for the current room, and written back after every room and
//! before every way out of the loop.

pub mod console;
pub mod rooms;
pub mod save;

pub use console::{Console, ScriptedConsole, StdConsole};
pub use save::{load_progress, reset_progress, save_progress};

use crate::data::{Progress, Room};
use crate::GameError;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Reached the end room
    Finished(Progress),
    /// Player quit; the save holds the run mid-game
    Suspended(Progress),
}

impl Outcome {
    pub fn progress(&self) -> &Progress {
        match self {
            Outcome::Finished(p) | Outcome::Suspended(p) => p,
        }
    }
}

/// One play session bound to a console, a random source and a save file
pub struct Adventure<C, R> {
    console: C,
    rng: R,
    save_path: PathBuf,
}

impl<C: Console, R: Rng> Adventure<C, R> {
    pub fn new(console: C, rng: R, save_path: impl Into<PathBuf>) -> Self {
        Self {
            console,
            rng,
            save_path: save_path.into(),
        }
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Run the handler for the current room
    pub fn enter_room(&mut self, progress: &mut Progress) -> Result<(), GameError> {
        match progress.current_room {
            Room::Start => rooms::start_room(&mut self.console, progress),
            Room::PuzzleRoom => rooms::puzzle_room(&mut self.console, &mut self.rng, progress),
            Room::SecretRoom => rooms::secret_room(&mut self.console, progress),
            Room::TreasureRoom => rooms::treasure_room(&mut self.console, progress),
            Room::End => Ok(()),
            Room::Unknown => {
                warn!("save file names an unknown room");
                rooms::unknown_room(&mut self.console, progress);
                Ok(())
            }
        }
    }

    /// Play from wherever the save file left off
    pub fn play(&mut self) -> Result<Outcome, GameError> {
        let mut progress = load_progress(&self.save_path)?;
        self.console.say("Welcome to the Enhanced Text Adventure Game!");

        while !progress.current_room.is_end() {
            let room = progress.current_room;
            if let Err(e) = self.enter_room(&mut progress) {
                save_progress(&self.save_path, &progress)?;
                return Err(e);
            }
            save_progress(&self.save_path, &progress)?;
            info!(%room, next = %progress.current_room, score = progress.score, "room finished");

            let answer = match self.console.ask("Continue playing? (yes/no): ") {
                Ok(answer) => answer,
                Err(e) => {
                    save_progress(&self.save_path, &progress)?;
                    return Err(e);
                }
            };
            if answer.eq_ignore_ascii_case("no") {
                self.console.say("Exiting game and saving progress.");
                save_progress(&self.save_path, &progress)?;
                return Ok(Outcome::Suspended(progress));
            }
        }

        self.console.say("\nGame Over. Final Progress:");
        let summary = serde_json::to_string_pretty(&progress)
            .map_err(|e| GameError::CorruptedSave(e.to_string()))?;
        self.console.say(&summary);
        Ok(Outcome::Finished(progress))
    }
}
