//! Noughts - tic-tac-toe against a perfect-play computer opponent.
//!
//! # Architecture
//!
//! - **Board**: the 3x3 mark array with win/draw detection
//! - **Evaluator**: exhaustive minimax choosing the opponent's move
//! - **GameController**: the turn state machine fed by input events
//!
//! Rendering and input devices live outside this crate; they read the
//! board through [`GameController::board`] and feed [`InputEvent`]s to
//! [`GameController::update`].
//!
//! # Example
//!
//! ```
//! use noughts::{GameController, GameState, InputEvent};
//!
//! # fn example() -> Result<(), noughts::GameError> {
//! let mut game = GameController::seeded(42);
//! game.update(&InputEvent::Idle)?;
//! assert_eq!(game.state(), GameState::PlayerTurn);
//!
//! game.update(&InputEvent::PointerReleased(Some(4)))?;
//! game.update(&InputEvent::Idle)?; // opponent replies
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod controller;
mod error;
mod evaluator;
mod types;

pub use board::{Board, CELLS, WIN_LINES};
pub use controller::{GameController, GameState, InputEvent, Notice, OPENING_CELL};
pub use error::{GameError, GameErrorKind};
pub use evaluator::{Evaluation, evaluate};
pub use types::{Mark, Outcome};
