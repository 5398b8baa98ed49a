//! The game loop over an input source and a renderer.

use std::ops::ControlFlow;

use anyhow::Result;
use noughts::{Board, GameController, GameState, InputEvent, Notice};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

/// What an input source can ask of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// An event for the game controller.
    Input(InputEvent),
    /// Throw the current game away and start another.
    NewGame,
    /// Leave the loop.
    Quit,
}

/// Read-only snapshot handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    /// The live board.
    pub board: &'a Board,
    /// Active controller state.
    pub state: GameState,
    /// Notice from the last update, once the game is over.
    pub notice: Option<Notice>,
}

/// Source of input signals.
pub trait InputSource {
    /// Returns the signals gathered during one polling interval, possibly
    /// none. Render ticks arrive as `InputEvent::Idle`.
    fn poll(&mut self) -> Result<Vec<Signal>>;
}

/// Draws the game.
pub trait Renderer {
    /// Renders one frame.
    fn render(&mut self, view: &GameView<'_>) -> Result<()>;
}

/// Owns the controller and feeds it from a front-end.
#[derive(Debug)]
pub struct Session<R = StdRng> {
    controller: GameController<R>,
    notice: Option<Notice>,
}

impl<R: Rng> Session<R> {
    /// Creates a session around a fresh controller.
    pub fn new(controller: GameController<R>) -> Self {
        Self {
            controller,
            notice: None,
        }
    }

    /// Returns the controller.
    pub fn controller(&self) -> &GameController<R> {
        &self.controller
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> GameView<'_> {
        GameView {
            board: self.controller.board(),
            state: self.controller.state(),
            notice: self.notice,
        }
    }

    /// Runs until the front-end asks to quit.
    ///
    /// Every signal of a polled batch is handled before the next frame is
    /// rendered.
    #[instrument(skip_all)]
    pub fn run<F: InputSource + Renderer>(&mut self, frontend: &mut F) -> Result<()> {
        info!("Starting game loop");
        frontend.render(&self.view())?;

        loop {
            for signal in frontend.poll()? {
                if self.handle(signal)?.is_break() {
                    info!("Quit requested");
                    return Ok(());
                }
            }
            frontend.render(&self.view())?;
        }
    }

    /// Applies one signal.
    pub fn handle(&mut self, signal: Signal) -> Result<ControlFlow<()>> {
        match signal {
            Signal::Quit => return Ok(ControlFlow::Break(())),
            Signal::NewGame => {
                self.controller.reset();
                self.notice = None;
            }
            Signal::Input(event) => {
                let notice = self.controller.update(&event)?;
                if notice.is_some() && self.notice.is_none() {
                    info!(notice = ?notice, board = %self.controller.board(), "Game finished");
                } else if notice.is_some() {
                    debug!(?notice, "Game over notice");
                }
                self.notice = notice;
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}
