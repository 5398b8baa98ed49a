//! Crossterm/ratatui implementation of the input and render seams.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use noughts::InputEvent;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use tracing::{debug, info, instrument, trace, warn};

use crate::config::NoughtsConfig;
use crate::input::{key_signal, mouse_signal};
use crate::session::{GameView, InputSource, Renderer, Signal};
use crate::ui;

/// Full-screen terminal front-end with mouse capture.
pub struct TerminalFrontend {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    cursor: usize,
    tick_interval: Duration,
    poll_interval: Duration,
    last_tick: Instant,
    restored: bool,
}

impl TerminalFrontend {
    /// Switches the terminal to raw mode on the alternate screen.
    #[instrument(skip_all)]
    pub fn enter(config: &NoughtsConfig) -> Result<Self> {
        info!("Entering alternate screen");
        enable_raw_mode().context("Failed to enable raw mode")?;
        let terminal = rollback_on_error(open_terminal(), leave_terminal)?;

        Ok(Self {
            terminal,
            cursor: 4,
            tick_interval: config.tick_interval(),
            poll_interval: config.poll_interval(),
            last_tick: Instant::now(),
            restored: false,
        })
    }

    /// Restores the terminal to its normal state. Later calls do nothing.
    #[instrument(skip_all)]
    pub fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        info!("Restoring terminal");
        self.restored = true;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn area(&self) -> Result<Rect> {
        let size = self.terminal.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    fn translate(&mut self, event: Event) -> Result<Option<Signal>> {
        let signal = match event {
            // Skip key release events (crossterm fires both press and release on some platforms).
            Event::Key(key) if key.kind == KeyEventKind::Release => None,
            Event::Key(key) => key_signal(&mut self.cursor, key),
            Event::Mouse(mouse) => {
                let signal = mouse_signal(self.area()?, mouse);
                if let Some(Signal::Input(InputEvent::PointerReleased(Some(cell)))) = signal {
                    self.cursor = cell;
                }
                signal
            }
            _ => None,
        };
        Ok(signal)
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!(error = ?err, "Failed to restore terminal on drop");
        }
    }
}

fn open_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Best-effort undo of a partially entered terminal.
fn leave_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    if let Err(err) = disable_raw_mode() {
        warn!(error = ?err, "Failed to disable raw mode");
    }
}

/// Runs `rollback` when `res` is an error, then passes `res` through.
fn rollback_on_error<T>(res: Result<T>, rollback: impl FnOnce()) -> Result<T> {
    if res.is_err() {
        rollback();
    }
    res
}

impl InputSource for TerminalFrontend {
    fn poll(&mut self) -> Result<Vec<Signal>> {
        let mut signals = Vec::new();
        let until_tick = self.tick_interval.saturating_sub(self.last_tick.elapsed());

        if event::poll(until_tick.min(self.poll_interval))? {
            loop {
                let event = event::read()?;
                trace!(?event, "Terminal event");
                if let Some(signal) = self.translate(event)? {
                    debug!(?signal, "Input signal");
                    signals.push(signal);
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if self.last_tick.elapsed() >= self.tick_interval {
            signals.push(Signal::Input(InputEvent::Idle));
            self.last_tick = Instant::now();
        }

        Ok(signals)
    }
}

impl Renderer for TerminalFrontend {
    fn render(&mut self, view: &GameView<'_>) -> Result<()> {
        let cursor = self.cursor;
        self.terminal.draw(|frame| ui::draw(frame, view, cursor))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_rolls_back() {
        let rolled_back = Cell::new(false);
        let res: Result<()> = rollback_on_error(Err(anyhow!("no tty")), || rolled_back.set(true));
        assert!(res.is_err());
        assert!(rolled_back.get());
    }

    #[test]
    fn test_successful_setup_keeps_terminal() {
        let rolled_back = Cell::new(false);
        let res = rollback_on_error(Ok(7), || rolled_back.set(true));
        assert_eq!(res.unwrap(), 7);
        assert!(!rolled_back.get());
    }
}
