use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

use crate::game::GameEngine;
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven game in the terminal.
///
/// Input, ticks and redraws are branches of one `select!` loop, so they never
/// overlap and the engine needs no locking.
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!("Starting game with {:?}", self.engine.config());

        // Restore the terminal even when the loop fails
        let result = self.run_game_loop(&mut terminal).await;
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "Session ended after {} finished games",
            self.metrics.games_finished
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let config = self.engine.config().clone();
        let mut tick_timer = tick_timer(config.tick_interval_ms);
        let mut render_timer = new_timer(config.render_interval_ms);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, &mut tick_timer),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Disabled while the game is over, which stops the timer
                _ = tick_timer.tick(), if !self.engine.is_game_over() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    self.metrics.update(self.engine.is_game_over());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.engine.state(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release or repeat
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.dispatch(key, &mut self.engine) {
            KeyAction::Restart => {
                self.reset_game();
                // First tick of the new round comes one full period from now
                tick_timer.reset();
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Turn(_) | KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if self.engine.tick().is_terminal() {
            self.metrics.on_game_over();
        }
    }

    fn reset_game(&mut self) {
        self.engine.restart();
        self.metrics.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn new_timer(period_ms: u64) -> Interval {
    let mut timer = interval(Duration::from_millis(period_ms));
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

/// Like `new_timer`, but the first tick comes one full period from now,
/// the same wait a restart gets
fn tick_timer(period_ms: u64) -> Interval {
    let mut timer = new_timer(period_ms);
    timer.reset();
    timer
}
