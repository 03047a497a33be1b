use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameEngine, GameSnapshot, GameState};
use crate::input::{InputHandler, InputSlot, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

/// Render at 30 FPS
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive session: one player, keyboard input, rounds until quit
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    input: InputSlot,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut engine = GameEngine::new(config).context("Invalid game configuration")?;
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            input: InputSlot::new(),
            should_quit: false,
        })
    }

    /// Snapshot of the current (or last) round
    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;
        let cleanup = self.cleanup_terminal(&mut terminal);

        result.and(cleanup)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("session started");

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => warn!("failed to read terminal event: {err}"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.stats.update();
                    let snapshot = self.state.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.stats);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // A round still running when the session ends is a quit, not a loss
        self.engine.quit(&mut self.state);
        self.stats.on_round_end(self.state.status, self.state.score);
        info!(
            "session ended after {} rounds, best score {}",
            self.stats.rounds_played, self.stats.high_score
        );

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => self.input.push_direction(direction),
            KeyAction::Restart => {
                if self.state.status.is_terminal() {
                    self.reset_game();
                }
            }
            KeyAction::Quit => {
                if self.state.status.is_running() {
                    self.input.request_quit();
                } else {
                    self.should_quit = true;
                }
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let was_running = self.state.status.is_running();
        let result = self.engine.tick(&mut self.state, &mut self.input);

        if was_running && result.terminated() {
            self.stats.on_round_end(result.status, self.state.score);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.stats.on_round_start();
        self.input.clear();
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

/// Raw mode plus alternate screen; undone again if any step fails
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stderr = stderr();
    let terminal = execute!(stderr, EnterAlternateScreen)
        .context("Failed to enter alternate screen")
        .and_then(|()| {
            let mut terminal =
                Terminal::new(CrosstermBackend::new(stderr)).context("Failed to create terminal")?;
            terminal.hide_cursor().context("Failed to hide cursor")?;
            terminal.clear().context("Failed to clear terminal")?;
            Ok(terminal)
        });

    if terminal.is_err() {
        let mut out = std::io::stderr();
        let _ = execute!(out, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }

    terminal
}
