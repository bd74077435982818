// Judge-facing agent
//
// Holds the latest snapshot posted by the judge and turns it into a move on
// request. The engine itself is stateless; this wrapper owns the deadline and
// the "always answer" guarantee at the service boundary.

use log::{info, warn};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::future::Future;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::engine;
use crate::types::{GameState, MoveCommand, Player};

/// Query parameters the judge attaches to a move request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveRequest {
    pub player_number: Option<i64>,
    pub attempt_number: Option<i64>,
    pub random_moves_left: Option<i64>,
    pub turn_count: Option<i64>,
}

/// Tron agent with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    latest_state: Mutex<Option<GameState>>,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with debug logging disabled
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot::with_logger(config, DebugLogger::disabled())
    }

    /// Creates a new Bot instance that records every decision to `debug_logger`
    pub fn with_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            latest_state: Mutex::new(None),
            debug_logger,
        }
    }

    /// Returns agent identity
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        json!({
            "participant": self.config.agent.participant,
            "agent_name": self.config.agent.agent_name,
        })
    }

    /// Stores the judge's latest snapshot, replacing any previous one
    /// Corresponds to POST /send-state endpoint
    pub fn receive_state(&self, state: GameState) {
        info!("Turn {}: state received", state.turn_count);
        *self.latest_state.lock() = Some(state);
    }

    /// Copy of the stored snapshot, if any
    pub fn latest_state(&self) -> Option<GameState> {
        self.latest_state.lock().clone()
    }

    /// Called when a game ends; forgets the stored snapshot
    /// Corresponds to POST /end endpoint
    pub fn end(&self, state: &GameState) {
        info!(
            "GAME OVER at turn {} (agent1 alive: {:?}, agent2 alive: {:?})",
            state.turn_count, state.agent1_alive, state.agent2_alive
        );
        *self.latest_state.lock() = None;
    }

    /// Computes and returns the next move for the stored snapshot
    /// Corresponds to GET /send-move endpoint
    ///
    /// The engine runs on the blocking pool under the effective time budget.
    /// Overrunning the budget or losing the task still produces an answer.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move command
    pub async fn get_move(&self, request: MoveRequest) -> Value {
        let start_time = Instant::now();
        let state = self.latest_state().unwrap_or_else(|| {
            warn!("Move requested before any state was received");
            GameState::default()
        });

        let player_number = request
            .player_number
            .or(state.player_number)
            .unwrap_or(1);
        let boosts_remaining = state.boosts(Player::from_number(player_number));

        if let Some(turn) = request.turn_count {
            if turn != state.turn_count {
                warn!(
                    "Judge turn {} differs from stored snapshot turn {}",
                    turn, state.turn_count
                );
            }
        }

        info!(
            "Turn {}: Computing move for player {} (attempt {:?}, random moves left {:?})",
            state.turn_count, player_number, request.attempt_number, request.random_moves_left
        );

        let budget = Duration::from_millis(self.config.timing.effective_budget_ms());
        let command = Self::decide_within(budget, state.clone(), boosts_remaining, player_number).await;

        info!(
            "Turn {}: Chose {} (time: {}ms)",
            state.turn_count,
            command,
            start_time.elapsed().as_millis()
        );

        self.debug_logger
            .log_move(state, player_number, boosts_remaining, command);

        json!({ "move": command.to_string() })
    }

    /// Runs the engine off the async executor, bounded by `budget`
    async fn decide_within(
        budget: Duration,
        state: GameState,
        boosts_remaining: i64,
        player_number: i64,
    ) -> MoveCommand {
        let task = tokio::task::spawn_blocking(move || {
            engine::decide(&state, boosts_remaining, player_number)
        });

        Self::await_within(budget, task).await
    }

    /// Awaits a pending decision, answering the fallback move if it fails or overruns
    async fn await_within<F, E>(budget: Duration, task: F) -> MoveCommand
    where
        F: Future<Output = Result<MoveCommand, E>>,
        E: std::fmt::Display,
    {
        match tokio::time::timeout(budget, task).await {
            Ok(Ok(command)) => command,
            Ok(Err(e)) => {
                warn!("Move computation failed ({}), answering {}", e, engine::FALLBACK);
                MoveCommand::new(engine::FALLBACK)
            }
            Err(_) => {
                warn!(
                    "Move computation exceeded {}ms, answering {}",
                    budget.as_millis(),
                    engine::FALLBACK
                );
                MoveCommand::new(engine::FALLBACK)
            }
        }
    }
}
