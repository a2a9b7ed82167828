//! Turn sequencing between the human and the scripted opponent.
//!
//! A [`GameEngine`] owns one game. Human intents arrive through
//! [`GameEngine::submit_human_move`]; when the game goes on, the engine locks
//! input and spawns a single-shot reply task that sleeps for the configured
//! delay, asks the [`OpponentStrategy`] for a cell and applies it.
//!
//! Every scheduled reply carries a ticket. [`GameEngine::reset`] aborts the
//! task and forgets the ticket, so a reply that already woke up finds a
//! mismatch and discards itself instead of touching the fresh board.

mod snapshot;

pub use snapshot::{EngineSnapshot, IgnoreReason, Submission, TurnPhase};

use crate::EngineConfig;
use noughts_core::{outcome, Board, HeuristicStrategy, OpponentStrategy, Player, Verdict};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, instrument, Instrument};

/// Handle to a single game. Clones share the same game.
#[derive(Clone)]
pub struct GameEngine {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<EngineState>,
    snapshot_tx: watch::Sender<EngineSnapshot>,
    delay: Duration,
}

struct EngineState {
    board: Board,
    phase: TurnPhase,
    pending_outcome: Option<Verdict>,
    strategy: Box<dyn OpponentStrategy>,
    reply: Option<PendingReply>,
    next_ticket: u64,
}

struct PendingReply {
    ticket: u64,
    handle: JoinHandle<()>,
}

impl GameEngine {
    /// Creates an engine playing the built-in heuristic.
    #[instrument(skip(config), fields(delay_ms = *config.opponent_delay_ms()))]
    pub fn new(config: &EngineConfig) -> Self {
        let seed = config.rng_seed().unwrap_or_else(rand::random);
        debug!(seed, "Seeding opponent");
        Self::with_strategy(config, HeuristicStrategy::new(ChaCha8Rng::seed_from_u64(seed)))
    }

    /// Creates an engine with a custom opponent.
    pub fn with_strategy(config: &EngineConfig, strategy: impl OpponentStrategy + 'static) -> Self {
        let state = EngineState {
            board: Board::new(),
            phase: TurnPhase::AwaitingHuman,
            pending_outcome: None,
            strategy: Box::new(strategy),
            reply: None,
            next_ticket: 0,
        };
        let (snapshot_tx, _) = watch::channel(state.snapshot());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                snapshot_tx,
                delay: config.opponent_delay(),
            }),
        }
    }

    /// Places the human's mark at `index` if the engine is ready for it.
    ///
    /// Intents during the opponent's turn, after game over, on an occupied
    /// cell or outside 0-8 are dropped without changing state.
    ///
    /// # Panics
    ///
    /// Outside a Tokio runtime, since an accepted move spawns the reply task.
    #[instrument(skip(self))]
    pub fn submit_human_move(&self, index: usize) -> Submission {
        let mut state = self.shared.lock();

        match state.phase {
            TurnPhase::AwaitingHuman => {}
            TurnPhase::OpponentThinking => return ignored(IgnoreReason::OpponentThinking),
            TurnPhase::GameOver => return ignored(IgnoreReason::GameOver),
        }

        if let Err(err) = state.board.place(Player::Human, index) {
            return ignored(IgnoreReason::Illegal(err));
        }

        if let Some(verdict) = outcome(&state.board).verdict() {
            state.finish(verdict);
        } else {
            state.phase = TurnPhase::OpponentThinking;
            self.schedule_reply(&mut state);
        }

        self.shared.publish(&state);
        Submission::Accepted
    }

    /// Clears the board, cancels any pending reply and hands the move back to the human.
    #[instrument(skip(self))]
    pub fn reset(&self) {
        let mut state = self.shared.lock();

        if let Some(reply) = state.reply.take() {
            reply.handle.abort();
            debug!(ticket = reply.ticket, "Cancelled pending opponent reply");
        }
        state.board.reset();
        state.phase = TurnPhase::AwaitingHuman;
        state.pending_outcome = None;

        self.shared.publish(&state);
        info!("Game reset");
    }

    /// Current state.
    pub fn snapshot(&self) -> EngineSnapshot {
        self.shared.snapshot_tx.borrow().clone()
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.shared.snapshot_tx.subscribe()
    }

    /// Waits until no opponent reply is pending and returns that state.
    pub async fn settled(&self) -> EngineSnapshot {
        let mut rx = self.subscribe();
        match rx
            .wait_for(|snapshot| snapshot.phase != TurnPhase::OpponentThinking)
            .await
        {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }

    /// The configured pause before each opponent reply.
    pub fn opponent_delay(&self) -> Duration {
        self.shared.delay
    }

    fn schedule_reply(&self, state: &mut EngineState) {
        let ticket = state.next_ticket;
        state.next_ticket += 1;

        let delay = self.shared.delay;
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let handle = tokio::spawn(
            async move {
                tokio::time::sleep(delay).await;
                if let Some(shared) = shared.upgrade() {
                    shared.complete_reply(ticket);
                }
            }
            .instrument(info_span!("opponent_reply", ticket)),
        );

        debug!(ticket, delay_ms = delay.as_millis() as u64, "Scheduled opponent reply");
        state.reply = Some(PendingReply { ticket, handle });
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("snapshot", &self.snapshot())
            .field("delay", &self.shared.delay)
            .finish()
    }
}

fn ignored(reason: IgnoreReason) -> Submission {
    debug!(%reason, "Ignoring human move");
    Submission::Ignored(reason)
}

impl Shared {
    /// A strategy that panics mid-reply leaves the board untouched, so the
    /// state behind a poisoned lock is still one reset away from a new game.
    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &EngineState) {
        self.snapshot_tx.send_replace(state.snapshot());
    }

    fn complete_reply(&self, ticket: u64) {
        let mut guard = self.lock();
        let state = &mut *guard;

        let current = state.reply.as_ref().map(|reply| reply.ticket);
        if state.phase != TurnPhase::OpponentThinking || current != Some(ticket) {
            debug!(ticket, ?current, "Discarding stale opponent reply");
            return;
        }
        state.reply = None;

        let cell = state.strategy.select_move(&state.board);
        if let Err(err) = state.board.place(Player::Opponent, cell.index()) {
            drop(guard);
            panic!("opponent strategy chose an illegal cell: {err}");
        }
        debug!(cell = %cell, "Opponent moved");

        if let Some(verdict) = outcome(&state.board).verdict() {
            state.finish(verdict);
        } else {
            state.phase = TurnPhase::AwaitingHuman;
        }

        self.publish(state);
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(reply) = state.reply.take() {
            reply.handle.abort();
        }
    }
}

impl EngineState {
    fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot::new(self.board, self.phase, self.pending_outcome)
    }

    fn finish(&mut self, verdict: Verdict) {
        self.phase = TurnPhase::GameOver;
        self.pending_outcome = Some(verdict);
        info!(outcome = %verdict, moves = self.board.move_count(), "Game over");
    }
}
