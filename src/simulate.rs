//! Scripted games against the opponent, for quick statistics.

use crate::{EngineConfig, GameEngine, Submission, Verdict};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Outcome counts over a batch of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Games played.
    pub games: usize,
    /// Games the human stand-in won.
    pub human_wins: usize,
    /// Games the opponent won.
    pub opponent_wins: usize,
    /// Drawn games.
    pub draws: usize,
}

impl Tally {
    /// Counts one finished game.
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::HumanWin => self.human_wins += 1,
            Verdict::OpponentWin => self.opponent_wins += 1,
            Verdict::Draw => self.draws += 1,
        }
        self.games += 1;
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} games: {} human wins, {} opponent wins, {} draws",
            self.games, self.human_wins, self.opponent_wins, self.draws
        )
    }
}

/// Plays `games` games on one engine, the human side choosing uniformly
/// among free cells. The engine is reset between games.
#[instrument(skip(engine))]
pub async fn run(engine: &GameEngine, games: usize, seed: u64) -> Tally {
    let mut human = ChaCha8Rng::seed_from_u64(seed);
    let mut tally = Tally::default();

    for game in 0..games {
        engine.reset();
        loop {
            let snapshot = engine.settled().await;
            if let Some(outcome) = snapshot.pending_outcome {
                debug!(game, %outcome, "Game finished");
                tally.record(outcome);
                break;
            }

            let free = snapshot.board.empty_cells();
            let cell = free[human.random_range(0..free.len())];
            let submission = engine.submit_human_move(cell.index());
            debug_assert_eq!(submission, Submission::Accepted);
        }
    }

    info!(%tally, "Simulation complete");
    tally
}

/// Convenience wrapper: a zero-delay engine seeded from `seed`.
pub async fn run_with_seed(games: usize, seed: u64) -> Tally {
    let config = EngineConfig::default()
        .with_opponent_delay_ms(0)
        .with_rng_seed(seed.wrapping_add(1));
    let engine = GameEngine::new(&config);
    run(&engine, games, seed).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_each_verdict() {
        let mut tally = Tally::default();
        tally.record(Verdict::Draw);
        tally.record(Verdict::HumanWin);
        assert_eq!(
            tally,
            Tally {
                games: 2,
                human_wins: 1,
                opponent_wins: 0,
                draws: 1
            }
        );
    }

    #[tokio::test]
    async fn test_simulation_counts_every_game() {
        let tally = run_with_seed(25, 7).await;
        assert_eq!(tally.games, 25);
        assert_eq!(tally.human_wins + tally.opponent_wins + tally.draws, 25);
    }

    #[tokio::test]
    async fn test_same_seed_same_tally() {
        assert_eq!(run_with_seed(10, 99).await, run_with_seed(10, 99).await);
    }
}
