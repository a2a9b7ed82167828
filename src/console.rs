//! Line-based console front end.
//!
//! The console is a collaborator of the engine, not part of it: it renders
//! snapshots, turns typed digits into move intents and maps terminal
//! outcomes to their alert text. It never touches engine state directly.

use crate::{EngineSnapshot, GameEngine, IgnoreReason, Submission, Verdict};
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};

/// Text shown when a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertText {
    /// Headline.
    pub title: &'static str,
    /// Body.
    pub message: &'static str,
    /// Label for the acknowledge action.
    pub button: &'static str,
}

/// Alert for a finished game.
pub fn alert_for(verdict: Verdict) -> AlertText {
    match verdict {
        Verdict::HumanWin => AlertText {
            title: "You Win!",
            message: "You are so smart. You beat your own AI.",
            button: "Hell yeah",
        },
        Verdict::OpponentWin => AlertText {
            title: "You Lost!",
            message: "You programmed a super AI.",
            button: "Rematch",
        },
        Verdict::Draw => AlertText {
            title: "Draw",
            message: "What a battle of wits we have here...",
            button: "Try Again",
        },
    }
}

/// What a line of input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place a mark at a board index (0-8).
    Place(usize),
    /// Start over.
    Reset,
    /// Leave the game.
    Quit,
    /// Anything else.
    Unknown,
}

impl Command {
    /// Parses a typed line. Cells are numbered 1-9 on screen.
    #[instrument]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "q" | "quit" => return Command::Quit,
            "r" | "reset" => return Command::Reset,
            _ => {}
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=9).contains(&n) => Command::Place(n - 1),
            _ => Command::Unknown,
        }
    }
}

/// Renders a snapshot as the console shows it.
pub fn render(snapshot: &EngineSnapshot) -> String {
    let mut out = snapshot.board.display();
    out.push('\n');
    match snapshot.pending_outcome.map(alert_for) {
        Some(alert) => {
            out.push_str(&format!(
                "\n{}\n{}\n[press Enter: {}]",
                alert.title, alert.message, alert.button
            ));
        }
        None if snapshot.input_locked => out.push_str("\nOpponent is thinking..."),
        None => out.push_str("\nYour move (1-9, r = reset, q = quit):"),
    }
    out
}

/// Plays an interactive game on stdin/stdout until the user quits.
#[instrument(skip(engine))]
pub async fn play(engine: GameEngine) -> Result<()> {
    info!("Starting console game");

    let mut rx = engine.subscribe();
    println!("{}", render(&rx.borrow_and_update()));

    let printer = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            println!("\n{}", render(&snapshot));
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        // Any input dismisses the alert and starts the next game.
        if engine.snapshot().pending_outcome.is_some() {
            engine.reset();
            continue;
        }

        match Command::parse(&line) {
            Command::Quit => break,
            Command::Reset => engine.reset(),
            Command::Place(index) => match engine.submit_human_move(index) {
                Submission::Accepted => {}
                Submission::Ignored(IgnoreReason::OpponentThinking) => {
                    println!("Wait for the opponent.");
                }
                Submission::Ignored(reason) => {
                    debug!(%reason, "Move ignored");
                    println!("Can't play there.");
                }
            },
            Command::Unknown => println!("Type a cell number 1-9, r or q."),
        }
    }

    printer.abort();
    info!("Console game finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TurnPhase;
    use noughts_core::{Board, Player};

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("5"), Command::Place(4));
        assert_eq!(Command::parse(" 1 \n"), Command::Place(0));
        assert_eq!(Command::parse("9"), Command::Place(8));
        assert_eq!(Command::parse("0"), Command::Unknown);
        assert_eq!(Command::parse("10"), Command::Unknown);
        assert_eq!(Command::parse("R"), Command::Reset);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("hello"), Command::Unknown);
    }

    #[test]
    fn test_alert_text_per_outcome() {
        assert_eq!(alert_for(Verdict::HumanWin).title, "You Win!");
        assert_eq!(alert_for(Verdict::OpponentWin).button, "Rematch");
        assert_eq!(alert_for(Verdict::Draw).button, "Try Again");
    }

    #[test]
    fn test_render_shows_prompt_or_alert() {
        let mut board = Board::new();
        board.place(Player::Human, 0).unwrap();

        let waiting = EngineSnapshot {
            board,
            phase: TurnPhase::OpponentThinking,
            input_locked: true,
            pending_outcome: None,
        };
        assert!(render(&waiting).starts_with("X|2|3"));
        assert!(render(&waiting).ends_with("Opponent is thinking..."));

        let over = EngineSnapshot {
            phase: TurnPhase::GameOver,
            pending_outcome: Some(Verdict::OpponentWin),
            ..waiting
        };
        assert!(render(&over).contains("You Lost!"));
        assert!(render(&over).contains("[press Enter: Rematch]"));
    }
}
