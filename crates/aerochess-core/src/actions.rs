//! Player intents and the events they produce.
//!
//! The presentation layer forwards [`GameAction`]s into the engine and
//! receives [`GameEvent`]s back. Each event renders to a human-readable
//! status line via `Display`; the variants themselves are the stable
//! contract, the wording is not.

use crate::track::PlayerColor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All intents a player can express
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Start a match with 2-4 distinct colors (seated in fixed turn order)
    StartGame(Vec<PlayerColor>),
    /// Roll the dice (start of every turn)
    RollDice,
    /// Move one of your pieces with the pending roll
    SelectPiece {
        /// Owner of the piece
        color: PlayerColor,
        /// Piece index within the player (0-3)
        piece: u8,
    },
    /// Abandon the current match and return to setup
    NewGame,
}

/// Events emitted by engine transitions, in the order they occurred
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A match started
    GameStarted { colors: Vec<PlayerColor> },

    /// Dice were rolled
    DiceRolled {
        color: PlayerColor,
        roll: u8,
        /// Whether any piece can use this roll
        has_moves: bool,
    },

    /// The roll was void: no piece had a legal move
    NoMovesAvailable { color: PlayerColor, roll: u8 },

    /// A piece left the hangar onto its start cell
    PieceLaunched { color: PlayerColor, piece: u8 },

    /// A piece advanced along the track or home stretch
    PieceMoved {
        color: PlayerColor,
        piece: u8,
        roll: u8,
        /// True if the move overshot the center and reflected back
        bounced: bool,
        /// Distance travelled after the move (and any jump)
        distance: u8,
        /// True if the piece landed exactly on the center
        finished: bool,
    },

    /// A piece landed on a cell of its own color and jumped ahead
    ColorJump { color: PlayerColor, piece: u8 },

    /// An opposing piece was captured and sent back to its hangar
    Trampled {
        attacker: PlayerColor,
        victim: PlayerColor,
        piece: u8,
    },

    /// A player got all four pieces home
    PlayerFinished { color: PlayerColor },

    /// The match is over
    GameWon { winner: PlayerColor },

    /// The turn passed to the next active player
    TurnPassed {
        from: PlayerColor,
        to: PlayerColor,
    },

    /// A six kept the turn with the same player
    TurnRetained {
        color: PlayerColor,
        /// Sixes rolled in a row this turn streak
        streak: u32,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::GameStarted { colors } => {
                write!(f, "Game on! {} players ready.", colors.len())
            }
            GameEvent::DiceRolled {
                roll, has_moves, ..
            } => {
                if *has_moves {
                    if *roll == 6 {
                        write!(f, "Rolled 6! Pick a plane (free turn).")
                    } else {
                        write!(f, "Rolled {}. Select a plane!", roll)
                    }
                } else {
                    write!(f, "Rolled {}.", roll)
                }
            }
            GameEvent::NoMovesAvailable { roll, .. } => {
                if *roll == 6 {
                    write!(f, "Rolled 6! No moves available. Roll again!")
                } else {
                    write!(f, "Rolled {}. No moves! Next turn.", roll)
                }
            }
            GameEvent::PieceLaunched { .. } => write!(f, "Taking off!"),
            GameEvent::PieceMoved {
                bounced, finished, ..
            } => {
                if *bounced {
                    write!(f, "Overshot! Bouncing back!")
                } else if *finished {
                    write!(f, "Reached destination!")
                } else {
                    write!(f, "Flying...")
                }
            }
            GameEvent::ColorJump { .. } => write!(f, "Color Match! Jump +4!"),
            GameEvent::Trampled { victim, .. } => {
                write!(f, "BOOM! {} was trampled!", victim.name())
            }
            GameEvent::PlayerFinished { color } => write!(f, "{} wins!", color.name()),
            GameEvent::GameWon { winner } => {
                write!(f, "Game over! {} pilot wins!", winner.name())
            }
            GameEvent::TurnPassed { to, .. } => write!(f, "{}'s turn!", to.name()),
            GameEvent::TurnRetained { color, .. } => {
                write!(f, "{} rolled 6! Roll again!", color.name())
            }
        }
    }
}
