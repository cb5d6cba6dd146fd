//! Aerochess - a four-color flight chess (Ludo variant) rule engine
//!
//! This crate provides the core game logic for Aerochess, including:
//! - Circular track geometry and the repeating cell-color pattern
//! - Piece and player state with the move legality predicate
//! - Game state machine with full rule enforcement: dice resolution,
//!   bounce-back overshoot, same-color jump bonus, trampling, turn
//!   advancement with six-retention, and win detection
//! - Board grid coordinates for rendering
//!
//! # Architecture
//!
//! The engine is a set of synchronous state transitions over one
//! [`GameState`], driven by [`GameAction`]s and reporting [`GameEvent`]s.
//! It has no I/O and no timers; the presentation layer owns pacing and
//! renders the state snapshots. It can be compiled to:
//! - Native Rust for tests and embedding
//! - WebAssembly (feature `wasm`) for a browser presentation layer
//!
//! # Modules
//!
//! - [`track`]: loop constants, start offsets, cell-color math
//! - [`player`]: pieces, players, move legality
//! - [`actions`]: intents and events
//! - [`game`]: the state machine
//! - [`layout`]: 11x11 grid coordinates for the presentation layer

pub mod actions;
pub mod game;
pub mod layout;
pub mod player;
pub mod track;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use game::{GameError, GamePhase, GameState};
pub use layout::{grid_position, CellPosition, BOARD_SIZE};
pub use player::{Piece, PieceStatus, Player};
pub use track::{
    cell_color, global_index, PlayerColor, HOME_STRETCH_LENGTH, JUMP_BONUS, MAX_DISTANCE,
    TRACK_LENGTH,
};
