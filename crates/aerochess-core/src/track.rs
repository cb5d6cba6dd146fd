//! Circular track geometry and color math.
//!
//! This module provides the foundational types for the shared 40-cell loop:
//! - `PlayerColor`: the four players and the repeating cell-color pattern
//! - Track constants (loop length, home stretch, jump bonus)
//! - Global cell index math used by jump and trample resolution
//!
//! Every piece measures progress as a distance travelled from its own start
//! cell; the global cell index shifts that by the player's fixed offset so
//! pieces of different colors can be compared on the shared loop.

use serde::{Deserialize, Serialize};

/// Number of cells in the shared circular track
pub const TRACK_LENGTH: u8 = 40;

/// Number of cells in each player's private final approach
pub const HOME_STRETCH_LENGTH: u8 = 6;

/// Terminal distance: a full lap plus the home stretch
pub const MAX_DISTANCE: u8 = TRACK_LENGTH + HOME_STRETCH_LENGTH;

/// Bonus advance for landing on a cell of your own color
pub const JUMP_BONUS: u8 = 4;

/// The four player colors.
///
/// The declaration order is load-bearing: it fixes the turn order, the
/// repeating cell-color pattern on the track, and (via [`start_offset`])
/// each player's entry point on the loop.
///
/// [`start_offset`]: PlayerColor::start_offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Yellow,
    Green,
}

impl PlayerColor {
    /// All colors in turn order
    pub const ALL: [PlayerColor; 4] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Yellow,
        PlayerColor::Green,
    ];

    /// Display name for messages
    pub fn name(&self) -> &'static str {
        match self {
            PlayerColor::Red => "Red",
            PlayerColor::Blue => "Blue",
            PlayerColor::Yellow => "Yellow",
            PlayerColor::Green => "Green",
        }
    }

    /// Where this color enters the shared loop.
    ///
    /// Each start cell is a quarter-lap from the previous one.
    pub const fn start_offset(&self) -> u8 {
        match self {
            PlayerColor::Red => 0,
            PlayerColor::Blue => 10,
            PlayerColor::Yellow => 20,
            PlayerColor::Green => 30,
        }
    }

    /// Position of this color in the fixed turn order
    pub fn turn_index(&self) -> usize {
        match self {
            PlayerColor::Red => 0,
            PlayerColor::Blue => 1,
            PlayerColor::Yellow => 2,
            PlayerColor::Green => 3,
        }
    }
}

/// The color assigned to a global track cell.
///
/// Cells repeat Red, Blue, Yellow, Green around the loop.
pub fn cell_color(global_index: u8) -> PlayerColor {
    PlayerColor::ALL[(global_index % 4) as usize]
}

/// Convert a piece's color-relative track position to the global cell index
pub fn global_index(color: PlayerColor, track_position: u8) -> u8 {
    (color.start_offset() + track_position) % TRACK_LENGTH
}
