//! Board geometry for the presentation layer.
//!
//! The board is an 11x11 grid. The shared loop, the four home stretches,
//! the hangar pads, and the center cell all have fixed grid coordinates;
//! [`grid_position`] maps any piece to its cell. Nothing in here affects
//! the rules - the engine only reasons in distances and global indices.

use crate::player::{Piece, PieceStatus};
use crate::track::PlayerColor;
use serde::{Deserialize, Serialize};

/// Board side length in cells
pub const BOARD_SIZE: u8 = 11;

/// A cell on the board grid (columns and rows are 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPosition {
    /// Grid column, 1-11
    pub x: u8,
    /// Grid row, 1-11
    pub y: u8,
}

impl CellPosition {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

const fn c(x: u8, y: u8) -> CellPosition {
    CellPosition::new(x, y)
}

/// The shared loop, indexed by global cell index.
///
/// Cell 0 is Red's start at the bottom; each quarter belongs to the next
/// color in turn order.
pub const MAIN_PATH_COORDS: [CellPosition; 40] = [
    // Red side (bottom, moving right then up)
    c(5, 11), c(5, 10), c(5, 9), c(5, 8), c(5, 7),
    c(4, 7), c(3, 7), c(2, 7), c(1, 7), c(1, 6),
    // Blue side (left, moving up then right)
    c(1, 5), c(2, 5), c(3, 5), c(4, 5), c(5, 5),
    c(5, 4), c(5, 3), c(5, 2), c(5, 1), c(6, 1),
    // Yellow side (top, moving left then down)
    c(7, 1), c(7, 2), c(7, 3), c(7, 4), c(7, 5),
    c(8, 5), c(9, 5), c(10, 5), c(11, 5), c(11, 6),
    // Green side (right, moving down then left)
    c(11, 7), c(10, 7), c(9, 7), c(8, 7), c(7, 7),
    c(7, 8), c(7, 9), c(7, 10), c(7, 11), c(6, 11),
];

/// The shared terminal cell at the board center
pub const WIN_CENTER: CellPosition = c(6, 6);

/// The five visible home-stretch cells for a color.
///
/// The sixth home-stretch step is [`WIN_CENTER`].
pub const fn home_stretch_coords(color: PlayerColor) -> [CellPosition; 5] {
    match color {
        PlayerColor::Red => [c(6, 11), c(6, 10), c(6, 9), c(6, 8), c(6, 7)],
        PlayerColor::Blue => [c(1, 6), c(2, 6), c(3, 6), c(4, 6), c(5, 6)],
        PlayerColor::Yellow => [c(6, 1), c(6, 2), c(6, 3), c(6, 4), c(6, 5)],
        PlayerColor::Green => [c(11, 6), c(10, 6), c(9, 6), c(8, 6), c(7, 6)],
    }
}

/// Hangar pad cells for a color, indexed by piece id
pub const fn hangar_coords(color: PlayerColor) -> [CellPosition; 4] {
    match color {
        PlayerColor::Red => [c(2, 10), c(3, 10), c(2, 9), c(3, 9)],
        PlayerColor::Blue => [c(2, 2), c(3, 2), c(2, 3), c(3, 3)],
        PlayerColor::Yellow => [c(10, 2), c(9, 2), c(10, 3), c(9, 3)],
        PlayerColor::Green => [c(10, 10), c(9, 10), c(10, 9), c(9, 9)],
    }
}

/// Grid cell a piece should be drawn on
pub fn grid_position(piece: &Piece) -> CellPosition {
    match piece.status {
        PieceStatus::Hangar => hangar_coords(piece.color)[piece.id as usize],
        PieceStatus::Finished => WIN_CENTER,
        PieceStatus::HomeStretch => {
            let path = home_stretch_coords(piece.color);
            let pos = piece.position() as usize;
            // Step 0 (just entered) shares the first home cell
            if pos > 0 {
                path[pos - 1]
            } else {
                path[0]
            }
        }
        PieceStatus::OnTrack => {
            let global = crate::track::global_index(piece.color, piece.position());
            MAIN_PATH_COORDS[global as usize]
        }
    }
}
