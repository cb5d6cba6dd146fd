//! Pieces and player state.
//!
//! This module contains:
//! - Piece status state machine (hangar, track, home stretch, finished)
//! - Piece progress tracking via distance travelled
//! - Player struct owning four pieces
//! - The move legality predicate

use crate::track::{self, PlayerColor, MAX_DISTANCE, TRACK_LENGTH};
use serde::{Deserialize, Serialize};

/// Where a piece is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceStatus {
    /// In the starting holding area, not yet on the track
    Hangar,
    /// On the shared 40-cell loop
    OnTrack,
    /// On the private 6-cell final approach
    HomeStretch,
    /// Reached the center, out of play
    Finished,
}

/// A single piece.
///
/// Progress is tracked as `distance_travelled` from the piece's own start
/// cell; status and track position are derived from it. The distance never
/// exceeds [`MAX_DISTANCE`] (46) and is only ever reduced by a bounce-back
/// or a trample reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Piece index within its player (0-3)
    pub id: u8,
    /// Owning player's color
    pub color: PlayerColor,
    /// Current life-cycle status
    pub status: PieceStatus,
    /// Steps travelled from the start cell (0 at hangar exit, 46 at finish)
    pub distance_travelled: u8,
}

impl Piece {
    /// Create a piece in the hangar
    pub fn new(id: u8, color: PlayerColor) -> Self {
        Self {
            id,
            color,
            status: PieceStatus::Hangar,
            distance_travelled: 0,
        }
    }

    /// Color-relative position derived from distance travelled.
    ///
    /// On the track this is the offset from the start cell (0-39); on the
    /// home stretch it is the step into the approach (0-5). Meaningless for
    /// hangar and finished pieces, which return 0.
    pub fn position(&self) -> u8 {
        match self.status {
            PieceStatus::OnTrack => self.distance_travelled % TRACK_LENGTH,
            PieceStatus::HomeStretch => self.distance_travelled - TRACK_LENGTH,
            PieceStatus::Hangar | PieceStatus::Finished => 0,
        }
    }

    /// Global cell index on the shared loop, if the piece is on the track
    pub fn global_index(&self) -> Option<u8> {
        match self.status {
            PieceStatus::OnTrack => Some(track::global_index(self.color, self.position())),
            _ => None,
        }
    }

    /// Move legality predicate.
    ///
    /// A hangar piece needs a 5 or 6 to take off. Track and home-stretch
    /// pieces can always move: overshoot never blocks, it bounces back.
    /// Finished pieces never move.
    pub fn can_move(&self, roll: u8) -> bool {
        match self.status {
            PieceStatus::Hangar => roll >= 5,
            PieceStatus::OnTrack | PieceStatus::HomeStretch => true,
            PieceStatus::Finished => false,
        }
    }

    /// Send this piece back to the hangar (trample or game reset)
    pub fn return_to_hangar(&mut self) {
        self.status = PieceStatus::Hangar;
        self.distance_travelled = 0;
    }

    /// Set distance travelled and re-derive status from it
    pub fn set_distance(&mut self, distance: u8) {
        debug_assert!(distance <= MAX_DISTANCE);
        self.distance_travelled = distance;
        self.status = if distance == MAX_DISTANCE {
            PieceStatus::Finished
        } else if distance >= TRACK_LENGTH {
            PieceStatus::HomeStretch
        } else {
            PieceStatus::OnTrack
        };
    }
}

/// A single player's state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Player color (doubles as identity)
    pub color: PlayerColor,
    /// Display name
    pub name: String,
    /// The player's four pieces
    pub pieces: [Piece; 4],
    /// True once all four pieces are finished
    pub has_finished: bool,
}

impl Player {
    /// Create a new player with all pieces in the hangar
    pub fn new(color: PlayerColor) -> Self {
        Self {
            color,
            name: color.name().to_string(),
            pieces: [
                Piece::new(0, color),
                Piece::new(1, color),
                Piece::new(2, color),
                Piece::new(3, color),
            ],
            has_finished: false,
        }
    }

    /// Whether any piece has a legal move for this roll
    pub fn has_legal_move(&self, roll: u8) -> bool {
        self.pieces.iter().any(|p| p.can_move(roll))
    }

    /// Whether all four pieces have reached the center
    pub fn all_finished(&self) -> bool {
        self.pieces
            .iter()
            .all(|p| p.status == PieceStatus::Finished)
    }
}
