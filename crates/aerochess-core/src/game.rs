//! Core game state machine.
//!
//! This module contains the main `GameState` struct and all rule logic:
//! dice resolution, hangar exit, movement with bounce-back, the same-color
//! jump bonus, trample resolution, turn advancement, and win detection.
//!
//! Every transition is synchronous and atomic. The original UI paced some
//! transitions with timers (a void roll switched turns after a short delay);
//! here those collapse into a single `apply_action` call that returns the
//! full event sequence, and the presentation layer replays the events at
//! whatever pace it likes. Final state does not depend on pacing.

use crate::actions::{GameAction, GameEvent};
use crate::player::{PieceStatus, Player};
use crate::track::{self, PlayerColor, JUMP_BONUS, MAX_DISTANCE, TRACK_LENGTH};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No match in progress; waiting for colors to be chosen
    Setup,
    /// A match is running
    Playing,
    /// The match ended; no further transitions except a reset
    GameOver {
        winner: PlayerColor,
    },
}

/// Errors returned for invalid intents.
///
/// Every error leaves the state untouched: from the outside an invalid
/// intent is a no-op. The presentation layer normally disables controls
/// that would produce these, but the engine guards independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("No game in progress")]
    NotPlaying,

    #[error("A game is already in progress")]
    AlreadyPlaying,

    #[error("Game is over")]
    GameOver,

    #[error("A piece must be selected first")]
    WaitingForMove,

    #[error("Roll the dice first")]
    NotWaitingForMove,

    #[error("That piece belongs to another player")]
    NotYourPiece,

    #[error("That piece cannot use this roll")]
    IllegalMove,

    #[error("Need between 2 and 4 players")]
    InvalidPlayerCount,

    #[error("Each color can only be picked once")]
    DuplicateColor,

    #[error("Dice value must be between 1 and 6")]
    InvalidRoll,

    #[error("No such piece")]
    NoSuchPiece,
}

/// The complete game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current game phase
    pub phase: GamePhase,
    /// Active players, seated in fixed turn order
    pub players: Vec<Player>,
    /// Index of the player whose turn it is
    pub current_player: usize,
    /// The pending roll, if one is waiting to be played
    pub dice_value: Option<u8>,
    /// True while the current player must select a piece
    pub waiting_for_move: bool,
    /// Sixes rolled in a row by the current player (no cap)
    pub consecutive_sixes: u32,
    /// Latest human-readable status line
    pub message: String,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create an engine with no match in progress
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Setup,
            players: Vec::new(),
            current_player: 0,
            dice_value: None,
            waiting_for_move: false,
            consecutive_sixes: 0,
            message: "Welcome!".to_string(),
        }
    }

    /// The player whose turn it is
    pub fn current(&self) -> Option<&Player> {
        self.players.get(self.current_player)
    }

    /// Look up a player by color
    pub fn get_player(&self, color: PlayerColor) -> Option<&Player> {
        self.players.iter().find(|p| p.color == color)
    }

    /// Whether the match has ended
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// The winner, if the match has ended
    pub fn winner(&self) -> Option<PlayerColor> {
        if let GamePhase::GameOver { winner } = self.phase {
            Some(winner)
        } else {
            None
        }
    }

    /// All intents that are currently valid
    pub fn valid_actions(&self) -> Vec<GameAction> {
        let mut actions = Vec::new();

        match self.phase {
            GamePhase::Setup => {
                // StartGame takes an open-ended color selection; nothing to
                // enumerate here
            }
            GamePhase::GameOver { .. } => {
                actions.push(GameAction::NewGame);
            }
            GamePhase::Playing => {
                actions.push(GameAction::NewGame);

                match self.dice_value {
                    Some(roll) if self.waiting_for_move => {
                        if let Some(player) = self.current() {
                            for piece in &player.pieces {
                                if piece.can_move(roll) {
                                    actions.push(GameAction::SelectPiece {
                                        color: player.color,
                                        piece: piece.id,
                                    });
                                }
                            }
                        }
                    }
                    _ => actions.push(GameAction::RollDice),
                }
            }
        }

        actions
    }

    /// Apply an intent to the game state.
    ///
    /// Returns the events produced by the transition, in order. On error
    /// the state is guaranteed unchanged.
    pub fn apply_action(&mut self, action: GameAction) -> Result<Vec<GameEvent>, GameError> {
        match action {
            GameAction::StartGame(colors) => self.start_game(&colors),
            GameAction::RollDice => self.roll_dice(),
            GameAction::SelectPiece { color, piece } => self.select_piece(color, piece),
            GameAction::NewGame => self.reset(),
        }
    }

    /// Start a match with the given colors.
    ///
    /// Players are seated in the fixed turn order Red, Blue, Yellow, Green
    /// regardless of selection order; the first seated player moves first.
    pub fn start_game(&mut self, colors: &[PlayerColor]) -> Result<Vec<GameEvent>, GameError> {
        if matches!(self.phase, GamePhase::Playing) {
            return Err(GameError::AlreadyPlaying);
        }
        if !(2..=4).contains(&colors.len()) {
            return Err(GameError::InvalidPlayerCount);
        }

        let mut ordered: Vec<PlayerColor> = colors.to_vec();
        ordered.sort_by_key(|c| c.turn_index());
        if ordered.windows(2).any(|w| w[0] == w[1]) {
            return Err(GameError::DuplicateColor);
        }

        self.players = ordered.iter().map(|&c| Player::new(c)).collect();
        self.phase = GamePhase::Playing;
        self.current_player = 0;
        self.dice_value = None;
        self.waiting_for_move = false;
        self.consecutive_sixes = 0;

        let events = vec![GameEvent::GameStarted { colors: ordered }];
        self.update_message(&events);
        Ok(events)
    }

    /// Roll the dice for the current player
    pub fn roll_dice(&mut self) -> Result<Vec<GameEvent>, GameError> {
        // Sample before validation is harmless; validation happens in
        // apply_roll and the value is discarded on error
        let roll = rand::thread_rng().gen_range(1..=6);
        self.apply_roll(roll)
    }

    /// Resolve a specific dice value for the current player.
    ///
    /// This is the deterministic entry point used by tests and replays;
    /// [`roll_dice`](Self::roll_dice) samples a value and delegates here.
    ///
    /// If no piece has a legal move the roll is void and the turn advances
    /// within the same transition (a void six still keeps the turn).
    /// Otherwise the roll is parked and a piece selection is awaited.
    pub fn apply_roll(&mut self, roll: u8) -> Result<Vec<GameEvent>, GameError> {
        match self.phase {
            GamePhase::Playing => {}
            GamePhase::Setup => return Err(GameError::NotPlaying),
            GamePhase::GameOver { .. } => return Err(GameError::GameOver),
        }
        if self.waiting_for_move {
            return Err(GameError::WaitingForMove);
        }
        if !(1..=6).contains(&roll) {
            return Err(GameError::InvalidRoll);
        }

        let player = &self.players[self.current_player];
        let color = player.color;
        let has_moves = player.has_legal_move(roll);

        let mut events = vec![GameEvent::DiceRolled {
            color,
            roll,
            has_moves,
        }];

        if has_moves {
            self.dice_value = Some(roll);
            self.waiting_for_move = true;
        } else {
            // Void roll: record the value for display, then hand the turn
            // over. The dice value is cleared again by advance_turn.
            self.dice_value = Some(roll);
            events.push(GameEvent::NoMovesAvailable { color, roll });
            self.advance_turn(roll, &mut events);
        }

        self.update_message(&events);
        Ok(events)
    }

    /// Move a piece with the pending roll
    pub fn select_piece(
        &mut self,
        color: PlayerColor,
        piece_id: u8,
    ) -> Result<Vec<GameEvent>, GameError> {
        match self.phase {
            GamePhase::Playing => {}
            GamePhase::Setup => return Err(GameError::NotPlaying),
            GamePhase::GameOver { .. } => return Err(GameError::GameOver),
        }
        if !self.waiting_for_move {
            return Err(GameError::NotWaitingForMove);
        }
        let roll = self.dice_value.ok_or(GameError::NotWaitingForMove)?;

        let player = &self.players[self.current_player];
        if player.color != color {
            return Err(GameError::NotYourPiece);
        }
        let piece = *player
            .pieces
            .get(piece_id as usize)
            .ok_or(GameError::NoSuchPiece)?;
        if !piece.can_move(roll) {
            return Err(GameError::IllegalMove);
        }

        // All guards passed; from here on the move is committed
        let mut events = Vec::new();
        let mut piece = piece;

        if piece.status == PieceStatus::Hangar {
            // Take off onto the start cell. No bounce or jump applies here,
            // but the trample check below still does.
            piece.set_distance(0);
            events.push(GameEvent::PieceLaunched { color, piece: piece.id });
        } else {
            let mut next = piece.distance_travelled + roll;
            let mut bounced = false;
            if next > MAX_DISTANCE {
                // Reflect the overshoot back from the center cell
                next = MAX_DISTANCE - (next - MAX_DISTANCE);
                bounced = true;
            }
            piece.set_distance(next);

            // Same-color jump bonus: only for clean landings on the shared
            // loop, and only if the bonus cannot overshoot. Applied at most
            // once, with no follow-up jump or bounce check.
            let mut jumped = false;
            if !bounced
                && piece.status == PieceStatus::OnTrack
                && piece.distance_travelled < TRACK_LENGTH
            {
                let global = track::global_index(piece.color, piece.position());
                if track::cell_color(global) == piece.color
                    && piece.distance_travelled + JUMP_BONUS <= MAX_DISTANCE
                {
                    piece.set_distance(piece.distance_travelled + JUMP_BONUS);
                    jumped = true;
                }
            }

            events.push(GameEvent::PieceMoved {
                color,
                piece: piece.id,
                roll,
                bounced,
                distance: piece.distance_travelled,
                finished: piece.status == PieceStatus::Finished,
            });
            if jumped {
                events.push(GameEvent::ColorJump { color, piece: piece.id });
            }
        }

        self.players[self.current_player].pieces[piece_id as usize] = piece;
        self.waiting_for_move = false;

        // Trample: evaluated once, on the final cell after bounce and jump
        // resolution, so a jump onto an opponent captures it
        if piece.status == PieceStatus::OnTrack {
            let my_global = track::global_index(piece.color, piece.position());
            for opponent in &mut self.players {
                if opponent.color == color || opponent.has_finished {
                    continue;
                }
                for target in &mut opponent.pieces {
                    if target.status == PieceStatus::OnTrack
                        && track::global_index(target.color, target.position()) == my_global
                    {
                        target.return_to_hangar();
                        events.push(GameEvent::Trampled {
                            attacker: color,
                            victim: opponent.color,
                            piece: target.id,
                        });
                    }
                }
            }
        }

        // Per-player win check
        if self.players[self.current_player].all_finished() {
            self.players[self.current_player].has_finished = true;
            events.push(GameEvent::PlayerFinished { color });
        }

        // Game end takes priority over turn continuation
        let active = self.players.iter().filter(|p| !p.has_finished).count();
        if active <= 1 && self.players.len() > 1 {
            self.phase = GamePhase::GameOver { winner: color };
            self.dice_value = None;
            events.push(GameEvent::GameWon { winner: color });
        } else {
            self.advance_turn(roll, &mut events);
        }

        self.update_message(&events);
        Ok(events)
    }

    /// Abandon the current match and return to setup
    pub fn reset(&mut self) -> Result<Vec<GameEvent>, GameError> {
        *self = GameState::new();
        Ok(Vec::new())
    }

    /// Hand the turn over (or retain it after a six).
    ///
    /// A six always keeps the turn with the same player and grows the six
    /// streak, whether or not the roll produced a move. Otherwise the next
    /// not-yet-finished player is selected; the scan is bounded by the
    /// player count so a lone remaining player cannot loop forever.
    fn advance_turn(&mut self, last_roll: u8, events: &mut Vec<GameEvent>) {
        let from = self.players[self.current_player].color;
        self.dice_value = None;
        self.waiting_for_move = false;

        if last_roll == 6 {
            self.consecutive_sixes += 1;
            events.push(GameEvent::TurnRetained {
                color: from,
                streak: self.consecutive_sixes,
            });
            return;
        }

        let count = self.players.len();
        let mut next = (self.current_player + 1) % count;
        let mut loops = 0;
        while self.players[next].has_finished && loops < count {
            next = (next + 1) % count;
            loops += 1;
        }

        self.current_player = next;
        self.consecutive_sixes = 0;
        events.push(GameEvent::TurnPassed {
            from,
            to: self.players[next].color,
        });
    }

    /// Pick the status line from this transition's events.
    ///
    /// Capture and win announcements outrank move flavor, which outranks
    /// plain roll and turn notices; among equals the latest event wins.
    fn update_message(&mut self, events: &[GameEvent]) {
        fn rank(event: &GameEvent) -> u8 {
            match event {
                GameEvent::GameWon { .. } => 6,
                GameEvent::PlayerFinished { .. } => 5,
                GameEvent::Trampled { .. } => 4,
                GameEvent::ColorJump { .. } => 3,
                GameEvent::PieceMoved { .. }
                | GameEvent::PieceLaunched { .. }
                | GameEvent::NoMovesAvailable { .. } => 2,
                GameEvent::DiceRolled { .. } | GameEvent::GameStarted { .. } => 1,
                GameEvent::TurnPassed { .. } | GameEvent::TurnRetained { .. } => 0,
            }
        }

        if let Some(event) = events.iter().max_by_key(|e| rank(e)) {
            self.message = event.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_player_game() -> GameState {
        let mut game = GameState::new();
        game.start_game(&[PlayerColor::Red, PlayerColor::Green])
            .unwrap();
        game
    }

    fn four_player_game() -> GameState {
        let mut game = GameState::new();
        game.start_game(&PlayerColor::ALL).unwrap();
        game
    }

    /// Roll a value and move the given piece of the current player
    fn roll_and_move(game: &mut GameState, roll: u8, piece: u8) -> Vec<GameEvent> {
        let color = game.current().unwrap().color;
        let mut events = game.apply_roll(roll).unwrap();
        events.extend(game.select_piece(color, piece).unwrap());
        events
    }

    #[test]
    fn test_new_game_starts_in_setup() {
        let game = GameState::new();
        assert_eq!(game.phase, GamePhase::Setup);
        assert!(game.players.is_empty());
    }

    #[test]
    fn test_start_game_seats_players_in_turn_order() {
        let mut game = GameState::new();
        game.start_game(&[PlayerColor::Green, PlayerColor::Blue])
            .unwrap();

        assert_eq!(game.phase, GamePhase::Playing);
        assert_eq!(game.players[0].color, PlayerColor::Blue);
        assert_eq!(game.players[1].color, PlayerColor::Green);
        assert_eq!(game.current().unwrap().color, PlayerColor::Blue);
    }

    #[test]
    fn test_start_game_validates_selection() {
        let mut game = GameState::new();
        assert_eq!(
            game.start_game(&[PlayerColor::Red]),
            Err(GameError::InvalidPlayerCount)
        );
        assert_eq!(
            game.start_game(&[PlayerColor::Red, PlayerColor::Red]),
            Err(GameError::DuplicateColor)
        );
        assert_eq!(game.phase, GamePhase::Setup);

        game.start_game(&[PlayerColor::Red, PlayerColor::Blue])
            .unwrap();
        assert_eq!(
            game.start_game(&[PlayerColor::Red, PlayerColor::Blue]),
            Err(GameError::AlreadyPlaying)
        );
    }

    #[test]
    fn test_roll_with_all_pieces_in_hangar_and_low_roll_is_void() {
        let mut game = two_player_game();

        let events = game.apply_roll(3).unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::NoMovesAvailable { roll: 3, .. })));
        // Turn passed to Green
        assert_eq!(game.current().unwrap().color, PlayerColor::Green);
        assert_eq!(game.dice_value, None);
        assert!(!game.waiting_for_move);
    }

    #[test]
    fn test_void_six_keeps_the_turn() {
        let mut game = two_player_game();
        // A six can always exit the hangar, so the only void six is with
        // every piece finished
        for piece in &mut game.players[0].pieces {
            piece.set_distance(MAX_DISTANCE);
        }
        // has_finished deliberately left false: the void-roll path must not
        // depend on it

        let events = game.apply_roll(6).unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::NoMovesAvailable { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::TurnRetained { streak: 1, .. })));
        assert_eq!(game.current().unwrap().color, PlayerColor::Red);
        assert_eq!(game.consecutive_sixes, 1);
    }

    #[test]
    fn test_roll_arms_piece_selection() {
        let mut game = two_player_game();

        let events = game.apply_roll(5).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::DiceRolled {
                color: PlayerColor::Red,
                roll: 5,
                has_moves: true,
            }]
        );
        assert!(game.waiting_for_move);
        assert_eq!(game.dice_value, Some(5));

        // Dice are blocked until a piece is selected
        assert_eq!(game.apply_roll(4), Err(GameError::WaitingForMove));
    }

    #[test]
    fn test_hangar_exit_on_five() {
        let mut game = two_player_game();
        let events = roll_and_move(&mut game, 5, 0);

        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::PieceLaunched { piece: 0, .. })));
        let piece = game.players[0].pieces[0];
        assert_eq!(piece.status, PieceStatus::OnTrack);
        assert_eq!(piece.distance_travelled, 0);
    }

    #[test]
    fn test_hangar_exit_rejected_on_low_roll() {
        let mut game = two_player_game();
        // Put one piece on the track so a low roll is not void
        game.players[0].pieces[3].set_distance(10);

        game.apply_roll(3).unwrap();
        let before = game.clone();

        // Selecting a hangar piece with a 3 is illegal and changes nothing
        assert_eq!(
            game.select_piece(PlayerColor::Red, 0),
            Err(GameError::IllegalMove)
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_selecting_opponents_piece_is_rejected() {
        let mut game = two_player_game();
        game.apply_roll(5).unwrap();
        let before = game.clone();

        assert_eq!(
            game.select_piece(PlayerColor::Green, 0),
            Err(GameError::NotYourPiece)
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_select_without_roll_is_rejected() {
        let mut game = two_player_game();
        assert_eq!(
            game.select_piece(PlayerColor::Red, 0),
            Err(GameError::NotWaitingForMove)
        );
    }

    #[test]
    fn test_plain_track_move_advances_distance() {
        let mut game = two_player_game();
        game.players[0].pieces[0].set_distance(10);

        roll_and_move(&mut game, 3, 0);
        // 10 + 3 = 13, global cell 13 is Blue: no jump
        assert_eq!(game.players[0].pieces[0].distance_travelled, 13);
    }

    #[test]
    fn test_overshoot_bounces_back_from_center() {
        let mut game = two_player_game();
        game.players[0].pieces[0].set_distance(44);

        let events = roll_and_move(&mut game, 5, 0);
        // 44 + 5 = 49, excess 3, reflected to 43
        let piece = game.players[0].pieces[0];
        assert_eq!(piece.distance_travelled, 43);
        assert_eq!(piece.status, PieceStatus::HomeStretch);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::PieceMoved { bounced: true, .. })));
    }

    #[test]
    fn test_exact_landing_finishes() {
        let mut game = two_player_game();
        game.players[0].pieces[0].set_distance(40);

        let events = roll_and_move(&mut game, 6, 0);
        let piece = game.players[0].pieces[0];
        assert_eq!(piece.distance_travelled, MAX_DISTANCE);
        assert_eq!(piece.status, PieceStatus::Finished);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::PieceMoved {
                bounced: false,
                finished: true,
                ..
            }
        )));
    }

    #[test]
    fn test_landing_on_own_color_jumps_four() {
        let mut game = two_player_game();
        // Red global cells are 0, 4, 8, ...; from 5 a roll of 3 lands on
        // cell 8
        game.players[0].pieces[0].set_distance(5);

        let events = roll_and_move(&mut game, 3, 0);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ColorJump { .. })));
        assert_eq!(game.players[0].pieces[0].distance_travelled, 12);
        // The jump itself landed on cell 12 (Red again) but never re-triggers
    }

    #[test]
    fn test_jump_from_last_own_cell_enters_home_stretch() {
        let mut game = two_player_game();
        // Cell 36 is Red's last own-color cell on the loop; the +4 carries
        // the piece off the track and status is re-derived once
        game.players[0].pieces[0].set_distance(33);

        roll_and_move(&mut game, 3, 0);
        // 33 + 3 = 36 (Red cell), jump to 40: home stretch entry
        let piece = game.players[0].pieces[0];
        assert_eq!(piece.distance_travelled, 40);
        assert_eq!(piece.status, PieceStatus::HomeStretch);
    }

    #[test]
    fn test_bounced_move_never_jumps() {
        let mut game = two_player_game();
        game.players[0].pieces[0].set_distance(44);

        let events = roll_and_move(&mut game, 6, 0);
        // 44 + 6 = 50, reflected to 42; bounced moves are exempt from the
        // jump check
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::ColorJump { .. })));
        assert_eq!(game.players[0].pieces[0].distance_travelled, 42);
    }

    #[test]
    fn test_trample_sends_opponent_home() {
        let mut game = two_player_game();
        // Green's start offset is 30. Global cell 33: Red needs distance 33,
        // Green needs distance 3.
        game.players[0].pieces[0].set_distance(30);
        game.players[1].pieces[2].set_distance(3);

        let events = roll_and_move(&mut game, 3, 0);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Trampled {
                victim: PlayerColor::Green,
                piece: 2,
                ..
            }
        )));
        let victim = game.players[1].pieces[2];
        assert_eq!(victim.status, PieceStatus::Hangar);
        assert_eq!(victim.distance_travelled, 0);
        // The mover stays put
        assert_eq!(game.players[0].pieces[0].distance_travelled, 33);
    }

    #[test]
    fn test_same_color_pieces_never_trample() {
        let mut game = two_player_game();
        game.players[0].pieces[0].set_distance(10);
        game.players[0].pieces[1].set_distance(13);

        let events = roll_and_move(&mut game, 3, 0);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::Trampled { .. })));
        // Both red pieces share cell 13 peacefully
        assert_eq!(game.players[0].pieces[0].distance_travelled, 13);
        assert_eq!(game.players[0].pieces[1].distance_travelled, 13);
    }

    #[test]
    fn test_jump_onto_opponent_tramples() {
        let mut game = two_player_game();
        // Red moves 5 -> 8 (Red cell), jumps to 12; Green piece sits on
        // global cell 12 (distance 22 from offset 30)
        game.players[0].pieces[0].set_distance(5);
        game.players[1].pieces[0].set_distance(22);

        let events = roll_and_move(&mut game, 3, 0);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ColorJump { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Trampled { .. })));
        assert_eq!(game.players[1].pieces[0].status, PieceStatus::Hangar);
    }

    #[test]
    fn test_hangar_exit_can_trample_squatter() {
        let mut game = two_player_game();
        // Green camped on Red's start cell (global 0 = distance 10 for Green)
        game.players[1].pieces[0].set_distance(10);

        let events = roll_and_move(&mut game, 5, 0);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::PieceLaunched { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::Trampled { .. })));
        assert_eq!(game.players[1].pieces[0].status, PieceStatus::Hangar);
    }

    #[test]
    fn test_home_stretch_pieces_cannot_be_trampled() {
        let mut game = two_player_game();
        game.players[0].pieces[0].set_distance(10);
        // Green piece in its home stretch; its track_position no longer maps
        // to a shared cell
        game.players[1].pieces[0].set_distance(41);

        let events = roll_and_move(&mut game, 3, 0);
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::Trampled { .. })));
        assert_eq!(
            game.players[1].pieces[0].status,
            PieceStatus::HomeStretch
        );
    }

    #[test]
    fn test_six_retains_turn_after_a_move() {
        let mut game = two_player_game();
        game.players[0].pieces[0].set_distance(10);

        let events = roll_and_move(&mut game, 6, 0);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::TurnRetained { streak: 1, .. })));
        assert_eq!(game.current().unwrap().color, PlayerColor::Red);
        assert_eq!(game.dice_value, None);
        assert!(!game.waiting_for_move);
    }

    #[test]
    fn test_six_streak_grows_without_cap() {
        let mut game = two_player_game();
        game.players[0].pieces[0].set_distance(2);

        for expected in 1..=5u32 {
            roll_and_move(&mut game, 6, 0);
            assert_eq!(game.consecutive_sixes, expected);
            assert_eq!(game.current().unwrap().color, PlayerColor::Red);
        }
    }

    #[test]
    fn test_non_six_resets_streak_and_passes_turn() {
        let mut game = two_player_game();
        game.players[0].pieces[0].set_distance(2);

        roll_and_move(&mut game, 6, 0);
        assert_eq!(game.consecutive_sixes, 1);

        roll_and_move(&mut game, 2, 0);
        assert_eq!(game.consecutive_sixes, 0);
        assert_eq!(game.current().unwrap().color, PlayerColor::Green);
    }

    #[test]
    fn test_turn_advancement_skips_finished_players() {
        let mut game = four_player_game();
        // Blue (index 1) and Yellow (index 2) are done
        game.players[1].has_finished = true;
        game.players[2].has_finished = true;
        game.players[0].pieces[0].set_distance(2);

        roll_and_move(&mut game, 2, 0);
        assert_eq!(game.current().unwrap().color, PlayerColor::Green);
    }

    #[test]
    fn test_fourth_piece_home_finishes_player_and_ends_two_player_game() {
        let mut game = two_player_game();
        for piece in &mut game.players[0].pieces[..3] {
            piece.set_distance(MAX_DISTANCE);
        }
        game.players[0].pieces[3].set_distance(40);

        let events = roll_and_move(&mut game, 6, 3);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::PlayerFinished {
                color: PlayerColor::Red
            }
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::GameWon {
                winner: PlayerColor::Red
            }
        )));
        assert!(game.players[0].has_finished);
        assert_eq!(game.winner(), Some(PlayerColor::Red));
        // Game over outranks the six-retention rule: no further transitions
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::TurnRetained { .. })));
        assert_eq!(game.apply_roll(6), Err(GameError::GameOver));
    }

    #[test]
    fn test_first_finisher_does_not_end_three_player_game() {
        let mut game = GameState::new();
        game.start_game(&[PlayerColor::Red, PlayerColor::Blue, PlayerColor::Green])
            .unwrap();
        for piece in &mut game.players[0].pieces[..3] {
            piece.set_distance(MAX_DISTANCE);
        }
        game.players[0].pieces[3].set_distance(43);

        let events = roll_and_move(&mut game, 3, 3);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerFinished { .. })));
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::GameWon { .. })));
        assert_eq!(game.phase, GamePhase::Playing);
        // Red is skipped from now on
        assert_eq!(game.current().unwrap().color, PlayerColor::Blue);
    }

    #[test]
    fn test_reset_returns_to_setup() {
        let mut game = two_player_game();
        game.apply_roll(5).unwrap();
        game.apply_action(GameAction::NewGame).unwrap();

        assert_eq!(game.phase, GamePhase::Setup);
        assert!(game.players.is_empty());
        assert_eq!(game.dice_value, None);
    }

    #[test]
    fn test_valid_actions_tracks_the_phase() {
        let mut game = GameState::new();
        assert!(game.valid_actions().is_empty());

        game.start_game(&[PlayerColor::Red, PlayerColor::Green])
            .unwrap();
        assert!(game.valid_actions().contains(&GameAction::RollDice));

        game.apply_roll(5).unwrap();
        let actions = game.valid_actions();
        assert!(!actions.contains(&GameAction::RollDice));
        // All four hangar pieces can take off on a 5
        let selects = actions
            .iter()
            .filter(|a| matches!(a, GameAction::SelectPiece { .. }))
            .count();
        assert_eq!(selects, 4);
    }

    #[test]
    fn test_message_reflects_latest_transition() {
        let mut game = two_player_game();
        game.apply_roll(4).unwrap();
        assert!(game.message.contains("No moves"));

        game.apply_roll(5).unwrap();
        assert!(game.message.contains("Select a plane"));
    }

    #[test]
    fn test_distance_invariant_over_random_games() {
        // Drive full random games through the public API and check the
        // distance bound after every transition
        for _ in 0..20 {
            let mut game = four_player_game();
            for _ in 0..500 {
                if game.is_finished() {
                    break;
                }
                if game.waiting_for_move {
                    let actions = game.valid_actions();
                    let pick = actions
                        .iter()
                        .find(|a| matches!(a, GameAction::SelectPiece { .. }))
                        .cloned()
                        .expect("waiting state must offer a piece");
                    game.apply_action(pick).unwrap();
                } else {
                    game.apply_action(GameAction::RollDice).unwrap();
                }

                for player in &game.players {
                    for piece in &player.pieces {
                        assert!(piece.distance_travelled <= MAX_DISTANCE);
                    }
                }
            }
        }
    }
}
