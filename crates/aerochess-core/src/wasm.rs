//! WebAssembly bindings for the Aerochess engine.
//!
//! This module exposes the engine to JavaScript through wasm-bindgen. The
//! browser side renders the JSON state snapshot and forwards user intents.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::GameAction;
#[cfg(feature = "wasm")]
use crate::game::GameState;
#[cfg(feature = "wasm")]
use crate::layout;
#[cfg(feature = "wasm")]
use crate::track::PlayerColor;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create an engine with no match in progress
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            state: GameState::new(),
        }
    }

    /// Start a match; `colors_json` is a JSON array of color names
    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&mut self, colors_json: &str) -> Result<String, JsValue> {
        let colors: Vec<PlayerColor> = serde_json::from_str(colors_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid colors: {}", e)))?;

        self.apply(GameAction::StartGame(colors))
    }

    /// Roll the dice for the current player
    #[wasm_bindgen(js_name = rollDice)]
    pub fn roll_dice(&mut self) -> Result<String, JsValue> {
        self.apply(GameAction::RollDice)
    }

    /// Select a piece to move with the pending roll
    #[wasm_bindgen(js_name = selectPiece)]
    pub fn select_piece(&mut self, color_json: &str, piece: u8) -> Result<String, JsValue> {
        let color: PlayerColor = serde_json::from_str(color_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid color: {}", e)))?;

        self.apply(GameAction::SelectPiece { color, piece })
    }

    /// Abandon the current match
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) -> Result<String, JsValue> {
        self.apply(GameAction::NewGame)
    }

    fn apply(&mut self, action: GameAction) -> Result<String, JsValue> {
        match self.state.apply_action(action) {
            Ok(events) => Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())),
            Err(e) => Err(JsValue::from_str(&format!("Action failed: {}", e))),
        }
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.state).unwrap_or_else(|_| "{}".to_string())
    }

    /// Get valid intents for the current situation as a JSON array
    #[wasm_bindgen(js_name = getValidActions)]
    pub fn get_valid_actions(&self) -> String {
        serde_json::to_string(&self.state.valid_actions()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Latest status line to display
    #[wasm_bindgen(js_name = getMessage)]
    pub fn get_message(&self) -> String {
        self.state.message.clone()
    }

    /// Check if the match has ended
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Get the winner's color name (if the match has ended)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<String> {
        self.state.winner().map(|c| c.name().to_string())
    }

    /// Get the pending dice value (if a piece selection is awaited)
    #[wasm_bindgen(js_name = getDiceValue)]
    pub fn get_dice_value(&self) -> Option<u8> {
        self.state.dice_value
    }

    /// Grid cells for every piece as JSON, keyed by color and piece id.
    ///
    /// Returned as an array of `{ color, piece, x, y }` records so the
    /// frontend does not need to duplicate the board geometry.
    #[wasm_bindgen(js_name = getPiecePositions)]
    pub fn get_piece_positions(&self) -> String {
        #[derive(serde::Serialize)]
        struct PieceCell {
            color: PlayerColor,
            piece: u8,
            x: u8,
            y: u8,
        }

        let cells: Vec<PieceCell> = self
            .state
            .players
            .iter()
            .flat_map(|p| p.pieces.iter())
            .map(|piece| {
                let cell = layout::grid_position(piece);
                PieceCell {
                    color: piece.color,
                    piece: piece.id,
                    x: cell.x,
                    y: cell.y,
                }
            })
            .collect();

        serde_json::to_string(&cells).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
