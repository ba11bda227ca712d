//! JavaScript-facing wrapper around [`GameSession`].
//!
//! Every method returns plain objects built with `serde-wasm-bindgen`; errors
//! surface as `Error` instances carrying the Rust error message.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::{GameSession, Turn};
use crate::types::Position;

#[wasm_bindgen]
pub struct OthelloGame {
    session: GameSession,
}

#[wasm_bindgen]
impl OthelloGame {
    /// `config` may be `undefined`, `null` or a partial `{ firstPlayer, autoPass }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<OthelloGame, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(to_js_error)?
        };

        Ok(Self {
            session: GameSession::new(config),
        })
    }

    /// Coordinates arrive as JS numbers; anything that is not a whole number
    /// in the grid is rejected like any other illegal placement.
    pub fn play(&mut self, row: f64, col: f64) -> Result<JsValue, JsError> {
        let position = Position::new(js_coordinate(row), js_coordinate(col));
        let turn = self.session.play(position)?;
        to_js(&turn)
    }

    pub fn pass(&mut self) -> Result<JsValue, JsError> {
        let turn: Turn = self.session.pass()?;
        to_js(&turn)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.legal_moves())
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.snapshot())
    }

    /// Counts and result; `undefined` until the game is over.
    pub fn result(&self) -> Result<JsValue, JsError> {
        match self.session.result() {
            Some(_) => to_js(&self.session.summary()),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}

/// Maps a JS number onto a grid coordinate. Fractional, negative, NaN and
/// oversized values become `u8::MAX`, which lies off the grid.
fn js_coordinate(value: f64) -> u8 {
    if value.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&value) {
        value as u8
    } else {
        u8::MAX
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(to_js_error)
}

fn to_js_error(err: serde_wasm_bindgen::Error) -> JsError {
    JsError::new(&err.to_string())
}
