use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::GameConfig;
pub use error::{InvalidMove, PlayError};
pub use game::{GameSession, Turn, TurnState};
pub use types::{Cell, Color, GameResult, Position};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
