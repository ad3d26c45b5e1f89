use crate::model::{GameParams, GameState};

/// One board cell. `adjacent` counts bombs in the eight surrounding cells
/// and is zero for bomb cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub bomb: bool,
    pub adjacent: u8,
    pub revealed: bool,
    pub flagged: bool,
}

/// A game board plus its lifecycle state.
///
/// Fields stay private so the reveal and flag counters can only move together
/// with the cells they describe. All game rules live in [`crate::logic`].
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) params: GameParams,
    pub(crate) state: GameState,
    pub(crate) cells: Vec<Cell>,
    pub(crate) revealed: usize,
    pub(crate) flagged: usize,
}
