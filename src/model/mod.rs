use serde::{Deserialize, Serialize};

/// Smallest accepted board side length.
pub const GRID_MIN: usize = 5;
/// Largest accepted board side length.
pub const GRID_MAX: usize = 50;
/// Smallest accepted bomb count.
pub const BOMBS_MIN: usize = 1;
/// Absolute bomb ceiling, further capped so at least one cell stays safe.
pub const BOMBS_MAX: usize = 500;

/// Zero-based cell coordinate, `x` is the column and `y` the row.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

/// Board dimensions and bomb count requested for a game.
///
/// Values outside the supported ranges are not rejected, they are clamped
/// by [`GameParams::clamped`] when the game is initialized.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct GameParams {
    pub width: usize,
    pub height: usize,
    pub bombs: usize,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            bombs: 10,
        }
    }
}

impl GameParams {
    /// Returns a copy with every value forced into the supported range.
    ///
    /// Dimensions are clamped first so the bomb ceiling is computed from the
    /// effective board size, leaving at least one bomb-free cell.
    pub fn clamped(self) -> Self {
        let width = self.width.clamp(GRID_MIN, GRID_MAX);
        let height = self.height.clamp(GRID_MIN, GRID_MAX);
        let bombs = self.bombs.clamp(BOMBS_MIN, BOMBS_MAX.min(width * height - 1));

        Self {
            width,
            height,
            bombs,
        }
    }

    pub fn total_cells(&self) -> usize {
        self.width * self.height
    }
}

/// Lifecycle of a single game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[serde(rename = "not_started")]
    NotStarted,
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "won")]
    Won,
    #[serde(rename = "lost")]
    Lost,
}

/// What a player is allowed to see of a single cell.
///
/// A flag wins over everything else, an unrevealed cell shows nothing, and a
/// revealed cell shows either the bomb or its adjacency count.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "state")]
pub enum CellView {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "flagged")]
    Flagged,
    #[serde(rename = "revealed")]
    Revealed { adjacent: u8 },
    #[serde(rename = "bomb")]
    Bomb,
}

/// Player-facing snapshot of a whole board, cells in row-major rows.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldView {
    pub width: usize,
    pub height: usize,
    pub bombs: usize,
    pub state: GameState,
    pub remaining_flags: usize,
    pub cells: Vec<Vec<CellView>>,
}
