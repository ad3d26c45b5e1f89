use std::cmp::min;

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::{
    data::{Cell, Field},
    model::{CellView, FieldView, GameParams, GameState, Pos},
};

/// Returns the positions of the up to eight cells surrounding `pos`.
fn neighbors(pos: Pos, params: &GameParams) -> Vec<Pos> {
    let mut result = Vec::with_capacity(8);

    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }

            let new_x = pos.x as i32 + dx;
            let new_y = pos.y as i32 + dy;

            if new_x >= 0
                && new_x < params.width as i32
                && new_y >= 0
                && new_y < params.height as i32
            {
                result.push(Pos {
                    x: new_x as usize,
                    y: new_y as usize,
                });
            }
        }
    }

    result
}

/// Draws bomb cells without replacement from the set of all cells. At least
/// one cell stays free, even when `params.bombs` exceeds the cell count.
fn generate_bombs<R: Rng>(params: &GameParams, rng: &mut R) -> Vec<bool> {
    let length = params.total_cells();
    let mut bombs = vec![false; length];

    let mut open_cells: Vec<usize> = (0..length).collect();
    for _ in 0..min(params.bombs, length - 1) {
        let drawn = rng.random_range(0..open_cells.len());
        bombs[open_cells.swap_remove(drawn)] = true;
    }

    bombs
}

fn count_adjacent_bombs(bombs: &[bool], index: usize, params: &GameParams) -> u8 {
    let pos = Pos {
        x: index % params.width,
        y: index / params.width,
    };
    let mut count = 0;

    for neighbor in neighbors(pos, params) {
        if bombs[neighbor.x + neighbor.y * params.width] {
            count += 1;
        }
    }

    count
}

fn generate_cells<R: Rng>(params: &GameParams, rng: &mut R) -> Vec<Cell> {
    let bombs = generate_bombs(params, rng);
    let cells = bombs.iter().enumerate().map(|(i, bomb)| Cell {
        bomb: *bomb,
        adjacent: if *bomb {
            0
        } else {
            count_adjacent_bombs(&bombs, i, params)
        },
        revealed: false,
        flagged: false,
    });

    cells.collect()
}

impl From<&Cell> for CellView {
    fn from(value: &Cell) -> Self {
        if value.flagged {
            Self::Flagged
        } else if !value.revealed {
            Self::Hidden
        } else if value.bomb {
            Self::Bomb
        } else {
            Self::Revealed {
                adjacent: value.adjacent,
            }
        }
    }
}

impl From<&Field> for FieldView {
    fn from(value: &Field) -> Self {
        Self {
            width: value.params.width,
            height: value.params.height,
            bombs: value.params.bombs,
            state: value.state,
            remaining_flags: value.remaining_flags(),
            cells: value
                .cells
                .iter()
                .map(|cell| cell.into())
                .collect::<Vec<CellView>>()
                .chunks(value.params.width)
                .map(|chunk| chunk.to_vec())
                .collect(),
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

impl Field {
    /// Creates an empty board. No cells exist until [`Field::initialize`] is
    /// called, queries on the empty board return `None` or zero.
    pub fn new() -> Self {
        Self {
            params: GameParams::default(),
            state: GameState::NotStarted,
            cells: Vec::new(),
            revealed: 0,
            flagged: 0,
        }
    }

    /// Starts a fresh game after clamping `params` into the supported ranges.
    #[instrument(level = "trace", skip(self))]
    pub fn initialize(&mut self, params: GameParams) {
        self.initialize_with_rng(params, &mut rand::rng());
    }

    /// Same as [`Field::initialize`] but draws bomb positions from `rng`.
    #[instrument(level = "trace", skip(self, rng))]
    pub fn initialize_with_rng<R: Rng>(&mut self, params: GameParams, rng: &mut R) {
        let params = params.clamped();
        info!(
            "Creating new game: {}x{} with {} bombs",
            params.width, params.height, params.bombs
        );

        self.params = params;
        self.cells = generate_cells(&params, rng);
        self.revealed = 0;
        self.flagged = 0;
        self.state = GameState::Active;
    }

    /// Drops the board and returns to the pre-game state. The last used
    /// parameters are kept for the next [`Field::initialize`].
    #[instrument(level = "trace", skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting game");
        self.state = GameState::NotStarted;
        self.revealed = 0;
        self.flagged = 0;
        self.cells.clear();
    }

    /// Reveals the cell at `pos` and returns whether the action was accepted.
    ///
    /// Revealing a bomb ends the game with a loss and still returns `true`.
    /// Revealing a cell without adjacent bombs uncovers its whole
    /// neighborhood. The action is rejected when the game is not active, the
    /// position is out of bounds or the cell is already revealed or flagged.
    #[instrument(level = "trace", skip(self), fields(x = pos.x, y = pos.y))]
    pub fn reveal(&mut self, pos: Pos) -> bool {
        if self.state != GameState::Active {
            debug!("Ignoring reveal on inactive game at ({}, {})", pos.x, pos.y);
            return false;
        }

        if !self.validate_pos(pos) {
            warn!("Invalid reveal position: ({}, {})", pos.x, pos.y);
            return false;
        }

        let Some(cell) = self.cells.get_mut(pos.x + pos.y * self.params.width) else {
            return false;
        };

        if cell.revealed {
            debug!("Ignoring reveal on revealed cell ({}, {})", pos.x, pos.y);
            return false;
        }

        if cell.flagged {
            debug!("Ignoring reveal on flagged cell ({}, {})", pos.x, pos.y);
            return false;
        }

        cell.revealed = true;
        self.revealed += 1;
        let hit_bomb = cell.bomb;
        let adjacent = cell.adjacent;

        if hit_bomb {
            warn!("Player hit bomb at ({}, {}) - game over!", pos.x, pos.y);
            self.end_game(false);
            return true;
        }

        debug!(
            "Revealing cell ({}, {}) with {} adjacent bombs",
            pos.x, pos.y, adjacent
        );

        if adjacent == 0 {
            let before = self.revealed;
            self.reveal_neighborhood(pos);
            debug!("Cascade revealed {} more cells", self.revealed - before);
        }

        self.check_win_condition();
        true
    }

    /// Toggles the flag on the cell at `pos`.
    ///
    /// A flag can only be added while fewer flags are placed than bombs
    /// exist. Revealed cells, out-of-bounds positions and finished games are
    /// ignored.
    #[instrument(level = "trace", skip(self), fields(x = pos.x, y = pos.y))]
    pub fn toggle_flag(&mut self, pos: Pos) {
        if self.state != GameState::Active {
            debug!(
                "Ignoring flag action on inactive game at ({}, {})",
                pos.x, pos.y
            );
            return;
        }

        if !self.validate_pos(pos) {
            warn!("Invalid flag position: ({}, {})", pos.x, pos.y);
            return;
        }

        let Some(cell) = self.cells.get_mut(pos.x + pos.y * self.params.width) else {
            return;
        };

        if cell.revealed {
            debug!(
                "Ignoring flag action on revealed cell ({}, {})",
                pos.x, pos.y
            );
            return;
        }

        if cell.flagged {
            cell.flagged = false;
            self.flagged -= 1;
            debug!("Cell ({}, {}) unflagged", pos.x, pos.y);
        } else if self.flagged < self.params.bombs {
            cell.flagged = true;
            self.flagged += 1;
            debug!("Cell ({}, {}) flagged", pos.x, pos.y);
        } else {
            debug!("No flags left, ignoring flag on ({}, {})", pos.x, pos.y);
        }

        self.check_win_condition();
    }

    pub fn validate_pos(&self, pos: Pos) -> bool {
        pos.x < self.params.width && pos.y < self.params.height
    }

    /// Returns the cell at `pos`, or `None` when the position is out of
    /// bounds or no game has been initialized.
    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        if !self.validate_pos(pos) {
            return None;
        }

        self.cells.get(pos.x + pos.y * self.params.width)
    }

    /// Iterates over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The effective parameters of the current game, after clamping.
    pub fn params(&self) -> &GameParams {
        &self.params
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged
    }

    /// Flags still available to place. The end-of-game sweep does not touch
    /// the flag counter, so this stays meaningful after a win.
    pub fn remaining_flags(&self) -> usize {
        self.params.bombs - self.flagged
    }

    pub fn is_active(&self) -> bool {
        self.state == GameState::Active
    }

    pub fn is_won(&self) -> bool {
        self.state == GameState::Won
    }

    /// Uncovers the neighborhood of a freshly revealed zero cell, walking
    /// outward through further zero cells on an explicit worklist. Only zero
    /// cells enter the worklist and a zero cell has no bomb neighbors, so
    /// the walk can only uncover safe cells. Flagged cells stop the walk.
    fn reveal_neighborhood(&mut self, pos: Pos) {
        let mut pending = vec![pos];

        while let Some(current) = pending.pop() {
            for neighbor in neighbors(current, &self.params) {
                let Some(cell) = self.cells.get_mut(neighbor.x + neighbor.y * self.params.width)
                else {
                    continue;
                };

                if cell.revealed || cell.flagged {
                    continue;
                }

                cell.revealed = true;
                self.revealed += 1;

                if cell.adjacent == 0 {
                    pending.push(neighbor);
                }
            }
        }
    }

    /// Ends the game when either every safe cell is revealed or every bomb
    /// carries a flag and no flag sits on a safe cell.
    fn check_win_condition(&mut self) {
        if self.state != GameState::Active {
            return;
        }

        let safe_cells = self.params.total_cells() - self.params.bombs;
        let all_safe_revealed = self.revealed >= safe_cells;

        let mut flagged_bombs = 0;
        let mut misplaced_flag = false;
        for cell in &self.cells {
            if cell.bomb && cell.flagged {
                flagged_bombs += 1;
            } else if !cell.bomb && cell.flagged {
                misplaced_flag = true;
                break;
            }
        }
        let all_bombs_flagged = flagged_bombs == self.params.bombs && !misplaced_flag;

        if all_safe_revealed || all_bombs_flagged {
            self.end_game(true);
        }
    }

    /// Moves the game into its terminal state and uncovers the end-of-game
    /// display. Bombs and flagged cells become visible, on a win every bomb
    /// additionally carries a flag. The reveal and flag counters keep their
    /// in-game values.
    fn end_game(&mut self, won: bool) {
        self.state = if won { GameState::Won } else { GameState::Lost };

        for cell in &mut self.cells {
            if cell.bomb || cell.flagged {
                if won {
                    cell.flagged = true;
                }
                cell.revealed = true;
            }
        }

        if won {
            info!("Game won!");
        } else {
            info!("Game ended with loss, revealed {} bombs", self.params.bombs);
        }
    }
}
