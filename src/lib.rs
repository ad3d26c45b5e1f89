//! Minesweeper Rules Engine
//!
//! This library implements the complete rule set of a single minesweeper
//! game, from board generation over reveal cascades to the two ways of
//! winning. It contains no I/O and no UI, a frontend drives it through
//! [`Field`] and renders [`FieldView`] snapshots.
//!
//! ## Usage
//!
//! ```rust
//! use minesweeper_engine::{Field, FieldView, GameParams, GameState, Pos};
//!
//! let mut field = Field::new();
//! field.initialize(GameParams { width: 9, height: 9, bombs: 10 });
//!
//! field.reveal(Pos { x: 4, y: 4 });
//! field.toggle_flag(Pos { x: 0, y: 0 });
//!
//! match field.state() {
//!     GameState::Won => println!("All bombs found!"),
//!     GameState::Lost => println!("Hit a bomb."),
//!     _ => println!("{} flags left", field.remaining_flags()),
//! }
//!
//! // Snapshot for rendering, bombs stay hidden while the game runs.
//! let view = FieldView::from(&field);
//! assert_eq!(view.cells.len(), 9);
//! ```
//!
//! Deterministic boards for tests or replays come from
//! [`Field::initialize_with_rng`]:
//!
//! ```rust
//! use minesweeper_engine::{Field, GameParams};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut field = Field::new();
//! field.initialize_with_rng(GameParams::default(), &mut StdRng::seed_from_u64(42));
//! ```

pub mod data;
pub mod logic;
pub mod model;

pub use data::{Cell, Field};
pub use model::{CellView, FieldView, GameParams, GameState, Pos};
