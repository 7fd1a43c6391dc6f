//! Puzzle model: the three towers and the optimal move sequence.

pub mod moves;
pub mod tower;

pub use moves::{generate, generate_between, move_count, Move};
pub use tower::{Disk, MoveError, TowerId, TowerState, TOWER_COUNT};
