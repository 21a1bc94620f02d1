//! Pure game logic: the pool, the stack grid, piece tables, randomness, and
//! scoring. No timing and no callbacks live here; the tick-driven pieces sit
//! in `engine`.

pub mod grid;
pub mod pieces;
pub mod pool;
pub mod rng;
pub mod scoring;

pub use grid::StackGrid;
pub use pool::{EntityHandle, EntityId, GrowthPolicy, ObjectPool};
pub use rng::{GameRng, RandomSource};
