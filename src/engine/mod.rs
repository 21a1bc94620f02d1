//! Tick-driven layer: spawn scheduling, event plumbing, and the
//! falling-block round. Everything here advances via `tick(elapsed_ms, ..)`
//! on one cooperative thread; waits are countdowns, cancellation happens at
//! tick boundaries.

pub mod events;
pub mod session;
pub mod spawner;

pub use events::{EventBus, GameContext, GameEvent, SubscriptionId};
pub use session::{ActivePiece, FallingBlockSession};
pub use spawner::{Placement, PlacementPolicy, SpawnScheduler, WaitPolicy};
