//! Engine-agnostic core for a family of small 2D arcade mini-games.
//!
//! Three pieces do the real work: a kind-keyed object pool, timed spawn
//! schedulers that place and activate pooled entities, and the stacking grid
//! behind the falling-block game. The engine host (rendering, physics,
//! audio, UI, input devices) stays on the far side of the `EntityHandle`
//! trait and the event registry; input reaches the core as pre-translated
//! direction codes.

pub mod core;
pub mod engine;
pub mod types;
