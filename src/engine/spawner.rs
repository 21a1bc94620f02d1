//! Spawn scheduling - when and where pooled entities enter play
//!
//! Each generator owns a wait policy and a placement policy and runs a
//! Stopped/Running state machine. Waits are deadline countdowns advanced by
//! the cooperative tick, so cancellation takes effect at the next tick and
//! never touches entities that were already activated.

use glam::Vec2;
use log::debug;

use crate::core::pool::{EntityHandle, ObjectPool};
use crate::core::rng::RandomSource;
use crate::core::scoring;

/// Retries for an occupancy-avoiding placement before the cycle is skipped.
/// Generators keep their candidate space far from full, so the bound exists
/// only to turn a misconfigured generator into skipped spawns instead of a
/// spin.
const MAX_PLACEMENT_ATTEMPTS: u32 = 32;

/// How long a generator waits between spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPolicy {
    Fixed(u32),
    /// Uniform draw in `[min_ms, max_ms)`.
    Uniform { min_ms: u32, max_ms: u32 },
}

impl WaitPolicy {
    fn sample(&self, rng: &mut dyn RandomSource) -> u32 {
        match *self {
            WaitPolicy::Fixed(ms) => ms,
            WaitPolicy::Uniform { min_ms, max_ms } => {
                rng.uniform_int(min_ms as i32, max_ms as i32) as u32
            }
        }
    }

    /// One difficulty step: shrink the wait, clamped at `floor_ms`.
    pub fn shrink(&mut self, step_ms: u32, floor_ms: u32) {
        match self {
            WaitPolicy::Fixed(ms) => {
                *ms = ms.saturating_sub(step_ms).max(floor_ms.max(1));
            }
            WaitPolicy::Uniform { min_ms, max_ms } => {
                let (min, max) = scoring::shrink_wait_bounds(*min_ms, *max_ms, step_ms, floor_ms);
                *min_ms = min;
                *max_ms = max;
            }
        }
    }
}

/// Where a spawned entity is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub orientation: f32,
}

impl Placement {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            orientation: 0.0,
        }
    }
}

/// How a generator picks placements.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacementPolicy {
    Fixed(Placement),
    /// One entry chosen uniformly per spawn.
    OneOf(Vec<Placement>),
    /// Uniform draw from an axis-aligned region.
    Area { x: (f32, f32), y: (f32, f32) },
}

impl PlacementPolicy {
    fn sample(&self, rng: &mut dyn RandomSource) -> Option<Placement> {
        match self {
            PlacementPolicy::Fixed(placement) => Some(*placement),
            PlacementPolicy::OneOf(list) => {
                if list.is_empty() {
                    return None;
                }
                let index = rng.uniform_int(0, list.len() as i32) as usize;
                Some(list[index])
            }
            PlacementPolicy::Area { x, y } => Some(Placement::at(Vec2::new(
                rng.uniform_float(x.0, x.1),
                rng.uniform_float(y.0, y.1),
            ))),
        }
    }
}

/// A timed generator for one pooled kind.
///
/// The wait/spawn loop: wait out the configured duration, pick a placement,
/// acquire from the pool (an exhausted pool silently skips the cycle),
/// position and activate the entity, re-arm. `stop` discards the pending
/// wait; spawned entities run on untouched.
#[derive(Debug)]
pub struct SpawnScheduler {
    kind: String,
    wait: WaitPolicy,
    placement: PlacementPolicy,
    /// Delay before the first spawn; the regular wait is sampled otherwise.
    initial_delay_ms: Option<u32>,
    running: bool,
    /// Countdown to the next spawn. `None` while stopped.
    next_spawn_ms: Option<u32>,
}

impl SpawnScheduler {
    pub fn new(kind: impl Into<String>, wait: WaitPolicy, placement: PlacementPolicy) -> Self {
        Self {
            kind: kind.into(),
            wait,
            placement,
            initial_delay_ms: None,
            running: false,
            next_spawn_ms: None,
        }
    }

    /// Override the delay before the first spawn. Zero spawns on the first
    /// tick after `start`.
    pub fn with_initial_delay(mut self, delay_ms: u32) -> Self {
        self.initial_delay_ms = Some(delay_ms);
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Difficulty ramp hook for the owning game.
    pub fn shrink_wait(&mut self, step_ms: u32, floor_ms: u32) {
        self.wait.shrink(step_ms, floor_ms);
    }

    /// Stopped -> Running. Arms the first wait; a no-op while running.
    pub fn start(&mut self, rng: &mut dyn RandomSource) {
        if self.running {
            return;
        }
        self.running = true;
        self.next_spawn_ms = Some(match self.initial_delay_ms {
            Some(delay) => delay,
            None => self.wait.sample(rng),
        });
    }

    /// Running -> Stopped. The pending wait is discarded; entities that were
    /// already activated are not touched.
    pub fn stop(&mut self) {
        self.running = false;
        self.next_spawn_ms = None;
    }

    /// Advance the wait countdown and spawn when it expires. Returns how many
    /// entities were activated this tick.
    ///
    /// `occupied` enables rejection sampling: placements for which it returns
    /// true are redrawn, and a cycle with no free placement is skipped.
    pub fn tick<H: EntityHandle>(
        &mut self,
        elapsed_ms: u32,
        pool: &mut ObjectPool<H>,
        rng: &mut dyn RandomSource,
        occupied: Option<&dyn Fn(Vec2) -> bool>,
    ) -> u32 {
        if !self.running {
            return 0;
        }

        let mut spawned = 0;
        let mut remaining = elapsed_ms;
        while let Some(countdown) = self.next_spawn_ms {
            if countdown > remaining {
                self.next_spawn_ms = Some(countdown - remaining);
                break;
            }
            remaining -= countdown;
            if self.try_spawn(pool, rng, occupied) {
                spawned += 1;
            }
            // Re-arm; a zero wait would spin inside a single tick.
            self.next_spawn_ms = Some(self.wait.sample(rng).max(1));
        }
        spawned
    }

    fn try_spawn<H: EntityHandle>(
        &self,
        pool: &mut ObjectPool<H>,
        rng: &mut dyn RandomSource,
        occupied: Option<&dyn Fn(Vec2) -> bool>,
    ) -> bool {
        let Some(placement) = self.sample_placement(rng, occupied) else {
            debug!("spawner '{}': no free placement, skipping cycle", self.kind);
            return false;
        };

        // Exhausted pool: skip this cycle, never an error.
        let Some(id) = pool.acquire(&self.kind) else {
            return false;
        };
        let Some(handle) = pool.get_mut(id) else {
            return false;
        };
        handle.set_position(placement.position);
        handle.set_orientation(placement.orientation);
        handle.set_active(true);
        true
    }

    fn sample_placement(
        &self,
        rng: &mut dyn RandomSource,
        occupied: Option<&dyn Fn(Vec2) -> bool>,
    ) -> Option<Placement> {
        match occupied {
            None => self.placement.sample(rng),
            Some(is_occupied) => {
                for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                    let placement = self.placement.sample(rng)?;
                    if !is_occupied(placement.position) {
                        return Some(placement);
                    }
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pool::GrowthPolicy;
    use crate::core::rng::GameRng;

    #[derive(Debug, Default)]
    struct Dummy {
        position: Vec2,
        active: bool,
    }

    impl EntityHandle for Dummy {
        fn set_position(&mut self, position: Vec2) {
            self.position = position;
        }
        fn set_orientation(&mut self, _angle: f32) {}
        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
        fn is_active(&self) -> bool {
            self.active
        }
    }

    fn pool_of(kind: &str, count: usize) -> ObjectPool<Dummy> {
        let mut pool = ObjectPool::new();
        pool.prewarm(kind, count, GrowthPolicy::Fixed, Dummy::default);
        pool
    }

    #[test]
    fn test_fixed_wait_spawns_on_deadline() {
        let mut pool = pool_of("coin", 4);
        let mut rng = GameRng::seed(1);
        let mut scheduler = SpawnScheduler::new(
            "coin",
            WaitPolicy::Fixed(1000),
            PlacementPolicy::Fixed(Placement::at(Vec2::ZERO)),
        );
        scheduler.start(&mut rng);

        assert_eq!(scheduler.tick(999, &mut pool, &mut rng, None), 0);
        assert_eq!(scheduler.tick(1, &mut pool, &mut rng, None), 1);
        assert_eq!(pool.active_count("coin"), 1);
    }

    #[test]
    fn test_long_tick_spawns_each_elapsed_wait() {
        let mut pool = pool_of("coin", 8);
        let mut rng = GameRng::seed(1);
        let mut scheduler = SpawnScheduler::new(
            "coin",
            WaitPolicy::Fixed(100),
            PlacementPolicy::Fixed(Placement::at(Vec2::ZERO)),
        );
        scheduler.start(&mut rng);

        assert_eq!(scheduler.tick(350, &mut pool, &mut rng, None), 3);
    }

    #[test]
    fn test_stop_discards_pending_wait() {
        let mut pool = pool_of("enemy", 4);
        let mut rng = GameRng::seed(1);
        let mut scheduler = SpawnScheduler::new(
            "enemy",
            WaitPolicy::Fixed(1000),
            PlacementPolicy::Fixed(Placement::at(Vec2::ZERO)),
        );
        scheduler.start(&mut rng);

        assert_eq!(scheduler.tick(500, &mut pool, &mut rng, None), 0);
        scheduler.stop();
        assert_eq!(scheduler.tick(2000, &mut pool, &mut rng, None), 0);
        assert_eq!(pool.active_count("enemy"), 0);
    }

    #[test]
    fn test_exhausted_pool_skips_cycle() {
        let mut pool = pool_of("enemy", 1);
        let mut rng = GameRng::seed(1);
        let mut scheduler = SpawnScheduler::new(
            "enemy",
            WaitPolicy::Fixed(100),
            PlacementPolicy::Fixed(Placement::at(Vec2::ZERO)),
        );
        scheduler.start(&mut rng);

        assert_eq!(scheduler.tick(100, &mut pool, &mut rng, None), 1);
        // Pool is dry: the next cycles skip but the loop keeps running.
        assert_eq!(scheduler.tick(200, &mut pool, &mut rng, None), 0);
        assert!(scheduler.is_running());
    }

    #[test]
    fn test_rejection_sampling_avoids_occupied_half() {
        let mut pool = pool_of("food", 4);
        let mut rng = GameRng::seed(3);
        let mut scheduler = SpawnScheduler::new(
            "food",
            WaitPolicy::Fixed(10),
            PlacementPolicy::Area {
                x: (0.0, 10.0),
                y: (0.0, 10.0),
            },
        );
        scheduler.start(&mut rng);

        let occupied = |position: Vec2| position.x < 5.0;
        for _ in 0..4 {
            scheduler.tick(10, &mut pool, &mut rng, Some(&occupied));
        }

        let active: Vec<&Dummy> = pool.iter("food").filter(|e| e.is_active()).collect();
        assert_eq!(active.len(), 4);
        for entity in active {
            assert!(entity.position.x >= 5.0);
        }
    }

    #[test]
    fn test_wait_shrink_clamps_at_floor() {
        let mut wait = WaitPolicy::Uniform {
            min_ms: 3000,
            max_ms: 6000,
        };
        for _ in 0..100 {
            wait.shrink(500, 250);
        }
        assert_eq!(
            wait,
            WaitPolicy::Uniform {
                min_ms: 250,
                max_ms: 250
            }
        );
    }
}
