//! Event registry and game context
//!
//! Score and lifecycle notifications flow through a per-session context that
//! is passed down by reference; no component reaches for an ambient global.
//! Subscribers keep the id returned by `subscribe` and deregister on
//! teardown, so a destroyed component is never invoked again.

use log::debug;

use crate::core::scoring;

/// Notifications crossing the boundary to the host (UI, audio, persistence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Points were awarded. `total` is the running score after the award.
    Scored { amount: u32, total: u32 },
    /// Completed rows were deleted in a single commit.
    RowsCleared { count: u32 },
    /// The round ended.
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&GameEvent)>;

/// Ordered list of subscriber callbacks.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Callback)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false when the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: &GameEvent) {
        for (_, callback) in &mut self.subscribers {
            callback(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Per-session scoring and notification hub.
///
/// Construct one per round, pass it by `&mut` to every component that
/// reports progress. Replaces the one-static-manager-per-game pattern.
#[derive(Default)]
pub struct GameContext {
    score: u32,
    round_over: bool,
    events: EventBus,
}

impl GameContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_round_over(&self) -> bool {
        self.round_over
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Award points and notify subscribers.
    pub fn add_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
        let event = GameEvent::Scored {
            amount,
            total: self.score,
        };
        self.events.emit(&event);
    }

    /// Report a row clear: notifies subscribers, then awards the row points.
    pub fn rows_cleared(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        self.events.emit(&GameEvent::RowsCleared { count });
        self.add_score(scoring::row_clear_points(count));
    }

    /// End the round. Idempotent; only the first call emits.
    pub fn game_over(&mut self) {
        if self.round_over {
            return;
        }
        self.round_over = true;
        debug!("round over at score {}", self.score);
        self.events.emit(&GameEvent::GameOver);
    }

    /// Reset score and round state for a fresh round. Subscribers stay.
    pub fn reset(&mut self) {
        self.score = 0;
        self.round_over = false;
    }
}
