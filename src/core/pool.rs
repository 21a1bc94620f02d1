//! Object pool - bounded reuse of engine entities keyed by a kind tag
//!
//! Entities are created once (prewarmed, or grown on demand for growable
//! kinds) and toggled active/inactive for the life of the pool; nothing is
//! ever destroyed. Availability rides on the engine-side active flag:
//! deactivating an entity is what releases it back to its pool, there is no
//! separate release call.

use std::collections::HashMap;

use glam::Vec2;
use log::{debug, trace};

/// Minimal surface of an engine-side renderable/physical object.
///
/// The pool and the spawners depend on nothing else; hosts wrap whatever
/// scene-object reference they have behind this trait.
pub trait EntityHandle {
    fn set_position(&mut self, position: Vec2);
    fn set_orientation(&mut self, angle: f32);
    fn set_active(&mut self, active: bool);
    fn is_active(&self) -> bool;
}

/// What `acquire` does when every entity of a kind is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Never grow. Exhaustion returns `None` and the caller skips the spawn.
    Fixed,
    /// Create one more entity with the kind's factory.
    Grow,
}

/// Handle to a pooled entity. Stable for the life of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    kind: usize,
    slot: usize,
}

struct Entry<H> {
    handle: H,
    /// Handed out by `acquire` and not yet released by deactivation.
    reserved: bool,
}

struct KindPool<H> {
    entries: Vec<Entry<H>>,
    policy: GrowthPolicy,
    factory: Box<dyn FnMut() -> H>,
}

/// Reuse registry mapping kind tags to bounded sets of entities.
pub struct ObjectPool<H> {
    kinds: Vec<KindPool<H>>,
    index: HashMap<String, usize>,
}

impl<H: EntityHandle> ObjectPool<H> {
    pub fn new() -> Self {
        Self {
            kinds: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create `count` inactive entities of `kind`.
    ///
    /// Repeat calls accumulate entities; the policy and factory of the most
    /// recent call win. Freshly created entities are forced inactive no
    /// matter what the factory returned.
    pub fn prewarm<F>(&mut self, kind: &str, count: usize, policy: GrowthPolicy, factory: F)
    where
        F: FnMut() -> H + 'static,
    {
        let mut factory = factory;
        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let mut handle = factory();
            handle.set_active(false);
            entries.push(Entry {
                handle,
                reserved: false,
            });
        }

        match self.index.get(kind).copied() {
            Some(k) => {
                let kind_pool = &mut self.kinds[k];
                kind_pool.entries.extend(entries);
                kind_pool.policy = policy;
                kind_pool.factory = Box::new(factory);
            }
            None => {
                self.index.insert(kind.to_string(), self.kinds.len());
                self.kinds.push(KindPool {
                    entries,
                    policy,
                    factory: Box::new(factory),
                });
            }
        }
    }

    /// Reserve the first available entity of `kind`, in creation order.
    ///
    /// The entity is NOT activated; the caller positions and activates it.
    /// Returns `None` for unknown kinds and for exhausted `Fixed` kinds,
    /// which callers treat as "skip this spawn".
    pub fn acquire(&mut self, kind: &str) -> Option<EntityId> {
        let k = self.index.get(kind).copied()?;
        let kind_pool = &mut self.kinds[k];

        for (slot, entry) in kind_pool.entries.iter_mut().enumerate() {
            if !entry.reserved && !entry.handle.is_active() {
                entry.reserved = true;
                return Some(EntityId { kind: k, slot });
            }
        }

        match kind_pool.policy {
            GrowthPolicy::Fixed => {
                trace!("pool exhausted for kind '{kind}'");
                None
            }
            GrowthPolicy::Grow => {
                let mut handle = (kind_pool.factory)();
                handle.set_active(false);
                kind_pool.entries.push(Entry {
                    handle,
                    reserved: true,
                });
                let slot = kind_pool.entries.len() - 1;
                debug!("pool for kind '{kind}' grew to {}", slot + 1);
                Some(EntityId { kind: k, slot })
            }
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&H> {
        self.kinds
            .get(id.kind)?
            .entries
            .get(id.slot)
            .map(|entry| &entry.handle)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut H> {
        self.kinds
            .get_mut(id.kind)?
            .entries
            .get_mut(id.slot)
            .map(|entry| &mut entry.handle)
    }

    /// Deactivate an entity and release its reservation.
    ///
    /// Deactivation IS release: the next `acquire` of the same kind may hand
    /// this entity out again.
    pub fn deactivate(&mut self, id: EntityId) {
        if let Some(kind_pool) = self.kinds.get_mut(id.kind) {
            if let Some(entry) = kind_pool.entries.get_mut(id.slot) {
                entry.handle.set_active(false);
                entry.reserved = false;
            }
        }
    }

    /// Release reservations whose entities were deactivated on the engine
    /// side (boundary exit, consumption by the player).
    ///
    /// Call at the start of a tick, before any acquisitions: an entity that
    /// was acquired but not yet activated would otherwise be handed out
    /// twice.
    pub fn reclaim(&mut self) {
        for kind_pool in &mut self.kinds {
            for entry in &mut kind_pool.entries {
                if entry.reserved && !entry.handle.is_active() {
                    entry.reserved = false;
                }
            }
        }
    }

    /// Deactivate and release every entity. Used on round restart.
    pub fn deactivate_all(&mut self) {
        for kind_pool in &mut self.kinds {
            for entry in &mut kind_pool.entries {
                entry.handle.set_active(false);
                entry.reserved = false;
            }
        }
    }

    /// Iterate the entities of `kind` in creation order.
    pub fn iter<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a H> + 'a {
        let entries = match self.index.get(kind) {
            Some(&k) => self.kinds[k].entries.as_slice(),
            None => &[],
        };
        entries.iter().map(|entry| &entry.handle)
    }

    /// Number of entities of `kind` currently active.
    pub fn active_count(&self, kind: &str) -> usize {
        match self.index.get(kind) {
            Some(&k) => self.kinds[k]
                .entries
                .iter()
                .filter(|entry| entry.handle.is_active())
                .count(),
            None => 0,
        }
    }

    /// Total entities ever created for `kind` (prewarmed plus grown).
    pub fn capacity(&self, kind: &str) -> usize {
        match self.index.get(kind) {
            Some(&k) => self.kinds[k].entries.len(),
            None => 0,
        }
    }
}

impl<H: EntityHandle> Default for ObjectPool<H> {
    fn default() -> Self {
        Self::new()
    }
}
