//! Target registry: target identity to action handle.

use std::collections::HashMap;

use tracing::trace;

use crate::action::{ActionId, Target};
use crate::handle::{ActionHandle, Slot};

/// Maps each target to its handle and each scheduled action to its target.
///
/// Targets are visited in registration order. Erasing a handle leaves a
/// stale entry in `order` that is skipped (and eventually compacted) instead
/// of shifting the vector on every erase.
pub(crate) struct TargetRegistry<T: Target> {
    handles: HashMap<T, ActionHandle<T>>,
    owners: HashMap<ActionId, T>,
    order: Vec<(T, u64)>,
    next_seq: u64,
}

impl<T: Target> TargetRegistry<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            handles: HashMap::with_capacity(capacity),
            owners: HashMap::new(),
            order: Vec::with_capacity(capacity),
            next_seq: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub(crate) fn action_count(&self) -> usize {
        self.owners.len()
    }

    #[inline]
    pub(crate) fn get(&self, target: &T) -> Option<&ActionHandle<T>> {
        self.handles.get(target)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, target: &T) -> Option<&mut ActionHandle<T>> {
        self.handles.get_mut(target)
    }

    /// Returns the target an action is scheduled on.
    #[inline]
    pub(crate) fn owner(&self, id: ActionId) -> Option<&T> {
        self.owners.get(&id)
    }

    /// Returns the target's handle, creating it with the given pause state if absent.
    ///
    /// An existing handle keeps its pause state.
    pub(crate) fn get_or_insert(&mut self, target: &T, paused: bool) -> &mut ActionHandle<T> {
        let next_seq = &mut self.next_seq;
        let order = &mut self.order;
        self.handles.entry(target.clone()).or_insert_with(|| {
            let seq = *next_seq;
            *next_seq += 1;
            order.push((target.clone(), seq));
            trace!(target: "scheduler::registry", target_id = ?target, paused, "handle created");
            ActionHandle::new(paused, seq)
        })
    }

    /// Appends a slot to the target's list. The handle must exist.
    pub(crate) fn push(&mut self, target: &T, slot: Slot<T>, reserve: usize) {
        let Some(handle) = self.handles.get_mut(target) else {
            return;
        };
        handle.reserve_for_push(reserve);
        self.owners.insert(slot.id, target.clone());
        handle.slots.push(slot);
    }

    /// Removes the slot at `index` of the target's list.
    pub(crate) fn remove_at(&mut self, target: &T, index: usize) -> Option<Slot<T>> {
        let handle = self.handles.get_mut(target)?;
        if index >= handle.len() {
            return None;
        }
        let slot = handle.remove_at(index);
        self.owners.remove(&slot.id);
        Some(slot)
    }

    /// Removes every slot of the target's list.
    pub(crate) fn clear(&mut self, target: &T) -> Vec<Slot<T>> {
        let Some(handle) = self.handles.get_mut(target) else {
            return Vec::new();
        };
        let slots = handle.clear();
        for slot in &slots {
            self.owners.remove(&slot.id);
        }
        slots
    }

    /// Erases the target's handle.
    pub(crate) fn erase(&mut self, target: &T) -> Option<ActionHandle<T>> {
        let handle = self.handles.remove(target)?;
        for slot in &handle.slots {
            self.owners.remove(&slot.id);
        }
        trace!(target: "scheduler::registry", target_id = ?target, "handle erased");

        if self.order.len() > 2 * self.handles.len() + 8 {
            self.compact();
        }
        Some(handle)
    }

    /// Live targets in registration order.
    pub(crate) fn targets(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(target, _)| target)
    }

    /// Live handles in registration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&T, &ActionHandle<T>)> + '_ {
        self.order.iter().filter_map(|(target, seq)| {
            self.handles
                .get(target)
                .filter(|handle| handle.seq == *seq)
                .map(|handle| (target, handle))
        })
    }

    /// Owned copy of the live targets, for scans that mutate the registry.
    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.targets().cloned().collect()
    }

    /// Live targets with their registration sequence, in registration order.
    pub(crate) fn entries(&self) -> Vec<(T, u64)> {
        self.iter()
            .map(|(target, handle)| (target.clone(), handle.seq))
            .collect()
    }

    fn compact(&mut self) {
        let handles = &self.handles;
        self.order.retain(|(target, seq)| {
            handles
                .get(target)
                .is_some_and(|handle| handle.seq == *seq)
        });
    }
}
