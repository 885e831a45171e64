//! Per-target bookkeeping.

use crate::action::{Action, ActionFlags, ActionId, ActionTag, Target};

/// One scheduled action plus the identity data cached for lookups.
pub(crate) struct Slot<T: Target> {
    pub(crate) id: ActionId,
    pub(crate) tag: ActionTag,
    pub(crate) flags: ActionFlags,
    /// `None` while the action is checked out for its own step.
    pub(crate) action: Option<Box<dyn Action<T>>>,
}

impl<T: Target> Slot<T> {
    pub(crate) fn new(id: ActionId, action: Box<dyn Action<T>>) -> Self {
        Self {
            id,
            tag: action.tag(),
            flags: action.flags(),
            action: Some(action),
        }
    }
}

/// Action list and scan state of a single target.
///
/// # Invariants
///
/// - `salvaged` implies `current` is set and no longer listed in `slots`
/// - outside of an update, `current` is `None` and every slot holds its action
/// - `next` is only meaningful while the update loop scans this handle
pub(crate) struct ActionHandle<T: Target> {
    pub(crate) slots: Vec<Slot<T>>,
    /// Index of the next slot the update loop visits.
    pub(crate) next: usize,
    /// Action checked out for its step, if any.
    pub(crate) current: Option<ActionId>,
    /// The current action was detached during its own step.
    pub(crate) salvaged: bool,
    pub(crate) paused: bool,
    /// Registration sequence, distinguishing a handle from an erased predecessor.
    pub(crate) seq: u64,
}

impl<T: Target> ActionHandle<T> {
    pub(crate) fn new(paused: bool, seq: u64) -> Self {
        Self {
            slots: Vec::new(),
            next: 0,
            current: None,
            salvaged: false,
            paused,
            seq,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reserves room before a push so appends made by a step never force a
    /// reallocation the scan has to account for.
    pub(crate) fn reserve_for_push(&mut self, capacity: usize) {
        if self.slots.is_empty() {
            self.slots.reserve(capacity.max(1));
        } else if self.slots.len() == self.slots.capacity() {
            self.slots.reserve(self.slots.len());
        }
    }

    pub(crate) fn position(&self, id: ActionId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    pub(crate) fn position_by_tag(&self, tag: ActionTag) -> Option<usize> {
        self.slots.iter().position(|slot| slot.tag == tag)
    }

    pub(crate) fn count_by_tag(&self, tag: ActionTag) -> usize {
        self.slots.iter().filter(|slot| slot.tag == tag).count()
    }

    /// Removes the slot at `index`.
    ///
    /// Removing the checked-out action marks it salvaged. The scan position
    /// moves back when the removed slot was already visited, so the remaining
    /// slots are neither skipped nor visited twice.
    pub(crate) fn remove_at(&mut self, index: usize) -> Slot<T> {
        let slot = self.slots.remove(index);
        self.note_detached(slot.id);
        if index < self.next {
            self.next -= 1;
        }
        slot
    }

    /// Empties the list at once; the rest of the current scan sees nothing.
    pub(crate) fn clear(&mut self) -> Vec<Slot<T>> {
        let slots: Vec<_> = self.slots.drain(..).collect();
        for slot in &slots {
            self.note_detached(slot.id);
        }
        self.next = 0;
        slots
    }

    fn note_detached(&mut self, id: ActionId) {
        if self.current == Some(id) {
            self.salvaged = true;
        }
    }
}
