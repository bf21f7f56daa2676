use std::collections::HashMap;

use super::{FrameId, PageId};

/// Fixed number of frame slots, each empty or holding one resident page.
#[derive(Debug)]
pub struct FrameTable {
    slots: Box<[Option<PageId>]>,

    // Reverse index so residency checks don't scan every slot
    page_slots: HashMap<PageId, FrameId>,
}

impl FrameTable {
    pub fn new(num_frames: usize) -> Self {
        FrameTable {
            slots: vec![None; num_frames].into_boxed_slice(),
            page_slots: HashMap::with_capacity(num_frames),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn is_resident(&self, page: PageId) -> bool {
        self.page_slots.contains_key(&page)
    }

    pub fn slot_of(&self, page: PageId) -> Option<FrameId> {
        self.page_slots.get(&page).copied()
    }

    pub fn page_at(&self, slot: FrameId) -> Option<PageId> {
        self.slots.get(slot).copied().flatten()
    }

    pub fn first_empty_slot(&self) -> Option<FrameId> {
        self.slots.iter().position(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.page_slots.len() == self.slots.len()
    }

    /// Puts `page` into `slot` and returns the previous occupant.
    pub fn place(&mut self, slot: FrameId, page: PageId) -> Option<PageId> {
        debug_assert!(!self.is_resident(page), "page {page} is already resident");

        let previous = self.slots[slot].replace(page);
        if let Some(previous) = previous {
            self.page_slots.remove(&previous);
        }
        self.page_slots.insert(page, slot);

        previous
    }

    /// Slot order, `(slot, page)` for every occupied slot.
    pub fn occupied(&self) -> impl Iterator<Item = (FrameId, PageId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, page)| page.map(|page| (slot, page)))
    }

    pub fn resident_count(&self) -> usize {
        self.page_slots.len()
    }
}
