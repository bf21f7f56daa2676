use rand::{rngs::StdRng, Rng};

use super::Replacer;
use crate::storage::page::{
    frame_table::FrameTable,
    page_table::{PageTable, PageTableEntry},
    FrameId, PageId,
};

pub const NUM_CLASSES: usize = 4;

/// Class index from the (referenced, dirty) bits:
/// 0 = (0,0), 1 = (0,1), 2 = (1,0), 3 = (1,1)
pub fn class_of(entry: &PageTableEntry) -> usize {
    ((entry.referenced as usize) << 1) | entry.dirty as usize
}

/// Not-recently-used replacement.
///
/// Frame slots are bucketed by their page's bits when the page is loaded and
/// again on every refresh. Hits in between change the bits but not the
/// buckets, so membership is only exact right after a load or a refresh.
pub struct NruReplacer {
    classes: [Vec<FrameId>; NUM_CLASSES],
    refresh_interval: usize,
    accesses_since_refresh: usize,
    rng: StdRng,
}

impl NruReplacer {
    pub fn new(refresh_interval: usize, rng: StdRng) -> Self {
        debug_assert!(refresh_interval > 0);

        NruReplacer {
            classes: Default::default(),
            refresh_interval,
            accesses_since_refresh: 0,
            rng,
        }
    }

    pub fn class_members(&self, class: usize) -> &[FrameId] {
        &self.classes[class]
    }

    /// Clears every resident page's referenced bit and rebuilds the classes
    /// from scratch, in slot order.
    pub fn refresh(&mut self, frames: &FrameTable, pages: &mut PageTable) {
        for class in self.classes.iter_mut() {
            class.clear();
        }

        for (slot, page) in frames.occupied() {
            pages.clear_referenced(page);
            if let Some(entry) = pages.lookup(page) {
                self.classes[class_of(entry)].push(slot);
            }
        }

        tracing::trace!(
            class_0 = self.classes[0].len(),
            class_1 = self.classes[1].len(),
            "NRU refresh"
        );
    }
}

impl Replacer for NruReplacer {
    fn name(&self) -> &'static str {
        "NRU"
    }

    fn on_access(&mut self, _page: PageId, frames: &FrameTable, pages: &mut PageTable) {
        self.accesses_since_refresh += 1;

        if self.accesses_since_refresh == self.refresh_interval {
            self.accesses_since_refresh = 0;
            self.refresh(frames, pages);
        }
    }

    fn select_victim(&mut self, frames: &FrameTable, _pages: &mut PageTable) -> FrameId {
        let Some(class) = self.classes.iter_mut().find(|class| !class.is_empty()) else {
            debug_assert!(false, "full frame table with no classified slot");
            return self.rng.gen_range(0..frames.capacity());
        };

        let index = self.rng.gen_range(0..class.len());
        class.remove(index)
    }

    fn on_load(&mut self, slot: FrameId, page: PageId, pages: &PageTable) {
        if let Some(entry) = pages.lookup(page) {
            self.classes[class_of(entry)].push(slot);
        }
    }

    fn on_evict(&mut self, slot: FrameId) {
        // The victim was already taken out in select_victim
        for class in self.classes.iter_mut() {
            class.retain(|&member| member != slot);
        }
    }
}
