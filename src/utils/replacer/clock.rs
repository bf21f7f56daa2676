use super::Replacer;
use crate::storage::page::{frame_table::FrameTable, page_table::PageTable, FrameId, PageId};

/// Second-chance replacement with a single hand sweeping the frame slots.
pub struct ClockReplacer {
    hand: FrameId,
    num_frames: usize,
}

impl ClockReplacer {
    pub fn new(num_frames: usize) -> Self {
        ClockReplacer {
            hand: 0,
            num_frames,
        }
    }

    pub fn hand(&self) -> FrameId {
        self.hand
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.num_frames;
    }
}

impl Replacer for ClockReplacer {
    fn name(&self) -> &'static str {
        "Clock"
    }

    fn on_access(&mut self, _page: PageId, _frames: &FrameTable, _pages: &mut PageTable) {}

    fn select_victim(&mut self, frames: &FrameTable, pages: &mut PageTable) -> FrameId {
        // Every referenced page passed over gets its bit cleared, so this
        // finds a victim within two sweeps.
        loop {
            let slot = self.hand;
            self.advance();

            match frames.page_at(slot) {
                Some(page) if pages.is_referenced(page) => pages.clear_referenced(page),
                _ => return slot,
            }
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::ClockReplacer;
    use crate::{
        storage::page::{frame_table::FrameTable, page_table::PageTable},
        utils::replacer::Replacer,
    };

    fn loaded(pages: &[u64]) -> (FrameTable, PageTable) {
        let mut frames = FrameTable::new(pages.len());
        let mut table = PageTable::new();
        for (slot, &page) in pages.iter().enumerate() {
            table.touch(page, false, Some(slot));
            frames.place(slot, page);
        }
        (frames, table)
    }

    #[test]
    fn referenced_pages_get_a_second_chance() {
        let (frames, mut table) = loaded(&[10, 11, 12]);
        let mut clock = ClockReplacer::new(3);

        table.clear_referenced(11);

        // 10 is referenced: cleared and skipped. 11 is the victim.
        assert_eq!(clock.select_victim(&frames, &mut table), 1);
        assert_eq!(clock.hand(), 2);
        assert!(!table.is_referenced(10));
        assert!(table.is_referenced(12));
    }

    #[test]
    fn full_sweep_when_everything_is_referenced() {
        let (frames, mut table) = loaded(&[10, 11, 12]);
        let mut clock = ClockReplacer::new(3);

        assert_eq!(clock.select_victim(&frames, &mut table), 0);
        assert_eq!(clock.hand(), 1);
        assert!(frames.occupied().all(|(_, page)| !table.is_referenced(page)));

        // Hand persists between calls
        assert_eq!(clock.select_victim(&frames, &mut table), 1);
        assert_eq!(clock.hand(), 2);
    }
}
