use rand::{rngs::StdRng, Rng};

use super::Replacer;
use crate::storage::page::{frame_table::FrameTable, page_table::PageTable, FrameId, PageId};

// Selected with `-a fifo`, but it evicts a uniformly random slot and keeps
// no record of load order.
pub struct RandomReplacer {
    rng: StdRng,
}

impl RandomReplacer {
    pub fn new(rng: StdRng) -> Self {
        RandomReplacer { rng }
    }
}

impl Replacer for RandomReplacer {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn on_access(&mut self, _page: PageId, _frames: &FrameTable, _pages: &mut PageTable) {}

    fn select_victim(&mut self, frames: &FrameTable, _pages: &mut PageTable) -> FrameId {
        self.rng.gen_range(0..frames.capacity())
    }
}
