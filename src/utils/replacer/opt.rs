use std::collections::VecDeque;

use hashlink::LinkedHashMap;

use super::Replacer;
use crate::storage::{
    page::{frame_table::FrameTable, page_table::PageTable, FrameId, PageId},
    trace::TraceRecord,
};

/// Belady's optimal policy: evict the resident page whose next use lies
/// farthest in the future. Needs the whole trace before the run starts.
pub struct OptReplacer {
    // Per page, the trace indices at which it is still going to be referenced
    future_refs: LinkedHashMap<PageId, VecDeque<usize>>,
    position: usize,
}

impl OptReplacer {
    pub fn new(records: &[TraceRecord]) -> Self {
        let mut future_refs: LinkedHashMap<PageId, VecDeque<usize>> = LinkedHashMap::new();

        for (index, record) in records.iter().enumerate() {
            match future_refs.get_mut(&record.page) {
                Some(refs) => refs.push_back(index),
                None => {
                    future_refs.insert(record.page, VecDeque::from([index]));
                }
            }
        }

        OptReplacer {
            future_refs,
            position: 0,
        }
    }

    pub fn next_use(&self, page: PageId) -> Option<usize> {
        self.future_refs
            .get(&page)
            .and_then(|refs| refs.front().copied())
    }
}

impl Replacer for OptReplacer {
    fn name(&self) -> &'static str {
        "OPT"
    }

    fn on_access(&mut self, page: PageId, _frames: &FrameTable, _pages: &mut PageTable) {
        let consumed = self
            .future_refs
            .get_mut(&page)
            .and_then(|refs| refs.pop_front());

        debug_assert_eq!(
            consumed,
            Some(self.position),
            "access to page {page} does not match the precomputed trace"
        );
        self.position += 1;
    }

    fn select_victim(&mut self, frames: &FrameTable, _pages: &mut PageTable) -> FrameId {
        let mut victim: FrameId = 0;
        let mut farthest = 0;

        for (slot, page) in frames.occupied() {
            match self.next_use(page) {
                // Never referenced again, nothing can beat it
                None => return slot,
                Some(next) if next > farthest => {
                    farthest = next;
                    victim = slot;
                }
                Some(_) => {}
            }
        }

        victim
    }
}
