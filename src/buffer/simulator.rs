use std::collections::HashSet;

use crate::{
    report::{AccessOutcome, Statistics},
    storage::{
        page::{frame_table::FrameTable, page_table::PageTable, FrameId, PageId},
        trace::TraceRecord,
    },
    utils::replacer::Replacer,
};

/// Plays a trace against a fixed set of frames. Owns the page table, the
/// frame table and the counters of a single run.
pub struct Simulator {
    num_frames: usize,

    page_table: PageTable,
    frame_table: FrameTable,

    // Picks victims once every frame is occupied
    replacer: Box<dyn Replacer>,

    stats: Statistics,
}

impl Simulator {
    pub fn new(num_frames: usize, replacer: Box<dyn Replacer>) -> Self {
        Simulator {
            num_frames,
            page_table: PageTable::new(),
            frame_table: FrameTable::new(num_frames),
            replacer,
            stats: Statistics::default(),
        }
    }

    pub fn access(&mut self, record: &TraceRecord) -> AccessOutcome {
        let page = record.page;
        let resident_slot = self.frame_table.slot_of(page);

        self.page_table
            .touch(page, record.is_write(), resident_slot);

        let outcome = match resident_slot {
            Some(_) => {
                self.stats.hits += 1;
                AccessOutcome::Hit
            }
            None => {
                self.stats.faults += 1;
                self.handle_fault(page)
            }
        };

        self.replacer
            .on_access(page, &self.frame_table, &mut self.page_table);
        self.stats.accesses += 1;

        tracing::trace!(page, write = record.is_write(), %outcome, "Access");

        outcome
    }

    fn handle_fault(&mut self, page: PageId) -> AccessOutcome {
        // 1.
        // Free frames are available no eviction needed
        if let Some(slot) = self.frame_table.first_empty_slot() {
            self.load(slot, page);
            return AccessOutcome::FaultNoEviction;
        }

        // 2.
        // Every frame is taken, the replacer picks the slot to reuse
        let slot = self
            .replacer
            .select_victim(&self.frame_table, &mut self.page_table);

        let Some(victim) = self.frame_table.page_at(slot) else {
            debug_assert!(false, "replacer picked empty slot {slot} from a full table");
            self.load(slot, page);
            return AccessOutcome::FaultNoEviction;
        };

        let dirty = self.page_table.evict(victim);
        self.replacer.on_evict(slot);

        if dirty {
            self.stats.disk_writes += 1;
        }

        tracing::debug!(slot, victim, dirty, incoming = page, "Evicting page");

        self.load(slot, page);

        if dirty {
            AccessOutcome::FaultEvictDirty
        } else {
            AccessOutcome::FaultEvictClean
        }
    }

    fn load(&mut self, slot: FrameId, page: PageId) {
        self.frame_table.place(slot, page);
        self.page_table.bind(page, slot);
        self.replacer.on_load(slot, page, &self.page_table);
    }

    pub fn statistics(&self) -> Statistics {
        self.stats
    }

    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    pub fn algorithm(&self) -> &'static str {
        self.replacer.name()
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn frame_table(&self) -> &FrameTable {
        &self.frame_table
    }

    /// True when the pages sitting in frames are exactly the pages marked
    /// valid, and each one's entry points back at its slot.
    pub fn is_consistent(&self) -> bool {
        let in_frames: HashSet<PageId> = self.frame_table.occupied().map(|(_, page)| page).collect();
        let valid: HashSet<PageId> = self.page_table.resident_pages().collect();

        let bound = self.frame_table.occupied().all(|(slot, page)| {
            self.page_table
                .lookup(page)
                .is_some_and(|entry| entry.frame == Some(slot))
        });

        in_frames.len() <= self.num_frames && in_frames == valid && bound
    }
}
