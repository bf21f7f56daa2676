use hashlink::LinkedHashMap;

use super::{FrameId, PageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageTableEntry {
    pub frame: Option<FrameId>,
    pub valid: bool,
    pub referenced: bool,
    // Written since it was last loaded; needs a writeback on eviction
    pub dirty: bool,
}

// Sparse mapping of every page ever referenced, in first-touch order.
// Entries are never removed, eviction only clears their bits.
#[derive(Debug, Default)]
pub struct PageTable {
    entries: LinkedHashMap<PageId, PageTableEntry>,
}

impl PageTable {
    pub fn new() -> Self {
        PageTable {
            entries: LinkedHashMap::new(),
        }
    }

    pub fn lookup(&self, page: PageId) -> Option<&PageTableEntry> {
        self.entries.get(&page)
    }

    pub fn is_referenced(&self, page: PageId) -> bool {
        self.lookup(page).is_some_and(|entry| entry.referenced)
    }

    pub fn is_dirty(&self, page: PageId) -> bool {
        self.lookup(page).is_some_and(|entry| entry.dirty)
    }

    /// Marks `page` as accessed. The caller loads the page right after if it
    /// is not already resident, so the entry is valid from here on.
    pub fn touch(&mut self, page: PageId, is_write: bool, frame: Option<FrameId>) {
        match self.entries.get_mut(&page) {
            None => {
                self.entries.insert(
                    page,
                    PageTableEntry {
                        frame,
                        valid: true,
                        referenced: true,
                        dirty: is_write,
                    },
                );
            }
            Some(entry) => {
                entry.referenced = true;
                entry.dirty |= is_write;
                entry.valid = true;
                if frame.is_some() {
                    entry.frame = frame;
                }
            }
        }
    }

    /// Binds a freshly loaded page to its frame slot.
    pub fn bind(&mut self, page: PageId, frame: FrameId) {
        if let Some(entry) = self.entries.get_mut(&page) {
            entry.frame = Some(frame);
            entry.valid = true;
        } else {
            debug_assert!(false, "page {page} bound before it was touched");
        }
    }

    /// Returns whether the page was dirty, i.e. whether the eviction costs a
    /// write to disk.
    pub fn evict(&mut self, page: PageId) -> bool {
        let Some(entry) = self.entries.get_mut(&page) else {
            debug_assert!(false, "evicting page {page} which was never referenced");
            return false;
        };

        entry.valid = false;
        entry.referenced = false;
        entry.frame = None;

        std::mem::take(&mut entry.dirty)
    }

    pub fn clear_referenced(&mut self, page: PageId) {
        if let Some(entry) = self.entries.get_mut(&page) {
            entry.referenced = false;
        }
    }

    pub fn resident_pages(&self) -> impl Iterator<Item = PageId> + '_ {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.valid)
            .map(|(page, _)| *page)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
