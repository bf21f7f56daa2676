use std::fmt;

use clap::ValueEnum;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    engine::SimulationOptions,
    error::{Result, SimError},
    storage::{
        page::{frame_table::FrameTable, page_table::PageTable, FrameId, PageId},
        trace::TraceRecord,
    },
};

pub mod clock;
pub mod fifo;
pub mod nru;
pub mod opt;

pub use clock::ClockReplacer;
pub use fifo::RandomReplacer;
pub use nru::NruReplacer;
pub use opt::OptReplacer;

/// A page replacement policy. The simulator owns the page and frame tables
/// and calls into the policy at fixed points of every access.
pub trait Replacer {
    fn name(&self) -> &'static str;

    /// Runs once per trace record, after the hit/fault has been resolved and
    /// the page's bits have been updated.
    fn on_access(&mut self, page: PageId, frames: &FrameTable, pages: &mut PageTable);

    /// Only called with a full frame table and a non-resident current page.
    fn select_victim(&mut self, frames: &FrameTable, pages: &mut PageTable) -> FrameId;

    fn on_load(&mut self, _slot: FrameId, _page: PageId, _pages: &PageTable) {}

    fn on_evict(&mut self, _slot: FrameId) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    Opt,
    Clock,
    Nru,
    /// Evicts a uniformly random slot. The name is kept for compatibility
    /// with existing traces and scripts; no load order is tracked.
    Fifo,
}

impl Policy {
    pub fn display_name(&self) -> &'static str {
        match self {
            Policy::Opt => "OPT",
            Policy::Clock => "Clock",
            Policy::Nru => "NRU",
            Policy::Fifo => "FIFO",
        }
    }

    /// `records` is the full parsed trace; only OPT looks at it.
    pub fn build(
        &self,
        records: &[TraceRecord],
        options: &SimulationOptions,
    ) -> Result<Box<dyn Replacer>> {
        let replacer: Box<dyn Replacer> = match self {
            Policy::Opt => Box::new(OptReplacer::new(records)),
            Policy::Clock => Box::new(ClockReplacer::new(options.num_frames)),
            Policy::Nru => {
                let refresh = options.refresh.ok_or_else(|| {
                    SimError::invalid_argument("-r", "a refresh interval is required for nru")
                })?;
                Box::new(NruReplacer::new(refresh, seeded_rng(options.seed)))
            }
            Policy::Fifo => Box::new(RandomReplacer::new(seeded_rng(options.seed))),
        };

        Ok(replacer)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
