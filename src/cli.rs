use std::path::PathBuf;

use clap::Parser;

use crate::{
    engine::SimulationOptions, error::Result, storage::trace::DEFAULT_PAGE_SIZE,
    utils::replacer::Policy,
};

/// Replays a memory trace against a simulated set of page frames.
#[derive(Parser, Debug)]
#[command(name = "vmsim", version)]
pub struct Args {
    /// Number of physical frames
    #[arg(short = 'n', long = "frames")]
    pub frames: usize,

    /// Page replacement algorithm
    #[arg(short = 'a', long = "algorithm", value_enum)]
    pub algorithm: Policy,

    /// Accesses between NRU refreshes (required for nru)
    #[arg(short = 'r', long = "refresh")]
    pub refresh: Option<usize>,

    /// Page size in bytes
    #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u64,

    /// Seed for nru and fifo victim selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Only print the summary
    #[arg(short, long)]
    pub quiet: bool,

    pub trace_file: PathBuf,
}

impl Args {
    pub fn options(&self) -> Result<SimulationOptions> {
        let options = SimulationOptions {
            num_frames: self.frames,
            policy: self.algorithm,
            refresh: self.refresh,
            page_size: self.page_size,
            seed: self.seed,
        };

        options.validate()?;
        Ok(options)
    }
}
