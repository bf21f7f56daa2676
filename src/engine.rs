use crate::{
    buffer::simulator::Simulator,
    error::{Result, SimError},
    report::{AccessOutcome, Report},
    storage::trace::{Trace, TraceRecord, DEFAULT_PAGE_SIZE},
    utils::replacer::Policy,
};

// Upper bound for `-n`; the frame table is allocated up front
pub const MAX_FRAMES: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationOptions {
    pub num_frames: usize,
    pub policy: Policy,
    // Accesses between NRU refreshes, only read by nru
    pub refresh: Option<usize>,
    // Bytes per page; page number = address / page_size
    pub page_size: u64,
    // Seeds the random source of nru and fifo
    pub seed: Option<u64>,
}

impl SimulationOptions {
    pub fn new(num_frames: usize, policy: Policy) -> Self {
        SimulationOptions {
            num_frames,
            policy,
            refresh: None,
            page_size: DEFAULT_PAGE_SIZE,
            seed: None,
        }
    }

    pub fn refresh(mut self, refresh: usize) -> Self {
        self.refresh = Some(refresh);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_frames == 0 {
            return Err(SimError::invalid_argument(
                "-n",
                "the number of frames must be at least 1",
            ));
        }

        if self.num_frames > MAX_FRAMES {
            return Err(SimError::invalid_argument(
                "-n",
                format!("the number of frames must be at most {MAX_FRAMES}"),
            ));
        }

        if self.page_size == 0 {
            return Err(SimError::invalid_argument(
                "--page-size",
                "the page size must be at least 1 byte",
            ));
        }

        if self.policy == Policy::Nru {
            match self.refresh {
                None => {
                    return Err(SimError::invalid_argument(
                        "-r",
                        "a refresh interval is required for nru",
                    ))
                }
                Some(0) => {
                    return Err(SimError::invalid_argument(
                        "-r",
                        "the refresh interval must be at least 1",
                    ))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

/// One configured run. The trace is parsed completely before the first
/// access is simulated, which also gives OPT its lookahead.
pub struct SimulationEngine {
    options: SimulationOptions,
}

impl SimulationEngine {
    pub fn new(options: SimulationOptions) -> Result<Self> {
        options.validate()?;
        Ok(SimulationEngine { options })
    }

    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    pub fn run<F>(&self, trace: &Trace, sink: F) -> Result<Report>
    where
        F: FnMut(usize, &TraceRecord, AccessOutcome),
    {
        let records = trace.load()?;
        self.run_records(&records, sink)
    }

    pub fn run_records<F>(&self, records: &[TraceRecord], mut sink: F) -> Result<Report>
    where
        F: FnMut(usize, &TraceRecord, AccessOutcome),
    {
        let replacer = self.options.policy.build(records, &self.options)?;
        let mut simulator = Simulator::new(self.options.num_frames, replacer);

        tracing::info!(
            algorithm = simulator.algorithm(),
            frames = self.options.num_frames,
            records = records.len(),
            "Starting simulation"
        );

        for (index, record) in records.iter().enumerate() {
            let outcome = simulator.access(record);
            sink(index, record, outcome);
        }

        let statistics = simulator.statistics();

        tracing::info!(
            accesses = statistics.accesses,
            faults = statistics.faults,
            disk_writes = statistics.disk_writes,
            "Simulation finished"
        );

        Ok(Report {
            algorithm: simulator.algorithm(),
            num_frames: simulator.num_frames(),
            statistics,
        })
    }
}
