use std::{
    fmt,
    io::{self, Write},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessOutcome {
    Hit,
    FaultNoEviction,
    FaultEvictClean,
    // Victim had to be written back to disk
    FaultEvictDirty,
}

impl AccessOutcome {
    pub fn is_fault(&self) -> bool {
        !matches!(self, AccessOutcome::Hit)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessOutcome::Hit => "Hit",
            AccessOutcome::FaultNoEviction => "Page Fault - No Eviction",
            AccessOutcome::FaultEvictClean => "Page Fault - Evict Clean",
            AccessOutcome::FaultEvictDirty => "Page Fault - Evict Dirty",
        }
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub accesses: u64,
    pub hits: u64,
    pub faults: u64,
    pub disk_writes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub algorithm: &'static str,
    pub num_frames: usize,
    pub statistics: Statistics,
}

impl Report {
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        write!(out, "{self}")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm:\t{}", self.algorithm)?;
        writeln!(f, "Number of frames:\t{}", self.num_frames)?;
        writeln!(f, "Total memory accesses:  {}", self.statistics.accesses)?;
        writeln!(f, "Total page faults:  {}", self.statistics.faults)?;
        writeln!(f, "Total writes to disk:   {}", self.statistics.disk_writes)
    }
}
