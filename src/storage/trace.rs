use std::{fs, path::Path};

use bytes::{Buf, Bytes};

use crate::{
    error::{Result, SimError},
    storage::page::PageId,
};

pub const DEFAULT_PAGE_SIZE: u64 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    Read,
    Write,
}

impl AccessType {
    pub fn is_write(&self) -> bool {
        matches!(self, AccessType::Write)
    }
}

/// One decoded line of a trace: the page touched and how it was touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    pub page: PageId,
    pub access: AccessType,
}

impl TraceRecord {
    pub fn read(page: PageId) -> Self {
        TraceRecord {
            page,
            access: AccessType::Read,
        }
    }

    pub fn write(page: PageId) -> Self {
        TraceRecord {
            page,
            access: AccessType::Write,
        }
    }

    pub fn is_write(&self) -> bool {
        self.access.is_write()
    }

    /// Decodes `<hex address> <mode>`. The mode is the last character of the
    /// line: `W` marks a write, anything else a read. The mode may also be
    /// glued to the address (`00001000W`) as long as it is not a hex digit.
    pub fn parse(line: &str, page_size: u64, line_number: usize) -> Result<TraceRecord> {
        debug_assert!(page_size > 0);

        let line = line.trim();
        let mut tokens = line.split_whitespace();

        let token = tokens
            .next()
            .ok_or_else(|| SimError::malformed(line_number, "empty line"))?;

        let address_token = match tokens.next() {
            Some(_) => token,
            None => match token.char_indices().last() {
                Some((at, mode)) if !mode.is_ascii_hexdigit() && at > 0 => &token[..at],
                _ => {
                    return Err(SimError::malformed(
                        line_number,
                        format!("missing access mode after address `{token}`"),
                    ))
                }
            },
        };

        let digits = address_token
            .strip_prefix("0x")
            .or_else(|| address_token.strip_prefix("0X"))
            .unwrap_or(address_token);

        let address = u64::from_str_radix(digits, 16).map_err(|e| {
            SimError::malformed(
                line_number,
                format!("invalid hex address `{address_token}`: {e}"),
            )
        })?;

        let access = match line.chars().last() {
            Some('W') => AccessType::Write,
            _ => AccessType::Read,
        };

        Ok(TraceRecord {
            page: address / page_size,
            access,
        })
    }
}

/// An in-memory trace file. Each call to [`Trace::records`] starts a fresh
/// pass from the first line.
#[derive(Debug, Clone)]
pub struct Trace {
    data: Bytes,
    page_size: u64,
}

impl Trace {
    pub fn open(path: impl AsRef<Path>, page_size: u64) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| SimError::TraceFileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "Loaded trace file");

        Ok(Self::from_bytes(Bytes::from(data), page_size))
    }

    pub fn from_bytes(data: impl Into<Bytes>, page_size: u64) -> Self {
        Trace {
            data: data.into(),
            page_size,
        }
    }

    pub fn records(&self) -> TraceRecords {
        TraceRecords {
            rest: self.data.clone(),
            page_size: self.page_size,
            line_number: 0,
        }
    }

    /// Parses the whole trace up front. Fails on the first malformed line so
    /// that a corrupted trace never produces partial output.
    pub fn load(&self) -> Result<Vec<TraceRecord>> {
        self.records().collect()
    }
}

pub struct TraceRecords {
    rest: Bytes,
    page_size: u64,
    line_number: usize,
}

impl Iterator for TraceRecords {
    type Item = Result<TraceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.rest.has_remaining() {
            return None;
        }

        let line = match self.rest.iter().position(|&b| b == b'\n') {
            Some(end) => {
                let line = self.rest.split_to(end);
                self.rest.advance(1);
                line
            }
            None => self.rest.split_to(self.rest.len()),
        };
        self.line_number += 1;

        let record = std::str::from_utf8(&line)
            .map_err(|_| SimError::malformed(self.line_number, "line is not valid UTF-8"))
            .and_then(|text| TraceRecord::parse(text, self.page_size, self.line_number));

        Some(record)
    }
}
