pub mod frame_table;
pub mod page_table;

pub type PageId = u64;
pub type FrameId = usize;
