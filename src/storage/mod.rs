pub mod page;
pub mod trace;
