//! Prepa library exports for testing

pub mod core;
pub mod report;
pub mod tui;

#[cfg(test)]
pub mod test_support;
