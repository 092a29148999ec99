//! Batch alignment components shared by the `docalign` binary and its tests.

#![deny(unsafe_code)]

pub mod logging;
pub mod pipeline;
pub mod types;
