//! The contents of this crate need to be organized better:
//!
//! - Timer (a mix of logging, profiling, and even parallel execution)
//! - logger setup
//! - string formatting helpers

#[macro_use]
extern crate log;

pub mod logger;
mod time;
mod utils;

pub use crate::time::{elapsed_seconds, prettyprint_time, Timer};
pub use crate::utils::{basename, plain_list_names, prettyprint_usize};
