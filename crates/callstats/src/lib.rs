//! `callstats` - Cell phone call billing records
//!
//! This library provides a bounded, insertion-ordered store of call records,
//! the pricing rules that derive each call's billing from its relay stations
//! and length, flat-file loading and export, and the interactive menu built
//! on top of them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod pricing;
pub mod record;
pub mod report;
pub mod store;

pub use config::{Config, OverflowPolicy};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use menu::Session;
pub use pricing::{Pricing, TaxBracket};
pub use record::CallRecord;
pub use store::{CallStore, LoadReport, Totals, CAPACITY};
