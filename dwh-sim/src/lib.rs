//! Synthetic software-delivery warehouse.
//!
//! The crate has two independent halves:
//!
//! - [`Generator`] builds the five dimension tables and two fact tables of a
//!   [`Warehouse`] from a [`SimulationConfig`] and an injected random source.
//! - [`predictor`] maps estimated effort and process maturity to a defect count,
//!   either sampled ([`predictor::sample_defects`]) or deterministic
//!   ([`predictor::predict_defects`]).
//!
//! # Example
//!
//! ```
//! use dwh_sim::{Generator, Preset};
//!
//! let mut generator = Generator::from_seed(Preset::Startup.config(), 7).unwrap();
//! let warehouse = generator.generate();
//! assert!(warehouse.integrity_violations().is_empty());
//! ```

mod config;
mod generator;
pub mod domain;
pub mod predictor;
pub mod report;

pub use config::*;
pub use generator::*;
