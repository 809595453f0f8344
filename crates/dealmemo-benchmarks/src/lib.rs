//! # dealmemo-benchmarks
//!
//! Sector benchmark lookup: the [`BenchmarkClient`] capability
//! contract plus a resilience-kit-wrapped [`BenchmarkLookup`] that
//! degrades to "no benchmarks" rather than failing the pipeline.

pub mod client;
pub mod error;
pub mod lookup;

pub use client::{BenchmarkClient, PercentileBand, SectorBenchmarks};
pub use error::BenchmarkError;
pub use lookup::BenchmarkLookup;
