//! Time-and-wage calculation engine.
//!
//! This crate turns raw clock-in/clock-out timestamps into payable hours,
//! overtime tiers and wage totals, and aggregates them into a wage run with a
//! draft/finalized lifecycle.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod wage_run;
