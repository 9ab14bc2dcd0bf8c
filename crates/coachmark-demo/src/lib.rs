#![forbid(unsafe_code)]

//! Coachmark demo host.
//!
//! Lays out a bank home screen for a chosen viewport, runs a walkthrough
//! over it from a script or stdin, and prints every overlay frame as ASCII.

pub mod cli;
pub mod home;
pub mod runner;
pub mod script;
pub mod steps;

pub use cli::{Cli, run, run_from_env};
pub use runner::RunSummary;
