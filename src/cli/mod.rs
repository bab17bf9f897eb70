//! Command Line Interface (CLI) layer for tileslice.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the slice, reconstruct and
//! run subcommands. It wires user-provided options to the library
//! functionality exposed via `tileslice::api`.
//!
//! If you are embedding tileslice into another application, prefer using
//! the high-level `tileslice::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
