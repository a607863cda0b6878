//! meshmotion command-line driver
//!
//! Runs car scenes in a fixed-rate frame loop and generates wheel meshes.

pub mod app;
pub mod cli;
pub mod config;
pub mod status;
pub mod vector;

pub use app::{FrameLoopApp, LoopSettings, RunSummary};
pub use cli::{Cli, Command};
