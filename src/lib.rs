//! Grid Snake - a deterministic, tick-driven Snake simulation
//!
//! This library provides:
//! - Core simulation (game module): the engine state machine and food placement
//! - Terminal rendering of snapshots (render module)
//! - Keyboard decoding into intents (input module)
//! - Session statistics (metrics module)
//! - Host loops that drive the engine (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
