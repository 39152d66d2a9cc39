//! SoundForge CLI library.
//!
//! This crate provides the core functionality for the `soundforge` binary:
//! spec loading, the generator strategy, and one module per command.

pub mod commands;
pub mod generator;
pub mod input;
