#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Shared utilities for stylepath.
//!
//! This crate provides the filesystem probe used by the resolver. It has no
//! logging/tracing dependencies; logging is owned by the CLI and core crates.

pub mod fs;
