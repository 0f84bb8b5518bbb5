//! CLI infrastructure for the oracle binary
//!
//! This module provides the command-line interface for playing against the
//! engine and inspecting the evaluated game tree.

pub mod commands;
pub mod output;
