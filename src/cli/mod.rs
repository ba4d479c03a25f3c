//! Command-line interface: argument surface and display-level globals.
//!
//! Ported from `salzcli.c`. Deliberately thin — the core block codec and
//! file framing live outside this module; `main.rs` wires this module's
//! [`args::Options`] to [`crate::file`] and [`crate::block`].

pub mod arg_utils;
pub mod args;
pub mod constants;
