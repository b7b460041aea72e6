//! Command-line front end for the `zx0` binary.
//!
//! Kept deliberately small: ZX0's flag surface is a handful of toggles plus
//! positional input/output filenames, not the block/frame tuning knobs of a
//! general-purpose archive format.

pub mod args;
pub mod constants;
pub mod help;
