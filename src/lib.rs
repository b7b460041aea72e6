// zx0 — Rust port of the ZX0 optimal compressor

pub mod block;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod io;
pub mod optimizer;
pub mod util;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the most common API entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// The optimal-parse search. Equivalent to `optimize()` in `optimize.c`.
pub use optimizer::optimize;

/// A single cut point in an optimal parse.
pub use block::Block;

/// Serialize a parse into the ZX0 wire format.
pub use encoder::compress;

/// Reconstruct the original bytes from a ZX0 wire-format buffer.
pub use decoder::decompress;

/// Decoder failure conditions.
pub use error::DecodeError;

pub const ZX0_VERSION_MAJOR: i32 = 2;
pub const ZX0_VERSION_MINOR: i32 = 2;
pub const ZX0_VERSION_STRING: &str = "2.2";

/// Returns the library version string (e.g. `"2.2"`).
pub fn version_string() -> &'static str {
    ZX0_VERSION_STRING
}
