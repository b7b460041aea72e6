// config.rs — compile-time configuration constants for the optimizer and CLI.

/// Full-range offset limit (bits 0..32639), the default for ZX0's own format.
pub const OFFSET_LIMIT_FULL: usize = 32640;

/// Reduced offset limit used by `-q`/`--quick` mode (matches the ZX7 format
/// family's maximum offset). Faster search, never produces a smaller result.
pub const OFFSET_LIMIT_QUICK: usize = 2176;

/// Initial "last offset" the encoder/decoder assume before any match has set
/// one. The optimizer's origin block is installed at this offset so that the
/// very first token can be emitted as a plain literal run.
pub const INITIAL_OFFSET: usize = 1;

/// Default number of worker threads used by the optimizer's parallel shard
/// dispatch. `0` on the CLI means auto-detect via [`crate::util::cores::count_cores`].
pub const NB_WORKERS_DEFAULT: usize = 0;

/// Maximum number of worker threads selectable at runtime.
pub const NB_WORKERS_MAX: usize = 200;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_mode_is_smaller_than_full() {
        assert!(OFFSET_LIMIT_QUICK < OFFSET_LIMIT_FULL);
    }
}
