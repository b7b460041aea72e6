//! Run preferences shared between the CLI argument parser and the I/O layer.
//!
//! Mirrors the small value-type `Prefs` struct pattern used throughout this
//! crate's I/O layer: a plain, `Default`-able struct passed by reference
//! rather than a pile of global mutable state.

/// Resolved run preferences threaded from [`crate::cli::args`] through to
/// [`crate::io::file_io`] and the library entry points.
#[derive(Debug, Clone, PartialEq)]
pub struct Prefs {
    /// Overwrite the destination file without prompting.
    pub overwrite: bool,
    /// Use the reduced offset limit (quick mode).
    pub quick: bool,
    /// Use the classic (non-backwards) ZX7-style bit layout.
    pub classic: bool,
    /// Reverse-mode compression/decompression.
    pub reverse: bool,
    /// Number of leading bytes to leave unencoded at the start of the input.
    pub skip: usize,
    /// Worker thread count for the optimizer's parallel dispatch. `0` = auto.
    pub threads: usize,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: false,
            quick: false,
            classic: false,
            reverse: false,
            skip: 0,
            threads: crate::config::NB_WORKERS_DEFAULT,
        }
    }
}

impl Prefs {
    /// Resolves the offset limit implied by `quick`.
    pub fn offset_limit(&self) -> usize {
        if self.quick {
            crate::config::OFFSET_LIMIT_QUICK
        } else {
            crate::config::OFFSET_LIMIT_FULL
        }
    }

    /// Resolves `threads == 0` ("auto") to the detected core count, and
    /// clamps any explicit value to [`crate::config::NB_WORKERS_MAX`].
    pub fn resolved_threads(&self) -> usize {
        let n = if self.threads == 0 {
            crate::util::count_cores()
        } else {
            self.threads
        };
        n.clamp(1, crate::config::NB_WORKERS_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_full_offset_limit() {
        let p = Prefs::default();
        assert_eq!(p.offset_limit(), crate::config::OFFSET_LIMIT_FULL);
    }

    #[test]
    fn quick_selects_reduced_limit() {
        let mut p = Prefs::default();
        p.quick = true;
        assert_eq!(p.offset_limit(), crate::config::OFFSET_LIMIT_QUICK);
    }

    #[test]
    fn resolved_threads_auto_is_at_least_one() {
        let mut p = Prefs::default();
        p.threads = 0;
        assert!(p.resolved_threads() >= 1);
    }

    #[test]
    fn resolved_threads_clamps_to_max() {
        let mut p = Prefs::default();
        p.threads = crate::config::NB_WORKERS_MAX + 50;
        assert_eq!(p.resolved_threads(), crate::config::NB_WORKERS_MAX);
    }

    #[test]
    fn resolved_threads_explicit_value_passthrough() {
        let mut p = Prefs::default();
        p.threads = 3;
        assert_eq!(p.resolved_threads(), 3);
    }
}
