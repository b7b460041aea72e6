//! Usage text and process-exit helpers for the `zx0` binary.
//!
//! Mirrors the small `print_usage` / `print_usage_advanced` / `print_bad_usage`
//! trio used throughout this crate family's CLIs, trimmed to the handful of
//! flags ZX0 actually exposes.

use crate::cli::constants::{display_level, AUTHOR, COMPRESSOR_NAME, ZX0_EXTENSION};

/// Print brief usage to stderr.
pub fn print_usage(program: &str) {
    eprintln!("Usage : ");
    eprintln!("      {} [arg] [input] [output] ", program);
    eprintln!();
    eprintln!("input   : a filename ");
    eprintln!("          with no FILE, or when FILE is -, read standard input");
    eprintln!("Arguments : ");
    eprintln!(" -d     : decompress (default is compress) ");
    eprintln!(" -f     : overwrite output without prompting ");
    eprintln!(" -c     : write to standard output ");
    eprintln!(" -q     : quick mode (faster, never produces a smaller file) ");
    eprintln!(" -b     : classic (non-backwards) bit layout ");
    eprintln!(" -p N   : skip the first N bytes of input uncompressed ");
    eprintln!(" -r     : reverse mode ");
    eprintln!(" -T N   : use N worker threads (default: auto) ");
    eprintln!(" -v     : verbose (progress dots) ");
    eprintln!(" -h     : display this help and exit ");
    eprintln!(" -V     : display version and exit ");
}

/// Print the welcome banner followed by usage to stderr.
pub fn print_usage_advanced(program: &str) {
    let bits = (std::mem::size_of::<*const ()>() * 8) as u32;
    eprintln!(
        "*** {} v{} {}-bit, by {} ***",
        COMPRESSOR_NAME,
        crate::ZX0_VERSION_STRING,
        bits,
        AUTHOR
    );
    print_usage(program);
}

/// Print the full long-form help to stderr.
pub fn print_long_help(program: &str) {
    print_usage_advanced(program);
    eprintln!();
    eprintln!("Which values can [output] have ? ");
    eprintln!("---------------------------------");
    eprintln!("[output] : a filename, or '-' for standard output ");
    eprintln!("[output] can be left empty. In this case it is derived from [input]:");
    eprintln!(
        "          - for compression, output to filename{} ",
        ZX0_EXTENSION
    );
    eprintln!(
        "          - for decompression, output to filename without '{}'",
        ZX0_EXTENSION
    );
    eprintln!();
    eprintln!("Reverse mode : ");
    eprintln!("---------------");
    eprintln!("-r compresses the input read backwards and reverses the output, so a");
    eprintln!("target machine can decompress upward in memory without the compressed");
    eprintln!("and decompressed regions colliding. -d -r performs the inverse.");
}

/// Print "Incorrect parameters" plus brief usage, then exit 1.
pub fn print_bad_usage(program: &str) -> ! {
    if display_level() >= 1 {
        eprintln!("Incorrect parameters");
        print_usage(program);
    }
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_usage_does_not_panic() {
        print_usage("zx0");
    }

    #[test]
    fn print_usage_advanced_does_not_panic() {
        print_usage_advanced("zx0");
    }

    #[test]
    fn print_long_help_does_not_panic() {
        print_long_help("zx0");
    }
}
