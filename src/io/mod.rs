//! File-level compress/decompress operations wiring [`file_io`], [`prefs`],
//! and the library's [`crate::optimizer`]/[`crate::encoder`]/[`crate::decoder`]
//! together for the CLI binary.

pub mod file_io;
pub mod prefs;

use std::io::{Read, Write};

use anyhow::{Context, Result};

use crate::decoder::decompress;
use crate::encoder::compress;
use crate::optimizer::optimize;
use file_io::{open_dst_file, open_src_file};
use prefs::Prefs;

fn read_all(path: &str) -> Result<Vec<u8>> {
    let mut reader = open_src_file(path).with_context(|| format!("{}: failed to open", path))?;
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .with_context(|| format!("{}: failed to read", path))?;
    Ok(buf)
}

/// Compresses `input_filename` into `output_filename` using `prefs`.
///
/// Handles `prefs.reverse` by reversing the input before the optimizer sees
/// it and reversing the encoder's output before it's written, so a target
/// machine can decompress upward in memory without the compressed and
/// decompressed regions colliding.
pub fn compress_filename(input_filename: &str, output_filename: &str, prefs: &Prefs) -> Result<()> {
    let mut data = read_all(input_filename)?;
    if prefs.reverse {
        data.reverse();
    }

    if !data.is_empty() && prefs.skip >= data.len() {
        return Err(anyhow::anyhow!(
            "{}: skip ({}) exceeds input length ({})",
            input_filename,
            prefs.skip,
            data.len()
        ));
    }

    let verbose = crate::cli::constants::display_level() >= 3;
    let terminal = if data.is_empty() {
        None
    } else {
        Some(optimize(
            &data,
            prefs.skip,
            prefs.offset_limit(),
            prefs.resolved_threads(),
            verbose,
        ))
    };

    if verbose {
        crate::displaylevel!(3, "\n");
    }

    let mut out = match &terminal {
        Some(t) => compress(t, &data, prefs.skip, !prefs.classic),
        None => Vec::new(),
    };
    if prefs.reverse {
        out.reverse();
    }

    let mut dst = open_dst_file(output_filename, prefs)
        .with_context(|| format!("{}: failed to open for writing", output_filename))?;
    dst.write_all(&out)
        .with_context(|| format!("{}: failed to write", output_filename))?;
    dst.flush().ok();

    crate::displaylevel!(
        2,
        "{} : {} => {} bytes\n",
        input_filename,
        data.len(),
        out.len()
    );
    Ok(())
}

/// Decompresses `input_filename` into `output_filename` using `prefs`.
///
/// `prefs.skip` has no decompression-side counterpart (the decoder takes no
/// skip parameter; the skipped prefix is compress-time literal context
/// only, never part of the decoded output); only `prefs.reverse` and
/// `prefs.classic` apply.
pub fn decompress_filename(input_filename: &str, output_filename: &str, prefs: &Prefs) -> Result<()> {
    let mut data = read_all(input_filename)?;
    if prefs.reverse {
        data.reverse();
    }

    let mut out = if data.is_empty() {
        Vec::new()
    } else {
        decompress(&data, !prefs.classic).map_err(|e| anyhow::anyhow!("{}: {}", input_filename, e))?
    };
    if prefs.reverse {
        out.reverse();
    }

    let mut dst = open_dst_file(output_filename, prefs)
        .with_context(|| format!("{}: failed to open for writing", output_filename))?;
    dst.write_all(&out)
        .with_context(|| format!("{}: failed to write", output_filename))?;
    dst.flush().ok();

    crate::displaylevel!(
        2,
        "{} : {} => {} bytes\n",
        input_filename,
        data.len(),
        out.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_then_decompress_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let compressed = dir.path().join("src.zx0");
        let restored = dir.path().join("restored.txt");

        let content = b"the quick brown fox jumps over the lazy dog, again and again";
        std::fs::write(&src, content).unwrap();

        let mut prefs = Prefs::default();
        prefs.overwrite = true;
        compress_filename(src.to_str().unwrap(), compressed.to_str().unwrap(), &prefs).unwrap();
        decompress_filename(
            compressed.to_str().unwrap(),
            restored.to_str().unwrap(),
            &prefs,
        )
        .unwrap();

        let got = std::fs::read(&restored).unwrap();
        assert_eq!(got, content);
    }

    #[test]
    fn reverse_mode_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.bin");
        let compressed = dir.path().join("src.zx0");
        let restored = dir.path().join("restored.bin");

        let content: Vec<u8> = (0..=255u8).collect();
        std::fs::write(&src, &content).unwrap();

        let mut prefs = Prefs::default();
        prefs.overwrite = true;
        prefs.reverse = true;
        compress_filename(src.to_str().unwrap(), compressed.to_str().unwrap(), &prefs).unwrap();
        decompress_filename(
            compressed.to_str().unwrap(),
            restored.to_str().unwrap(),
            &prefs,
        )
        .unwrap();

        let got = std::fs::read(&restored).unwrap();
        assert_eq!(got, content);
    }

    #[test]
    fn empty_input_compresses_and_decompresses_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("empty.txt");
        let compressed = dir.path().join("empty.zx0");
        let restored = dir.path().join("restored.txt");

        std::fs::write(&src, b"").unwrap();

        let mut prefs = Prefs::default();
        prefs.overwrite = true;
        compress_filename(src.to_str().unwrap(), compressed.to_str().unwrap(), &prefs).unwrap();
        decompress_filename(
            compressed.to_str().unwrap(),
            restored.to_str().unwrap(),
            &prefs,
        )
        .unwrap();

        let got = std::fs::read(&restored).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn skip_beyond_input_length_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let compressed = dir.path().join("src.zx0");
        std::fs::write(&src, b"short").unwrap();

        let mut prefs = Prefs::default();
        prefs.overwrite = true;
        prefs.skip = 100;
        let result = compress_filename(src.to_str().unwrap(), compressed.to_str().unwrap(), &prefs);
        assert!(result.is_err());
    }

    #[test]
    fn skip_equal_to_input_length_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let compressed = dir.path().join("src.zx0");
        std::fs::write(&src, b"short").unwrap();

        let mut prefs = Prefs::default();
        prefs.overwrite = true;
        prefs.skip = 5;
        let result = compress_filename(src.to_str().unwrap(), compressed.to_str().unwrap(), &prefs);
        assert!(result.is_err());
    }
}
