//! Binary entry point for the `zx0` command-line tool.
//!
//! Handles post-parse validation, automatic output filename resolution, and
//! dispatch to [`zx0r::io::compress_filename`] /
//! [`zx0r::io::decompress_filename`].
//!
//! # Control flow
//!
//! 1. [`parse_args`] processes all flags and builds a [`ParsedArgs`] value.
//! 2. [`run`] resolves filenames and dispatches to compress or decompress,
//!    returning the process exit code.

use std::io::IsTerminal;

use zx0r::cli::args::{parse_args, ParsedArgs};
use zx0r::cli::constants::{display_level, set_display_level, COMPRESSOR_NAME, ZX0_EXTENSION};
use zx0r::cli::help::{print_bad_usage, print_usage};
use zx0r::io::file_io::{STDIN_MARK, STDOUT_MARK};
use zx0r::io::{compress_filename, decompress_filename};

fn run(args: ParsedArgs) -> i32 {
    let prefs = args.prefs;
    let decompress = args.decompress;
    let force_stdout = args.force_stdout;
    let exe_name = args.exe_name;
    let input_filename = args.input_filename;
    let mut output_filename = args.output_filename;

    zx0r::displaylevel!(
        3,
        "*** {} v{} {}-bit, by {} ***\n",
        zx0r::cli::constants::COMPRESSOR_NAME,
        zx0r::ZX0_VERSION_STRING,
        (std::mem::size_of::<*const ()>() * 8),
        zx0r::cli::constants::AUTHOR
    );

    let input_filename = input_filename.unwrap_or_else(|| STDIN_MARK.to_owned());

    if input_filename == STDIN_MARK && std::io::stdin().is_terminal() {
        zx0r::displaylevel!(1, "refusing to read from a console\n");
        return 1;
    }

    if input_filename == STDIN_MARK && output_filename.is_none() {
        output_filename = Some(STDOUT_MARK.to_owned());
    }

    let mut derived_storage: Option<String> = None;
    if output_filename.is_none() {
        if decompress {
            match input_filename.strip_suffix(ZX0_EXTENSION) {
                Some(base) => {
                    zx0r::displaylevel!(2, "Decoding file {} \n", base);
                    derived_storage = Some(base.to_owned());
                }
                None => {
                    zx0r::displaylevel!(1, "Cannot determine an output filename \n");
                    print_usage(&exe_name);
                    return 1;
                }
            }
        } else {
            let out = format!("{}{}", input_filename, ZX0_EXTENSION);
            zx0r::displaylevel!(2, "Compressed filename will be : {} \n", out);
            derived_storage = Some(out);
        }
        output_filename = derived_storage;
    }
    let output_filename = output_filename.unwrap_or_else(|| STDOUT_MARK.to_owned());

    if output_filename == STDOUT_MARK && std::io::stdout().is_terminal() && !force_stdout {
        zx0r::displaylevel!(1, "refusing to write to console without -c \n");
        return 1;
    }

    if output_filename == STDOUT_MARK && display_level() == 2 {
        set_display_level(1);
    }

    let result = if decompress {
        decompress_filename(&input_filename, &output_filename, &prefs)
    } else {
        compress_filename(&input_filename, &output_filename, &prefs)
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            zx0r::displaylevel!(1, "{}: {}\n", exe_name, e);
            1
        }
    }
}

fn main() {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("zx0: {}", e);
            print_bad_usage(COMPRESSOR_NAME);
        }
    };

    if args.exit_early {
        std::process::exit(0);
    }

    let exit_code = run(args);
    std::process::exit(exit_code);
}
