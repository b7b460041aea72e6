//! Command-line argument parsing for the `zx0` binary.
//!
//! The entry points are [`parse_args`] (reads `std::env::args()`) and
//! [`parse_args_from`] (takes an explicit slice, suitable for unit testing).
//! Both return a [`ParsedArgs`] value.
//!
//! Short options may be aggregated (e.g. `-fcv`). Long options use either
//! `--option=VALUE` or `--option VALUE` syntax. Bad or unrecognised options
//! return an `Err` whose message begins with `"bad usage: "`.

use anyhow::{anyhow, Result};

use crate::cli::constants::{set_display_level, COMPRESSOR_NAME};
use crate::cli::help::print_long_help;
use crate::io::prefs::Prefs;

/// Complete set of options and filenames produced by the argument parsing loop.
#[derive(Debug)]
pub struct ParsedArgs {
    /// Compression/decompression/IO preferences.
    pub prefs: Prefs,
    /// `true` selects decompress instead of compress.
    pub decompress: bool,
    /// Force output to stdout.
    pub force_stdout: bool,
    /// Enable the optimizer's verbose progress dots.
    pub verbose: bool,
    /// Input filename, or `None` for stdin.
    pub input_filename: Option<String>,
    /// Output filename, or `None` to derive one.
    pub output_filename: Option<String>,
    /// A `-h`/`-V` flag was processed; the caller should exit 0 without I/O.
    pub exit_early: bool,
    /// Program name (argv\[0\] basename), used by help text.
    pub exe_name: String,
}

fn program_basename(argv0: &str) -> String {
    std::path::Path::new(argv0)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| COMPRESSOR_NAME.to_owned())
}

fn parse_numeric_arg(flag: &str, value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|_| anyhow!("bad usage: {} expects a numeric argument, got '{}'", flag, value))
}

/// Parses `std::env::args()`.
pub fn parse_args() -> Result<ParsedArgs> {
    let argv: Vec<String> = std::env::args().collect();
    parse_args_from(&argv)
}

/// Parses an explicit argument slice, `argv[0]` included.
pub fn parse_args_from(argv: &[String]) -> Result<ParsedArgs> {
    let exe_name = program_basename(argv.first().map(String::as_str).unwrap_or(COMPRESSOR_NAME));

    let mut prefs = Prefs::default();
    let mut decompress = false;
    let mut force_stdout = false;
    let mut verbose = false;
    let mut filenames: Vec<String> = Vec::new();
    let mut exit_early = false;
    let mut only_positional = false;

    let mut i = 1;
    while i < argv.len() {
        let arg = argv[i].as_str();

        if only_positional || arg == "-" || !arg.starts_with('-') || arg.len() == 1 {
            filenames.push(arg.to_owned());
            i += 1;
            continue;
        }

        if arg == "--" {
            only_positional = true;
            i += 1;
            continue;
        }

        if let Some(long) = arg.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((n, v)) => (n, Some(v.to_owned())),
                None => (long, None),
            };
            match name {
                "decompress" => decompress = true,
                "force" => prefs.overwrite = true,
                "stdout" => force_stdout = true,
                "quick" => prefs.quick = true,
                "classic" => prefs.classic = true,
                "reverse" => prefs.reverse = true,
                "verbose" => verbose = true,
                "help" => {
                    print_long_help(&exe_name);
                    exit_early = true;
                }
                "version" => {
                    println!("{} version {}", COMPRESSOR_NAME, crate::ZX0_VERSION_STRING);
                    exit_early = true;
                }
                "skip" | "threads" => {
                    let value = match inline_value {
                        Some(v) => v,
                        None => {
                            i += 1;
                            argv.get(i)
                                .cloned()
                                .ok_or_else(|| anyhow!("bad usage: --{} requires an argument", name))?
                        }
                    };
                    let n = parse_numeric_arg(name, &value)?;
                    if name == "skip" {
                        prefs.skip = n;
                    } else {
                        prefs.threads = n;
                    }
                }
                other => return Err(anyhow!("bad usage: unrecognized option '--{}'", other)),
            }
            i += 1;
            continue;
        }

        // Short option cluster, e.g. "-fcv" or "-p10" or "-p" "10".
        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            match chars[j] {
                'd' => decompress = true,
                'f' => prefs.overwrite = true,
                'c' => force_stdout = true,
                'q' => prefs.quick = true,
                'b' => prefs.classic = true,
                'r' => prefs.reverse = true,
                'v' => verbose = true,
                'h' => {
                    print_long_help(&exe_name);
                    exit_early = true;
                }
                'V' => {
                    println!("{} version {}", COMPRESSOR_NAME, crate::ZX0_VERSION_STRING);
                    exit_early = true;
                }
                'p' | 'T' => {
                    let flag = chars[j];
                    let rest: String = chars[j + 1..].iter().collect();
                    let value = if !rest.is_empty() {
                        rest
                    } else {
                        i += 1;
                        argv.get(i)
                            .cloned()
                            .ok_or_else(|| anyhow!("bad usage: -{} requires an argument", flag))?
                    };
                    let n = parse_numeric_arg(&flag.to_string(), &value)?;
                    if flag == 'p' {
                        prefs.skip = n;
                    } else {
                        prefs.threads = n;
                    }
                    j = chars.len();
                    continue;
                }
                other => return Err(anyhow!("bad usage: unrecognized option '-{}'", other)),
            }
            j += 1;
        }
        i += 1;
    }

    if verbose {
        set_display_level(3);
    }

    if filenames.len() > 2 {
        return Err(anyhow!(
            "bad usage: too many filename arguments ({})",
            filenames.len()
        ));
    }

    let mut iter = filenames.into_iter();
    let input_filename = iter.next().filter(|s| s != "-");
    let output_filename = iter.next().filter(|s| s != "-");

    Ok(ParsedArgs {
        prefs,
        decompress,
        force_stdout,
        verbose,
        input_filename,
        output_filename,
        exit_early,
        exe_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        std::iter::once("zx0".to_owned())
            .chain(v.iter().map(|s| s.to_string()))
            .collect()
    }

    #[test]
    fn no_args_defaults_to_compress_stdin() {
        let parsed = parse_args_from(&args(&[])).unwrap();
        assert!(!parsed.decompress);
        assert!(parsed.input_filename.is_none());
        assert!(parsed.output_filename.is_none());
    }

    #[test]
    fn decompress_short_flag() {
        let parsed = parse_args_from(&args(&["-d", "in.zx0", "out"])).unwrap();
        assert!(parsed.decompress);
        assert_eq!(parsed.input_filename.as_deref(), Some("in.zx0"));
        assert_eq!(parsed.output_filename.as_deref(), Some("out"));
    }

    #[test]
    fn long_flags() {
        let parsed = parse_args_from(&args(&["--decompress", "--force", "--stdout"])).unwrap();
        assert!(parsed.decompress);
        assert!(parsed.prefs.overwrite);
        assert!(parsed.force_stdout);
    }

    #[test]
    fn aggregated_short_flags() {
        let parsed = parse_args_from(&args(&["-fcv"])).unwrap();
        assert!(parsed.prefs.overwrite);
        assert!(parsed.force_stdout);
        assert!(parsed.verbose);
    }

    #[test]
    fn quick_and_classic_flags() {
        let parsed = parse_args_from(&args(&["-q", "-b"])).unwrap();
        assert!(parsed.prefs.quick);
        assert!(parsed.prefs.classic);
    }

    #[test]
    fn reverse_flag() {
        let parsed = parse_args_from(&args(&["-r"])).unwrap();
        assert!(parsed.prefs.reverse);
    }

    #[test]
    fn skip_short_with_attached_value() {
        let parsed = parse_args_from(&args(&["-p10"])).unwrap();
        assert_eq!(parsed.prefs.skip, 10);
    }

    #[test]
    fn skip_short_with_separate_value() {
        let parsed = parse_args_from(&args(&["-p", "10"])).unwrap();
        assert_eq!(parsed.prefs.skip, 10);
    }

    #[test]
    fn threads_long_with_equals() {
        let parsed = parse_args_from(&args(&["--threads=4"])).unwrap();
        assert_eq!(parsed.prefs.threads, 4);
    }

    #[test]
    fn threads_long_with_separate_value() {
        let parsed = parse_args_from(&args(&["--threads", "4"])).unwrap();
        assert_eq!(parsed.prefs.threads, 4);
    }

    #[test]
    fn skip_missing_value_is_bad_usage() {
        let err = parse_args_from(&args(&["-p"])).unwrap_err();
        assert!(err.to_string().starts_with("bad usage: "));
    }

    #[test]
    fn skip_non_numeric_value_is_bad_usage() {
        let err = parse_args_from(&args(&["-p", "abc"])).unwrap_err();
        assert!(err.to_string().starts_with("bad usage: "));
    }

    #[test]
    fn unknown_short_flag_is_bad_usage() {
        let err = parse_args_from(&args(&["-z"])).unwrap_err();
        assert!(err.to_string().starts_with("bad usage: "));
    }

    #[test]
    fn unknown_long_flag_is_bad_usage() {
        let err = parse_args_from(&args(&["--bogus"])).unwrap_err();
        assert!(err.to_string().starts_with("bad usage: "));
    }

    #[test]
    fn too_many_filenames_is_bad_usage() {
        let err = parse_args_from(&args(&["a", "b", "c"])).unwrap_err();
        assert!(err.to_string().starts_with("bad usage: "));
    }

    #[test]
    fn help_flag_sets_exit_early() {
        let parsed = parse_args_from(&args(&["-h"])).unwrap();
        assert!(parsed.exit_early);
    }

    #[test]
    fn version_flag_sets_exit_early() {
        let parsed = parse_args_from(&args(&["-V"])).unwrap();
        assert!(parsed.exit_early);
    }

    #[test]
    fn double_dash_ends_options() {
        let parsed = parse_args_from(&args(&["--", "-weird-name"])).unwrap();
        assert_eq!(parsed.input_filename.as_deref(), Some("-weird-name"));
    }

    #[test]
    fn single_dash_is_stdin_sentinel_not_a_filename() {
        let parsed = parse_args_from(&args(&["-", "out.zx0"])).unwrap();
        assert!(parsed.input_filename.is_none());
        assert_eq!(parsed.output_filename.as_deref(), Some("out.zx0"));
    }
}
