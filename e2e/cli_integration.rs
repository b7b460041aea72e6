//! Black-box CLI integration tests exercising the `zx0` binary via
//! `std::process::Command`.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn zx0_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_zx0") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("zx0");
    p
}

fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let content = "Hello, ZX0!\n".repeat(341);
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

#[test]
fn compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let compressed = dir.path().join("output.zx0");
    let roundtrip = dir.path().join("roundtrip.txt");

    let status = Command::new(zx0_bin())
        .args(["-f", input.to_str().unwrap(), compressed.to_str().unwrap()])
        .status()
        .expect("failed to run zx0 compress");
    assert!(status.success(), "compress step should exit 0");
    assert!(compressed.exists());

    let status = Command::new(zx0_bin())
        .args([
            "-d",
            "-f",
            compressed.to_str().unwrap(),
            roundtrip.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run zx0 decompress");
    assert!(status.success(), "decompress step should exit 0");

    let recovered = fs::read(&roundtrip).unwrap();
    assert_eq!(original, recovered, "roundtrip output must match original");
}

#[test]
fn version_flag_prints_version_and_exits_zero() {
    let output = Command::new(zx0_bin())
        .arg("-V")
        .output()
        .expect("failed to run zx0 -V");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("zx0"));
}

#[test]
fn help_flag_exits_zero() {
    let output = Command::new(zx0_bin())
        .arg("-h")
        .output()
        .expect("failed to run zx0 -h");
    assert!(output.status.success());
}

#[test]
fn quick_mode_flag_produces_valid_output() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let compressed = dir.path().join("output.zx0");
    let roundtrip = dir.path().join("roundtrip.txt");

    let status = Command::new(zx0_bin())
        .args([
            "-q",
            "-f",
            input.to_str().unwrap(),
            compressed.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(zx0_bin())
        .args([
            "-d",
            "-f",
            compressed.to_str().unwrap(),
            roundtrip.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    assert_eq!(fs::read(&roundtrip).unwrap(), original);
}

#[test]
fn reverse_mode_roundtrip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.bin");
    let content: Vec<u8> = (0..=255u8).cycle().take(2048).collect();
    fs::write(&input, &content).unwrap();

    let compressed = dir.path().join("output.zx0");
    let roundtrip = dir.path().join("roundtrip.bin");

    let status = Command::new(zx0_bin())
        .args([
            "-r",
            "-f",
            input.to_str().unwrap(),
            compressed.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(zx0_bin())
        .args([
            "-d",
            "-r",
            "-f",
            compressed.to_str().unwrap(),
            roundtrip.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    assert_eq!(fs::read(&roundtrip).unwrap(), content);
}

#[test]
fn classic_mode_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();
    let compressed = dir.path().join("output.zx0");
    let roundtrip = dir.path().join("roundtrip.txt");

    let status = Command::new(zx0_bin())
        .args([
            "-b",
            "-f",
            input.to_str().unwrap(),
            compressed.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    let status = Command::new(zx0_bin())
        .args([
            "-d",
            "-b",
            "-f",
            compressed.to_str().unwrap(),
            roundtrip.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());

    assert_eq!(fs::read(&roundtrip).unwrap(), original);
}

#[test]
fn missing_argument_is_bad_usage_exit_code() {
    let output = Command::new(zx0_bin()).args(["-p"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn output_filename_derived_from_input_extension() {
    let (dir, input) = make_temp_input();
    let status = Command::new(zx0_bin())
        .args(["-f", input.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    let expected = dir.path().join("input.txt.zx0");
    assert!(expected.exists());
}

#[test]
fn refuses_to_overwrite_without_force() {
    let (dir, input) = make_temp_input();
    let compressed = dir.path().join("output.zx0");
    fs::write(&compressed, b"existing").unwrap();

    let status = Command::new(zx0_bin())
        .args([input.to_str().unwrap(), compressed.to_str().unwrap()])
        .stdin(std::process::Stdio::null())
        .status()
        .unwrap();
    assert!(!status.success());
}
