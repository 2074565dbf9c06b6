use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_nanozip").to_string()
}

fn sample() -> Vec<u8> {
    b"It was the best of times, it was the worst of times, \xC0\xBF\xFF "
        .repeat(50)
}

#[test]
fn cli_compress_decompress_roundtrip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    let packed = dir.path().join("input.nz");
    let output = dir.path().join("output.txt");
    std::fs::write(&input, sample()).unwrap();

    let st = Command::new(bin())
        .args(["compress", "--window-size", "4K"])
        .arg(&input)
        .arg(&packed)
        .status()
        .unwrap();
    assert!(st.success());
    let packed_bytes = std::fs::read(&packed).unwrap();
    assert!(packed_bytes.len() < sample().len());
    assert_eq!(&packed_bytes[..4], &[0x50, 0x5A, 0x4E, 0x5A]);
    assert_eq!(u16::from_le_bytes([packed_bytes[12], packed_bytes[13]]), 4096);

    let st = Command::new(bin())
        .arg("decompress")
        .arg(&packed)
        .arg(&output)
        .status()
        .unwrap();
    assert!(st.success());
    assert_eq!(std::fs::read(&output).unwrap(), sample());
}

#[test]
fn cli_stdin_stdout_roundtrip() {
    let mut child = Command::new(bin())
        .args(["compress", "-c"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(&sample()).unwrap();
    let compressed = child.wait_with_output().unwrap();
    assert!(compressed.status.success());

    let mut child = Command::new(bin())
        .args(["decompress", "-c"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(&compressed.stdout)
        .unwrap();
    let plain = child.wait_with_output().unwrap();
    assert!(plain.status.success());
    assert_eq!(plain.stdout, sample());
}

#[test]
fn cli_refuses_overwrite_without_force() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let packed = dir.path().join("out.nz");
    std::fs::write(&input, b"payload payload payload").unwrap();
    std::fs::write(&packed, b"existing").unwrap();

    let st = Command::new(bin())
        .arg("compress")
        .arg(&input)
        .arg(&packed)
        .status()
        .unwrap();
    assert!(!st.success());
    assert_eq!(std::fs::read(&packed).unwrap(), b"existing");

    let st = Command::new(bin())
        .args(["--force", "compress"])
        .arg(&input)
        .arg(&packed)
        .status()
        .unwrap();
    assert!(st.success());
    assert_ne!(std::fs::read(&packed).unwrap(), b"existing");
}

#[test]
fn cli_check_only_detects_corruption() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let packed = dir.path().join("in.nz");
    std::fs::write(&input, sample()).unwrap();

    let st = Command::new(bin())
        .arg("compress")
        .arg(&input)
        .arg(&packed)
        .status()
        .unwrap();
    assert!(st.success());

    let st = Command::new(bin())
        .args(["decompress", "--check-only"])
        .arg(&packed)
        .status()
        .unwrap();
    assert!(st.success());

    let mut bytes = std::fs::read(&packed).unwrap();
    bytes[9] ^= 0xFF; // checksum field
    std::fs::write(&packed, &bytes).unwrap();

    let out = Command::new(bin())
        .args(["decompress", "--check-only"])
        .arg(&packed)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("checksum"));
}

#[test]
fn cli_failed_decompress_leaves_no_output() {
    let dir = tempdir().unwrap();
    let packed = dir.path().join("bad.nz");
    let output = dir.path().join("bad.out");
    std::fs::write(&packed, b"PZNZ but not really").unwrap();

    let st = Command::new(bin())
        .arg("decompress")
        .arg(&packed)
        .arg(&output)
        .status()
        .unwrap();
    assert!(!st.success());
    assert!(!output.exists());
}

#[test]
fn cli_info_reports_header() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let packed = dir.path().join("in.nz");
    std::fs::write(&input, sample()).unwrap();
    let st = Command::new(bin())
        .args(["compress", "-w", "2048"])
        .arg(&input)
        .arg(&packed)
        .status()
        .unwrap();
    assert!(st.success());

    let out = Command::new(bin()).arg("info").arg(&packed).output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains(&format!("Original size:        {}", sample().len())));
    assert!(text.contains("Window size:          2048"));
    assert!(text.contains("Validation:           PASS"));

    let out = Command::new(bin())
        .args(["--json", "info"])
        .arg(&packed)
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["window_size"], 2048);
    assert_eq!(json["valid"], true);
}

#[test]
fn cli_bench_on_files_passes() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    let b = dir.path().join("b.bin");
    std::fs::write(&a, sample()).unwrap();
    std::fs::write(&b, b"").unwrap();

    let out = Command::new(bin())
        .args(["bench", "--iterations", "2"])
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert_eq!(text.matches("Validation:  PASS").count(), 2);
}

#[test]
fn cli_bench_json() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.bin");
    std::fs::write(&a, sample()).unwrap();

    let out = Command::new(bin())
        .args(["--json", "bench", "-w", "1K"])
        .arg(&a)
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["window_size"], 1024);
    assert_eq!(json["results"][0]["passed"], true);
}

#[test]
fn cli_compress_json_stats() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let packed = dir.path().join("in.nz");
    std::fs::write(&input, sample()).unwrap();

    let out = Command::new(bin())
        .args(["--json", "compress"])
        .arg(&input)
        .arg(&packed)
        .output()
        .unwrap();
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(json["command"], "compress");
    assert_eq!(json["input_size"], sample().len());
}

#[test]
fn cli_config_works() {
    let out = Command::new(bin()).arg("config").output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stderr);
    assert!(text.contains("MAX_MATCH=258"));
    assert!(text.contains("COMPARATOR="));
}
