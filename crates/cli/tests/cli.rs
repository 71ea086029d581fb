use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::{NamedTempFile, TempDir};

const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Name</key>
    <string>plistconv</string>
    <key>Count</key>
    <integer>3</integer>
    <key>Enabled</key>
    <true/>
</dict>
</plist>
"#;

/// Run the binary with quiet logs and no inherited config
fn plistconv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plistconv"))
        .args(args)
        .env("RUST_LOG", "error")
        .env_remove("PLISTCONV_CONFIG")
        .output()
        .expect("Failed to run plistconv")
}

fn write_sample(dir: &TempDir) -> String {
    let path = dir.path().join("Info.plist");
    std::fs::write(&path, SAMPLE_XML).unwrap();
    path.to_string_lossy().into_owned()
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_list_formats() {
    let output = plistconv(&["--list-formats"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Binary\nXML\nJSON\nOpenStep\n"
    );
}

#[test]
fn test_convert_xml_to_json_by_extension() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let out = dir.path().join("out.json");

    let output = plistconv(&[&input, &path_str(&out)]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Operation successful"
    );

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
    assert_eq!(json["Name"], "plistconv");
    assert_eq!(json["Count"], 3);
    assert_eq!(json["Enabled"], true);
}

#[test]
fn test_explicit_format_wins_over_extension() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let out = dir.path().join("out.json");

    let output = plistconv(&[&input, &path_str(&out), "--format", "Binary"]);
    assert!(output.status.success());

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"bplist00"));
    let value = plist::Value::from_reader(std::io::Cursor::new(bytes)).unwrap();
    let dict = value.as_dictionary().unwrap();
    assert_eq!(dict.get("Name").and_then(|v| v.as_string()), Some("plistconv"));
}

#[test]
fn test_compact_sorted_json() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let out = dir.path().join("out.json");

    let output = plistconv(&[&input, &path_str(&out), "--compact", "--sort"]);
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        r#"{"Count":3,"Enabled":true,"Name":"plistconv"}"#
    );
}

#[test]
fn test_output_derived_from_input() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    let output = plistconv(&[&input, "-f", "OpenStep"]);
    assert!(output.status.success());
    assert!(dir.path().join("Info.openstep").exists());
}

#[test]
fn test_derived_output_cannot_replace_input() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);

    let output = plistconv(&[&input, "-f", "Binary"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(std::fs::read_to_string(&input).unwrap(), SAMPLE_XML);
}

#[test]
fn test_parse_failure_exit_code() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.plist");
    std::fs::write(&input, "<plist><dict><key>a</key>").unwrap();
    let out = dir.path().join("out.xml");

    let output = plistconv(&[&path_str(&input), &path_str(&out)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Parsing of the input format failed"));
    assert!(!out.exists());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.xml");

    let output = plistconv(&[&path_str(&dir.path().join("nope.plist")), &path_str(&out)]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("I/O error"));
}

#[test]
fn test_unknown_format_name_is_usage_error() {
    let output = plistconv(&["in.plist", "out", "--format", "yaml"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_config_is_setup_error() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let out = dir.path().join("out.xml");

    let output = plistconv(&[
        &input,
        &path_str(&out),
        "--config",
        "/nonexistent/plistconv.toml",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!out.exists());
}

#[test]
fn test_config_default_format() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir);
    let out = dir.path().join("converted.out");

    let mut config = NamedTempFile::new().unwrap();
    writeln!(
        config,
        r#"
[scheduler]
max_concurrent_jobs = 1

[defaults]
format = "openstep"
compact = true
"#
    )
    .unwrap();
    config.flush().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_plistconv"))
        .args([&input, &path_str(&out)])
        .env("RUST_LOG", "error")
        .env("PLISTCONV_CONFIG", config.path())
        .output()
        .expect("Failed to run plistconv");
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "{Name=plistconv;Count=3;Enabled=1;}"
    );
}
