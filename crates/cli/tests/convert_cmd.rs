//! CLI tests for plain conversion.

use std::process::Command;

use assert_cmd::cargo;

fn fmtconv_cmd() -> Command {
    Command::new(cargo::cargo_bin!("fmtconv"))
}

#[test]
fn converts_and_prints_with_newline() {
    let output = fmtconv_cmd()
        .args(["c", "User %s has %d points (%.2f%%)"])
        .output()
        .expect("run fmtconv");

    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "User {s} has {d} points ({d:.2}%)\n"
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn uppercase_c_is_accepted() {
    let output = fmtconv_cmd()
        .args(["C", "%08x"])
        .output()
        .expect("run fmtconv");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "{x:0>8}\n");
}

#[test]
fn leading_hyphen_format_string() {
    let output = fmtconv_cmd()
        .args(["c", "-%d-"])
        .output()
        .expect("run fmtconv");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "-{d}-\n");
}

#[test]
fn zig_is_recognized_but_not_supported() {
    for name in ["zig", "Zig", "ZIG"] {
        let output = fmtconv_cmd()
            .args([name, "%d"])
            .output()
            .expect("run fmtconv");
        assert!(!output.status.success());
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("not supported"), "stderr={stderr}");
    }
}

#[test]
fn unknown_format_name_is_rejected() {
    let output = fmtconv_cmd()
        .args(["rust", "%d"])
        .output()
        .expect("run fmtconv");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unrecognized"), "stderr={stderr}");
}

#[test]
fn wrong_argument_count_is_a_usage_error() {
    let output = fmtconv_cmd().arg("c").output().expect("run fmtconv");
    assert_eq!(output.status.code(), Some(2));

    let output = fmtconv_cmd()
        .args(["c", "%d", "extra"])
        .output()
        .expect("run fmtconv");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn conversion_error_is_reported_on_stderr() {
    let output = fmtconv_cmd()
        .args(["c", "bad %--d"])
        .output()
        .expect("run fmtconv");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FMT1001"), "stderr={stderr}");
    assert!(stderr.contains("invalid flag"), "stderr={stderr}");
}

#[test]
fn lossy_conversion_warns_but_succeeds() {
    let output = fmtconv_cmd()
        .args(["c", "%g"])
        .output()
        .expect("run fmtconv");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "{d}\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FMT2001"), "stderr={stderr}");
    assert!(stderr.contains("1 warning"), "stderr={stderr}");
}

#[test]
fn multibyte_prefix_keeps_annotated_report() {
    for (source, label) in [("ééééé %q", r#"here: "q""#), ("€€€€€€€€ %", r#"here: "%""#)] {
        let output = fmtconv_cmd()
            .args(["c", source])
            .output()
            .expect("run fmtconv");

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(label), "stderr={stderr}");
        assert!(stderr.contains("Help"), "stderr={stderr}");
    }
}
