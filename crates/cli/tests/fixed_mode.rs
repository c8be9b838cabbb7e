//! CLI tests for `--fixed`, `--capacity`, and `--sizing`.

use std::process::Command;

use assert_cmd::cargo;

fn fmtconv_cmd() -> Command {
    Command::new(cargo::cargo_bin!("fmtconv"))
}

#[test]
fn fixed_matches_growable() {
    for sizing in ["exact", "bound", "legacy"] {
        let output = fmtconv_cmd()
            .args(["c", "Percentage = %.2f%%", "--fixed", "--sizing", sizing])
            .output()
            .expect("run fmtconv");
        assert!(
            output.status.success(),
            "sizing={sizing} stderr={}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert_eq!(
            String::from_utf8_lossy(&output.stdout),
            "Percentage = {d:.2}%\n"
        );
    }
}

#[test]
fn too_small_capacity_reports_capacity_exceeded() {
    let output = fmtconv_cmd()
        .args(["c", "%08x", "--fixed", "--capacity", "4", "--output", "json"])
        .output()
        .expect("run fmtconv");

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid json output");
    assert_eq!(json["ok"], false);
    let diag = &json["diagnostics"][0];
    assert_eq!(diag["id"], "FMT1007");
    assert_eq!(diag["context"]["capacity"], "4");
    assert!(diag.get("span").is_none());
}

#[test]
fn capacity_requires_fixed() {
    let output = fmtconv_cmd()
        .args(["c", "%d", "--capacity", "8"])
        .output()
        .expect("run fmtconv");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn huge_capacity_is_capped() {
    for capacity in ["18446744073709551615", "1000000000000"] {
        let output = fmtconv_cmd()
            .args(["--fixed", "--capacity", capacity, "c", "%08x"])
            .output()
            .expect("run fmtconv");

        assert!(
            output.status.success(),
            "stderr={}",
            String::from_utf8_lossy(&output.stderr)
        );
        assert_eq!(String::from_utf8_lossy(&output.stdout), "{x:0>8}\n");
    }
}
