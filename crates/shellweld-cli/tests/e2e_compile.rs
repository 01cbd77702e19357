//! End-to-End Tests for the shellweld Binary
//!
//! Each test lays out a small script tree inside a TempDir, runs the real
//! binary with that directory as its working directory, and inspects the
//! artifacts it writes: the compiled script, the `.sha512` sidecar, and
//! (where a signer is involved) the detached signature.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use chrono::Datelike;
use sha2::{Digest, Sha512};
use tempfile::TempDir;

// ==================== Harness ====================

struct CliResult {
    success: bool,
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl CliResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with exit code {}.\nstdout: {}\nstderr: {}",
            self.exit_code, self.stdout, self.stderr
        );
        self
    }

    fn assert_failure(&self) -> &Self {
        assert!(
            !self.success,
            "Expected command to fail, but it succeeded.\nstdout: {}",
            self.stdout
        );
        self
    }

    fn assert_stderr_contains(&self, needle: &str) -> &Self {
        assert!(
            self.stderr.contains(needle),
            "stderr missing '{}'.\nstderr: {}",
            needle,
            self.stderr
        );
        self
    }
}

fn shellweld(dir: &Path, args: &[&str]) -> CliResult {
    let output = Command::new(env!("CARGO_BIN_EXE_shellweld"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run shellweld");
    CliResult::from_output(output)
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("failed to write fixture");
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("failed to read artifact")
}

fn sha512_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// A base script under `basis/` that includes `basis/lib.bash`.
fn standard_tree() -> TempDir {
    let dir = TempDir::new().expect("failed to create tempdir");
    fs::create_dir(dir.path().join("basis")).expect("failed to create basis dir");
    write(
        dir.path(),
        "basis/lib.bash",
        "#!/bin/bash\n# library helpers\necho lib\n",
    );
    write(
        dir.path(),
        "basis/tool-base.bash",
        "#!/bin/sh\n#DESC: sample tool\nsource \"./basis/lib.bash\"\necho hi\n",
    );
    dir
}

#[cfg(unix)]
fn write_executable(dir: &Path, name: &str, contents: &str) {
    use std::os::unix::fs::PermissionsExt;
    write(dir, name, contents);
    fs::set_permissions(dir.join(name), fs::Permissions::from_mode(0o755))
        .expect("failed to chmod fixture");
}

// ==================== Artifact content ====================

#[test]
fn test_compile_writes_expanded_artifact() {
    let dir = standard_tree();
    shellweld(dir.path(), &["--no-sign", "basis/tool-base.bash"]).assert_success();

    let artifact = read(dir.path(), "tool.bash");
    assert!(
        artifact.starts_with(
            "#!/bin/sh\n\n#%include 'lib.bash'\n# library helpers\necho lib\necho hi\n\
             ###\n# tool.bash - sample tool\n"
        ),
        "unexpected artifact:\n{artifact}"
    );
    assert!(artifact.contains(&format!(
        "#     Copyright (C) {}",
        chrono::Local::now().year()
    )));
    assert!(artifact.contains("GNU Affero General Public License"));
    assert!(artifact.ends_with("<https://www.gnu.org/licenses/>.\n\n"));
}

#[test]
fn test_compile_strips_library_shebang_and_comment() {
    let dir = standard_tree();
    shellweld(dir.path(), &["--no-sign", "basis/tool-base.bash"]).assert_success();

    let artifact = read(dir.path(), "tool.bash");
    assert!(!artifact.contains("#!/bin/bash"));
    // Plain comments in included files survive at the default level.
    assert!(artifact.contains("# library helpers"));
}

#[test]
fn test_compile_applies_copyright_holder() {
    let dir = standard_tree();
    shellweld(
        dir.path(),
        &["--no-sign", "--copyright", "Jane Dev", "basis/tool-base.bash"],
    )
    .assert_success();

    let artifact = read(dir.path(), "tool.bash");
    assert!(artifact.contains(&format!(
        "#     Copyright (C) {}  Jane Dev",
        chrono::Local::now().year()
    )));
}

// ==================== Checksums ====================

#[test]
fn test_checksum_sidecar_matches_artifact() {
    let dir = standard_tree();
    shellweld(dir.path(), &["--no-sign", "basis/tool-base.bash"]).assert_success();

    let artifact = fs::read(dir.path().join("tool.bash")).unwrap();
    let sidecar = read(dir.path(), "tool.bash.sha512");
    assert_eq!(sidecar, format!("{}  tool.bash\n", sha512_hex(&artifact)));
}

// ==================== Clean levels ====================

#[test]
fn test_clean_level_one_omits_markers() {
    let dir = standard_tree();
    shellweld(dir.path(), &["--no-sign", "--clean", "basis/tool-base.bash"]).assert_success();

    let artifact = read(dir.path(), "tool.bash");
    assert!(!artifact.contains("#%include"));
    assert!(artifact.contains("echo lib"));
    // The top-level shebang survives below the strictest level.
    assert!(artifact.starts_with("#!/bin/sh\n"));
}

#[test]
fn test_clean_level_two_strips_comment_lines() {
    let dir = standard_tree();
    shellweld(
        dir.path(),
        &["--no-sign", "--clean", "--clean", "basis/tool-base.bash"],
    )
    .assert_success();

    let artifact = read(dir.path(), "tool.bash");
    assert!(!artifact.contains("#!/bin/sh"));
    assert!(!artifact.contains("#%include"));
    assert!(!artifact.contains("# library helpers"));
    assert!(artifact.contains("echo lib"));
    assert!(artifact.contains("echo hi"));
    // The description line is gone too, so the footer falls back.
    assert!(artifact.contains("# tool.bash - generated script"));
}

#[test]
fn test_clean_count_above_two_is_rejected() {
    let dir = standard_tree();
    shellweld(
        dir.path(),
        &[
            "--no-sign",
            "--clean",
            "--clean",
            "--clean",
            "basis/tool-base.bash",
        ],
    )
    .assert_failure()
    .assert_stderr_contains("maximum is 2");

    assert!(!dir.path().join("tool.bash").exists());
}

// ==================== Destinations ====================

#[test]
fn test_explicit_destination_target_form() {
    let dir = standard_tree();
    fs::create_dir(dir.path().join("out")).unwrap();
    shellweld(
        dir.path(),
        &["--no-sign", "basis/tool-base.bash:out/final.sh"],
    )
    .assert_success();

    assert!(dir.path().join("out/final.sh").exists());
    let sidecar = read(dir.path(), "out/final.sh.sha512");
    assert!(sidecar.ends_with("  out/final.sh\n"));
    // The footer names the explicit destination, not the input.
    assert!(read(dir.path(), "out/final.sh").contains("# final.sh - sample tool"));
}

#[test]
fn test_missing_destination_directory_fails() {
    let dir = standard_tree();
    shellweld(
        dir.path(),
        &["--no-sign", "basis/tool-base.bash:nodir/final.sh"],
    )
    .assert_failure()
    .assert_stderr_contains("nodir");
}

#[test]
fn test_multiple_targets_compile_in_order() {
    let dir = standard_tree();
    write(dir.path(), "basis/other-base.bash", "#DESC: other tool\necho other\n");
    shellweld(
        dir.path(),
        &["--no-sign", "basis/tool-base.bash", "basis/other-base.bash"],
    )
    .assert_success();

    assert!(dir.path().join("tool.bash").exists());
    assert!(dir.path().join("other.bash").exists());
    assert!(read(dir.path(), "other.bash").contains("# other.bash - other tool"));
}

#[test]
fn test_no_targets_is_a_quiet_success() {
    let dir = TempDir::new().unwrap();
    shellweld(dir.path(), &["--no-sign"]).assert_success();
}

// ==================== Failure modes ====================

#[test]
fn test_missing_include_reports_the_chain() {
    let dir = standard_tree();
    write(
        dir.path(),
        "basis/broken-base.bash",
        "source \"./basis/absent.bash\"\n",
    );
    shellweld(dir.path(), &["--no-sign", "basis/broken-base.bash"])
        .assert_failure()
        .assert_stderr_contains("basis/broken-base.bash")
        .assert_stderr_contains("absent.bash");
}

#[test]
fn test_cyclic_include_aborts_the_process() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cycle-base.bash", "source \"./cycle-base.bash\"\n");

    // Unbounded recursion exhausts the stack; the child must die rather
    // than loop forever with wrong output.
    shellweld(dir.path(), &["--no-sign", "cycle-base.bash"]).assert_failure();
}

#[test]
fn test_max_depth_turns_cycles_into_errors() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "cycle-base.bash", "source \"./cycle-base.bash\"\n");

    shellweld(
        dir.path(),
        &["--no-sign", "--max-depth", "8", "cycle-base.bash"],
    )
    .assert_failure()
    .assert_stderr_contains("depth limit");
}

// ==================== Signing ====================

#[test]
fn test_missing_explicit_gpg_fails_after_artifacts_exist() {
    let dir = standard_tree();
    shellweld(
        dir.path(),
        &["--gpg", "./no-such-gpg", "basis/tool-base.bash"],
    )
    .assert_failure()
    .assert_stderr_contains("does not exist");

    // The artifact and checksum land before signing is attempted.
    assert!(dir.path().join("tool.bash").exists());
    assert!(dir.path().join("tool.bash.sha512").exists());
    assert!(!dir.path().join("tool.bash.asc").exists());
}

#[cfg(unix)]
#[test]
fn test_fake_gpg_produces_detached_signature() {
    let dir = standard_tree();
    write_executable(
        dir.path(),
        "fake-gpg",
        "#!/bin/sh\ntouch \"$3.asc\"\nexit 0\n",
    );

    shellweld(
        dir.path(),
        &["--gpg", "./fake-gpg", "basis/tool-base.bash"],
    )
    .assert_success();

    assert!(dir.path().join("tool.bash.asc").exists());
}

#[cfg(unix)]
#[test]
fn test_failing_gpg_aborts_the_run() {
    let dir = standard_tree();
    write_executable(
        dir.path(),
        "fake-gpg",
        "#!/bin/sh\necho 'no secret key' >&2\nexit 9\n",
    );

    shellweld(
        dir.path(),
        &["--gpg", "./fake-gpg", "basis/tool-base.bash"],
    )
    .assert_failure()
    .assert_stderr_contains("status 9")
    .assert_stderr_contains("no secret key");
}

// ==================== JSON output ====================

#[test]
fn test_json_summary_shape() {
    let dir = standard_tree();
    let result = shellweld(dir.path(), &["--json", "--no-sign", "basis/tool-base.bash"]);
    result.assert_success();

    let value: serde_json::Value =
        serde_json::from_str(&result.stdout).expect("stdout should be valid JSON");
    assert_eq!(value["ok"], true);

    let artifact = &value["artifacts"][0];
    assert_eq!(artifact["source"], "basis/tool-base.bash");
    assert_eq!(artifact["dest"], "tool.bash");
    assert_eq!(artifact["description"], "sample tool");
    assert_eq!(
        artifact["sha512"].as_str().map(str::len),
        Some(128),
        "sha512 should be 128 hex characters"
    );
    assert!(
        artifact.get("signature").is_none(),
        "unsigned runs must omit the signature field"
    );
}

#[test]
fn test_json_failure_envelope() {
    let dir = standard_tree();
    write(
        dir.path(),
        "basis/broken-base.bash",
        "source \"./basis/absent.bash\"\n",
    );
    let result = shellweld(dir.path(), &["--json", "--no-sign", "basis/broken-base.bash"]);
    result.assert_failure();
    assert_eq!(result.exit_code, 1);

    let value: serde_json::Value =
        serde_json::from_str(&result.stdout).expect("stdout should be valid JSON");
    assert_eq!(value["ok"], false);
    assert!(value["error"]
        .as_str()
        .expect("error should be a string")
        .contains("absent.bash"));
}
