//! End-to-end pipeline tests against a scripted fake toolchain.
//!
//! The fake compiler copies the test source to the assembly path (the test
//! files are themselves shell scripts), the fake assembler copies it onward,
//! and the fake linker marks it executable. Running the "binary" therefore
//! runs the original script, which lets each test file decide its own exit
//! code and stdout.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use heliumt::cli::output::Reporter;
use heliumt::config::SuiteConfig;
use heliumt::pipeline::{self, FailureKind};
use heliumt::suite;

fn write_script(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

/// Builds a fake toolchain inside `dir` and returns a config pointing at it.
/// The assembler records each invocation by touching `assembler.ran`.
fn fake_toolchain(dir: &Path) -> SuiteConfig {
    let compiler = dir.join("heliumc");
    let assembler = dir.join("asm");
    let linker = dir.join("link");
    let marker = dir.join("assembler.ran");

    write_script(
        &compiler,
        "#!/bin/sh\n\
         # usage: heliumc -o <asm> <src>\n\
         if grep -q COMPILE_FAIL \"$3\"; then\n\
         \techo \"syntax error in $3\" >&2\n\
         \texit 1\n\
         fi\n\
         cp \"$3\" \"$2\"\n",
    );
    write_script(
        &assembler,
        &format!(
            "#!/bin/sh\n\
             # usage: asm -f <fmt> <asm> -o <obj>\n\
             touch \"{}\"\n\
             cp \"$3\" \"$5\"\n",
            marker.display()
        ),
    );
    write_script(
        &linker,
        "#!/bin/sh\n\
         # usage: link <obj> -o <exe>\n\
         cp \"$1\" \"$3\"\n\
         chmod +x \"$3\"\n",
    );

    let test_dir = dir.join("suite");
    fs::create_dir(&test_dir).unwrap();

    SuiteConfig {
        compiler,
        test_dir,
        extension: "he".to_string(),
        assembler: assembler.display().to_string(),
        object_format: "elf64".to_string(),
        linker: linker.display().to_string(),
        use_colors: false,
    }
}

fn write_case(cfg: &SuiteConfig, name: &str, body: &str) -> PathBuf {
    let path = cfg.test_dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn exit_code_only_case_ignores_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = fake_toolchain(dir.path());
    let case = write_case(
        &cfg,
        "exit3.he",
        "#!/bin/sh\n# expect-exit: 3\necho whatever noise\nexit 3\n",
    );

    let outcome = pipeline::run_case(&cfg, &case);
    assert!(outcome.passed, "failure: {:?}", outcome.failure);
}

#[test]
fn matching_output_passes() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = fake_toolchain(dir.path());
    let case = write_case(&cfg, "hello.he", "#!/bin/sh\n# expect-out: hello\necho hello\n");

    let outcome = pipeline::run_case(&cfg, &case);
    assert!(outcome.passed, "failure: {:?}", outcome.failure);
}

#[test]
fn extra_output_is_a_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = fake_toolchain(dir.path());
    let case = write_case(
        &cfg,
        "hello.he",
        "#!/bin/sh\n# expect-out: hello\necho hello world\n",
    );

    let outcome = pipeline::run_case(&cfg, &case);
    assert!(!outcome.passed);
    assert_eq!(outcome.failure.unwrap().kind, FailureKind::Output);
}

#[test]
fn multiline_output_concatenates_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = fake_toolchain(dir.path());
    let case = write_case(
        &cfg,
        "multi.he",
        "#!/bin/sh\n# expect-out: one\n# expect-out: two\necho one\necho two\n",
    );

    let outcome = pipeline::run_case(&cfg, &case);
    assert!(outcome.passed, "failure: {:?}", outcome.failure);
}

#[test]
fn compile_failure_never_reaches_the_assembler() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = fake_toolchain(dir.path());
    let case = write_case(&cfg, "bad.he", "#!/bin/sh\n# COMPILE_FAIL\nexit 0\n");

    let outcome = pipeline::run_case(&cfg, &case);
    assert!(!outcome.passed);
    assert_eq!(outcome.failure.unwrap().kind, FailureKind::Compile);
    assert!(
        !dir.path().join("assembler.ran").exists(),
        "assembler was invoked after a compile failure"
    );
}

#[test]
fn wrong_exit_code_is_reported_as_such() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = fake_toolchain(dir.path());
    let case = write_case(&cfg, "exit.he", "#!/bin/sh\n# expect-exit: 2\nexit 5\n");

    let outcome = pipeline::run_case(&cfg, &case);
    assert!(!outcome.passed);
    assert_eq!(outcome.failure.unwrap().kind, FailureKind::ExitCode);
}

#[test]
fn suite_runs_cases_in_sorted_order_and_tallies() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = fake_toolchain(dir.path());
    write_case(&cfg, "b_fail.he", "#!/bin/sh\n# expect-exit: 1\nexit 0\n");
    write_case(&cfg, "a_pass.he", "#!/bin/sh\nexit 0\n");

    let mut reporter = Reporter::new(false);
    let tally = suite::run_suite(&cfg, &mut reporter).unwrap();
    assert_eq!(tally.total, 2);
    assert_eq!(tally.passed, 1);
    assert!(!tally.all_passed());
}

#[test]
fn missing_test_directory_is_created_and_run_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = fake_toolchain(dir.path());
    cfg.test_dir = dir.path().join("fresh");

    let mut reporter = Reporter::new(false);
    let tally = suite::run_suite(&cfg, &mut reporter).unwrap();
    assert_eq!(tally, suite::SuiteTally::default());
    assert!(cfg.test_dir.is_dir());
}

#[test]
fn empty_suite_passes() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = fake_toolchain(dir.path());

    let mut reporter = Reporter::new(false);
    let tally = suite::run_suite(&cfg, &mut reporter).unwrap();
    assert_eq!(tally.total, 0);
    assert!(tally.all_passed());
}

#[test]
fn missing_compiler_aborts_before_any_case() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = fake_toolchain(dir.path());
    cfg.compiler = dir.path().join("not-built-yet");
    write_case(&cfg, "any.he", "#!/bin/sh\nexit 0\n");

    let mut reporter = Reporter::new(false);
    let err = suite::run_suite(&cfg, &mut reporter).unwrap_err();
    assert!(matches!(err, heliumt::HarnessError::MissingCompiler(_)));
}
