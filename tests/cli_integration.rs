//! CLI integration tests for Rigging.
//!
//! These tests drive the binary from `rigging init` through `rigging generate`.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const LINUX_GCC: [&str; 6] = ["--os", "linux", "--compiler", "gcc", "--arch", "x86_64"];

/// Get the rigging binary command with an isolated home.
fn rigging(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rigging").unwrap();
    cmd.env("RIGGING_HOME", home)
        .env_remove("RIGGING_OS")
        .env_remove("RIGGING_COMPILER")
        .env_remove("RIGGING_BUILD_TYPE")
        .env_remove("RIGGING_ARCH")
        .arg("--no-color");
    cmd
}

/// A temp dir with an initialized project under `project/`.
fn init_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("project");
    fs::create_dir_all(&project).unwrap();

    rigging(&tmp.path().join("home"))
        .arg("init")
        .current_dir(&project)
        .assert()
        .success();

    tmp
}

// ============================================================================
// rigging init
// ============================================================================

#[test]
fn test_init_writes_manifest() {
    let tmp = init_project();
    let project = tmp.path().join("project");

    let manifest = fs::read_to_string(project.join("Rigging.toml")).unwrap();
    assert!(manifest.contains("name = \"project\""));
    assert!(manifest.contains("glfw/3.3.8"));
    assert!(manifest.contains("glm/cci.20230113"));
    assert!(!manifest.contains("warnings_as_errors"));

    let gitignore = fs::read_to_string(project.join(".gitignore")).unwrap();
    assert!(gitignore.contains("build/"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let tmp = init_project();

    rigging(&tmp.path().join("home"))
        .arg("init")
        .current_dir(tmp.path().join("project"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    rigging(&tmp.path().join("home"))
        .args(["init", "--force"])
        .current_dir(tmp.path().join("project"))
        .assert()
        .success();
}

// ============================================================================
// rigging requirements
// ============================================================================

#[test]
fn test_requirements_in_declaration_order() {
    let tmp = init_project();

    let output = rigging(&tmp.path().join("home"))
        .arg("requirements")
        .current_dir(tmp.path().join("project"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("glfw/3.3.8"));
    assert!(lines[0].contains("exact"));
    assert!(lines[1].starts_with("glm/cci.20230113"));
}

#[test]
fn test_requirements_json() {
    let tmp = init_project();

    rigging(&tmp.path().join("home"))
        .args(["requirements", "--json"])
        .current_dir(tmp.path().join("project"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ref\": \"glfw/3.3.8\""));
}

#[test]
fn test_duplicate_pin_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("Rigging.toml"),
        "requires = [\"glfw/3.3.8\", \"glfw/3.4\"]\n\n[package]\nname = \"dup\"\n",
    )
    .unwrap();

    rigging(&tmp.path().join("home"))
        .arg("requirements")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("declared more than once"));
}

#[test]
fn test_missing_manifest() {
    let tmp = TempDir::new().unwrap();

    rigging(&tmp.path().join("home"))
        .arg("requirements")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rigging.toml"));
}

// ============================================================================
// rigging flags
// ============================================================================

#[test]
fn test_flags_are_curated_and_ordered() {
    let tmp = init_project();

    let output = rigging(&tmp.path().join("home"))
        .arg("flags")
        .args(LINUX_GCC)
        .current_dir(tmp.path().join("project"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 14);
    assert!(lines[0].starts_with("-Wall "));
    assert!(lines[13].starts_with("-Wimplicit-fallthrough "));
    assert!(lines.iter().all(|l| l.ends_with("(warning)")));
}

#[test]
fn test_flags_warnings_as_errors_only_changes_severity() {
    let tmp = init_project();

    let output = rigging(&tmp.path().join("home"))
        .args(["flags", "--warnings-as-errors"])
        .args(LINUX_GCC)
        .current_dir(tmp.path().join("project"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 14);
    assert!(lines[0].starts_with("-Wall "));
    assert!(lines.iter().all(|l| l.ends_with("(error)")));
}

#[test]
fn test_unknown_compiler() {
    let tmp = init_project();

    rigging(&tmp.path().join("home"))
        .args(["flags", "--os", "linux", "--compiler", "icc"])
        .current_dir(tmp.path().join("project"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown compiler `icc`"));
}

// ============================================================================
// rigging layout / settings
// ============================================================================

#[test]
fn test_layout_release() {
    let tmp = init_project();

    rigging(&tmp.path().join("home"))
        .args(["layout", "--release"])
        .args(LINUX_GCC)
        .current_dir(tmp.path().join("project"))
        .assert()
        .success()
        .stdout(predicate::str::contains("build/Release/generators"))
        .stdout(predicate::str::contains("source"));
}

#[test]
fn test_layout_multi_config_generator() {
    let tmp = init_project();

    rigging(&tmp.path().join("home"))
        .args(["layout", "--json", "--release", "-G", "Ninja Multi-Config"])
        .args(LINUX_GCC)
        .current_dir(tmp.path().join("project"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"generators\": \"build/generators\""));
}

#[test]
fn test_settings_sources() {
    let tmp = init_project();
    let config_dir = tmp.path().join("project").join(".rigging");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[settings]\nbuild_type = \"RelWithDebInfo\"\n",
    )
    .unwrap();

    rigging(&tmp.path().join("home"))
        .arg("settings")
        .args(LINUX_GCC)
        .current_dir(tmp.path().join("project"))
        .assert()
        .success()
        .stdout(predicate::str::contains("RelWithDebInfo"))
        .stdout(predicate::str::contains("# config"))
        .stdout(predicate::str::contains("# command line"));
}

#[test]
fn test_settings_reports_generator() {
    let tmp = init_project();

    rigging(&tmp.path().join("home"))
        .args(["settings", "-G", "Ninja"])
        .args(LINUX_GCC)
        .current_dir(tmp.path().join("project"))
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"generator\s+Ninja\s+# command line").unwrap());

    rigging(&tmp.path().join("home"))
        .arg("settings")
        .args(LINUX_GCC)
        .current_dir(tmp.path().join("project"))
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"generator\s+Unix Makefiles\s+# detected").unwrap());
}

// ============================================================================
// rigging generate
// ============================================================================

#[test]
fn test_generate_writes_artifacts() {
    let tmp = init_project();
    let project = tmp.path().join("project");

    rigging(&tmp.path().join("home"))
        .args(["generate", "--build-type", "Release"])
        .args(LINUX_GCC)
        .current_dir(&project)
        .assert()
        .success();

    let generators = project.join("build").join("Release").join("generators");
    let toolchain = fs::read_to_string(generators.join("rigging_toolchain.cmake")).unwrap();
    assert!(toolchain.contains("-Wall"));
    assert!(toolchain.contains("-Wimplicit-fallthrough"));
    assert!(toolchain.contains("CMAKE_COMPILE_WARNING_AS_ERROR OFF"));
    assert!(generators.join("CMakePresets.json").is_file());

    let user_presets = fs::read_to_string(project.join("CMakeUserPresets.json")).unwrap();
    assert!(user_presets.contains("build/Release/generators/CMakePresets.json"));

    let requirements = fs::read_to_string(generators.join("rigging_requirements.json")).unwrap();
    let glfw = requirements.find("glfw/3.3.8").unwrap();
    let glm = requirements.find("glm/cci.20230113").unwrap();
    assert!(glfw < glm);
}

#[test]
fn test_generate_warnings_as_errors() {
    let tmp = init_project();
    let project = tmp.path().join("project");

    rigging(&tmp.path().join("home"))
        .args(["generate", "--release", "--warnings-as-errors"])
        .args(LINUX_GCC)
        .current_dir(&project)
        .assert()
        .success();

    let toolchain = fs::read_to_string(
        project
            .join("build")
            .join("Release")
            .join("generators")
            .join("rigging_toolchain.cmake"),
    )
    .unwrap();
    assert!(toolchain.contains("CMAKE_COMPILE_WARNING_AS_ERROR ON"));
}

#[test]
fn test_generate_config_warnings_as_errors() {
    let tmp = init_project();
    let project = tmp.path().join("project");
    fs::create_dir_all(project.join(".rigging")).unwrap();
    fs::write(
        project.join(".rigging").join("config.toml"),
        "[toolchain]\nwarnings_as_errors = true\n",
    )
    .unwrap();

    rigging(&tmp.path().join("home"))
        .args(["generate", "--release"])
        .args(LINUX_GCC)
        .current_dir(&project)
        .assert()
        .success();

    let toolchain = fs::read_to_string(
        project
            .join("build")
            .join("Release")
            .join("generators")
            .join("rigging_toolchain.cmake"),
    )
    .unwrap();
    assert!(toolchain.contains("CMAKE_COMPILE_WARNING_AS_ERROR ON"));
}

#[test]
fn test_completions() {
    let tmp = TempDir::new().unwrap();

    rigging(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rigging"));
}
