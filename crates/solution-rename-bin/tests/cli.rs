use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn solution_rename(root: &Path, input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_solution-rename"))
        .args(["Contoso", "Fabrikam"])
        .arg(root)
        .arg("--quiet")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn sample_solution(root: &Path) {
    fs::create_dir(root.join("Contoso.Web")).unwrap();
    fs::write(root.join("Contoso.sln"), "Contoso.Web").unwrap();
    fs::write(root.join("Contoso.Web/Program.cs"), "namespace Contoso.Web;").unwrap();
}

fn assert_untouched(root: &Path) {
    assert_eq!(fs::read_to_string(root.join("Contoso.sln")).unwrap(), "Contoso.Web");
    assert_eq!(
        fs::read_to_string(root.join("Contoso.Web/Program.cs")).unwrap(),
        "namespace Contoso.Web;"
    );
    assert!(!root.join("Fabrikam.sln").exists());
    assert!(!root.join("Fabrikam.Web").exists());
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_confirm_renames_solution() {
    let dir = TempDir::new().unwrap();
    sample_solution(dir.path());

    let output = solution_rename(dir.path(), "Y\n");

    assert!(output.status.success());
    assert!(stdout(&output).contains("Solution renamed successfully!"));
    assert_eq!(
        fs::read_to_string(dir.path().join("Fabrikam.Web/Program.cs")).unwrap(),
        "namespace Fabrikam.Web;"
    );
}

#[test]
fn test_decline_aborts_without_changes() {
    for input in ["n\n", "N\n", "maybe\n", "\n", ""] {
        let dir = TempDir::new().unwrap();
        sample_solution(dir.path());

        let output = solution_rename(dir.path(), input);

        assert!(output.status.success(), "input {:?}", input);
        assert!(stdout(&output).contains("Aborting..."), "input {:?}", input);
        assert!(!stdout(&output).contains("renamed successfully"));
        assert_untouched(dir.path());
    }
}

#[test]
fn test_failure_rolls_back_with_exit_code() {
    let dir = TempDir::new().unwrap();
    sample_solution(dir.path());
    fs::write(dir.path().join("Alpha.txt"), "Contoso").unwrap();
    fs::write(dir.path().join("Fabrikam.sln"), "in the way").unwrap();

    let output = solution_rename(dir.path(), "y\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("renamed successfully"));
    assert!(stderr(&output).contains("Rollback complete"));
    assert_eq!(fs::read_to_string(dir.path().join("Alpha.txt")).unwrap(), "Contoso");
    assert_eq!(fs::read_to_string(dir.path().join("Fabrikam.sln")).unwrap(), "in the way");
    assert_eq!(fs::read_to_string(dir.path().join("Contoso.sln")).unwrap(), "Contoso.Web");
    assert!(dir.path().join("Contoso.Web").is_dir());
}

#[test]
fn test_unsafe_name_is_usage_error() {
    let dir = TempDir::new().unwrap();
    sample_solution(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_solution-rename"))
        .args(["App", "Fabrikam"])
        .arg(dir.path())
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Please specify longer solution names"));
    assert_untouched(dir.path());
}

#[test]
fn test_missing_path_is_usage_error() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_solution-rename"))
        .args(["Contoso", "Fabrikam"])
        .arg(dir.path().join("missing"))
        .stdin(Stdio::null())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Usage"));
}
