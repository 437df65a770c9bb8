//! End-to-end CLI tests
//!
//! Drive the Driver exactly as the jackc binary does, over real files in a
//! temp directory.

use jack_cli::{CliError, Driver};
use std::fs;

#[test]
fn test_e2e_single_file_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Main.jack");
    fs::write(
        &path,
        "class Main { function void main() { do Output.printString(\"x\"); return; } }",
    )
    .unwrap();

    Driver::new()
        .run(&[path.to_string_lossy().into_owned()])
        .unwrap();

    let vm_text = fs::read_to_string(dir.path().join("Main.vm")).unwrap();
    let lines: Vec<&str> = vm_text.lines().collect();
    assert_eq!(
        lines,
        [
            "function Main.main 0",
            "push constant 1",
            "call String.new 1",
            "push constant 120",
            "call String.appendChar 2",
            "call Output.printString 1",
            "pop temp 0",
            "return",
        ]
    );
}

#[test]
fn test_e2e_directory_discovers_non_recursively() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("A.jack"),
        "class A { function void f() { return; } }",
    )
    .unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(
        nested.join("B.jack"),
        "class B { function void f() { return; } }",
    )
    .unwrap();

    Driver::new()
        .run(&[dir.path().to_string_lossy().into_owned()])
        .unwrap();

    assert!(dir.path().join("A.vm").is_file());
    assert!(!nested.join("B.vm").exists());
}

#[test]
fn test_e2e_files_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    // Both classes declare a subroutine named f and a symbol named x;
    // per-file tables must not leak between compilations
    fs::write(
        dir.path().join("A.jack"),
        "class A { field int x; method void f() { let x = 1; return; } }",
    )
    .unwrap();
    fs::write(
        dir.path().join("B.jack"),
        "class B { static int x; function void f() { let x = 2; return; } }",
    )
    .unwrap();

    Driver::new()
        .run(&[dir.path().to_string_lossy().into_owned()])
        .unwrap();

    let a_text = fs::read_to_string(dir.path().join("A.vm")).unwrap();
    let b_text = fs::read_to_string(dir.path().join("B.vm")).unwrap();
    assert!(a_text.contains("function A.f 0"));
    assert!(a_text.contains("pop this 0"));
    assert!(b_text.contains("function B.f 0"));
    assert!(b_text.contains("pop static 0"));
}

#[test]
fn test_e2e_compile_error_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.jack"), "class A { let }").unwrap();
    fs::write(
        dir.path().join("B.jack"),
        "class B { function void f() { return; } }",
    )
    .unwrap();

    let err = Driver::new()
        .run(&[dir.path().to_string_lossy().into_owned()])
        .unwrap_err();

    assert!(matches!(err, CliError::CompileError(_)));
    assert!(!dir.path().join("B.vm").exists());
}
