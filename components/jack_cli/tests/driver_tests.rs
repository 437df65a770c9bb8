//! Driver tests over real files
//!
//! Write .jack sources into a temp directory, run the driver, and read the
//! .vm (and .xml) outputs back.

use jack_cli::{CliError, Driver};
use std::fs;

const MAIN_JACK: &str = "\
class Main {
    function void main() {
        do Output.printString(\"x\");
        return;
    }
}
";

#[test]
fn driver_writes_sibling_vm_file() {
    let dir = tempfile::tempdir().unwrap();
    let jack_path = dir.path().join("Main.jack");
    fs::write(&jack_path, MAIN_JACK).unwrap();

    Driver::new()
        .run(&[jack_path.to_string_lossy().into_owned()])
        .unwrap();

    let vm_text = fs::read_to_string(dir.path().join("Main.vm")).unwrap();
    assert_eq!(
        vm_text,
        "function Main.main 0\n\
         push constant 1\n\
         call String.new 1\n\
         push constant 120\n\
         call String.appendChar 2\n\
         call Output.printString 1\n\
         pop temp 0\n\
         return\n"
    );
}

#[test]
fn driver_compiles_whole_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Main.jack"), MAIN_JACK).unwrap();
    fs::write(
        dir.path().join("Util.jack"),
        "class Util { function int one() { return 1; } }",
    )
    .unwrap();
    fs::write(dir.path().join("README.txt"), "not a source file").unwrap();

    Driver::new()
        .run(&[dir.path().to_string_lossy().into_owned()])
        .unwrap();

    assert!(dir.path().join("Main.vm").is_file());
    assert!(dir.path().join("Util.vm").is_file());
    assert!(!dir.path().join("README.vm").exists());
}

#[test]
fn driver_emits_xml_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let jack_path = dir.path().join("Main.jack");
    fs::write(&jack_path, MAIN_JACK).unwrap();

    Driver::new()
        .with_xml(true)
        .run(&[jack_path.to_string_lossy().into_owned()])
        .unwrap();

    let xml_text = fs::read_to_string(dir.path().join("Main.xml")).unwrap();
    assert!(xml_text.contains("<class>"));
    assert!(xml_text.contains("<doStatement>"));
}

#[test]
fn driver_stops_on_first_failing_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Bad.jack"), "class Bad { function }").unwrap();
    fs::write(dir.path().join("Good.jack"), MAIN_JACK).unwrap();

    // Directory order is sorted, so Bad.jack is attempted first
    let err = Driver::new()
        .run(&[dir.path().to_string_lossy().into_owned()])
        .unwrap_err();

    assert!(matches!(err, CliError::CompileError(_)));
    assert!(!dir.path().join("Good.vm").exists());
}

#[test]
fn driver_reports_usage_without_inputs() {
    let err = Driver::new().run(&[]).unwrap_err();
    assert!(matches!(err, CliError::UsageError(_)));
}

#[test]
fn driver_reports_missing_file_as_io_error() {
    let err = Driver::new()
        .run(&["DoesNotExist.jack".to_string()])
        .unwrap_err();
    assert!(matches!(err, CliError::IoError(_)));
}
