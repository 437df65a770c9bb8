//! Full Pipeline Integration Tests
//!
//! Tests the complete flow: Source -> Lexer -> Parser -> AST + symbol
//! tables -> CodeGenerator -> VM command text.

use parser::{CodeGenerator, Parser};

/// Helper to compile Jack source to VM text lines
fn compile(source: &str) -> Vec<String> {
    let class = Parser::new(source).parse().expect("parse failed");
    CodeGenerator::new(&class)
        .generate()
        .expect("generation failed")
        .iter()
        .map(|command| command.to_string())
        .collect()
}

/// Test: a small but complete class exercising fields, a constructor, a
/// method with arguments, array access, and control flow.
#[test]
fn test_full_pipeline_point_class() {
    let source = "\
class Point {
    field int x, y;
    static int count;

    constructor Point new(int ax, int ay) {
        let x = ax;
        let y = ay;
        let count = count + 1;
        return this;
    }

    method int getX() {
        return x;
    }

    method void moveBy(int dx) {
        let x = x + dx;
        return;
    }
}
";
    let commands = compile(source);

    // Constructor allocates two fields, then binds the receiver
    let new_start = commands
        .iter()
        .position(|c| c == "function Point.new 0")
        .unwrap();
    assert_eq!(
        &commands[new_start + 1..new_start + 4],
        ["push constant 2", "call Memory.alloc 1", "pop pointer 0"]
    );

    // Constructor arguments are numbered from zero
    assert!(commands.contains(&"push argument 0".to_string()));
    // Fields are written through the this segment
    assert!(commands.contains(&"pop this 0".to_string()));
    assert!(commands.contains(&"pop this 1".to_string()));
    // Statics use the static segment
    assert!(commands.contains(&"pop static 0".to_string()));

    // Methods bind argument 0 as the receiver before their body
    let get_x = commands
        .iter()
        .position(|c| c == "function Point.getX 0")
        .unwrap();
    assert_eq!(
        &commands[get_x + 1..get_x + 3],
        ["push argument 0", "pop pointer 0"]
    );

    // A method's first declared parameter lives in argument 1
    let move_by = commands
        .iter()
        .position(|c| c == "function Point.moveBy 0")
        .unwrap();
    let body = &commands[move_by..];
    assert!(body.contains(&"push argument 1".to_string()));
}

/// Test: array reads and writes address through pointer 1 / that 0
#[test]
fn test_full_pipeline_array_round_trip() {
    let commands = compile(
        "class T { function void f(Array a) { let a[1] = a[0] + 2; return; } }",
    );
    assert_eq!(
        &commands[1..],
        [
            "push argument 0",
            "push constant 1",
            "add",
            "pop pointer 1",
            "push argument 0",
            "push constant 0",
            "add",
            "pop pointer 1",
            "push that 0",
            "push constant 2",
            "add",
            "pop that 0",
            "return",
        ]
    );
}

/// Test: an unqualified call resolves to the enclosing class and passes
/// the current receiver
#[test]
fn test_full_pipeline_unqualified_call() {
    let commands = compile(
        "class T { \
            method void a() { do b(1, 2); return; } \
            method void b(int p, int q) { return; } }",
    );
    assert!(commands.contains(&"call T.b 3".to_string()));
    // The receiver is pushed before the arguments
    let receiver = commands.iter().position(|c| c == "push pointer 0").unwrap();
    let call = commands.iter().position(|c| c == "call T.b 3").unwrap();
    assert!(receiver < call);
}

/// Test: a qualified call on a variable becomes an instance call on the
/// variable's declared type
#[test]
fn test_full_pipeline_instance_call() {
    let commands = compile(
        "class T { function void f() { var Point p; do p.draw(); return; } }",
    );
    assert_eq!(&commands[1..3], ["push local 0", "call Point.draw 1"]);
}

/// Test: nested control flow keeps every label unique within the function
#[test]
fn test_full_pipeline_loop_labels() {
    let commands = compile(
        "class T { function void f() { \
            var int i; \
            let i = 0; \
            while (i < 10) { \
                if (i > 5) { let i = i + 2; } else { let i = i + 1; } \
            } \
            return; } }",
    );
    let labels: Vec<&String> = commands.iter().filter(|c| c.starts_with("label ")).collect();
    assert_eq!(
        labels,
        [
            "label f-0-begin",
            "label f-0-true",
            "label f-1-true",
            "label f-1-end",
            "label f-0-end",
        ]
    );
}

/// Test: compilation output is deterministic
#[test]
fn test_full_pipeline_is_deterministic() {
    let source = "class T { field int a, b; method int f(int n) { return a + n; } }";
    assert_eq!(compile(source), compile(source));
}
