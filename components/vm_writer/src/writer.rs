//! Ordered VM command buffer with emission helpers.

use crate::command::{Command, Segment};

/// Collects VM commands in emission order.
///
/// Mirrors the textual VM surface: one method per opcode, plus the two
/// composite lowerings the instruction set has no opcode for (`mul`, `div`)
/// and string-literal construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VmWriter {
    commands: Vec<Command>,
}

impl VmWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// `push SEG IDX`
    pub fn push(&mut self, segment: Segment, index: usize) {
        self.commands.push(Command::Push(segment, index));
    }

    /// `pop SEG IDX`
    pub fn pop(&mut self, segment: Segment, index: usize) {
        self.commands.push(Command::Pop(segment, index));
    }

    /// `add`
    pub fn add(&mut self) {
        self.commands.push(Command::Add);
    }

    /// `sub`
    pub fn sub(&mut self) {
        self.commands.push(Command::Sub);
    }

    /// `neg`
    pub fn neg(&mut self) {
        self.commands.push(Command::Neg);
    }

    /// `eq`
    pub fn eq(&mut self) {
        self.commands.push(Command::Eq);
    }

    /// `gt`
    pub fn gt(&mut self) {
        self.commands.push(Command::Gt);
    }

    /// `lt`
    pub fn lt(&mut self) {
        self.commands.push(Command::Lt);
    }

    /// `and`
    pub fn and(&mut self) {
        self.commands.push(Command::And);
    }

    /// `or`
    pub fn or(&mut self) {
        self.commands.push(Command::Or);
    }

    /// `not`
    pub fn not(&mut self) {
        self.commands.push(Command::Not);
    }

    /// `label NAME`
    pub fn label(&mut self, name: &str) {
        self.commands.push(Command::Label(name.to_string()));
    }

    /// `goto NAME`
    pub fn goto(&mut self, name: &str) {
        self.commands.push(Command::Goto(name.to_string()));
    }

    /// `if-goto NAME`
    pub fn if_goto(&mut self, name: &str) {
        self.commands.push(Command::IfGoto(name.to_string()));
    }

    /// `call NAME NARGS`
    pub fn call(&mut self, name: &str, n_args: usize) {
        self.commands.push(Command::Call(name.to_string(), n_args));
    }

    /// `function NAME NLOCALS`
    pub fn function(&mut self, name: &str, n_locals: usize) {
        self.commands.push(Command::Function(name.to_string(), n_locals));
    }

    /// `return`
    pub fn ret(&mut self) {
        self.commands.push(Command::Return);
    }

    /// Multiplication; the instruction set has no mul opcode.
    pub fn mul(&mut self) {
        self.call("Math.multiply", 2);
    }

    /// Division; the instruction set has no div opcode.
    pub fn div(&mut self) {
        self.call("Math.divide", 2);
    }

    /// Build a string object from a literal.
    ///
    /// Allocates a string sized to the character count, then appends the
    /// characters one call at a time. Surrounding (and any embedded) double
    /// quotes from the raw token text are dropped.
    pub fn new_string(&mut self, literal: &str) {
        let text: String = literal.chars().filter(|c| *c != '"').collect();
        self.push(Segment::Constant, text.chars().count());
        self.call("String.new", 1);
        for c in text.chars() {
            self.push(Segment::Constant, c as usize);
            self.call("String.appendChar", 2);
        }
    }

    /// The commands emitted so far, in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Consume the writer, returning the ordered command list.
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    /// Render the full output text, one instruction per line.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for command in &self.commands {
            text.push_str(&command.to_string());
            text.push('\n');
        }
        text
    }
}
