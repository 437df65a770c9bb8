//! VM code generation.
//!
//! An independent second pass over a fully parsed class. The AST is never
//! mutated; all generation-only state (the active scope chain and the label
//! counter) lives in a per-subroutine context threaded through the walk.

use crate::ast::*;
use crate::error::semantic_error;
use crate::symbol_table::{ScopeChain, SymbolEntry, SymbolKind};
use core_types::CompileError;
use vm_writer::{Command, Segment, VmWriter};

/// Generates the VM commands for one parsed class.
pub struct CodeGenerator<'a> {
    class: &'a ClassDec,
    writer: VmWriter,
}

/// Generation state for the subroutine currently being visited.
struct SubroutineContext<'a> {
    /// Active resolution chain: subroutine scope over class scope
    scope: ScopeChain<'a>,
    /// Label name prefix, the subroutine name
    label_scope: &'a str,
    /// Monotonic counter; never reused within the subroutine
    next_label: u32,
}

impl SubroutineContext<'_> {
    fn next_counter(&mut self) -> u32 {
        let n = self.next_label;
        self.next_label += 1;
        n
    }
}

impl<'a> CodeGenerator<'a> {
    /// Create a generator for the given class.
    pub fn new(class: &'a ClassDec) -> Self {
        Self {
            class,
            writer: VmWriter::new(),
        }
    }

    /// Emit the whole class, returning the ordered command list.
    pub fn generate(mut self) -> Result<Vec<Command>, CompileError> {
        let class = self.class;
        for subroutine in &class.subroutines {
            self.generate_subroutine(subroutine)?;
        }
        Ok(self.writer.into_commands())
    }

    fn generate_subroutine(&mut self, subroutine: &'a SubroutineDec) -> Result<(), CompileError> {
        let mut context = SubroutineContext {
            scope: ScopeChain::with_subroutine(&self.class.table, &subroutine.table),
            label_scope: &subroutine.name,
            next_label: 0,
        };
        self.writer.function(
            &format!("{}.{}", self.class.name, subroutine.name),
            subroutine.table.count(SymbolKind::Local),
        );
        match subroutine.kind {
            SubroutineKind::Constructor => {
                self.writer
                    .push(Segment::Constant, self.class.table.count(SymbolKind::Field));
                self.writer.call("Memory.alloc", 1);
                self.writer.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Method => {
                self.writer.push(Segment::Argument, 0);
                self.writer.pop(Segment::Pointer, 0);
            }
            SubroutineKind::Function => {}
        }
        for statement in &subroutine.statements {
            self.generate_statement(statement, &mut context)?;
        }
        Ok(())
    }

    fn generate_statement(
        &mut self,
        statement: &Statement,
        context: &mut SubroutineContext<'a>,
    ) -> Result<(), CompileError> {
        match statement {
            Statement::Let {
                target,
                index,
                value,
            } => {
                let symbol = resolve(&context.scope, target)?;
                let segment = segment_for(symbol.kind);
                if let Some(index_expression) = index {
                    self.writer.push(segment, symbol.index);
                    self.generate_expression(index_expression, context)?;
                    self.writer.add();
                    self.writer.pop(Segment::Pointer, 1);
                    self.generate_expression(value, context)?;
                    self.writer.pop(Segment::That, 0);
                } else {
                    self.generate_expression(value, context)?;
                    self.writer.pop(segment, symbol.index);
                }
            }
            Statement::If {
                condition,
                then_body,
                else_body,
            } => {
                self.generate_expression(condition, context)?;
                let n = context.next_counter();
                let true_label = format!("{}-{}-true", context.label_scope, n);
                let end_label = format!("{}-{}-end", context.label_scope, n);
                self.writer.if_goto(&true_label);
                for statement in else_body {
                    self.generate_statement(statement, context)?;
                }
                self.writer.goto(&end_label);
                self.writer.label(&true_label);
                for statement in then_body {
                    self.generate_statement(statement, context)?;
                }
                self.writer.label(&end_label);
            }
            Statement::While { condition, body } => {
                let n = context.next_counter();
                let begin_label = format!("{}-{}-begin", context.label_scope, n);
                let true_label = format!("{}-{}-true", context.label_scope, n);
                let end_label = format!("{}-{}-end", context.label_scope, n);
                self.writer.label(&begin_label);
                self.generate_expression(condition, context)?;
                self.writer.if_goto(&true_label);
                self.writer.goto(&end_label);
                self.writer.label(&true_label);
                for statement in body {
                    self.generate_statement(statement, context)?;
                }
                self.writer.goto(&begin_label);
                self.writer.label(&end_label);
            }
            Statement::Do { call } => {
                self.generate_call(call, context)?;
                self.writer.pop(Segment::Temp, 0);
            }
            Statement::Return { value } => {
                if let Some(expression) = value {
                    self.generate_expression(expression, context)?;
                }
                self.writer.ret();
            }
        }
        Ok(())
    }

    /// Post-order: operands left to right, then the operator.
    fn generate_expression(
        &mut self,
        expression: &Expression,
        context: &mut SubroutineContext<'a>,
    ) -> Result<(), CompileError> {
        for term in &expression.operands {
            self.generate_term(term, context)?;
        }
        if let Some(operator) = expression.operator {
            self.generate_operator(operator);
        }
        Ok(())
    }

    fn generate_operator(&mut self, operator: Operator) {
        match operator {
            Operator::Not => self.writer.not(),
            Operator::Neg => self.writer.neg(),
            Operator::Product => self.writer.mul(),
            Operator::Divide => self.writer.div(),
            Operator::Plus => self.writer.add(),
            Operator::Minus => self.writer.sub(),
            Operator::And => self.writer.and(),
            Operator::Or => self.writer.or(),
            Operator::Gt => self.writer.gt(),
            Operator::Lt => self.writer.lt(),
            Operator::Eq => VmWriter::eq(&mut self.writer),
        }
    }

    fn generate_term(
        &mut self,
        term: &Term,
        context: &mut SubroutineContext<'a>,
    ) -> Result<(), CompileError> {
        match term {
            Term::IntegerConstant(text) => {
                let value: usize = text.parse().map_err(|_| {
                    semantic_error(format!("Integer constant {text} is out of range"))
                })?;
                self.writer.push(Segment::Constant, value);
            }
            Term::StringConstant(text) => self.writer.new_string(text),
            Term::KeywordConstant(constant) => match constant {
                KeywordConstant::True => {
                    self.writer.push(Segment::Constant, 0);
                    self.writer.not();
                }
                KeywordConstant::False | KeywordConstant::Null => {
                    self.writer.push(Segment::Constant, 0);
                }
                KeywordConstant::This => self.writer.push(Segment::Pointer, 0),
            },
            Term::Variable(name) => {
                let symbol = resolve(&context.scope, name)?;
                self.writer.push(segment_for(symbol.kind), symbol.index);
            }
            Term::ArrayElement { name, index } => {
                let symbol = resolve(&context.scope, name)?;
                self.writer.push(segment_for(symbol.kind), symbol.index);
                self.generate_expression(index, context)?;
                self.writer.add();
                self.writer.pop(Segment::Pointer, 1);
                self.writer.push(Segment::That, 0);
            }
            Term::Call(call) => self.generate_call(call, context)?,
            Term::Expression(expression) => self.generate_expression(expression, context)?,
        }
        Ok(())
    }

    /// Resolve and emit a call.
    ///
    /// A qualified receiver that resolves in the scope chain is an instance
    /// call: the receiver is pushed first and the callee belongs to the
    /// receiver's declared type. An unresolved receiver is taken literally
    /// as a class name. An unqualified call is a method call on the current
    /// receiver and must name a subroutine of the enclosing class.
    fn generate_call(
        &mut self,
        call: &SubroutineCall,
        context: &mut SubroutineContext<'a>,
    ) -> Result<(), CompileError> {
        let mut n_args = call.arguments.len();
        let owner = match &call.receiver {
            Some(receiver) => match context.scope.resolve(receiver) {
                Some(symbol) => {
                    self.writer.push(segment_for(symbol.kind), symbol.index);
                    n_args += 1;
                    symbol.ty.clone()
                }
                None => receiver.clone(),
            },
            None => {
                let class = self.class;
                if !class
                    .subroutines
                    .iter()
                    .any(|subroutine| subroutine.name == call.callee)
                {
                    return Err(semantic_error(format!(
                        "Unknown subroutine {} called in {}",
                        call.callee, context.label_scope
                    )));
                }
                self.writer.push(Segment::Pointer, 0);
                n_args += 1;
                class.name.clone()
            }
        };
        for argument in &call.arguments {
            self.generate_expression(argument, context)?;
        }
        self.writer.call(&format!("{owner}.{}", call.callee), n_args);
        Ok(())
    }
}

/// Map a symbol's storage class to its VM segment.
fn segment_for(kind: SymbolKind) -> Segment {
    match kind {
        SymbolKind::Static => Segment::Static,
        SymbolKind::Field => Segment::This,
        SymbolKind::Argument => Segment::Argument,
        SymbolKind::Local => Segment::Local,
    }
}

fn resolve<'a>(
    scope: &ScopeChain<'a>,
    name: &str,
) -> Result<&'a SymbolEntry, CompileError> {
    scope.resolve(name).ok_or_else(|| {
        semantic_error(format!(
            "Unknown variable {name} in {}",
            scope.innermost_name()
        ))
    })
}
