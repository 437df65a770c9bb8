//! Recursive descent parser for Jack classes.
//!
//! The parser pulls tokens on demand from the lexer, builds the AST, and
//! defines symbols into the class and subroutine tables as declarations are
//! encountered. Every decision is made on one token of lookahead; there is
//! no backtracking.

use crate::ast::*;
use crate::error::{semantic_error, syntax_error, unexpected_eof};
use crate::lexer::Lexer;
use crate::symbol_table::{SymbolKind, SymbolTable, TableKind};
use crate::token::{Token, TokenCategory};
use core_types::CompileError;

/// Operator-stack slot of the expression sub-parser.
#[derive(Debug, Clone, Copy)]
enum StackOp {
    /// A `(` acting as a reduction barrier
    Barrier,
    /// A pending operator
    Op(Operator),
}

/// Jack parser over a single source text.
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    /// Create a new parser for the given source code.
    pub fn new(source: &str) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    /// Parse a complete class declaration.
    pub fn parse(&mut self) -> Result<ClassDec, CompileError> {
        self.expect_keyword("class")?;
        let name = self.expect_identifier()?;
        let mut table = SymbolTable::new(&name, TableKind::Class);
        self.expect_mark("{")?;
        let mut var_decs = Vec::new();
        while self.peek_is_class_var_keyword()? {
            var_decs.push(self.parse_class_var_dec(&mut table)?);
        }
        let mut subroutines = Vec::new();
        while self.peek_is_subroutine_keyword()? {
            subroutines.push(self.parse_subroutine_dec()?);
        }
        self.expect_mark("}")?;
        Ok(ClassDec {
            name,
            var_decs,
            subroutines,
            table,
        })
    }

    fn parse_class_var_dec(
        &mut self,
        table: &mut SymbolTable,
    ) -> Result<ClassVarDec, CompileError> {
        let kind_text = self.expect_keyword_in(&["static", "field"], "static|field")?;
        let kind = if kind_text == "static" {
            SymbolKind::Static
        } else {
            SymbolKind::Field
        };
        let ty = self.expect_type()?;
        let mut names = vec![self.expect_identifier()?];
        while self.peek_is_mark(",")? {
            self.expect_mark(",")?;
            names.push(self.expect_identifier()?);
        }
        self.expect_mark(";")?;
        for name in &names {
            table.define(name, kind, &ty)?;
        }
        Ok(ClassVarDec { kind, ty, names })
    }

    fn parse_subroutine_dec(&mut self) -> Result<SubroutineDec, CompileError> {
        let kind_text = self.expect_keyword_in(
            &["constructor", "function", "method"],
            "constructor|function|method",
        )?;
        let (kind, table_kind) = match kind_text.as_str() {
            "constructor" => (SubroutineKind::Constructor, TableKind::Constructor),
            "method" => (SubroutineKind::Method, TableKind::Method),
            _ => (SubroutineKind::Function, TableKind::Function),
        };
        let return_type = self.expect_return_type()?;
        let name = self.expect_identifier()?;
        let mut table = SymbolTable::new(&name, table_kind);
        self.expect_mark("(")?;
        let parameters = self.parse_parameter_list(&mut table)?;
        self.expect_mark(")")?;
        self.expect_mark("{")?;
        let mut locals = Vec::new();
        while self.peek_is_keyword("var")? {
            locals.push(self.parse_var_dec(&mut table)?);
        }
        let statements = self.parse_statements()?;
        self.expect_mark("}")?;
        Ok(SubroutineDec {
            kind,
            return_type,
            name,
            parameters,
            locals,
            statements,
            table,
        })
    }

    fn parse_parameter_list(
        &mut self,
        table: &mut SymbolTable,
    ) -> Result<Vec<Parameter>, CompileError> {
        let mut parameters = Vec::new();
        if !self.peek_is_type()? {
            return Ok(parameters);
        }
        loop {
            let ty = self.expect_type()?;
            let name = self.expect_identifier()?;
            table.define(&name, SymbolKind::Argument, &ty)?;
            parameters.push(Parameter { ty, name });
            if !self.peek_is_mark(",")? {
                break;
            }
            self.expect_mark(",")?;
        }
        Ok(parameters)
    }

    fn parse_var_dec(&mut self, table: &mut SymbolTable) -> Result<VarDec, CompileError> {
        self.expect_keyword("var")?;
        let ty = self.expect_type()?;
        let mut names = vec![self.expect_identifier()?];
        while self.peek_is_mark(",")? {
            self.expect_mark(",")?;
            names.push(self.expect_identifier()?);
        }
        self.expect_mark(";")?;
        for name in &names {
            table.define(name, SymbolKind::Local, &ty)?;
        }
        Ok(VarDec { ty, names })
    }

    fn parse_statements(&mut self) -> Result<Vec<Statement>, CompileError> {
        let mut statements = Vec::new();
        while self.peek_is_statement_keyword()? {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    /// Dispatch on the statement keyword directly; no lookup table needed.
    fn parse_statement(&mut self) -> Result<Statement, CompileError> {
        let (keyword, line) = {
            let token = self.peek("a statement")?;
            (token.text.clone(), token.line)
        };
        match keyword.as_str() {
            "let" => self.parse_let_statement(),
            "if" => self.parse_if_statement(),
            "while" => self.parse_while_statement(),
            "do" => self.parse_do_statement(),
            "return" => self.parse_return_statement(),
            _ => Err(syntax_error(
                format!("A statement is expected but {keyword} is given in {line}"),
                Some(line),
            )),
        }
    }

    fn parse_let_statement(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword("let")?;
        let target = self.expect_identifier()?;
        let index = if self.peek_is_mark("[")? {
            self.expect_mark("[")?;
            let expression = self.parse_expression(Self::grouped_end("[", "]"))?;
            self.expect_mark("]")?;
            Some(expression)
        } else {
            None
        };
        self.expect_mark("=")?;
        let value = self.parse_expression(Self::statement_end())?;
        self.expect_mark(";")?;
        Ok(Statement::Let {
            target,
            index,
            value,
        })
    }

    fn parse_if_statement(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword("if")?;
        self.expect_mark("(")?;
        let condition = self.parse_expression(Self::grouped_end("(", ")"))?;
        self.expect_mark(")")?;
        self.expect_mark("{")?;
        let then_body = self.parse_statements()?;
        self.expect_mark("}")?;
        let else_body = if self.peek_is_keyword("else")? {
            self.expect_keyword("else")?;
            self.expect_mark("{")?;
            let body = self.parse_statements()?;
            self.expect_mark("}")?;
            body
        } else {
            Vec::new()
        };
        Ok(Statement::If {
            condition,
            then_body,
            else_body,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword("while")?;
        self.expect_mark("(")?;
        let condition = self.parse_expression(Self::grouped_end("(", ")"))?;
        self.expect_mark(")")?;
        self.expect_mark("{")?;
        let body = self.parse_statements()?;
        self.expect_mark("}")?;
        Ok(Statement::While { condition, body })
    }

    fn parse_do_statement(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword("do")?;
        let first = self.expect_identifier()?;
        let call = self.parse_call(first)?;
        self.expect_mark(";")?;
        Ok(Statement::Do { call })
    }

    fn parse_return_statement(&mut self) -> Result<Statement, CompileError> {
        self.expect_keyword("return")?;
        let value = if self.peek_is_mark(";")? {
            None
        } else {
            Some(self.parse_expression(Self::statement_end())?)
        };
        self.expect_mark(";")?;
        Ok(Statement::Return { value })
    }

    /// Parse a call whose leading identifier has already been consumed.
    ///
    /// Handles both `callee(args)` and `receiver.callee(args)`. A qualified
    /// name not followed by `(` is a semantic error.
    fn parse_call(&mut self, first: String) -> Result<SubroutineCall, CompileError> {
        let (receiver, callee) = if self.peek_is_mark(".")? {
            self.expect_mark(".")?;
            let callee = self.expect_identifier()?;
            if !self.peek_is_mark("(")? {
                return Err(semantic_error(format!(
                    "A pair of () are required after {first}.{callee}"
                )));
            }
            (Some(first), callee)
        } else {
            (None, first)
        };
        let arguments = self.parse_expression_list()?;
        Ok(SubroutineCall {
            receiver,
            callee,
            arguments,
        })
    }

    /// Parse a parenthesized, comma-separated expression list, consuming
    /// both the opening and closing parenthesis.
    fn parse_expression_list(&mut self) -> Result<Vec<Expression>, CompileError> {
        self.expect_mark("(")?;
        let mut expressions = Vec::new();
        if self.peek_is_mark(")")? {
            self.expect_mark(")")?;
            return Ok(expressions);
        }
        loop {
            expressions.push(self.parse_expression(Self::argument_end())?);
            if self.peek_is_mark(",")? {
                self.expect_mark(",")?;
            } else {
                self.expect_mark(")")?;
                break;
            }
        }
        Ok(expressions)
    }

    /// Operator-precedence expression parser (shunting-yard).
    ///
    /// Consumes tokens until `end` matches the lookahead token, which is
    /// left unconsumed for the caller. `(` is pushed as a barrier; `)` pops
    /// and reduces down to its barrier. Any other operator pops while its
    /// precedence does not strictly exceed the stack top's, then pushes.
    fn parse_expression<F>(&mut self, mut end: F) -> Result<Expression, CompileError>
    where
        F: FnMut(&Token) -> bool,
    {
        let mut operands: Vec<Term> = Vec::new();
        let mut operators: Vec<StackOp> = Vec::new();
        let mut last_was_operand = false;
        let mut line = 0;

        loop {
            {
                let token = self.peek("an expression")?;
                if end(token) {
                    break;
                }
            }
            let token = self.next("an expression")?;
            line = token.line;
            match token.category {
                TokenCategory::IntegerConstant => {
                    operands.push(Term::IntegerConstant(token.text));
                    last_was_operand = true;
                }
                TokenCategory::StringConstant => {
                    operands.push(Term::StringConstant(token.text));
                    last_was_operand = true;
                }
                TokenCategory::Keyword => {
                    let constant = match token.text.as_str() {
                        "true" => KeywordConstant::True,
                        "false" => KeywordConstant::False,
                        "null" => KeywordConstant::Null,
                        "this" => KeywordConstant::This,
                        _ => {
                            return Err(syntax_error(
                                format!(
                                    "A term is expected but {} is given in {}",
                                    token.text, token.line
                                ),
                                Some(token.line),
                            ))
                        }
                    };
                    operands.push(Term::KeywordConstant(constant));
                    last_was_operand = true;
                }
                TokenCategory::Identifier => {
                    let term = if self.peek_is_mark("[")? {
                        self.expect_mark("[")?;
                        let index = self.parse_expression(Self::grouped_end("[", "]"))?;
                        self.expect_mark("]")?;
                        Term::ArrayElement {
                            name: token.text,
                            index: Box::new(index),
                        }
                    } else if self.peek_is_mark("(")? || self.peek_is_mark(".")? {
                        Term::Call(self.parse_call(token.text)?)
                    } else {
                        Term::Variable(token.text)
                    };
                    operands.push(term);
                    last_was_operand = true;
                }
                TokenCategory::Mark => match token.text.as_str() {
                    "(" => {
                        operators.push(StackOp::Barrier);
                        last_was_operand = false;
                    }
                    ")" => {
                        loop {
                            match operators.pop() {
                                Some(StackOp::Barrier) => break,
                                Some(StackOp::Op(op)) => reduce(&mut operands, op, line)?,
                                None => {
                                    return Err(syntax_error(
                                        format!("Unbalanced ) in expression in line {line}"),
                                        Some(line),
                                    ))
                                }
                            }
                        }
                        last_was_operand = true;
                    }
                    text => {
                        let op = Operator::from_mark(text, last_was_operand).ok_or_else(|| {
                            syntax_error(
                                format!("A term or operator is expected but {text} is given in {line}"),
                                Some(line),
                            )
                        })?;
                        while let Some(StackOp::Op(top)) = operators.last().copied() {
                            if op.precedence() > top.precedence() {
                                break;
                            }
                            operators.pop();
                            reduce(&mut operands, top, line)?;
                        }
                        operators.push(StackOp::Op(op));
                        last_was_operand = false;
                    }
                },
            }
        }

        while let Some(top) = operators.pop() {
            match top {
                StackOp::Op(op) => reduce(&mut operands, op, line)?,
                StackOp::Barrier => {
                    return Err(syntax_error(
                        format!("Unbalanced ( in expression in line {line}"),
                        Some(line),
                    ))
                }
            }
        }

        let term = match operands.pop() {
            Some(term) if operands.is_empty() => term,
            _ => {
                return Err(syntax_error(
                    format!("Malformed expression in line {line}"),
                    Some(line),
                ))
            }
        };
        Ok(match term {
            Term::Expression(expression) => *expression,
            other => Expression {
                operator: None,
                operands: vec![other],
            },
        })
    }

    // End predicates. Each is checked against the lookahead token, which
    // stays in the stream for the caller to consume.

    fn statement_end() -> impl FnMut(&Token) -> bool {
        |token| token.text == ";"
    }

    /// Ends on `close` once every nested `open`/`close` pair seen at this
    /// level is balanced out.
    fn grouped_end(open: &'static str, close: &'static str) -> impl FnMut(&Token) -> bool {
        let mut depth = 0u32;
        move |token| {
            if token.text == open {
                depth += 1;
                false
            } else if token.text == close {
                if depth == 0 {
                    true
                } else {
                    depth -= 1;
                    false
                }
            } else {
                false
            }
        }
    }

    /// Ends an argument expression on `,` or `)` at nesting depth zero.
    fn argument_end() -> impl FnMut(&Token) -> bool {
        let mut depth = 0u32;
        move |token| match token.text.as_str() {
            "(" => {
                depth += 1;
                false
            }
            ")" => {
                if depth == 0 {
                    true
                } else {
                    depth -= 1;
                    false
                }
            }
            "," => depth == 0,
            _ => false,
        }
    }

    // Token-stream helpers.

    fn next(&mut self, what: &str) -> Result<Token, CompileError> {
        match self.lexer.next_token()? {
            Some(token) => Ok(token),
            None => Err(unexpected_eof(what)),
        }
    }

    fn peek(&mut self, what: &str) -> Result<&Token, CompileError> {
        match self.lexer.peek_token()? {
            Some(token) => Ok(token),
            None => Err(unexpected_eof(what)),
        }
    }

    fn peek_is_mark(&mut self, name: &str) -> Result<bool, CompileError> {
        let token = self.peek(name)?;
        Ok(token.is_mark() && token.text == name)
    }

    fn peek_is_keyword(&mut self, name: &str) -> Result<bool, CompileError> {
        let token = self.peek(name)?;
        Ok(token.is_keyword() && token.text == name)
    }

    fn peek_is_class_var_keyword(&mut self) -> Result<bool, CompileError> {
        let token = self.peek("static|field")?;
        Ok(token.is_keyword() && matches!(token.text.as_str(), "static" | "field"))
    }

    fn peek_is_subroutine_keyword(&mut self) -> Result<bool, CompileError> {
        let token = self.peek("constructor|function|method")?;
        Ok(token.is_keyword()
            && matches!(token.text.as_str(), "constructor" | "function" | "method"))
    }

    fn peek_is_statement_keyword(&mut self) -> Result<bool, CompileError> {
        let token = self.peek("a statement or }")?;
        Ok(token.is_keyword()
            && matches!(
                token.text.as_str(),
                "let" | "if" | "while" | "do" | "return"
            ))
    }

    fn peek_is_type(&mut self) -> Result<bool, CompileError> {
        let token = self.peek("class name or type")?;
        Ok(token.is_identifier() || matches!(token.text.as_str(), "int" | "char" | "boolean"))
    }

    fn expect_keyword(&mut self, name: &str) -> Result<(), CompileError> {
        let token = self.next(name)?;
        if token.is_keyword() && token.text == name {
            Ok(())
        } else {
            Err(syntax_error(
                format!(
                    "A keyword {name} is expected but {} is given in {}",
                    token.text, token.line
                ),
                Some(token.line),
            ))
        }
    }

    fn expect_keyword_in(&mut self, options: &[&str], what: &str) -> Result<String, CompileError> {
        let token = self.next(what)?;
        if token.is_keyword() && options.contains(&token.text.as_str()) {
            Ok(token.text)
        } else {
            Err(syntax_error(
                format!(
                    "A keyword {what} is expected but {} is given in {}",
                    token.text, token.line
                ),
                Some(token.line),
            ))
        }
    }

    fn expect_mark(&mut self, name: &str) -> Result<(), CompileError> {
        let token = self.next(name)?;
        if token.is_mark() && token.text == name {
            Ok(())
        } else {
            Err(syntax_error(
                format!(
                    "A mark {name} is expected but {} is given in {}",
                    token.text, token.line
                ),
                Some(token.line),
            ))
        }
    }

    fn expect_identifier(&mut self) -> Result<String, CompileError> {
        let token = self.next("an identifier")?;
        if token.is_identifier() {
            Ok(token.text)
        } else {
            Err(syntax_error(
                format!(
                    "An identifier is expected but one {:?} {} is given in {}",
                    token.category, token.text, token.line
                ),
                Some(token.line),
            ))
        }
    }

    fn expect_type(&mut self) -> Result<String, CompileError> {
        let token = self.next("class name or type")?;
        if token.is_identifier() || matches!(token.text.as_str(), "int" | "char" | "boolean") {
            Ok(token.text)
        } else {
            Err(syntax_error(
                format!(
                    "A class name or type(int, char or boolean) is expected but one {:?} {} is given in {}",
                    token.category, token.text, token.line
                ),
                Some(token.line),
            ))
        }
    }

    fn expect_return_type(&mut self) -> Result<String, CompileError> {
        let token = self.next("class name or type")?;
        if token.is_identifier()
            || matches!(token.text.as_str(), "int" | "char" | "boolean" | "void")
        {
            Ok(token.text)
        } else {
            Err(syntax_error(
                format!(
                    "A class name or type(int, char, boolean or void) is expected but one {:?} {} is given in {}",
                    token.category, token.text, token.line
                ),
                Some(token.line),
            ))
        }
    }
}

/// Pop arity-many operands, replace them with one reduced expression node.
fn reduce(operands: &mut Vec<Term>, operator: Operator, line: u32) -> Result<(), CompileError> {
    let arity = operator.arity();
    if operands.len() < arity {
        return Err(syntax_error(
            format!("An operator is missing its operands in line {line}"),
            Some(line),
        ));
    }
    let args = operands.split_off(operands.len() - arity);
    operands.push(Term::Expression(Box::new(Expression {
        operator: Some(operator),
        operands: args,
    })));
    Ok(())
}
