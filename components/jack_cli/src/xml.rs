//! Debug pretty-printer rendering a parsed class as markup.
//!
//! Read-only traversal of the finished AST; compilation never depends on
//! this module. Enabled with `--xml`.

use parser::{
    ClassDec, ClassVarDec, Expression, KeywordConstant, Operator, Statement, SubroutineCall,
    SubroutineDec, SubroutineKind, Term, VarDec,
};

/// Render a full class declaration as markup text.
pub fn class_to_xml(class: &ClassDec) -> String {
    let mut out = String::new();
    line(&mut out, 0, "<class>");
    line(&mut out, 1, "<keyword>class</keyword>");
    line(&mut out, 1, &format!("<identifier>{}</identifier>", class.name));
    line(&mut out, 1, "<symbol>{</symbol>");
    for var_dec in &class.var_decs {
        class_var_dec_xml(&mut out, 1, var_dec);
    }
    for subroutine in &class.subroutines {
        subroutine_xml(&mut out, 1, subroutine);
    }
    line(&mut out, 1, "<symbol>}</symbol>");
    line(&mut out, 0, "</class>");
    out
}

fn line(out: &mut String, indent: usize, text: &str) {
    for _ in 0..indent {
        out.push_str("  ");
    }
    out.push_str(text);
    out.push('\n');
}

/// `int`, `char`, and `boolean` are keywords; class types are identifiers.
fn type_label(ty: &str) -> &'static str {
    match ty {
        "int" | "char" | "boolean" | "void" => "keyword",
        _ => "identifier",
    }
}

fn typed_name(out: &mut String, indent: usize, ty: &str) {
    let label = type_label(ty);
    line(out, indent, &format!("<{label}>{ty}</{label}>"));
}

fn class_var_dec_xml(out: &mut String, indent: usize, var_dec: &ClassVarDec) {
    line(out, indent, "<classVarDec>");
    line(out, indent + 1, &format!("<keyword>{}</keyword>", var_dec.kind));
    typed_name(out, indent + 1, &var_dec.ty);
    name_list_xml(out, indent + 1, &var_dec.names);
    line(out, indent + 1, "<symbol>;</symbol>");
    line(out, indent, "</classVarDec>");
}

fn name_list_xml(out: &mut String, indent: usize, names: &[String]) {
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            line(out, indent, "<symbol>,</symbol>");
        }
        line(out, indent, &format!("<identifier>{name}</identifier>"));
    }
}

fn subroutine_xml(out: &mut String, indent: usize, subroutine: &SubroutineDec) {
    let kind = match subroutine.kind {
        SubroutineKind::Constructor => "constructor",
        SubroutineKind::Function => "function",
        SubroutineKind::Method => "method",
    };
    line(out, indent, "<subroutineDec>");
    line(out, indent + 1, &format!("<keyword>{kind}</keyword>"));
    typed_name(out, indent + 1, &subroutine.return_type);
    line(
        out,
        indent + 1,
        &format!("<identifier>{}</identifier>", subroutine.name),
    );
    line(out, indent + 1, "<symbol>(</symbol>");
    line(out, indent + 1, "<parameterList>");
    for (i, parameter) in subroutine.parameters.iter().enumerate() {
        if i > 0 {
            line(out, indent + 2, "<symbol>,</symbol>");
        }
        typed_name(out, indent + 2, &parameter.ty);
        line(
            out,
            indent + 2,
            &format!("<identifier>{}</identifier>", parameter.name),
        );
    }
    line(out, indent + 1, "</parameterList>");
    line(out, indent + 1, "<symbol>)</symbol>");
    line(out, indent + 1, "<subroutineBody>");
    line(out, indent + 2, "<symbol>{</symbol>");
    for var_dec in &subroutine.locals {
        var_dec_xml(out, indent + 2, var_dec);
    }
    statements_xml(out, indent + 2, &subroutine.statements);
    line(out, indent + 2, "<symbol>}</symbol>");
    line(out, indent + 1, "</subroutineBody>");
    line(out, indent, "</subroutineDec>");
}

fn var_dec_xml(out: &mut String, indent: usize, var_dec: &VarDec) {
    line(out, indent, "<varDec>");
    line(out, indent + 1, "<keyword>var</keyword>");
    typed_name(out, indent + 1, &var_dec.ty);
    name_list_xml(out, indent + 1, &var_dec.names);
    line(out, indent + 1, "<symbol>;</symbol>");
    line(out, indent, "</varDec>");
}

fn statements_xml(out: &mut String, indent: usize, statements: &[Statement]) {
    line(out, indent, "<statements>");
    for statement in statements {
        statement_xml(out, indent + 1, statement);
    }
    line(out, indent, "</statements>");
}

fn statement_xml(out: &mut String, indent: usize, statement: &Statement) {
    match statement {
        Statement::Let {
            target,
            index,
            value,
        } => {
            line(out, indent, "<letStatement>");
            line(out, indent + 1, "<keyword>let</keyword>");
            line(out, indent + 1, &format!("<identifier>{target}</identifier>"));
            if let Some(index_expression) = index {
                line(out, indent + 1, "<symbol>[</symbol>");
                expression_xml(out, indent + 1, index_expression);
                line(out, indent + 1, "<symbol>]</symbol>");
            }
            line(out, indent + 1, "<symbol>=</symbol>");
            expression_xml(out, indent + 1, value);
            line(out, indent + 1, "<symbol>;</symbol>");
            line(out, indent, "</letStatement>");
        }
        Statement::If {
            condition,
            then_body,
            else_body,
        } => {
            line(out, indent, "<ifStatement>");
            line(out, indent + 1, "<keyword>if</keyword>");
            line(out, indent + 1, "<symbol>(</symbol>");
            expression_xml(out, indent + 1, condition);
            line(out, indent + 1, "<symbol>)</symbol>");
            line(out, indent + 1, "<symbol>{</symbol>");
            statements_xml(out, indent + 1, then_body);
            line(out, indent + 1, "<symbol>}</symbol>");
            if !else_body.is_empty() {
                line(out, indent + 1, "<keyword>else</keyword>");
                line(out, indent + 1, "<symbol>{</symbol>");
                statements_xml(out, indent + 1, else_body);
                line(out, indent + 1, "<symbol>}</symbol>");
            }
            line(out, indent, "</ifStatement>");
        }
        Statement::While { condition, body } => {
            line(out, indent, "<whileStatement>");
            line(out, indent + 1, "<keyword>while</keyword>");
            line(out, indent + 1, "<symbol>(</symbol>");
            expression_xml(out, indent + 1, condition);
            line(out, indent + 1, "<symbol>)</symbol>");
            line(out, indent + 1, "<symbol>{</symbol>");
            statements_xml(out, indent + 1, body);
            line(out, indent + 1, "<symbol>}</symbol>");
            line(out, indent, "</whileStatement>");
        }
        Statement::Do { call } => {
            line(out, indent, "<doStatement>");
            line(out, indent + 1, "<keyword>do</keyword>");
            call_xml(out, indent + 1, call);
            line(out, indent + 1, "<symbol>;</symbol>");
            line(out, indent, "</doStatement>");
        }
        Statement::Return { value } => {
            line(out, indent, "<returnStatement>");
            line(out, indent + 1, "<keyword>return</keyword>");
            if let Some(expression) = value {
                expression_xml(out, indent + 1, expression);
            }
            line(out, indent + 1, "<symbol>;</symbol>");
            line(out, indent, "</returnStatement>");
        }
    }
}

fn expression_xml(out: &mut String, indent: usize, expression: &Expression) {
    line(out, indent, "<expression>");
    match expression.operator {
        None => {
            for term in &expression.operands {
                term_xml(out, indent + 1, term);
            }
        }
        Some(operator) => {
            if expression.operands.len() == 1 {
                line(out, indent + 1, "<term>");
                operator_xml(out, indent + 2, operator);
                term_xml(out, indent + 2, &expression.operands[0]);
                line(out, indent + 1, "</term>");
            } else {
                term_xml(out, indent + 1, &expression.operands[0]);
                operator_xml(out, indent + 1, operator);
                term_xml(out, indent + 1, &expression.operands[1]);
            }
        }
    }
    line(out, indent, "</expression>");
}

fn operator_xml(out: &mut String, indent: usize, operator: Operator) {
    let symbol = match operator {
        Operator::Not => "~",
        Operator::Neg | Operator::Minus => "-",
        Operator::Product => "*",
        Operator::Divide => "/",
        Operator::Plus => "+",
        Operator::And => "&amp;",
        Operator::Or => "|",
        Operator::Gt => "&gt;",
        Operator::Lt => "&lt;",
        Operator::Eq => "=",
    };
    line(out, indent, &format!("<symbol>{symbol}</symbol>"));
}

fn term_xml(out: &mut String, indent: usize, term: &Term) {
    match term {
        Term::IntegerConstant(text) => {
            line(
                out,
                indent,
                &format!("<term><integerConstant>{text}</integerConstant></term>"),
            );
        }
        Term::StringConstant(text) => {
            let content: String = text.chars().filter(|c| *c != '"').collect();
            line(
                out,
                indent,
                &format!("<term><stringConstant>{content}</stringConstant></term>"),
            );
        }
        Term::KeywordConstant(constant) => {
            let keyword = match constant {
                KeywordConstant::True => "true",
                KeywordConstant::False => "false",
                KeywordConstant::Null => "null",
                KeywordConstant::This => "this",
            };
            line(out, indent, &format!("<term><keyword>{keyword}</keyword></term>"));
        }
        Term::Variable(name) => {
            line(out, indent, &format!("<term><identifier>{name}</identifier></term>"));
        }
        Term::ArrayElement { name, index } => {
            line(out, indent, "<term>");
            line(out, indent + 1, &format!("<identifier>{name}</identifier>"));
            line(out, indent + 1, "<symbol>[</symbol>");
            expression_xml(out, indent + 1, index);
            line(out, indent + 1, "<symbol>]</symbol>");
            line(out, indent, "</term>");
        }
        Term::Call(call) => {
            line(out, indent, "<term>");
            call_xml(out, indent + 1, call);
            line(out, indent, "</term>");
        }
        Term::Expression(expression) => {
            line(out, indent, "<term>");
            line(out, indent + 1, "<symbol>(</symbol>");
            expression_xml(out, indent + 1, expression);
            line(out, indent + 1, "<symbol>)</symbol>");
            line(out, indent, "</term>");
        }
    }
}

fn call_xml(out: &mut String, indent: usize, call: &SubroutineCall) {
    if let Some(receiver) = &call.receiver {
        line(out, indent, &format!("<identifier>{receiver}</identifier>"));
        line(out, indent, "<symbol>.</symbol>");
    }
    line(out, indent, &format!("<identifier>{}</identifier>", call.callee));
    line(out, indent, "<symbol>(</symbol>");
    line(out, indent, "<expressionList>");
    for (i, argument) in call.arguments.iter().enumerate() {
        if i > 0 {
            line(out, indent + 1, "<symbol>,</symbol>");
        }
        expression_xml(out, indent + 1, argument);
    }
    line(out, indent, "</expressionList>");
    line(out, indent, "<symbol>)</symbol>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use parser::Parser;

    fn to_xml(source: &str) -> String {
        let class = Parser::new(source).parse().unwrap();
        class_to_xml(&class)
    }

    #[test]
    fn test_class_header_markup() {
        let xml = to_xml("class Main { }");
        assert!(xml.starts_with("<class>\n"));
        assert!(xml.contains("<identifier>Main</identifier>"));
        assert!(xml.ends_with("</class>\n"));
    }

    #[test]
    fn test_let_statement_markup() {
        let xml = to_xml("class T { function void f() { var int x; let x = 1; return; } }");
        assert!(xml.contains("<letStatement>"));
        assert!(xml.contains("<term><integerConstant>1</integerConstant></term>"));
    }

    #[test]
    fn test_operator_is_escaped() {
        let xml = to_xml(
            "class T { function void f() { var boolean x; let x = 1 < 2; return; } }",
        );
        assert!(xml.contains("<symbol>&lt;</symbol>"));
        assert!(!xml.contains("<symbol><</symbol>"));
    }

    #[test]
    fn test_string_constant_drops_quotes() {
        let xml = to_xml(
            "class T { function void f() { do Output.printString(\"hi\"); return; } }",
        );
        assert!(xml.contains("<stringConstant>hi</stringConstant>"));
    }
}
