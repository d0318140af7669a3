//! Token and parse-tree dumps for the debug subcommands.
//!
//! Rendering returns a `String` rather than printing directly so the unit
//! tests can assert on the exact text.

use alps::ast::{Block, Declare, Expr, FuncCall, Stmt};
use alps::source::SourceMap;
use alps::token::Token;

/// Renders a token stream, one token per line.
pub(crate) fn render_tokens(map: &SourceMap, tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!(
            "Token: [{}] type: {}\n",
            map.token_text(token),
            token.kind.name()
        ));
    }
    out
}

/// Renders a program block as an indented tree, one node per line.
pub(crate) fn render_tree(map: &SourceMap, program: &Block) -> String {
    let mut out = String::new();
    write_block(map, program, 0, &mut out);
    out
}

fn indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("    ");
    }
}

fn write_block(map: &SourceMap, block: &Block, depth: usize, out: &mut String) {
    indent(depth, out);
    out.push_str("BLOCK\n");
    for statement in &block.statements {
        write_stmt(map, statement, depth + 1, out);
    }
}

fn write_stmt(map: &SourceMap, statement: &Stmt, depth: usize, out: &mut String) {
    match statement {
        Stmt::Block(block) => write_block(map, block, depth, out),
        Stmt::Declare(declare) => write_declare(map, declare, depth, out),
        Stmt::Assign { target, op, value } => {
            indent(depth, out);
            out.push_str(&format!("ASSIGN {}\n", map.token_text(op)));
            indent(depth + 1, out);
            out.push_str(&format!("VARIABLE {}\n", map.token_text(&target.name)));
            write_expr(map, value, depth + 1, out);
        }
        Stmt::Call(call) => write_call(map, call, depth, out),
        Stmt::FuncDeclare(fdecl) => {
            indent(depth, out);
            out.push_str(&format!(
                "FUNCDECL {} -> {}\n",
                map.token_text(&fdecl.name()),
                map.token_text(&fdecl.declaration.ty)
            ));
            for param in &fdecl.params {
                write_declare(map, param, depth + 1, out);
            }
            if let Some(body) = &fdecl.body {
                write_block(map, body, depth + 1, out);
            }
        }
        Stmt::Return { value, .. } => {
            indent(depth, out);
            out.push_str("RETURN\n");
            write_expr(map, value, depth + 1, out);
        }
    }
}

fn write_declare(map: &SourceMap, declare: &Declare, depth: usize, out: &mut String) {
    indent(depth, out);
    out.push_str(&format!("DECLARE {}\n", map.token_text(&declare.ty)));
    indent(depth + 1, out);
    out.push_str(&format!(
        "VARIABLE {}\n",
        map.token_text(&declare.variable.name)
    ));
}

fn write_call(map: &SourceMap, call: &FuncCall, depth: usize, out: &mut String) {
    indent(depth, out);
    out.push_str(&format!("FUNCCALL {}\n", map.token_text(&call.callee.name)));
    for arg in &call.args {
        write_expr(map, arg, depth + 1, out);
    }
}

fn write_expr(map: &SourceMap, expr: &Expr, depth: usize, out: &mut String) {
    match expr {
        Expr::Literal(token) => {
            indent(depth, out);
            out.push_str(&format!("LITERAL ({})\n", map.token_text(token)));
        }
        Expr::Variable(variable) => {
            indent(depth, out);
            out.push_str(&format!("VARIABLE {}\n", map.token_text(&variable.name)));
        }
        Expr::Unary { op, operand } => {
            indent(depth, out);
            out.push_str(&format!("UNARYOP {}\n", map.token_text(op)));
            write_expr(map, operand, depth + 1, out);
        }
        Expr::Binary { op, left, right } => {
            indent(depth, out);
            out.push_str(&format!("BINOP {}\n", map.token_text(op)));
            write_expr(map, left, depth + 1, out);
            write_expr(map, right, depth + 1, out);
        }
        Expr::Call(call) => write_call(map, call, depth, out),
    }
}
