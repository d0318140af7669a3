//! Parser unit tests.

use super::*;
use crate::ast::{Expr, FuncDeclare, Stmt};
use crate::lexer::Lexer;
use crate::token::TokenKind;

/// Helper to parse input and return the source map and program block.
fn parse_source(input: &str) -> Result<(SourceMap, Block), ParseError> {
    let mut map = SourceMap::new();
    let id = map.add("test.alps", input);
    let tokens = Lexer::new(map.text(id), id)
        .tokenize()
        .unwrap_or_else(|e| panic!("Lexer failed on parser test input {:?}: {}", input, e));
    let result = Parser::new(tokens, id, &mut map).parse();
    result.map(|block| (map, block))
}

/// Helper to parse input, panicking on failure.
fn parse_ok(input: &str) -> (SourceMap, Block) {
    parse_source(input).unwrap_or_else(|e| panic!("Failed to parse input {:?}: {}", input, e))
}

/// Helper to parse input and return the error.
fn parse_error(input: &str) -> ParseError {
    match parse_source(input) {
        Ok((_, block)) => panic!(
            "Expected parsing to fail for input {:?}, but it produced {} statements",
            input,
            block.statements.len()
        ),
        Err(e) => e,
    }
}

/// Helper to parse `return <expr>;` inside a function and extract the
/// expression.
fn parse_return_expr(expr_src: &str) -> (SourceMap, Expr) {
    let input = format!("fn test() int {{ return {}; }}", expr_src);
    let (map, block) = parse_ok(&input);
    let Stmt::FuncDeclare(fdecl) = &block.statements[0] else {
        panic!("Expected a function declaration");
    };
    let body = fdecl.body.as_ref().expect("Function has no body");
    let Stmt::Return { value, .. } = &body.statements[0] else {
        panic!("Expected a return statement");
    };
    (map, value.clone())
}

/// Helper to extract the first function declaration of a block.
fn first_fn(block: &Block) -> &FuncDeclare {
    match &block.statements[0] {
        Stmt::FuncDeclare(fdecl) => fdecl,
        other => panic!("Expected a function declaration, got {:?}", other),
    }
}

// ===================
// Programs and blocks
// ===================

#[test]
fn test_empty_program() {
    let (_, block) = parse_ok("");
    assert!(block.statements.is_empty());
}

#[test]
fn test_empty_statements() {
    let (_, block) = parse_ok(";;;");
    assert!(block.statements.is_empty());
}

#[test]
fn test_stray_closing_brace() {
    let err = parse_error("}");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert!(err.message.contains("end of input"));
}

#[test]
fn test_nested_block_statement() {
    let (_, block) = parse_ok("fn f() int { { x int; } return 0; }");
    let fdecl = first_fn(&block);
    let body = fdecl.body.as_ref().unwrap();
    assert!(matches!(body.statements[0], Stmt::Block(_)));
}

// ===================
// Declarations
// ===================

#[test]
fn test_declaration() {
    let (map, block) = parse_ok("fn f() int { x int; return 0; }");
    let body = first_fn(&block).body.as_ref().unwrap();
    match &body.statements[0] {
        Stmt::Declare(declare) => {
            assert_eq!(map.token_text(&declare.variable.name), "x");
            assert_eq!(map.token_text(&declare.ty), "int");
        }
        other => panic!("Expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_declaration_str_type() {
    let (map, block) = parse_ok("fn f() int { s str; return 0; }");
    let body = first_fn(&block).body.as_ref().unwrap();
    match &body.statements[0] {
        Stmt::Declare(declare) => assert_eq!(map.token_text(&declare.ty), "str"),
        other => panic!("Expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_declare_with_initializer_is_two_statements() {
    let (map, block) = parse_ok("fn f() int { x int = 5; return x; }");
    let body = first_fn(&block).body.as_ref().unwrap();
    assert_eq!(body.statements.len(), 3);
    assert!(matches!(body.statements[0], Stmt::Declare(_)));
    match &body.statements[1] {
        Stmt::Assign { target, value, .. } => {
            assert_eq!(map.token_text(&target.name), "x");
            assert!(matches!(value, Expr::Literal(_)));
        }
        other => panic!("Expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_declaration_missing_semicolon() {
    let err = parse_error("fn f() int { x int return 0; }");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert!(err.message.contains("SEMICOLON"));
}

// ===================
// Assignments
// ===================

#[test]
fn test_assignment() {
    let (map, block) = parse_ok("fn f() int { x int; x = 3; return x; }");
    let body = first_fn(&block).body.as_ref().unwrap();
    match &body.statements[1] {
        Stmt::Assign { target, .. } => assert_eq!(map.token_text(&target.name), "x"),
        other => panic!("Expected an assignment, got {:?}", other),
    }
}

#[test]
fn test_assignment_missing_equals() {
    let err = parse_error("fn f() int { x 3; return 0; }");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert!(err.message.contains("EQUALS"));
}

// ===================
// Expressions: precedence and associativity
// ===================

#[test]
fn test_precedence_mul_binds_tighter_on_right() {
    // a + b * c  →  (+ a (* b c))
    let (map, expr) = parse_return_expr("a + b * c");
    let Expr::Binary { op, left, right } = expr else {
        panic!("Expected a binary expression");
    };
    assert_eq!(op.kind, TokenKind::Plus);
    match *left {
        Expr::Variable(v) => assert_eq!(map.token_text(&v.name), "a"),
        other => panic!("Expected variable 'a', got {:?}", other),
    }
    let Expr::Binary { op: inner_op, .. } = *right else {
        panic!("Expected a nested binary expression");
    };
    assert_eq!(inner_op.kind, TokenKind::Star);
}

#[test]
fn test_precedence_mul_binds_tighter_on_left() {
    // a * b + c  →  (+ (* a b) c)
    let (map, expr) = parse_return_expr("a * b + c");
    let Expr::Binary { op, left, right } = expr else {
        panic!("Expected a binary expression");
    };
    assert_eq!(op.kind, TokenKind::Plus);
    let Expr::Binary { op: inner_op, .. } = *left else {
        panic!("Expected a nested binary expression");
    };
    assert_eq!(inner_op.kind, TokenKind::Star);
    match *right {
        Expr::Variable(v) => assert_eq!(map.token_text(&v.name), "c"),
        other => panic!("Expected variable 'c', got {:?}", other),
    }
}

#[test]
fn test_parenthesization_overrides_precedence() {
    // (a + b) * c  →  (* (+ a b) c)
    let (_, expr) = parse_return_expr("(a + b) * c");
    let Expr::Binary { op, left, .. } = expr else {
        panic!("Expected a binary expression");
    };
    assert_eq!(op.kind, TokenKind::Star);
    let Expr::Binary { op: inner_op, .. } = *left else {
        panic!("Expected a nested binary expression");
    };
    assert_eq!(inner_op.kind, TokenKind::Plus);
}

#[test]
fn test_left_associativity() {
    // a - b - c  →  (- (- a b) c)
    let (map, expr) = parse_return_expr("a - b - c");
    let Expr::Binary { op, left, right } = expr else {
        panic!("Expected a binary expression");
    };
    assert_eq!(op.kind, TokenKind::Minus);
    assert!(matches!(*left, Expr::Binary { .. }));
    match *right {
        Expr::Variable(v) => assert_eq!(map.token_text(&v.name), "c"),
        other => panic!("Expected variable 'c', got {:?}", other),
    }
}

#[test]
fn test_unary_sign() {
    let (_, expr) = parse_return_expr("-x");
    let Expr::Unary { op, operand } = expr else {
        panic!("Expected a unary expression");
    };
    assert_eq!(op.kind, TokenKind::Minus);
    assert!(matches!(*operand, Expr::Variable(_)));
}

#[test]
fn test_number_literal() {
    let (map, expr) = parse_return_expr("42");
    match expr {
        Expr::Literal(token) => {
            assert_eq!(token.kind, TokenKind::Number);
            assert_eq!(map.token_text(&token), "42");
        }
        other => panic!("Expected a literal, got {:?}", other),
    }
}

#[test]
fn test_string_literal() {
    let (map, expr) = parse_return_expr(r#""hi""#);
    match expr {
        Expr::Literal(token) => {
            assert_eq!(token.kind, TokenKind::Str);
            assert_eq!(map.token_text(&token), r#""hi""#);
        }
        other => panic!("Expected a literal, got {:?}", other),
    }
}

#[test]
fn test_call_in_expression() {
    let (map, expr) = parse_return_expr("f(1, 2)");
    match expr {
        Expr::Call(call) => {
            assert_eq!(map.token_text(&call.callee.name), "f");
            assert_eq!(call.args.len(), 2);
        }
        other => panic!("Expected a call, got {:?}", other),
    }
}

#[test]
fn test_call_mixed_into_arithmetic() {
    let (_, expr) = parse_return_expr("1 + f(2)");
    let Expr::Binary { right, .. } = expr else {
        panic!("Expected a binary expression");
    };
    assert!(matches!(*right, Expr::Call(_)));
}

#[test]
fn test_missing_operand() {
    let err = parse_error("fn f() int { return 1 + ; }");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert!(err.message.contains("an expression"));
}

#[test]
fn test_unbalanced_paren() {
    let err = parse_error("fn f() int { return (1 + 2; }");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert!(err.message.contains("RPAREN"));
}

// ===================
// Function calls
// ===================

#[test]
fn test_call_no_args() {
    let (map, block) = parse_ok("fn f() int { g(); return 0; }");
    let body = first_fn(&block).body.as_ref().unwrap();
    match &body.statements[0] {
        Stmt::Call(call) => {
            assert_eq!(map.token_text(&call.callee.name), "g");
            assert!(call.args.is_empty());
        }
        other => panic!("Expected a call, got {:?}", other),
    }
}

#[test]
fn test_call_with_args() {
    let (_, block) = parse_ok("fn f() int { g(1, x, 2 + 3); return 0; }");
    let body = first_fn(&block).body.as_ref().unwrap();
    match &body.statements[0] {
        Stmt::Call(call) => assert_eq!(call.args.len(), 3),
        other => panic!("Expected a call, got {:?}", other),
    }
}

#[test]
fn test_call_missing_semicolon() {
    let err = parse_error("fn f() int { g() return 0; }");
    assert!(err.message.contains("SEMICOLON"));
}

#[test]
fn test_call_double_comma() {
    let err = parse_error("fn f() int { g(1,,2); return 0; }");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
}

// ===================
// Function declarations
// ===================

#[test]
fn test_fn_no_params() {
    let (map, block) = parse_ok("fn main() int { return 0; }");
    let fdecl = first_fn(&block);
    assert_eq!(map.token_text(&fdecl.name()), "main");
    assert_eq!(map.token_text(&fdecl.declaration.ty), "int");
    assert!(fdecl.params.is_empty());
    assert!(fdecl.body.is_some());
}

#[test]
fn test_fn_with_params() {
    let (map, block) = parse_ok("fn add(a int, b int) int { return a + b; }");
    let fdecl = first_fn(&block);
    assert_eq!(fdecl.params.len(), 2);
    assert_eq!(map.token_text(&fdecl.params[0].variable.name), "a");
    assert_eq!(map.token_text(&fdecl.params[1].variable.name), "b");
    assert_eq!(map.token_text(&fdecl.params[0].ty), "int");
}

#[test]
fn test_fn_no_trailing_semicolon_required() {
    let (_, block) = parse_ok("fn a() int { return 1; } fn b() int { return 2; }");
    assert_eq!(block.statements.len(), 2);
}

#[test]
fn test_nested_fn() {
    let (_, block) = parse_ok(
        "fn outer() int { fn inner() int { return 1; } return 2; }",
    );
    let body = first_fn(&block).body.as_ref().unwrap();
    assert!(matches!(body.statements[0], Stmt::FuncDeclare(_)));
}

#[test]
fn test_fn_missing_return_is_error() {
    let err = parse_error("fn main() int { x int = 0; }");
    assert_eq!(err.kind, ParseErrorKind::MissingReturn);
    assert!(err.message.contains("No return statement in function"));
}

#[test]
fn test_fn_return_inside_nested_block_does_not_count() {
    let err = parse_error("fn main() int { { return 0; } }");
    assert_eq!(err.kind, ParseErrorKind::MissingReturn);
}

#[test]
fn test_fn_missing_return_type() {
    let err = parse_error("fn main() { return 0; }");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert!(err.message.contains("TYPE"));
}

#[test]
fn test_fn_without_body_is_error() {
    // a bodiless declaration must not reach the emitter
    let err = parse_error("fn f() int fn main() int { return 0; }");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert!(err.message.contains("LBRACE"));
}

#[test]
fn test_fn_body_missing_at_end_of_input() {
    let err = parse_error("fn f() int");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert!(err.message.contains("LBRACE"));
}

#[test]
fn test_fn_param_missing_type() {
    let err = parse_error("fn f(a) int { return 0; }");
    assert!(err.message.contains("TYPE"));
}

// ===================
// Keywords
// ===================

#[test]
fn test_unsupported_keyword_if() {
    let err = parse_error("fn f() int { if; return 0; }");
    assert_eq!(err.kind, ParseErrorKind::UnsupportedKeyword);
    assert!(err.message.contains("'if'"));
}

#[test]
fn test_unsupported_keyword_while_top_level() {
    let err = parse_error("while;");
    assert_eq!(err.kind, ParseErrorKind::UnsupportedKeyword);
}

#[test]
fn test_return_top_level_parses() {
    // placement is the emitter's concern; the grammar allows it
    let (_, block) = parse_ok("return 0;");
    assert!(matches!(block.statements[0], Stmt::Return { .. }));
}

// ===================
// Unknown statements
// ===================

#[test]
fn test_unknown_statement_number() {
    let err = parse_error("fn f() int { 5; return 0; }");
    assert_eq!(err.kind, ParseErrorKind::UnknownStatement);
    assert!(err.message.contains("Unknown statement"));
}

#[test]
fn test_unknown_statement_string() {
    let err = parse_error(r#"fn f() int { "x"; return 0; }"#);
    assert_eq!(err.kind, ParseErrorKind::UnknownStatement);
}

#[test]
fn test_unknown_statement_none_token() {
    let err = parse_error("fn f() int { @bad; return 0; }");
    assert_eq!(err.kind, ParseErrorKind::UnknownStatement);
}

// ===================
// Includes (failure paths; splicing is covered in integration tests)
// ===================

#[test]
fn test_include_missing_file() {
    let err = parse_error(r#"include("no_such_file.alps");"#);
    assert_eq!(err.kind, ParseErrorKind::IncludeFailed);
    assert!(err.message.contains("Could not load 'no_such_file.alps'"));
}

#[test]
fn test_include_non_string_argument() {
    let err = parse_error("include(5);");
    assert_eq!(err.kind, ParseErrorKind::IncludeFailed);
    assert!(err.message.contains("string literal"));
}

#[test]
fn test_include_in_expression_rejected() {
    let err = parse_error(r#"fn f() int { return include("x.alps"); }"#);
    assert_eq!(err.kind, ParseErrorKind::UnknownStatement);
    assert!(err.message.contains("statement level"));
}

// ===================
// Error reporting
// ===================

#[test]
fn test_error_location() {
    let err = parse_error("fn f() int {\n  x int\n  return 0;\n}");
    // the error lands on the `return` keyword, which is not a semicolon
    assert_eq!(err.span.line, 3);
}

#[test]
fn test_error_display() {
    let err = parse_error("fn f() int { x 3; return 0; }");
    let display = format!("{}", err);
    assert!(display.contains(':'));
    assert!(display.contains("Expected"));
}

#[test]
fn test_error_includes_found_text() {
    let err = parse_error("fn f() int { x int x; return 0; }");
    assert!(err.message.contains("'x'"), "message: {}", err.message);
}

#[test]
fn test_unexpected_end_of_input() {
    let err = parse_error("fn f() int { return 0;");
    assert!(err.message.contains("end of input"));
}
