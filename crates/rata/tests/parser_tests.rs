//! Parser tests over whole source units

use pretty_assertions::assert_eq;
use rata::ast::*;
use rata::{parse, parse_expression, parse_repl, tokenize};

fn expr(src: &str) -> Expr {
    parse_expression(tokenize(src).expect("lex")).expect("parse")
}

#[test]
fn test_pipe_desugars_to_first_argument() {
    assert_eq!(expr("a |> f(b)"), expr("f(a, b)"));
    assert_eq!(expr("a |> f |> g"), expr("g(f(a))"));
    assert_eq!(
        expr("xs |> Enum.map(~ .x + 1)"),
        expr("Enum.map(xs, ~ .x + 1)")
    );
}

#[test]
fn test_lambda_params_first_seen_order() {
    match expr("~ .y * .x + .y") {
        Expr::Lambda(lambda) => assert_eq!(lambda.params, vec!["y", "x"]),
        other => panic!("expected lambda, got {:?}", other),
    }
}

#[test]
fn test_module_with_imports_and_docstrings() {
    let source = r#"
library Enum
library Maps as M

module Report {
  """
  Builds reports.
  """

  total = function(xs: Vector) {
    """Sum of xs."""
    Enum.sum(xs)
  }

  """Loose note."""
  ready = true
}
"#;
    let module = parse(tokenize(source).expect("lex")).expect("parse");

    assert_eq!(module.name, "Report");
    assert_eq!(
        module.imports,
        vec![
            LibraryImport {
                module_name: "Enum".to_string(),
                alias: None
            },
            LibraryImport {
                module_name: "Maps".to_string(),
                alias: Some("M".to_string())
            },
        ]
    );
    assert_eq!(
        module.docstrings(),
        vec![
            ("Report".to_string(), "Builds reports.".to_string()),
            ("total".to_string(), "Sum of xs.".to_string()),
        ]
    );
    assert!(matches!(module.body[1], Stmt::Docstring(_)));
}

#[test]
fn test_call_paren_on_next_line_starts_statement() {
    let stmts = parse_repl(tokenize("f\n(1)").expect("lex")).expect("parse");
    assert_eq!(stmts.len(), 2);
}

#[test]
fn test_unclosed_brace_is_error() {
    let err = parse(tokenize("module M { x = 1").expect("lex")).expect_err("unclosed");
    assert_eq!(err.expected, "`}`");
    assert!(err.position.is_some());
}

#[test]
fn test_missing_module_keyword_is_error() {
    assert!(parse(tokenize("x = 1").expect("lex")).is_err());
}

#[test]
fn test_interpolation_parts() {
    match expr("f\"a{1 + 2}b\"") {
        Expr::InterpolatedString(s) => {
            assert_eq!(s.parts.len(), 3);
            assert_eq!(s.parts[0], StringPart::Literal("a".to_string()));
            assert_eq!(s.parts[2], StringPart::Literal("b".to_string()));
        }
        other => panic!("expected interpolated string, got {:?}", other),
    }
}

#[test]
fn test_empty_interpolation_is_error() {
    assert!(parse_expression(tokenize("f\"{}\"").expect("lex")).is_err());
}

#[test]
fn test_deep_nesting_is_error_not_crash() {
    let source = format!("x = {}1{}", "(".repeat(20_000), ")".repeat(20_000));
    let err = parse_repl(tokenize(&source).expect("lex")).expect_err("too deep");
    assert_eq!(err.expected, "shallower nesting");

    let source = format!("x = {}1{}", "[".repeat(200), "]".repeat(200));
    assert!(parse_repl(tokenize(&source).expect("lex")).is_ok());
}
