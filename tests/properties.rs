//! Property-based tests for parser and evaluator invariants.

use monkey::{eval, new_root_environment, parse};
use quickcheck::{quickcheck, Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

/// A small arithmetic expression tree, rendered into Monkey source text. Used
/// to drive the parser/evaluator with inputs that are always syntactically
/// valid, rather than fuzzing raw strings that would almost never parse.
#[derive(Clone, Debug)]
enum SmallExpr {
    Int(i16),
    Add(Box<SmallExpr>, Box<SmallExpr>),
    Sub(Box<SmallExpr>, Box<SmallExpr>),
    Mul(Box<SmallExpr>, Box<SmallExpr>),
}

impl SmallExpr {
    fn render(&self) -> String {
        match self {
            SmallExpr::Int(v) => i64::from(*v).to_string(),
            SmallExpr::Add(l, r) => format!("({} + {})", l.render(), r.render()),
            SmallExpr::Sub(l, r) => format!("({} - {})", l.render(), r.render()),
            SmallExpr::Mul(l, r) => format!("({} * {})", l.render(), r.render()),
        }
    }

    fn gen(g: &mut Gen, depth: u32) -> Self {
        if depth == 0 {
            return SmallExpr::Int(i16::arbitrary(g));
        }
        match u32::arbitrary(g) % 4 {
            0 => SmallExpr::Int(i16::arbitrary(g)),
            1 => SmallExpr::Add(
                Box::new(Self::gen(g, depth - 1)),
                Box::new(Self::gen(g, depth - 1)),
            ),
            2 => SmallExpr::Sub(
                Box::new(Self::gen(g, depth - 1)),
                Box::new(Self::gen(g, depth - 1)),
            ),
            _ => SmallExpr::Mul(
                Box::new(Self::gen(g, depth - 1)),
                Box::new(Self::gen(g, depth - 1)),
            ),
        }
    }
}

impl Arbitrary for SmallExpr {
    fn arbitrary(g: &mut Gen) -> Self {
        Self::gen(g, 4)
    }
}

/// Parsing a well-formed expression never produces parser errors, and
/// printing the parsed AST back out and re-parsing it is a fixed point: the
/// canonical, fully-parenthesized rendering is stable under re-parsing.
#[quickcheck]
fn parser_is_idempotent_on_its_own_canonical_rendering(expr: SmallExpr) -> TestResult {
    let source = expr.render();
    let (program, errors) = parse(&source);
    if !errors.is_empty() {
        return TestResult::failed();
    }
    let canonical = program.to_string();
    let (reparsed, errors) = parse(&canonical);
    if !errors.is_empty() {
        return TestResult::failed();
    }
    TestResult::from_bool(reparsed.to_string() == canonical)
}

/// Evaluating the same source twice against fresh environments always
/// produces the same observable result.
#[quickcheck]
fn evaluator_is_deterministic(expr: SmallExpr) -> TestResult {
    let source = expr.render();
    let (program, errors) = parse(&source);
    if !errors.is_empty() {
        return TestResult::discard();
    }
    let a = eval(&program, &new_root_environment()).inspect();
    let b = eval(&program, &new_root_environment()).inspect();
    TestResult::from_bool(a == b)
}

fn can_parse(source: &str) -> bool {
    parse(source).1.is_empty()
}

#[test]
fn known_good_expressions_always_parse() {
    let known_good = [
        "42",
        "true",
        "false",
        r#""hello""#,
        "[1, 2, 3]",
        r#"{"key": "value"}"#,
        "fn(x) { x }",
        "let x = 5; x",
        "if (x > 5) { 1 } else { 2 }",
        "fib(10)",
        r#"{"one": 1, "two": 2}["one"]"#,
    ];
    for expr in known_good {
        assert!(can_parse(expr), "failed to parse known good expression: {expr}");
    }
}

#[test]
fn known_bad_expressions_always_report_errors() {
    let known_bad = ["let = 5;", "{\"a\": 1,}", "(1 + 2", "fn(x, ) { x }"];
    for expr in known_bad {
        assert!(!can_parse(expr), "expected a parser error for: {expr}");
    }
}

quickcheck! {
    fn closures_over_fresh_environments_never_leak_state(a: i16, b: i16) -> bool {
        let source = format!(
            "let mk = fn(x) {{ fn(y) {{ x + y }} }}; let f = mk({a}); f({b})"
        );
        let (program, errors) = parse(&source);
        if !errors.is_empty() {
            return true;
        }
        let expected = i64::from(a).wrapping_add(i64::from(b));
        eval(&program, &new_root_environment()).inspect() == expected.to_string()
    }
}
