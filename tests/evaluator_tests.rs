use lachs::Span;
use sortle::ast::{Expression, Operator, Term};
use sortle::interpreter::{RuntimeError, Value, evaluate};

fn dummy_span() -> Span {
    Span {
        start: (0, 0),
        end: (0, 0),
        source: String::new(),
    }
}

fn make_expression(name: &str, terms: Vec<Term>) -> Expression {
    Expression {
        name: name.to_string(),
        terms,
        position: dummy_span(),
    }
}

/// Evaluate a body with no program state, for operators that ignore it
fn eval(terms: Vec<Term>) -> Result<Value, RuntimeError> {
    evaluate(&terms, &[], 0)
}

// === Coercions ===

#[test]
fn to_text_of_zero_is_empty() {
    assert_eq!(Value::Integer(0).to_text(), "");
}

#[test]
fn to_text_of_integers() {
    assert_eq!(Value::Integer(42).to_text(), "42");
    assert_eq!(Value::Integer(-17).to_text(), "-17");
}

#[test]
fn to_text_of_string_is_identity() {
    assert_eq!(Value::String("abc".to_string()).to_text(), "abc");
    assert_eq!(Value::String(String::new()).to_text(), "");
}

#[test]
fn to_int_takes_longest_digit_prefix() {
    assert_eq!(Value::String("123abc".to_string()).to_int(), 123);
    assert_eq!(Value::String("007".to_string()).to_int(), 7);
    assert_eq!(Value::String("abc".to_string()).to_int(), 0);
    assert_eq!(Value::String(String::new()).to_int(), 0);
    // No sign handling on strings
    assert_eq!(Value::String("-5".to_string()).to_int(), 0);
}

#[test]
fn coercion_round_trip() {
    // to-int(to-text(n)) == n, including the 0 <-> "" asymmetry; negatives
    // do not round-trip because to-int has no sign handling
    for n in [0i64, 1, 9, 42, 1000] {
        let text = Value::Integer(n).to_text();
        assert_eq!(Value::String(text).to_int(), n);
    }
}

// === Stack discipline ===

#[test]
fn literal_body_evaluates_to_itself() {
    assert_eq!(eval(vec![Term::Integer(42)]).unwrap(), Value::Integer(42));
    assert_eq!(
        eval(vec![Term::String("x".to_string())]).unwrap(),
        Value::String("x".to_string())
    );
}

#[test]
fn operator_pops_right_then_left() {
    // 7 2 / is 7 divided by 2
    let result = eval(vec![
        Term::Integer(7),
        Term::Integer(2),
        Term::Operator(Operator::Divide),
    ]);
    assert_eq!(result.unwrap(), Value::Integer(3));

    let result = eval(vec![
        Term::Integer(2),
        Term::Integer(7),
        Term::Operator(Operator::Divide),
    ]);
    assert_eq!(result.unwrap(), Value::Integer(0));
}

#[test]
fn underflow_is_an_error() {
    let result = eval(vec![Term::Integer(1), Term::Operator(Operator::Add)]);
    assert!(matches!(
        result,
        Err(RuntimeError::StackUnderflow {
            operator: Operator::Add
        })
    ));
}

#[test]
fn residue_is_an_error() {
    let result = eval(vec![Term::Integer(1), Term::Integer(2)]);
    assert!(matches!(result, Err(RuntimeError::StackResidue { depth: 2 })));

    let result = eval(vec![]);
    assert!(matches!(result, Err(RuntimeError::StackResidue { depth: 0 })));
}

// === Arithmetic ===

#[test]
fn addition_coerces_operands() {
    let result = eval(vec![
        Term::String("4x".to_string()),
        Term::String("3".to_string()),
        Term::Operator(Operator::Add),
    ]);
    assert_eq!(result.unwrap(), Value::Integer(7));
}

#[test]
fn multiplication() {
    let result = eval(vec![
        Term::Integer(6),
        Term::Integer(7),
        Term::Operator(Operator::Multiply),
    ]);
    assert_eq!(result.unwrap(), Value::Integer(42));
}

#[test]
fn division_floors() {
    let result = eval(vec![
        Term::Integer(-7),
        Term::Integer(2),
        Term::Operator(Operator::Divide),
    ]);
    assert_eq!(result.unwrap(), Value::Integer(-4));
}

#[test]
fn remainder_truncates() {
    let result = eval(vec![
        Term::Integer(7),
        Term::Integer(2),
        Term::Operator(Operator::Modulo),
    ]);
    assert_eq!(result.unwrap(), Value::Integer(1));

    let result = eval(vec![
        Term::Integer(-7),
        Term::Integer(2),
        Term::Operator(Operator::Modulo),
    ]);
    assert_eq!(result.unwrap(), Value::Integer(-1));
}

#[test]
fn zero_divisor_is_an_error() {
    let result = eval(vec![
        Term::Integer(1),
        Term::Integer(0),
        Term::Operator(Operator::Divide),
    ]);
    assert!(matches!(result, Err(RuntimeError::DivideByZero { .. })));

    // "x" coerces to 0
    let result = eval(vec![
        Term::Integer(1),
        Term::String("x".to_string()),
        Term::Operator(Operator::Modulo),
    ]);
    assert!(matches!(result, Err(RuntimeError::DivideByZero { .. })));
}

// === String operators ===

#[test]
fn max_is_lexicographic_over_text() {
    let result = eval(vec![
        Term::String("a".to_string()),
        Term::String("b".to_string()),
        Term::Operator(Operator::Max),
    ]);
    assert_eq!(result.unwrap(), Value::String("b".to_string()));

    // Integers compare as their decimal text: "10" < "9"
    let result = eval(vec![
        Term::Integer(10),
        Term::Integer(9),
        Term::Operator(Operator::Max),
    ]);
    assert_eq!(result.unwrap(), Value::String("9".to_string()));
}

#[test]
fn concatenation_coerces_operands() {
    let result = eval(vec![
        Term::Integer(1),
        Term::Integer(2),
        Term::Operator(Operator::Concatenate),
    ]);
    assert_eq!(result.unwrap(), Value::String("12".to_string()));

    // Integer 0 contributes nothing
    let result = eval(vec![
        Term::String("foo".to_string()),
        Term::Integer(0),
        Term::Operator(Operator::Concatenate),
    ]);
    assert_eq!(result.unwrap(), Value::String("foo".to_string()));
}

// === The match operator ===

fn state_of(names: &[&str]) -> Vec<Expression> {
    names
        .iter()
        .map(|name| make_expression(name, vec![Term::Integer(0)]))
        .collect()
}

fn match_terms(pattern: &str) -> Vec<Term> {
    vec![
        Term::String(pattern.to_string()),
        Term::Integer(0),
        Term::Operator(Operator::Match),
    ]
}

#[test]
fn match_searches_other_names() {
    let state = state_of(&["ape", "bat", "bee", "cow"]);
    let result = evaluate(&match_terms("b.!"), &state, 2);
    assert_eq!(result.unwrap(), Value::String("bat".to_string()));
}

#[test]
fn match_candidates_run_in_reverse_sort_order() {
    // From the last entry, the search walks straight down the front half
    let state = state_of(&["aa", "ab", "ba", "bb"]);
    let result = evaluate(&match_terms(".."), &state, 3);
    assert_eq!(result.unwrap(), Value::String("ba".to_string()));

    // From the first entry there is no front half; the back half is
    // searched top-down
    let result = evaluate(&match_terms(".."), &state, 0);
    assert_eq!(result.unwrap(), Value::String("bb".to_string()));
}

#[test]
fn match_excludes_the_evaluating_expression() {
    let state = state_of(&["ab", "zz"]);
    let result = evaluate(&match_terms("ab"), &state, 0);
    assert_eq!(result.unwrap(), Value::String("".to_string()));
}

#[test]
fn match_returns_capture() {
    let state = state_of(&["abc", "zzz"]);
    let result = evaluate(&match_terms("a(b.)"), &state, 1);
    assert_eq!(result.unwrap(), Value::String("bc".to_string()));
}

#[test]
fn match_with_nonempty_right_operand_is_unsupported() {
    let terms = vec![
        Term::String("x".to_string()),
        Term::String("y".to_string()),
        Term::Operator(Operator::Match),
    ];
    let state = state_of(&["a", "b"]);
    let result = evaluate(&terms, &state, 0);
    assert!(matches!(result, Err(RuntimeError::UnsupportedOperation)));
}

#[test]
fn match_with_bad_pattern_is_a_compile_error() {
    let state = state_of(&["a", "b"]);
    let result = evaluate(&match_terms("(a"), &state, 0);
    match result {
        Err(RuntimeError::RegexCompile { pattern, .. }) => assert_eq!(pattern, "(a"),
        other => panic!("expected regex compile error, got {:?}", other),
    }
}
