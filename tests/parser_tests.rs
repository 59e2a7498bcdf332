use sortle::ast::{Expression, Operator, Term};
use sortle::lexer::Token;
use sortle::parser::{ParseState, parse};

fn parse_program(input: &str) -> Vec<Expression> {
    let tokens = Token::lex(input).expect("lexing failed");
    let mut state = ParseState::new(tokens);
    let (expressions, errors) = parse(&mut state);
    if !errors.is_empty() {
        panic!("parsing failed: {}", errors[0]);
    }
    expressions
}

fn parse_errors(input: &str) -> Vec<String> {
    let tokens = Token::lex(input).expect("lexing failed");
    let mut state = ParseState::new(tokens);
    let (_, errors) = parse(&mut state);
    errors.iter().map(|e| e.to_string()).collect()
}

#[test]
fn parse_empty_program() {
    let expressions = parse_program("");
    assert!(expressions.is_empty());
}

#[test]
fn parse_simple_definition() {
    let expressions = parse_program("a := 1 2 +");
    assert_eq!(expressions.len(), 1);
    assert_eq!(expressions[0].name, "a");
    assert_eq!(
        expressions[0].terms,
        vec![
            Term::Integer(1),
            Term::Integer(2),
            Term::Operator(Operator::Add)
        ]
    );
}

#[test]
fn parse_empty_body() {
    let expressions = parse_program("a :=");
    assert_eq!(expressions.len(), 1);
    assert!(expressions[0].terms.is_empty());
}

#[test]
fn parse_negative_integer() {
    let expressions = parse_program("a := -5");
    assert_eq!(expressions[0].terms, vec![Term::Integer(-5)]);
}

#[test]
fn parse_string_with_escapes() {
    let expressions = parse_program(r#"a := "he\"llo" "back\\slash""#);
    assert_eq!(
        expressions[0].terms,
        vec![
            Term::String("he\"llo".to_string()),
            Term::String("back\\slash".to_string())
        ]
    );
}

#[test]
fn parse_all_operators() {
    let expressions = parse_program("a := + * / % ^ $ ~ ?");
    let expected = vec![
        Term::Operator(Operator::Add),
        Term::Operator(Operator::Multiply),
        Term::Operator(Operator::Divide),
        Term::Operator(Operator::Modulo),
        Term::Operator(Operator::Max),
        Term::Operator(Operator::Max),
        Term::Operator(Operator::Concatenate),
        Term::Operator(Operator::Match),
    ];
    assert_eq!(expressions[0].terms, expected);
}

#[test]
fn parse_multiple_definitions() {
    let expressions = parse_program("a := 1 2 +\nb := 0\nc := \"x\"");
    assert_eq!(expressions.len(), 3);
    assert_eq!(expressions[0].name, "a");
    assert_eq!(expressions[1].name, "b");
    assert_eq!(expressions[2].name, "c");
}

#[test]
fn parse_definitions_without_newlines() {
    // Bodies never contain bare names, so a name always starts a definition
    let expressions = parse_program("a := 1 b := 2");
    assert_eq!(expressions.len(), 2);
    assert_eq!(expressions[0].terms, vec![Term::Integer(1)]);
    assert_eq!(expressions[1].terms, vec![Term::Integer(2)]);
}

#[test]
fn parse_missing_assign_is_error() {
    let errors = parse_errors("a 1 2 +");
    assert!(!errors.is_empty());
    assert!(errors[0].contains("':='"), "unexpected message: {}", errors[0]);
}

#[test]
fn parse_duplicate_name_is_error() {
    let errors = parse_errors("a := 1\na := 2");
    assert_eq!(errors.len(), 1);
    assert!(
        errors[0].contains("duplicate expression name 'a'"),
        "unexpected message: {}",
        errors[0]
    );
}

#[test]
fn parse_recovers_after_bad_definition() {
    let tokens = Token::lex("a 1\nb := 2").expect("lexing failed");
    let mut state = ParseState::new(tokens);
    let (expressions, errors) = parse(&mut state);

    assert!(!errors.is_empty());
    assert_eq!(expressions.len(), 1);
    assert_eq!(expressions[0].name, "b");
}
