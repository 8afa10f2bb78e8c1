use crate::token::Token;
use crate::tokenizer::Tokenizer;
use crate::util::{Code, Trace};

fn tokens_of(src: &str) -> Vec<Token> {
    let code = Code::from(src);
    let mut tokenizer = Tokenizer::new(code, Trace::Off).expect("tokenizer should build");
    let mut out = Vec::new();
    while !tokenizer.is_end() {
        out.push(tokenizer.token().clone());
        tokenizer.advance().expect("advance should succeed");
    }
    out
}

#[test]
fn empty_input_is_immediately_at_end() {
    assert_eq!(tokens_of(""), vec![]);
}

#[test]
fn parens_and_dot() {
    assert_eq!(
        tokens_of("(.)"),
        vec![Token::OpenParen, Token::Dot, Token::CloseParen]
    );
}

#[test]
fn quote_is_its_own_token() {
    assert_eq!(tokens_of("'x"), vec![Token::Quote, Token::Sym("x".to_string())]);
}

#[test]
fn bare_sign_is_a_symbol() {
    assert_eq!(tokens_of("+"), vec![Token::Sym("+".to_string())]);
    assert_eq!(tokens_of("-"), vec![Token::Sym("-".to_string())]);
}

#[test]
fn signed_integers() {
    assert_eq!(tokens_of("+5"), vec![Token::Integer(5)]);
    assert_eq!(tokens_of("-5"), vec![Token::Integer(-5)]);
    assert_eq!(tokens_of("5"), vec![Token::Integer(5)]);
}

#[test]
fn booleans() {
    assert_eq!(tokens_of("#t"), vec![Token::BoolTrue]);
    assert_eq!(tokens_of("#f"), vec![Token::BoolFalse]);
}

#[test]
fn hash_followed_by_other_symbol_chars_is_a_symbol() {
    assert_eq!(tokens_of("#tf"), vec![Token::Sym("#tf".to_string())]);
    assert_eq!(tokens_of("#x"), vec![Token::Sym("#x".to_string())]);
}

#[test]
fn symbols_with_punctuation() {
    assert_eq!(
        tokens_of("list-tail?"),
        vec![Token::Sym("list-tail?".to_string())]
    );
    assert_eq!(tokens_of("null!"), vec![Token::Sym("null!".to_string())]);
}

#[test]
fn whitespace_is_skipped_between_tokens() {
    assert_eq!(
        tokens_of("  ( +   1  2 )  "),
        vec![
            Token::OpenParen,
            Token::Sym("+".to_string()),
            Token::Integer(1),
            Token::Integer(2),
            Token::CloseParen,
        ]
    );
}

#[test]
fn comparison_operators_are_symbols() {
    assert_eq!(
        tokens_of("(< <= = >= >)"),
        vec![
            Token::OpenParen,
            Token::Sym("<".to_string()),
            Token::Sym("<=".to_string()),
            Token::Sym("=".to_string()),
            Token::Sym(">=".to_string()),
            Token::Sym(">".to_string()),
            Token::CloseParen,
        ]
    );
}

#[test]
fn illegal_character_is_a_syntax_error() {
    let code = Code::from("@");
    let err = Tokenizer::new(code, Trace::Off).unwrap_err();
    assert!(err.is_syntax());
}
