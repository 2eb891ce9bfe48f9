use super::*;

fn kinds(source: &str) -> Result<Vec<Token>> {
    lex(source).map(|tokens| tokens.into_iter().map(Token::from).collect())
}

#[test]
fn test_basic1() {
    let lexed = kinds("int main(void) {}");
    let expected = vec![
        Token::Int,
        Token::Identifier(String::from("main")),
        Token::OpenParanth,
        Token::Void,
        Token::CloseParanth,
        Token::OpenCurly,
        Token::CloseCurly,
        Token::Eof,
    ];
    assert_eq!(Ok(expected), lexed);
}

#[test]
fn test_declaration_and_call() {
    let lexed = kinds("int x = add(1, 2) * 3;");
    let expected = vec![
        Token::Int,
        Token::Identifier(String::from("x")),
        Token::Assign,
        Token::Identifier(String::from("add")),
        Token::OpenParanth,
        Token::Constant(1),
        Token::Comma,
        Token::Constant(2),
        Token::CloseParanth,
        Token::Asterisk,
        Token::Constant(3),
        Token::Semicolon,
        Token::Eof,
    ];
    assert_eq!(Ok(expected), lexed);
}

#[test]
fn test_empty_input() {
    assert_eq!(Ok(vec![Token::Eof]), kinds("   \n\t "));
}

#[test]
fn test_line_comments() {
    let lexed = kinds("// header\nreturn 1; // trailing\n// last line without newline");
    let expected = vec![
        Token::Return,
        Token::Constant(1),
        Token::Semicolon,
        Token::Eof,
    ];
    assert_eq!(Ok(expected), lexed);
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let lexed = kinds("integer _void return2");
    let expected = vec![
        Token::Identifier(String::from("integer")),
        Token::Identifier(String::from("_void")),
        Token::Identifier(String::from("return2")),
        Token::Eof,
    ];
    assert_eq!(Ok(expected), lexed);
}

#[test]
fn test_positions() {
    let tokens = lex("int main(void) {\n  return 42;\n}").unwrap();
    let ret = &tokens[6];
    assert_eq!(&Token::Return, ret.get_inner());
    assert_eq!(Position::new(2, 3), ret.get_pos());
    let constant = &tokens[7];
    assert_eq!(Token::Constant(42), **constant);
    assert_eq!(Position::new(2, 10), constant.get_pos());
    let eof = tokens.last().unwrap();
    assert!(eof.is_eof());
    assert_eq!(Position::new(3, 2), eof.get_pos());
}

#[test]
fn test_bad_atsign() {
    let lexed = kinds("int main(void) {\nreturn 0@1;\n}");
    let expected = Err(InnerLexError::UnexpectedChar('@').set_pos(Position::new(2, 9)));
    assert_eq!(expected, lexed);
}

#[test]
fn test_minus_is_not_supported() {
    let lexed = kinds("return 2 - 1;");
    assert_eq!(
        Err(InnerLexError::UnexpectedChar('-').set_pos(Position::new(1, 10))),
        lexed
    );
}

#[test]
fn test_bad_constant_suffix() {
    let lexed = kinds("int main(void) {\nreturn 1foo;\n}");
    let expected = Err(InnerLexError::BadConstantSuffix('f').set_pos(Position::new(2, 8)));
    assert_eq!(expected, lexed);
}

#[test]
fn test_constant_overflow() {
    let lexed = kinds("return 99999999999999999999;");
    let expected = InnerLexError::BadConstant(String::from("99999999999999999999"));
    assert_eq!(Err(expected.set_pos(Position::new(1, 8))), lexed);
}

#[test]
fn test_error_message_has_position() {
    let err = lex("int $").unwrap_err();
    assert_eq!("1:5: unexpected character: '$'", err.to_string());
}

#[test]
fn test_lexer_is_restartable() {
    let lexer = Lexer::new("return 7;");
    let first = lexer.clone().collect::<Result<Vec<_>>>().unwrap();
    let second = lexer.collect::<Result<Vec<_>>>().unwrap();
    assert_eq!(first, second);
    assert_eq!(4, first.len());
}

#[test]
fn test_lexer_stops_after_eof_and_errors() {
    let mut lexer = Lexer::new("1");
    assert_eq!(Some(Token::Constant(1)), lexer.next().map(|t| t.unwrap().inner));
    assert_eq!(Some(Token::Eof), lexer.next().map(|t| t.unwrap().inner));
    assert!(lexer.next().is_none());

    let mut lexer = Lexer::new("# 1");
    assert!(matches!(lexer.next(), Some(Err(_))));
    assert!(lexer.next().is_none());
}
