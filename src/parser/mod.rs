mod cursor;
mod parse_error;

use crate::ast::*;
use crate::lexer::{LocatedToken, Token};
use cursor::Cursor;
pub use cursor::MAX_NESTING;
pub use parse_error::{InnerParseError, ParseError, Result};

use tracing::debug;

fn get_prec(token: &Token) -> u64 {
    match token {
        Token::Asterisk => 50,
        Token::Plus => 45,
        _ => 0,
    }
}

impl TryFrom<&Token> for AstBinaryOp {
    type Error = InnerParseError;
    fn try_from(value: &Token) -> std::result::Result<Self, InnerParseError> {
        match value {
            Token::Plus => Ok(AstBinaryOp::Add),
            Token::Asterisk => Ok(AstBinaryOp::Multiply),
            _ => Err(InnerParseError::BadFactor(value.clone())),
        }
    }
}

fn parse_identifier(cursor: &mut Cursor) -> Result<Identifier> {
    let pos = cursor.get_pos();
    match cursor.next_token() {
        Token::Identifier(name) => Ok(name),
        next => Err(InnerParseError::ExpectedIdentifierButGot(next).set_pos(pos)),
    }
}

fn parse_params(cursor: &mut Cursor) -> Result<Vec<Identifier>> {
    let mut params = Vec::new();

    if cursor.bump_if(&Token::Void) || cursor.peek_is(&Token::CloseParanth) {
        return Ok(params);
    }

    loop {
        if !cursor.peek_is(&Token::Int) {
            let pos = cursor.get_pos();
            return Err(InnerParseError::BadParameter(cursor.peek().clone()).set_pos(pos));
        }
        cursor.bump();
        params.push(parse_identifier(cursor)?);

        if !cursor.bump_if(&Token::Comma) {
            break;
        }
        if cursor.peek_is(&Token::CloseParanth) {
            let pos = cursor.get_pos();
            return Err(InnerParseError::TrailingComma("parameter").set_pos(pos));
        }
    }

    Ok(params)
}

fn parse_binary_op(cursor: &mut Cursor) -> Result<AstBinaryOp> {
    let pos = cursor.get_pos();
    let next = cursor.next_token();
    AstBinaryOp::try_from(&next).map_err(|err| err.set_pos(pos))
}

fn parse_exp_binary(cursor: &mut Cursor, prec: u64, left: Exp) -> Result<Exp> {
    let op = parse_binary_op(cursor)?;
    let right = parse_exp(cursor, prec + 1).map(Box::new)?;
    Ok(Exp::binary(op, Box::new(left), right))
}

fn parse_exp(cursor: &mut Cursor, min_prec: u64) -> Result<Exp> {
    cursor.enter_nested()?;
    let exp = parse_exp_climb(cursor, min_prec)?;
    cursor.leave_nested();
    Ok(exp)
}

fn parse_exp_climb(cursor: &mut Cursor, min_prec: u64) -> Result<Exp> {
    let mut left = parse_factor(cursor)?;

    while cursor.peek().is_binaryop() {
        let prec = get_prec(cursor.peek());
        if prec < min_prec {
            break;
        }
        left = parse_exp_binary(cursor, prec, left)?;
    }

    Ok(left)
}

fn parse_arguments(cursor: &mut Cursor) -> Result<Vec<Exp>> {
    let mut args = Vec::new();

    if cursor.peek_is(&Token::CloseParanth) {
        return Ok(args);
    }

    loop {
        args.push(parse_exp(cursor, 0)?);
        if !cursor.bump_if(&Token::Comma) {
            break;
        }
        if cursor.peek_is(&Token::CloseParanth) {
            let pos = cursor.get_pos();
            return Err(InnerParseError::TrailingComma("argument").set_pos(pos));
        }
    }

    Ok(args)
}

fn parse_factor_call(cursor: &mut Cursor, name: Identifier) -> Result<Exp> {
    cursor.expect(&Token::OpenParanth)?;
    let arguments = parse_arguments(cursor)?;
    cursor.expect(&Token::CloseParanth)?;
    Ok(Exp::call(name, arguments))
}

fn parse_factor_identifier(cursor: &mut Cursor) -> Result<Exp> {
    let name = parse_identifier(cursor)?;
    if cursor.peek_is(&Token::OpenParanth) {
        parse_factor_call(cursor, name)
    } else {
        Ok(Exp::var(name))
    }
}

fn parse_factor_subexp(cursor: &mut Cursor) -> Result<Exp> {
    cursor.expect(&Token::OpenParanth)?;
    let exp = parse_exp(cursor, 0)?;
    cursor.expect(&Token::CloseParanth)?;
    Ok(exp)
}

fn parse_factor(cursor: &mut Cursor) -> Result<Exp> {
    match cursor.peek() {
        Token::Identifier(_) => parse_factor_identifier(cursor),
        Token::OpenParanth => parse_factor_subexp(cursor),
        Token::Constant(c) => {
            let constant = Exp::constant(*c);
            cursor.bump();
            Ok(constant)
        }
        peek => {
            let peek = peek.clone();
            let pos = cursor.get_pos();
            Err(InnerParseError::BadFactor(peek).set_pos(pos))
        }
    }
}

fn parse_return(cursor: &mut Cursor) -> Result<Statement> {
    cursor.expect(&Token::Return)?;
    let exp = parse_exp(cursor, 0)?;
    cursor.expect(&Token::Semicolon)?;
    Ok(Statement::Return(exp))
}

fn parse_declaration(cursor: &mut Cursor) -> Result<Statement> {
    cursor.expect(&Token::Int)?;
    let name = parse_identifier(cursor)?;
    cursor.expect(&Token::Assign)?;
    let init = parse_exp(cursor, 0)?;
    cursor.expect(&Token::Semicolon)?;
    let var = Var::new(name);
    Ok(Statement::VarDecl(VarDecl { var, init }))
}

fn parse_statement_exp(cursor: &mut Cursor) -> Result<Statement> {
    let exp = parse_exp(cursor, 0)?;
    cursor.expect(&Token::Semicolon)?;
    Ok(Statement::Exp(exp))
}

fn parse_statement(cursor: &mut Cursor) -> Result<Statement> {
    match cursor.peek() {
        Token::Return => parse_return(cursor),
        Token::Int => parse_declaration(cursor),
        _ => parse_statement_exp(cursor),
    }
}

fn parse_block(cursor: &mut Cursor) -> Result<Block> {
    let mut statements = Vec::new();

    cursor.expect(&Token::OpenCurly)?;

    while !cursor.bump_if(&Token::CloseCurly) {
        if cursor.at_end() {
            let pos = cursor.get_pos();
            let err = InnerParseError::ExpectedButGot(Token::CloseCurly, Token::Eof);
            return Err(err.set_pos(pos));
        }
        statements.push(parse_statement(cursor)?);
    }

    Ok(Block { statements })
}

fn parse_function(cursor: &mut Cursor) -> Result<FunctionDecl> {
    cursor.expect(&Token::Int)?;
    let name = parse_identifier(cursor)?;
    cursor.expect(&Token::OpenParanth)?;
    let params = parse_params(cursor)?;
    cursor.expect(&Token::CloseParanth)?;
    let has_body = !cursor.bump_if(&Token::Semicolon);
    let body = has_body.then(|| parse_block(cursor)).transpose()?;

    Ok(FunctionDecl { name, params, body })
}

pub fn parse(tokens: &[LocatedToken]) -> Result<TranslationUnit> {
    let mut functions = Vec::new();
    let mut cursor = Cursor::new(tokens);

    while !cursor.at_end() {
        let f = parse_function(&mut cursor)?;
        functions.push(f);
    }
    debug!(functions = functions.len(), "parsing finished");
    Ok(TranslationUnit { functions })
}
