mod args;
mod driver_error;

use args::Args;
use clap::Parser;
use driver_error::DriverError;
use nanocc::*;

use std::fs;
use std::process::ExitCode;
use tracing::{debug, info};

type Result<T> = std::result::Result<T, DriverError>;

fn read_source(args: &Args) -> Result<String> {
    let file_exists = fs::exists(&args.input).map_err(|e| DriverError::io(&args.input, e))?;
    if !file_exists {
        let filename = args.input.to_string_lossy().to_string();
        return Err(DriverError::InputFileDoesNotExist(filename));
    }
    fs::read_to_string(&args.input).map_err(|e| DriverError::io(&args.input, e))
}

fn tokenize(source: &str, args: &Args) -> Result<Vec<lexer::LocatedToken>> {
    let tokens = lexer::lex(source)?;
    if args.lex {
        println!("{tokens:#?}");
    }
    Ok(tokens)
}

fn parse(tokens: &[lexer::LocatedToken], args: &Args) -> Result<ast::TranslationUnit> {
    let ast = parser::parse(tokens)?;
    if args.parse {
        println!("{ast:#?}");
    }
    Ok(ast)
}

fn validate(ast: ast::TranslationUnit, args: &Args) -> Result<semantic_analysis::ValidatedAst> {
    let validated = semantic_analysis::validate(ast)?;
    if args.validate {
        println!("{:#?}", validated.ast);
    }
    Ok(validated)
}

fn gen_asm(validated: &semantic_analysis::ValidatedAst, args: &Args) -> codegen::AsmProgram {
    let program = codegen::codegen(validated);
    if args.codegen {
        println!("{program:#?}");
    }
    program
}

fn emit_asm(program: &codegen::AsmProgram, args: &Args) -> Result<()> {
    let Some(output) = &args.output else {
        return Err(DriverError::Usage("missing output file (-o)".to_owned()));
    };
    let asm = emission::emit(program)?;
    fs::write(output, asm).map_err(|e| DriverError::io(output, e))?;
    info!(output = %output.display(), "wrote assembly");
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    if args.no_link {
        let msg = "-c is not supported; only assembly output (-S) is available";
        return Err(DriverError::Usage(msg.to_owned()));
    }
    debug!(input = %args.input.display(), explicit_s = args.no_assemble, "compiling");

    let source = read_source(args)?;
    let tokens = tokenize(&source, args)?;
    if args.lex {
        return Ok(());
    }

    let ast = parse(&tokens, args)?;
    if args.parse {
        return Ok(());
    }

    let validated = validate(ast, args)?;
    if args.validate {
        return Ok(());
    }

    let program = gen_asm(&validated, args);
    if args.stops_early() {
        return Ok(());
    }

    emit_asm(&program, args)
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(args.log_level())
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("nanocc: {err}");
            ExitCode::FAILURE
        }
    }
}
