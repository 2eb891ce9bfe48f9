use clap::Parser;
use std::path::PathBuf;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser)]
#[command(name = "nanocc", version, about = "Nano C compiler", long_about = None)]
pub struct Args {
    /// Stop after lexing and print the tokens
    #[arg(long)]
    pub lex: bool,

    /// Stop after parsing and print the AST
    #[arg(long)]
    pub parse: bool,

    /// Stop after semantic analysis and print the resolved AST
    #[arg(long)]
    pub validate: bool,

    /// Stop after code generation and print the assembly tree
    #[arg(long)]
    pub codegen: bool,

    /// Compile only; do not assemble or link (always on)
    #[arg(short = 'S')]
    pub no_assemble: bool,

    /// Compile and assemble (not supported)
    #[arg(short = 'c')]
    pub no_link: bool,

    /// Output assembly file, required unless a stage flag is given
    #[arg(
        short = 'o',
        value_name = "OUTPUT",
        required_unless_present_any = ["lex", "parse", "validate", "codegen"]
    )]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    pub input: PathBuf,
}

impl Args {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    /// True when a stage flag asked to stop before emission.
    pub fn stops_early(&self) -> bool {
        self.lex || self.parse || self.validate || self.codegen
    }
}
