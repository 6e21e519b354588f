// jackdaw: Jack syntax analyzer with a parse tree explorer

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser as CliParser, ValueEnum};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::EnvFilter;

use jackdaw::formats::{serialize_tokens, serialize_tree, to_json};
use jackdaw::parser::config::DEFAULT_MAX_DEPTH;
use jackdaw::parser::{Lexer, ParseError, ParseTree, Parser, ParserConfig, Token, TypeNamePolicy};
use jackdaw::ui::App;
use jackdaw::JackResult;

/// What to write for the analyzed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Nested tagged text of the parse tree
    Tree,
    /// Tagged listing of the token sequence
    Tokens,
    /// Parse tree as JSON
    Json,
    /// Interactive terminal explorer
    Explore,
}

#[derive(Debug, CliParser)]
#[command(name = "jackdaw", version)]
#[command(about = "Syntax analyzer for the Jack language")]
struct Args {
    /// Path to the .jack file to analyze
    file: PathBuf,

    /// Output to produce
    #[arg(long, value_enum, default_value_t = Emit::Tree)]
    emit: Emit,

    /// Parse with the minimal program rule instead of a full class
    #[arg(long)]
    program: bool,

    /// Accept only these identifiers as class type names (repeatable)
    #[arg(long = "type-name", value_name = "NAME")]
    type_names: Vec<String>,

    /// Most terms and statement blocks allowed to nest inside each other
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

impl Args {
    fn config(&self) -> ParserConfig {
        let config = ParserConfig::default().with_max_depth(self.max_depth);
        if self.type_names.is_empty() {
            return config;
        }
        config.with_type_names(TypeNamePolicy::only(self.type_names.iter().cloned()))
    }

    fn parse_tokens(&self, tokens: Vec<Token>) -> Result<ParseTree, ParseError> {
        let mut parser = Parser::with_config(tokens, self.config());
        if self.program {
            parser.parse_program()
        } else {
            parser.parse_class()
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> JackResult<()> {
    let source = fs::read_to_string(&args.file)?;
    tracing::info!(file = %args.file.display(), bytes = source.len(), "analyzing");

    let tokens = Lexer::new(&source).tokenize()?;
    let mut stdout = io::stdout().lock();

    match args.emit {
        Emit::Tokens => write!(stdout, "{}", serialize_tokens(&tokens))?,
        Emit::Tree => write!(stdout, "{}", serialize_tree(&args.parse_tokens(tokens)?))?,
        Emit::Json => writeln!(stdout, "{}", to_json(&args.parse_tokens(tokens)?)?)?,
        Emit::Explore => {
            drop(stdout);
            explore(source, args.parse_tokens(tokens))?;
        }
    }

    Ok(())
}

/// Open the tree explorer; a failed parse is shown rather than reported
fn explore(source: String, outcome: Result<ParseTree, ParseError>) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(source, outcome);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["jackdaw", "Main.jack"]).unwrap();
        assert_eq!(args.emit, Emit::Tree);
        assert!(!args.program);
        assert_eq!(args.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(args.config().type_names, TypeNamePolicy::AnyIdentifier);
    }

    #[test]
    fn test_options_reach_the_parser() {
        let args = Args::try_parse_from([
            "jackdaw",
            "--emit",
            "json",
            "--type-name",
            "Game",
            "--max-depth",
            "3",
            "Main.jack",
        ])
        .unwrap();
        assert_eq!(args.emit, Emit::Json);
        assert_eq!(args.config().max_depth, 3);

        let tokens = Lexer::new("class Main { function Game make() { return ((1)); } }")
            .tokenize()
            .unwrap();
        let err = args.parse_tokens(tokens).unwrap_err();
        assert_eq!(
            err.expected(),
            &jackdaw::parser::Expected::ShallowerNesting { limit: 3 }
        );
    }

    #[test]
    fn test_program_flag() {
        let args = Args::try_parse_from(["jackdaw", "--program", "Main.jack"]).unwrap();
        let tokens = Lexer::new("class Main { }").tokenize().unwrap();
        assert_eq!(args.parse_tokens(tokens).unwrap().children.len(), 4);
    }
}
