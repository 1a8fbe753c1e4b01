mod debug_report;

use amrgraph::{Options, parse_verbose_with};
use clap::Parser;
use std::io::{self, IsTerminal, Read};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Parse AMR-style bracketed graph notation and print its nodes and edges.
#[derive(Debug, Parser)]
#[command(name = "amrgraph", version, about)]
struct Cli {
    /// Input text to parse. If omitted, reads remaining args or stdin.
    #[arg(short, long, conflicts_with = "words")]
    input: Option<String>,

    /// Print the graph as JSON instead of a report.
    #[arg(long)]
    json: bool,

    /// Force ANSI color output.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,

    /// Require '/' between handle and concept.
    #[arg(long)]
    strict_separator: bool,

    /// Ignore lines starting with '#' (corpus metadata).
    #[arg(long)]
    skip_comments: bool,

    /// Fail on words outside any node and on relations without a value.
    #[arg(long)]
    reject_stray: bool,

    /// Maximum node nesting depth.
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Include per-stage timings in the report.
    #[arg(long)]
    timings: bool,

    /// Input words (joined with spaces).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let input = match read_input(&cli) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    let options = Options {
        strict_separator: cli.strict_separator,
        skip_comment_lines: cli.skip_comments,
        max_depth: cli.max_depth,
        reject_stray_tokens: cli.reject_stray,
    };

    let res = match parse_verbose_with(&input, &options) {
        Ok(res) => res,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&res.graph) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to serialize graph: {err}");
                return ExitCode::from(1);
            }
        }
        return ExitCode::SUCCESS;
    }

    let color = if cli.no_color { false } else { cli.color || io::stdout().is_terminal() };
    debug_report::print_run(&res, color, cli.timings);
    ExitCode::SUCCESS
}

fn read_input(cli: &Cli) -> Result<String, String> {
    let input = match (&cli.input, cli.words.is_empty()) {
        (Some(text), _) => text.clone(),
        (None, false) => cli.words.join(" "),
        (None, true) => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err("error: no input provided (pass --input, words, or pipe text on stdin)".to_string());
    }
    Ok(input)
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}
