//! `rata`: run a script or start an interactive session

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rata::{EvalConfig, Session, VERSION};

const HELP: &str = "\
Commands:
  :bindings   list the current bindings
  :help       show this message
  :quit       leave the session

Anything else is evaluated as Rata statements.";

#[derive(Parser, Debug)]
#[command(name = "rata", version, about = "The Rata pipeline scripting language")]
struct Cli {
    /// Module source file to run; starts a REPL when omitted
    file: Option<PathBuf>,

    /// Maximum closure call depth
    #[arg(long, default_value_t = 1000)]
    max_call_depth: usize,

    /// Emit a trace event for every call (see RATA_LOG)
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("RATA_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = EvalConfig::with_max_call_depth(cli.max_call_depth).with_trace(cli.trace);
    let mut session = Session::new(config);

    match cli.file {
        Some(path) => run_file(&mut session, &path),
        None => repl(&mut session),
    }
}

fn run_file(session: &mut Session, path: &Path) -> Result<()> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    info!(path = %path.display(), "running script");

    session
        .run_script(&source)
        .map_err(|e| anyhow!("{} error: {}", e.kind(), e))?;
    Ok(())
}

fn repl(session: &mut Session) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("Rata {} (:help for commands)", VERSION);

    loop {
        let line = match editor.readline("rata> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        editor.add_history_entry(input)?;

        match input {
            ":quit" | ":q" => break,
            ":help" => println!("{}", HELP),
            ":bindings" => {
                for (name, value) in session.context().bindings() {
                    println!("{} = {:?}", name, value);
                }
            }
            source => match session.eval_line(source) {
                Ok(value) => println!("{:?}", value),
                Err(e) => match e.location() {
                    Some(span) => eprintln!("{} error at {}: {}", e.kind(), span, e),
                    None => eprintln!("{} error: {}", e.kind(), e),
                },
            },
        }
    }

    Ok(())
}
