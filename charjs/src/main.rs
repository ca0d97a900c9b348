use charjs::{Engine, Error, Source};
use clap::Parser;
use console::style;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

/// Run a JavaScript file
#[derive(Parser, Debug)]
#[command(name = "charjs", version, long_about = None)]
struct Args {
    /// Script to run
    path: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // RUST_LOG controls the log level, warnings only by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let code = match std::fs::read_to_string(&args.path) {
        Ok(code) => code,
        Err(err) => {
            report(format!("cannot read {}: {}", args.path.display(), err));
            return ExitCode::FAILURE;
        }
    };

    let mut engine = Engine::new();
    match engine.evaluate(&code) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            report(located(&args.path, &code, &err));
            ExitCode::FAILURE
        }
    }
}

/// Prefixes lexical and syntax errors with `path:line:column`.
fn located(path: &Path, code: &str, err: &Error) -> String {
    match err.position() {
        Some(position) => {
            let (line, column) = Source::new(code).line_col(position);
            format!("{}:{}:{}: {}", path.display(), line, column, err)
        }
        None => err.to_string(),
    }
}

fn report(message: impl Display) {
    eprintln!("{} {}", style("error:").red().bold(), message);
}
