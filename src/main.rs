use std::{fs, path::Path, process::ExitCode, time::Instant};

use anyhow::Context;
use biesc::{
    cli::{load_config, validate_filename, BiescArgs},
    config::Emit,
    lexer::lexer::tokenize,
    parser::parser::parse_with_options,
    render_error,
};
use clap::Parser;

fn main() -> ExitCode {
    let args = BiescArgs::parse();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(args: BiescArgs) -> anyhow::Result<ExitCode> {
    validate_filename(&args.file)?;
    let settings = args.resolve(load_config(args.use_config.as_deref())?);

    tracing_subscriber::fmt()
        .with_max_level(settings.max_level())
        .with_writer(std::io::stderr)
        .init();

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args.file.display().to_string();

    let start = Instant::now();
    let result = tokenize(&source).and_then(|tokens| {
        tracing::debug!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");
        parse_with_options(tokens, settings.parser)
    });

    match result {
        Ok(program) => {
            tracing::info!(
                statements = program.len(),
                elapsed = ?start.elapsed(),
                "parsed {}",
                file_name
            );

            let text = match settings.emit {
                Emit::Ast => format!("{:#?}\n", program),
                Emit::Source => program.to_string(),
            };
            write_to(settings.output.as_deref(), &text, false)?;

            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(%error, "parse failed");

            let report = render_error(&error, &source, &file_name);
            write_to(settings.error.as_deref(), &report, true)?;

            Ok(ExitCode::FAILURE)
        }
    }
}

/// Writes `text` to `path`, or to stdout/stderr when no path is set.
fn write_to(path: Option<&Path>, text: &str, is_error: bool) -> anyhow::Result<()> {
    match path {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None if is_error => eprint!("{}", text),
        None => print!("{}", text),
    }

    Ok(())
}
