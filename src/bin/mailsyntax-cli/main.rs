use anyhow::{Context, Result};

use std::io::{self, BufRead};

mod args;
mod output;

use args::{Cli, Commands};
use output::OutputRow;

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "with-tracing")]
    init_tracing();

    let options = cli.options();
    let mut rows: Vec<OutputRow> = Vec::new();

    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            let email = line.strip_suffix('\r').unwrap_or(&line);
            rows.push(check(email, options));
        }
    } else if let Some(Commands::Validate { email }) = &cli.cmd {
        rows.push(check(email, options));
    } else {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    output::write_reports(&rows, &cli)?;

    // codes de sortie : 0 OK, 2 invalids, 1 fatal
    if output::any_invalid(&rows) {
        std::process::exit(2);
    }
    Ok(())
}

fn check(email: &str, options: mailsyntax::ValidationOptions) -> OutputRow {
    let result = mailsyntax::validate_with_result(email, options);

    #[cfg(feature = "with-tracing")]
    {
        tracing::trace!(code = result.code(), bytes = email.len(), "email syntax verdict");
        if !result.is_success() {
            tracing::debug!(email, %result, "rejected");
        }
    }

    OutputRow::new(email, result)
}

#[cfg(feature = "with-tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
}
