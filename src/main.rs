#![allow(clippy::enum_variant_names)]

use std::process::ExitCode;

use clap::Parser as _;
use tracing::debug;

use crate::{
    application::{Application, data::Verdict},
    cli::Cli,
    report::report_error,
};

mod application;
mod cli;
mod compare;
mod pipeline;
mod queue;
mod report;
mod supplier;

#[compio::main]
async fn main() -> ExitCode {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    match Application::run(cli_args).await {
        Ok(verdict) => verdict.into(),
        Err(error) => {
            report_error(&error);
            Verdict::Failed.into()
        }
    }
}

fn setup_tracing(cli_args: &Cli) {
    tracing_subscriber::fmt()
        .with_max_level(cli_args.log_level.to_level_filter())
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}
