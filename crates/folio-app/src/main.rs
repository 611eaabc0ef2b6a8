// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folio: résumé pages to a print-ready PDF with an ATS text layer
//
// Entry point. Initialises logging, resolves configuration from `folio.json`
// and the command line, and runs the build pipeline.

mod cli;
mod pages;
mod pipeline;

use std::process::ExitCode;

use clap::Parser;
use folio_core::AppConfig;
use folio_core::error::Result;

use cli::Cli;
use pipeline::{BuildReport, Pipeline};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting portfolio generation");

    match run(&cli) {
        Ok(report) => {
            for page in &report.pages {
                tracing::debug!(
                    page = %page.id,
                    image = %page.image_path.display(),
                    text = ?page.text_path,
                    chars = page.text.len(),
                    "Page artifacts"
                );
            }
            tracing::info!(
                pages = report.pages.len(),
                "Portfolio generated: {}",
                report.pdf_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Portfolio generation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<BuildReport> {
    let mut config = AppConfig::load_or_default(&cli.config)?;
    cli.apply(&mut config);
    Pipeline::new(config)?.run()
}
