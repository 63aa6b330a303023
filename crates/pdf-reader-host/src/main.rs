// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF Reader file handler host
//
// Entry point. Initialises logging, loads the bridge configuration, and serves
// method calls on stdin/stdout until end of input.

mod services;

use std::io;
use std::path::PathBuf;

use pdf_reader_bridge::{FileHandler, platform_bridge};

use services::{config_file, session};

fn main() {
    // Logs go to stderr; stdout carries responses only.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => config_file::load_or_default(&path),
        None => Default::default(),
    };

    let bridge = platform_bridge();
    tracing::info!(
        platform = bridge.platform_name(),
        channel = %config.channel,
        "file handler starting"
    );
    let handler = FileHandler::new(bridge, config);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match session::serve(&handler, stdin, stdout) {
        Ok(stats) => tracing::info!(
            calls = stats.calls,
            malformed = stats.malformed,
            "input closed, shutting down"
        ),
        Err(e) => {
            tracing::error!(error = %e, "channel I/O failed");
            std::process::exit(1);
        }
    }
}
