// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Newline-delimited JSON transport for the file handler channel.
//
// One `MethodCall` per input line, one `MethodResponse` per output line, in
// order. Calls run one at a time on the calling thread.

use std::io::{self, BufRead, Write};

use pdf_reader_bridge::{ContentResolver, FileHandler, MethodCall, MethodResponse};
use pdf_reader_core::ErrorCode;
use tracing::{debug, warn};

/// Counters reported when the input closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub calls: usize,
    pub malformed: usize,
}

/// Serve calls from `input` until end of input.
///
/// Only transport failures end the session early; every call, including a
/// malformed one, gets a response line.
pub fn serve<R, I, O>(
    handler: &FileHandler<R>,
    input: I,
    mut output: O,
) -> io::Result<SessionStats>
where
    R: ContentResolver,
    I: BufRead,
    O: Write,
{
    let mut stats = SessionStats::default();
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<MethodCall>(line) {
            Ok(call) => {
                stats.calls += 1;
                handler.handle(&call)
            }
            Err(e) => {
                stats.malformed += 1;
                warn!(error = %e, "malformed method call");
                MethodResponse::error(
                    ErrorCode::InvalidArguments,
                    format!("Malformed method call: {e}"),
                )
            }
        };

        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
        debug!(success = response.is_success(), "response written");
    }
    Ok(stats)
}
