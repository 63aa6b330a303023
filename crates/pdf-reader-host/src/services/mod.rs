// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: configuration loading and the request/response loop that
// connects the channel transport to the file handler.

pub mod config_file;
pub mod session;
