// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::Record;

use crate::errors::TfError;

// Writes everything twice: console first, then the log file.
pub struct Tee<A: Write, B: Write> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Tee { first, second }
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}

/// `<timestamp> :: <file> :: <module> [line:<n>] :: <LEVEL> :: <message>`
pub fn format_line(timestamp: impl Display, record: &Record) -> String {
    format!(
        "{} :: {} :: {} [line:{}] :: {} :: {}",
        timestamp,
        record.file().unwrap_or("?"),
        record.module_path().unwrap_or("?"),
        record.line().unwrap_or(0),
        record.level(),
        record.args()
    )
}

/// Sends log lines to stderr and appends them to `log_path`. The level defaults to `info` and
/// can be changed through `RUST_LOG`. Call once, from the entry point.
pub fn init(log_path: &Path) -> Result<(), TfError> {
    let file = OpenOptions::new().create(true).append(true).open(log_path)?;
    let tee = Tee::new(io::stderr(), file);
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", format_line(buf.timestamp(), record)))
        .target(Target::Pipe(Box::new(tee)))
        .try_init()
        .map_err(|e| TfError::Config(format!("logger already initialized: {}", e)))
}
