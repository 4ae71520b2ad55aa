// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Peter Carlton

use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;
use log::debug;

use crate::annot::{Classification, Failures};
use crate::seq::record::SeqRecord;

pub const REPORT_HEADER: [&str; 4] = ["id", "description", "sequence", "TF/NTF"];

const ROW_TERMINATOR: &str = "\r\n";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Start from an empty report (the default).
    #[default]
    Truncate,
    /// Add to an existing report. A fresh header row is written on each run.
    Append,
}

// Quote a CSV field only when it has to be: separators, quotes or line breaks.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains(&[',', '"', '\r', '\n'][..]) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn csv_row<'a, I: IntoIterator<Item = &'a str>>(fields: I) -> String {
    let mut row = fields.into_iter().map(csv_field).join(",");
    row.push_str(ROW_TERMINATOR);
    row
}

/// CSV report of classified records. Records whose lookup failed are skipped.
pub struct ReportWriter {
    out: BufWriter<File>,
    rows: usize,
}

impl ReportWriter {
    pub fn create<P: AsRef<Path>>(path: P, mode: WriteMode) -> std::io::Result<Self> {
        let file = match mode {
            WriteMode::Truncate => File::create(&path)?,
            WriteMode::Append => OpenOptions::new().create(true).append(true).open(&path)?,
        };
        debug!("Opened report {} ({:?})", path.as_ref().display(), mode);
        let mut out = BufWriter::new(file);
        out.write_all(csv_row(REPORT_HEADER).as_bytes())?;
        Ok(ReportWriter { out, rows: 0 })
    }

    /// Writes one row; returns whether a row was written.
    pub fn write_row(
        &mut self,
        record: &SeqRecord,
        classification: Classification,
    ) -> std::io::Result<bool> {
        let Some(label) = classification.label() else {
            return Ok(false);
        };
        let row = csv_row([
            record.id.as_str(),
            record.description.as_str(),
            record.sequence.as_str(),
            label,
        ]);
        self.out.write_all(row.as_bytes())?;
        self.rows += 1;
        Ok(true)
    }

    /// Flushes the report and returns the number of rows written (header excluded).
    pub fn finish(mut self) -> std::io::Result<usize> {
        self.out.flush()?;
        Ok(self.rows)
    }
}

pub fn write_report<'a, P, I>(entries: I, path: P, mode: WriteMode) -> std::io::Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (&'a SeqRecord, Classification)>,
{
    let mut writer = ReportWriter::create(path, mode)?;
    for (record, classification) in entries {
        writer.write_row(record, classification)?;
    }
    writer.finish()
}

/// Overwrites `path` with the failed ids, one per line, in the order they were recorded.
pub fn write_failures<P: AsRef<Path>>(failures: &Failures, path: P) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for id in failures.ids() {
        out.write_all(csv_row([id]).as_bytes())?;
    }
    out.flush()
}
