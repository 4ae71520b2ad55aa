// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use crate::errors::TfError;
use crate::seq::file::SeqFile;
use crate::seq::record::SeqRecord;

/// Splits a header line into (id, description). The id is the second '|'-delimited field; the
/// description is the line itself. `line_no` is 1-based and only used for error reporting.
pub fn parse_header(line: &str, line_no: usize) -> Result<(String, String), TfError> {
    match line.split('|').nth(1) {
        Some(id) => Ok((String::from(id), String::from(line))),
        None => Err(TfError::MalformedHeader {
            line: line_no,
            header: String::from(line),
        }),
    }
}

pub fn read_fasta<R: BufRead>(reader: R) -> Result<SeqFile, TfError> {
    let mut result: SeqFile = Vec::new();
    let mut current_record: Option<SeqRecord> = None;

    for (idx, line) in reader.lines().enumerate() {
        let l: String = line?;
        if l.starts_with('>') {
            if let Some(record) = current_record.take() {
                result.push(record);
            }
            let (id, description) = parse_header(&l, idx + 1)?;
            current_record = Some(SeqRecord {
                id,
                description,
                sequence: String::new(),
            });
        } else {
            match current_record.as_mut() {
                // append line to current record's sequence
                Some(record) => record.sequence.push_str(&l),
                None => warn!("Ignoring line {}: no header seen yet", idx + 1),
            }
        }
    }
    if let Some(record) = current_record {
        result.push(record);
    }
    debug!("Read {} FastA records", result.len());
    Ok(result)
}

pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<SeqFile, TfError> {
    let file = File::open(path)?;
    read_fasta(BufReader::new(file))
}
