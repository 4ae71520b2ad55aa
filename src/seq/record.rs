// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier

// A protein record as read from a UniProt-style FastA file. The id is the accession taken from the
// header ('>sp|P49711|CTCF_HUMAN ...' -> 'P49711'), the description is the whole header line,
// leading '>' included.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqRecord {
    pub id: String,
    pub description: String,
    pub sequence: String,
}
