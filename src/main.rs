// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Thomas Junier
// Modifications (c) 2026 Peter Carlton

use tfclass::errors::TfError;

fn main() -> Result<(), TfError> {
    tfclass::run()
}
