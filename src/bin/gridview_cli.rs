//! CLI tool for gridview - previews table snapshots in the terminal
//!
//! Usage:
//!   gridview_cli <table.json>                        # Preview to stdout
//!   gridview_cli <table.json> --diff <other.json>    # Mark rows against a comparison
//!   gridview_cli <table.json> --start 500 --rows 40  # Preview a slice

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::env;
use std::fs;

use gridview::diff::{classify_cell, DiffKind};
use gridview::error::Result;
use gridview::layout::ColumnLayout;
use gridview::measure::HeuristicMeasure;
use gridview::types::Table;

fn load_table(path: &str) -> Result<Table> {
    let data = fs::read(path)?;
    let table: Table = serde_json::from_slice(&data)?;
    Ok(table.normalized())
}

/// Pad or ellipsis-truncate to an exact character width.
fn fit(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        let mut out = text.to_string();
        out.extend(std::iter::repeat(' ').take(width - count));
        return out;
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: gridview_cli <table.json> [--diff other.json] [--start row] [--rows count]"
        );
        std::process::exit(1);
    }

    let input_path = &args[1];
    let mut diff_path: Option<&String> = None;
    let mut start_row: usize = 0;
    let mut preview_rows: usize = 20;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--diff" if i + 1 < args.len() => {
                diff_path = Some(&args[i + 1]);
                i += 2;
            }
            "--start" if i + 1 < args.len() => {
                start_row = args[i + 1].parse().unwrap_or(0);
                i += 2;
            }
            "--rows" if i + 1 < args.len() => {
                preview_rows = args[i + 1].parse().unwrap_or(20).max(1);
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
    }

    let table = match load_table(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {input_path}: {e}");
            std::process::exit(1);
        }
    };
    let comparison = match diff_path {
        Some(path) => match load_table(path) {
            Ok(t) => Some(t),
            Err(e) => {
                eprintln!("Error reading {path}: {e}");
                std::process::exit(1);
            }
        },
        None => None,
    };

    println!(
        "table {} ({} rows x {} columns)",
        table.identity,
        table.row_count(),
        table.column_count()
    );

    if table.is_empty() {
        println!("(no data)");
        return;
    }

    // Size columns through the same auto-fit the grid uses, then map pixel
    // widths to character counts for the terminal.
    let mut layout = ColumnLayout::new(&table.columns);
    let mut measure = HeuristicMeasure;
    layout.auto_fit(&table, Some(&mut measure), "13px sans-serif", None);
    let char_widths: Vec<usize> = (0..table.column_count())
        .map(|col| {
            let chars = (layout.base_width_at(col) / 7.0).ceil() as usize;
            chars.clamp(4, 40)
        })
        .collect();

    let mut header = String::from("  ");
    for (col, name) in table.columns.iter().enumerate() {
        header.push_str(&fit(name, char_widths[col]));
        header.push_str("  ");
    }
    println!("{}", header.trim_end());
    println!("{}", "-".repeat(header.trim_end().chars().count()));

    let end = start_row.saturating_add(preview_rows).min(table.row_count());
    for row in start_row..end {
        let mut marker = ' ';
        let mut line = String::new();
        for col in 0..table.column_count() {
            match classify_cell(&table, comparison.as_ref(), row, col) {
                DiffKind::NewRow => marker = '+',
                DiffKind::Changed => {
                    if marker == ' ' {
                        marker = '~';
                    }
                }
                DiffKind::Unchanged => {}
            }
            line.push_str(&fit(&table.cell_text(row, col), char_widths[col]));
            line.push_str("  ");
        }
        println!("{marker} {}", line.trim_end());
    }
    if end < table.row_count() {
        println!("... {} more rows", table.row_count() - end);
    }
}
