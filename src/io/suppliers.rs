// src/io/suppliers.rs

use crate::error::PipelineResult;
use crate::io::columns;
use crate::io::table::{cell, RawTable};
use crate::strategy::implementations::contains_word;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Item codes of a supplier list.
///
/// With `tag = Some((column_slug, word))`, only rows whose tag column holds
/// `word` as a whole word are kept, unless no row does, in which case the
/// whole list is used. A list with no item-code column yields an empty set.
pub fn codes_from_table(table: &RawTable, tag: Option<(&str, &str)>) -> HashSet<String> {
    let Some(item_idx) = table.find(columns::is_item_code_column) else {
        tracing::warn!("{}: no item code column, list ignored", table.source_name);
        return HashSet::new();
    };
    let tag_filter = tag.and_then(|(column, word)| table.find(|s| s == column).map(|idx| (idx, word)));

    let mut all = HashSet::new();
    let mut tagged = HashSet::new();
    for row in &table.rows {
        let code = cell(row, item_idx).to_uppercase();
        if code.is_empty() {
            continue;
        }
        if let Some((idx, word)) = tag_filter {
            if contains_word(cell(row, idx), word) {
                tagged.insert(code.clone());
            }
        }
        all.insert(code);
    }

    if tagged.is_empty() {
        all
    } else {
        tagged
    }
}

/// CSV form of `codes_from_table`.
pub fn read_reference_codes<R: Read>(
    reader: R,
    source_name: &str,
    tag: Option<(&str, &str)>,
) -> PipelineResult<HashSet<String>> {
    Ok(codes_from_table(&RawTable::from_csv(reader, source_name)?, tag))
}

fn load_list(path: &Path, tag: Option<(&str, &str)>) -> HashSet<String> {
    match RawTable::open(path) {
        Ok(table) => {
            let codes = codes_from_table(&table, tag);
            tracing::info!("{}: {} supplier codes", table.source_name, codes.len());
            codes
        }
        Err(e) => {
            tracing::warn!("could not read supplier list {}: {}", path.display(), e);
            HashSet::new()
        }
    }
}

/// Every code in the HELI list (CSV or workbook). Unreadable lists give an
/// empty set.
pub fn load_heli_codes(path: &Path) -> HashSet<String> {
    load_list(path, None)
}

/// Codes in the TVH list, narrowed to rows tagged "tvh" in the
/// "Nombre extranjero" column when that column exists.
pub fn load_tvh_codes(path: &Path) -> HashSet<String> {
    load_list(path, Some(("nombre_extranjero", "tvh")))
}
