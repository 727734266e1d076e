//! Phrase table reader.
//!
//! # Format
//! ```text
//! scene,en,zh,tags,level
//! restaurant,Could I see the menu?,可以看看菜单吗？,food,A2
//! airport,Where is gate 12?,,travel,
//! ```
//!
//! `scene` and `en` are required columns; `zh`, `tags` and `level` are
//! optional and default to an empty string. Rows without English text are
//! dropped.

use serde::{Deserialize, Serialize};

use crate::error::{ImportError, Result};

pub const REQUIRED_COLUMNS: [&str; 2] = ["scene", "en"];
pub const OPTIONAL_COLUMNS: [&str; 3] = ["zh", "tags", "level"];

/// A phrase ready to be inserted into the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseRow {
    pub scene: String,
    pub en: String,
    pub zh: String,
    pub tags: String,
    pub level: String,
}

/// Raw table contents: header names and trimmed cell values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// Phrases extracted from a table plus how many rows were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport {
    pub rows: Vec<PhraseRow>,
    pub total_rows: usize,
    pub dropped_rows: usize,
}

/// Read a delimited table with a header row.
///
/// Fails on input the CSV reader cannot decode (e.g. invalid UTF-8). Short
/// rows are accepted; their missing cells read as empty.
pub fn read_table(content: &[u8]) -> Result<Table> {
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(Table { headers, records })
}

impl Table {
    /// Required columns absent from the header row.
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|col| !self.headers.iter().any(|h| h == *col))
            .map(|col| col.to_string())
            .collect()
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Convert to phrase rows, failing if a required column is missing.
    pub fn into_phrases(self) -> Result<ParsedImport> {
        let missing = self.missing_columns();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        let scene = self.column("scene");
        let en = self.column("en");
        let zh = self.column("zh");
        let tags = self.column("tags");
        let level = self.column("level");

        let cell = |record: &[String], idx: Option<usize>| -> String {
            idx.and_then(|i| record.get(i)).cloned().unwrap_or_default()
        };

        let total_rows = self.records.len();
        let rows: Vec<PhraseRow> = self
            .records
            .iter()
            .map(|record| PhraseRow {
                scene: cell(record, scene),
                en: cell(record, en),
                zh: cell(record, zh),
                tags: cell(record, tags),
                level: cell(record, level),
            })
            .filter(|row| !row.en.is_empty())
            .collect();

        Ok(ParsedImport {
            dropped_rows: total_rows - rows.len(),
            rows,
            total_rows,
        })
    }
}

/// Read and validate a phrase table in one step.
pub fn parse_phrases(content: &[u8]) -> Result<ParsedImport> {
    read_table(content)?.into_phrases()
}
