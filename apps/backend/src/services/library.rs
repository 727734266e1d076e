//! Phrase library: CSV import and search.

use checkin_core::{parse_phrases, ParsedImport, Table};

use crate::db::Database;
use crate::error::Result;
use crate::models::{ImportReport, LibraryQuery, LibraryResponse};

/// Maximum phrases returned by a library search.
pub const LIBRARY_LIMIT: i64 = 500;

/// Parse CSV content and insert its phrases.
///
/// Nothing is written unless the whole file parses.
pub async fn import_csv(db: &Database, content: &[u8]) -> Result<ImportReport> {
    let parsed = parse_phrases(content)?;
    import_parsed(db, parsed).await
}

/// Insert phrases from an already-read table (e.g. a saved upload).
pub async fn import_table(db: &Database, table: Table) -> Result<ImportReport> {
    let parsed = table.into_phrases()?;
    import_parsed(db, parsed).await
}

async fn import_parsed(db: &Database, parsed: ParsedImport) -> Result<ImportReport> {
    let inserted = db.insert_phrases(&parsed.rows).await?;
    let report = ImportReport {
        inserted,
        duplicates: parsed.rows.len().saturating_sub(inserted),
        total_rows: parsed.total_rows,
        dropped_rows: parsed.dropped_rows,
    };

    tracing::info!(
        "Imported {} new phrases ({} duplicates, {} rows dropped)",
        report.inserted,
        report.duplicates,
        report.dropped_rows
    );
    Ok(report)
}

/// Search phrases by scene and keyword. Blank filters are ignored.
pub async fn search(db: &Database, query: &LibraryQuery) -> Result<LibraryResponse> {
    let scene = non_blank(query.scene.as_deref());
    let keyword = non_blank(query.keyword.as_deref());
    let phrases = db.search_phrases(scene, keyword, LIBRARY_LIMIT).await?;
    Ok(LibraryResponse { phrases })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
