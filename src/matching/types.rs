use serde::{Deserialize, Serialize};

use crate::segment::types::EntitySpan;

/// One candidate record returned by the external directory. Read-only to the
/// pipeline; `source` names the directory it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub source: String,
}

/// Scoring outcome for one query span. Exactly one of these exists per input
/// span; `best_record` is None when the directory returned no candidates.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub query: EntitySpan,
    pub best_record: Option<DirectoryRecord>,
    pub score: f64,
    pub accepted: bool,
}

/// Flattened row handed to the external export collaborator. Field set and
/// ordering are fixed here; the file format is not.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub original_name: String,
    pub page: Option<u32>,
    pub matched_name: Option<String>,
    pub similarity_score: f64,
    pub accepted: bool,
    pub jurisdiction: Option<String>,
    pub identifier: Option<String>,
    pub status: Option<String>,
    pub source: Option<String>,
}

impl ExportRow {
    pub fn from_result(result: &MatchResult) -> Self {
        ExportRow {
            original_name: result.query.text.clone(),
            page: result.query.page,
            matched_name: result.best_record.as_ref().map(|r| r.name.clone()),
            similarity_score: (result.score * 100.0).round() / 100.0,
            accepted: result.accepted,
            jurisdiction: result.best_record.as_ref().and_then(|r| r.jurisdiction.clone()),
            identifier: result.best_record.as_ref().and_then(|r| r.identifier.clone()),
            status: result.best_record.as_ref().and_then(|r| r.status.clone()),
            source: result.best_record.as_ref().map(|r| r.source.clone()),
        }
    }
}

/// Export rows in input order, one per MatchResult.
pub fn export_rows(results: &[MatchResult]) -> Vec<ExportRow> {
    results.iter().map(ExportRow::from_result).collect()
}
