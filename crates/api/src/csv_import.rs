// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV parsing and column mapping for bulk lead import.
//!
//! Import is a two-step flow: `parse_preview` + `infer_mapping` give the
//! operator a proposed column mapping to review, then `materialize` turns
//! the full file into candidate leads under the confirmed mapping. Nothing
//! in this module touches persistence.

use csv::StringRecord;
use leadflow_domain::Lead;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The lead fields a CSV column can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    /// The prospect's name (mandatory).
    Name,
    /// The prospect's email (mandatory).
    Email,
    /// The prospect's phone number (mandatory).
    Phone,
    /// Acquisition source or channel.
    Source,
    /// Country of interest.
    InterestedCountry,
    /// Course or program of interest.
    Course,
    /// Free-text note, appended to the lead's note list.
    Notes,
    /// Column is ignored.
    Skip,
}

impl LeadField {
    /// Converts this field to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Source => "source",
            Self::InterestedCountry => "interested_country",
            Self::Course => "course",
            Self::Notes => "notes",
            Self::Skip => "skip",
        }
    }
}

/// The fields a mapping must cover before import can proceed.
const MANDATORY_FIELDS: &[LeadField] = &[LeadField::Name, LeadField::Email, LeadField::Phone];

/// A preview of an uploaded CSV for mapping review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvPreview {
    /// The headers in file order.
    pub headers: Vec<String>,
    /// Up to the requested number of raw data rows, in file order.
    pub rows: Vec<Vec<String>>,
    /// The inferred column mapping, aligned with `headers`.
    pub inferred_mapping: Vec<LeadField>,
}

/// The result of materializing a CSV under a confirmed mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedBatch {
    /// Candidate leads, one per accepted row, in file order.
    pub leads: Vec<Lead>,
    /// Rows dropped because a mandatory field was empty or unparseable.
    pub skipped: usize,
}

/// Normalizes a header for matching: lowercase, spaces and underscores removed.
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .replace([' ', '_', '-'], "")
}

/// Infers a target field for a single header.
///
/// Case-insensitive substring matching; the heuristic only proposes a
/// mapping, the operator can override any column before import.
#[must_use]
pub fn infer_field(header: &str) -> LeadField {
    let normalized: String = normalize_header(header);
    if normalized.contains("name") {
        LeadField::Name
    } else if normalized.contains("email") {
        LeadField::Email
    } else if normalized.contains("phone") || normalized.contains("mobile") {
        LeadField::Phone
    } else if normalized.contains("source") || normalized.contains("channel") {
        LeadField::Source
    } else if normalized.contains("country") {
        LeadField::InterestedCountry
    } else if normalized.contains("course") || normalized.contains("title") {
        LeadField::Course
    } else if normalized.contains("note") {
        LeadField::Notes
    } else {
        LeadField::Skip
    }
}

/// Infers a column mapping for a full header row.
#[must_use]
pub fn infer_mapping(headers: &[String]) -> Vec<LeadField> {
    headers.iter().map(|h| infer_field(h)).collect()
}

/// Checks that a mapping covers every mandatory lead field.
#[must_use]
pub fn validate_mapping(mapping: &[LeadField]) -> bool {
    missing_mandatory_fields(mapping).is_empty()
}

/// Lists the mandatory fields a mapping fails to cover.
#[must_use]
pub fn missing_mandatory_fields(mapping: &[LeadField]) -> Vec<String> {
    MANDATORY_FIELDS
        .iter()
        .filter(|field| !mapping.contains(field))
        .map(|field| String::from(field.as_str()))
        .collect()
}

/// Parses the header row and up to `preview_rows` data rows of a CSV.
///
/// # Arguments
///
/// * `csv_content` - The raw CSV content
/// * `preview_rows` - Maximum number of data rows to return
///
/// # Errors
///
/// Returns `ApiError::InvalidCsvFormat` if the headers or any previewed
/// row cannot be parsed.
pub fn parse_preview(csv_content: &str, preview_rows: usize) -> Result<CsvPreview, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to read CSV headers: {e}"),
        })?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(ApiError::InvalidCsvFormat {
            reason: String::from("CSV has no header row"),
        });
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records().take(preview_rows) {
        let record: StringRecord = result.map_err(|e| ApiError::InvalidCsvFormat {
            reason: format!("Failed to parse CSV row: {e}"),
        })?;
        rows.push(record.iter().map(|v| v.trim().to_string()).collect());
    }

    let inferred_mapping: Vec<LeadField> = infer_mapping(&headers);

    Ok(CsvPreview {
        headers,
        rows,
        inferred_mapping,
    })
}

/// Resolves the mapped value for a field from a record.
///
/// When several columns map to the same field, the first non-empty
/// occurrence in column order wins.
fn mapped_value(record: &StringRecord, mapping: &[LeadField], field: LeadField) -> Option<String> {
    mapping
        .iter()
        .enumerate()
        .filter(|(_, target)| **target == field)
        .find_map(|(idx, _)| {
            record
                .get(idx)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
}

/// Collects every mapped note column of a record, in column order.
fn mapped_notes(record: &StringRecord, mapping: &[LeadField]) -> Vec<String> {
    mapping
        .iter()
        .enumerate()
        .filter(|(_, target)| **target == LeadField::Notes)
        .filter_map(|(idx, _)| {
            record
                .get(idx)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .collect()
}

/// Materializes the entire CSV into candidate leads under a mapping.
///
/// Rows whose mandatory fields resolve to empty values are silently
/// dropped and reported only in the aggregate `skipped` count. Rows that
/// fail CSV parsing are counted the same way.
///
/// # Arguments
///
/// * `csv_content` - The raw CSV content
/// * `mapping` - The confirmed column mapping, aligned with the headers
/// * `team_id` - The team the imported leads belong to, if any
/// * `created_by` - The user performing the import
///
/// # Errors
///
/// Returns `ApiError::MappingIncomplete` if the mapping does not cover
/// name, email, and phone, or `ApiError::InvalidCsvFormat` if the
/// headers cannot be parsed.
pub fn materialize(
    csv_content: &str,
    mapping: &[LeadField],
    team_id: Option<i64>,
    created_by: i64,
) -> Result<MaterializedBatch, ApiError> {
    let missing: Vec<String> = missing_mandatory_fields(mapping);
    if !missing.is_empty() {
        return Err(ApiError::MappingIncomplete { missing });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_content.as_bytes());

    reader.headers().map_err(|e| ApiError::InvalidCsvFormat {
        reason: format!("Failed to read CSV headers: {e}"),
    })?;

    let mut leads: Vec<Lead> = Vec::new();
    let mut skipped: usize = 0;

    for result in reader.records() {
        let Ok(record) = result else {
            skipped += 1;
            continue;
        };

        let name: Option<String> = mapped_value(&record, mapping, LeadField::Name);
        let email: Option<String> = mapped_value(&record, mapping, LeadField::Email);
        let phone: Option<String> = mapped_value(&record, mapping, LeadField::Phone);

        let (Some(name), Some(email), Some(phone)) = (name, email, phone) else {
            skipped += 1;
            continue;
        };

        let mut lead: Lead = Lead::new(name, email, phone, team_id, created_by);
        lead.source = mapped_value(&record, mapping, LeadField::Source);
        lead.interested_country = mapped_value(&record, mapping, LeadField::InterestedCountry);
        lead.course = mapped_value(&record, mapping, LeadField::Course);
        lead.notes = mapped_notes(&record, mapping);
        leads.push(lead);
    }

    Ok(MaterializedBatch { leads, skipped })
}
