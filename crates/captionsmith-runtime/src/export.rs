//! Record export: JSON envelope, SRT subtitles and plain-text reports.

use captionsmith_core::{DescriptionRecord, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};

pub const EXPORT_VERSION: &str = "1.0";
/// Display time of one subtitle cue.
pub const SRT_CUE_MS: u64 = 3_000;

const RULE_WIDTH: usize = 60;
const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Hex SHA-256 of the detailed description, or of the caption when there is none.
///
/// Identical inputs always give identical digests.
pub fn record_digest(record: &DescriptionRecord) -> String {
    let text = if record.detailed_description.is_empty() {
        &record.caption
    } else {
        &record.detailed_description
    };
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Pretty JSON `{timestamp, version, digest, data, metadata?}`.
pub fn to_json_envelope(record: &DescriptionRecord, metadata: Option<&Value>) -> Result<String> {
    let data = serde_json::to_value(record)?;
    let mut envelope = json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": EXPORT_VERSION,
        "digest": record_digest(record),
        "data": data,
    });
    if let Some(metadata) = metadata {
        envelope["metadata"] = metadata.clone();
    }
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// One subtitle cue per sentence, shown back to back.
pub fn to_srt(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let segments = SENTENCE_END_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    for (idx, segment) in segments.enumerate() {
        let start = idx as u64 * SRT_CUE_MS;
        lines.push((idx + 1).to_string());
        lines.push(format!(
            "{} --> {}",
            format_srt_time(start),
            format_srt_time(start + SRT_CUE_MS)
        ));
        lines.push(segment.to_string());
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Plain-text report of one record, optionally under a generated-at header.
pub fn to_txt_report(record: &DescriptionRecord, include_metadata: bool) -> String {
    let mut lines: Vec<String> = Vec::new();
    if include_metadata {
        push_banner(&mut lines, "IMAGE DESCRIPTION REPORT");
        lines.push(format!("Generated: {}", chrono::Utc::now().format(REPORT_TIME_FORMAT)));
        lines.push(format!("Version: {}", EXPORT_VERSION));
        lines.push(format!("Mode: {} (confidence {:.2})", record.mode, record.confidence));
        lines.push("=".repeat(RULE_WIDTH));
        lines.push(String::new());
    }

    if !record.caption.is_empty() {
        push_section(&mut lines, "CAPTION", &record.caption);
    }
    if record.has_detailed {
        push_section(&mut lines, "DETAILED DESCRIPTION", &record.detailed_description);
    }
    if !record.caption.is_empty() {
        let insights = &record.insights;
        let body = [
            format!("Subjects: {}", insights.subjects.join(", ")),
            format!("Settings: {}", insights.settings.join(", ")),
            format!("Objects: {}", insights.objects.join(", ")),
            format!("Mood: {}", insights.mood),
            format!("Keywords: {}", insights.keywords.join(", ")),
        ]
        .join("\n");
        push_section(&mut lines, "INSIGHTS", &body);
    }
    lines.join("\n")
}

/// Counts for a batch; a record without a caption counts as failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_images: usize,
    pub successful: usize,
    pub failed: usize,
    pub timestamp: String,
}

impl BatchSummary {
    pub fn of(records: &[DescriptionRecord]) -> Self {
        let successful = records.iter().filter(|r| !r.caption.is_empty()).count();
        Self {
            total_images: records.len(),
            successful,
            failed: records.len() - successful,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A batch rendered both ways, with its summary.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub json: String,
    pub txt: String,
}

pub fn create_batch_report(records: &[DescriptionRecord]) -> Result<BatchReport> {
    let summary = BatchSummary::of(records);
    let envelope = json!({
        "timestamp": summary.timestamp,
        "version": EXPORT_VERSION,
        "data": {
            "summary": serde_json::to_value(&summary)?,
            "results": serde_json::to_value(records)?,
        },
    });
    Ok(BatchReport {
        json: serde_json::to_string_pretty(&envelope)?,
        txt: batch_to_txt(records, &summary),
        summary,
    })
}

fn batch_to_txt(records: &[DescriptionRecord], summary: &BatchSummary) -> String {
    let mut lines: Vec<String> = Vec::new();
    push_banner(&mut lines, "BATCH PROCESSING REPORT");
    lines.push(format!("Generated: {}", chrono::Utc::now().format(REPORT_TIME_FORMAT)));
    lines.push(format!(
        "Total Images: {} ({} successful, {} failed)",
        summary.total_images, summary.successful, summary.failed
    ));
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(String::new());

    for (idx, record) in records.iter().enumerate() {
        lines.push(format!("IMAGE {}", idx + 1));
        lines.push("-".repeat(RULE_WIDTH));
        if record.caption.is_empty() {
            lines.push("Caption: (none)".to_string());
        } else {
            lines.push(format!("Caption: {}", record.caption));
        }
        if record.has_detailed {
            lines.push(format!("Description: {}", record.detailed_description));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

fn push_banner(lines: &mut Vec<String>, title: &str) {
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(title.to_string());
    lines.push("=".repeat(RULE_WIDTH));
}

fn push_section(lines: &mut Vec<String>, title: &str, body: &str) {
    lines.push(title.to_string());
    lines.push("-".repeat(RULE_WIDTH));
    lines.push(body.to_string());
    lines.push(String::new());
}

/// `HH:MM:SS,mmm`
fn format_srt_time(ms: u64) -> String {
    format!(
        "{:02}:{:02}:{:02},{:03}",
        ms / 3_600_000,
        (ms % 3_600_000) / 60_000,
        (ms % 60_000) / 1_000,
        ms % 1_000
    )
}
