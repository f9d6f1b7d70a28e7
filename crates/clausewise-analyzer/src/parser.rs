//! Parse model output into a contract analysis
//!
//! Strict JSON is the primary path. When the model ignores the instruction
//! and returns something that is not a JSON object, the text is scanned with
//! regular expressions for the common fields. That path is lossy: premium
//! sections are dropped and nested structure is guessed from `},` splits.

use clausewise_domain::{
    ContractAnalysis, FallbackAnalysis, Opportunity, Risk, UNKNOWN_FIELD,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

// A JSON string body, escapes included
macro_rules! json_string_field {
    ($name:literal) => {
        concat!("\"", $name, r#""\s*:\s*"((?:[^"\\]|\\.)*)""#)
    };
}

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+-]*\s*([\s\S]*?)\s*```").expect("valid regex"));

static RISKS_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""risks"\s*:\s*\[([\s\S]*?)\]"#).expect("valid regex"));

static OPPORTUNITIES_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""opportunities"\s*:\s*\[([\s\S]*?)\]"#).expect("valid regex"));

static RISK_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(json_string_field!("risk")).expect("valid regex"));

static OPPORTUNITY_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(json_string_field!("opportunity")).expect("valid regex"));

static EXPLANATION_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(json_string_field!("explanation")).expect("valid regex"));

static SUMMARY_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(json_string_field!("summary")).expect("valid regex"));

static SCORE_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""overallScore"\s*:\s*(?:"((?:[^"\\]|\\.)*)"|(-?\d+(?:\.\d+)?))"#)
        .expect("valid regex")
});

/// Parse a raw model response
///
/// Never fails: unparseable output degrades to [`ContractAnalysis::Fallback`].
/// Only a JSON object passes through as [`ContractAnalysis::Complete`]; valid
/// JSON of any other kind (array, string, number) is also scraped by the fallback.
pub fn parse_analysis_response(response: &str) -> ContractAnalysis {
    let cleaned = clean_response(response);

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(value @ Value::Object(_)) => {
            debug!("Model response parsed as JSON object");
            ContractAnalysis::Complete(value)
        }
        Ok(other) => {
            warn!(
                kind = json_kind(&other),
                "Model response is JSON but not an object, using fallback extraction"
            );
            ContractAnalysis::Fallback(fallback_analysis(&cleaned))
        }
        Err(e) => {
            warn!(error = %e, "Model response is not valid JSON, using fallback extraction");
            ContractAnalysis::Fallback(fallback_analysis(&cleaned))
        }
    }
}

/// Trim the response and unwrap a single fenced code block
pub fn clean_response(response: &str) -> String {
    CODE_FENCE
        .replacen(response.trim(), 1, "${1}")
        .trim()
        .to_string()
}

/// Best-effort recovery of the common fields from malformed output
pub fn fallback_analysis(text: &str) -> FallbackAnalysis {
    let mut analysis = FallbackAnalysis::default();

    if let Some(body) = capture(&RISKS_ARRAY, text) {
        analysis.risks = array_fragments(body)
            .map(|fragment| Risk {
                risk: string_field(&RISK_FIELD, fragment),
                explanation: string_field(&EXPLANATION_FIELD, fragment),
                severity: None,
            })
            .collect();
    }

    if let Some(body) = capture(&OPPORTUNITIES_ARRAY, text) {
        analysis.opportunities = array_fragments(body)
            .map(|fragment| Opportunity {
                opportunity: string_field(&OPPORTUNITY_FIELD, fragment),
                explanation: string_field(&EXPLANATION_FIELD, fragment),
                impact: None,
            })
            .collect();
    }

    if let Some(summary) = capture(&SUMMARY_FIELD, text) {
        analysis.summary = unescape(summary);
    }

    if let Some(caps) = SCORE_FIELD.captures(text) {
        analysis.overall_score = caps
            .get(1)
            .map(|m| unescape(m.as_str()))
            .or_else(|| caps.get(2).map(|m| m.as_str().to_string()));
    }

    debug!(
        risks = analysis.risks.len(),
        opportunities = analysis.opportunities.len(),
        has_score = analysis.overall_score.is_some(),
        "Fallback extraction finished"
    );

    analysis
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Split an array body into object fragments; blank fragments (an empty
/// array, a trailing comma) are skipped
fn array_fragments(body: &str) -> impl Iterator<Item = &str> {
    body.split("},").filter(|fragment| !fragment.trim().is_empty())
}

fn string_field(re: &Regex, fragment: &str) -> String {
    capture(re, fragment)
        .map(unescape)
        .unwrap_or_else(|| UNKNOWN_FIELD.to_string())
}

/// Decode JSON escapes in a captured string body, keeping it raw if invalid
fn unescape(raw: &str) -> String {
    serde_json::from_str::<String>(&format!("\"{}\"", raw)).unwrap_or_else(|_| raw.to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
