//! Analysis module - the structured result of analysing a contract
//!
//! A model response that parses as a JSON object is kept verbatim in
//! [`ContractAnalysis::Complete`]; nothing is validated against a schema, so
//! consumers must tolerate missing fields. When the response cannot be
//! parsed, the analyzer scrapes what it can into a [`FallbackAnalysis`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder for a risk/opportunity field the fallback scan could not recover
pub const UNKNOWN_FIELD: &str = "Unknown";

/// Summary used by the fallback when no `"summary"` value is recoverable
pub const FALLBACK_SUMMARY: &str = "Error analyzing contract";

/// A single risk identified in a contract
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Risk {
    /// Short name of the risk
    pub risk: String,

    /// Why it is a risk
    pub explanation: String,

    /// Severity (premium only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// A single opportunity identified in a contract
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Opportunity {
    /// Short name of the opportunity
    pub opportunity: String,

    /// Why it is an opportunity
    pub explanation: String,

    /// Impact (premium only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

/// Financial breakdown (premium only)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FinancialTerms {
    /// Overview of the financial terms
    pub description: String,

    /// Individual financial details
    #[serde(default)]
    pub details: Vec<String>,
}

/// Degraded result produced when the model output is not valid JSON
///
/// Only the common fields are ever recovered. Premium-only sections are
/// absent and `overall_score` is left unset when no value is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackAnalysis {
    /// Recovered risks, in response order
    pub risks: Vec<Risk>,

    /// Recovered opportunities, in response order
    pub opportunities: Vec<Opportunity>,

    /// Recovered summary, or [`FALLBACK_SUMMARY`]
    pub summary: String,

    /// Recovered overall score
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<String>,
}

impl Default for FallbackAnalysis {
    fn default() -> Self {
        Self {
            risks: Vec::new(),
            opportunities: Vec::new(),
            summary: FALLBACK_SUMMARY.to_string(),
            overall_score: None,
        }
    }
}

/// Result of analysing a contract
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContractAnalysis {
    /// The model's JSON object, unchanged
    Complete(Value),

    /// Best-effort scrape of a malformed response
    Fallback(FallbackAnalysis),
}

impl ContractAnalysis {
    /// Whether this result came from the degraded fallback path
    pub fn is_degraded(&self) -> bool {
        matches!(self, ContractAnalysis::Fallback(_))
    }

    /// The result as the JSON shape exposed to callers
    pub fn to_json(&self) -> Value {
        match self {
            ContractAnalysis::Complete(value) => value.clone(),
            // Serializing plain strings and vectors cannot fail
            ContractAnalysis::Fallback(fallback) => {
                serde_json::to_value(fallback).unwrap_or(Value::Null)
            }
        }
    }

    /// Lenient typed view over either variant
    pub fn report(&self) -> AnalysisReport {
        match self {
            ContractAnalysis::Complete(value) => AnalysisReport::from_value(value),
            ContractAnalysis::Fallback(fallback) => AnalysisReport {
                risks: fallback.risks.clone(),
                opportunities: fallback.opportunities.clone(),
                summary: Some(fallback.summary.clone()),
                overall_score: fallback.overall_score.clone(),
                ..AnalysisReport::default()
            },
        }
    }
}

/// Typed, never-failing view of an analysis
///
/// Fields the model omitted are `None` or empty. Scalars of the wrong JSON
/// type are rendered to text rather than rejected (models often return the
/// score as a number, or compliance as an object).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisReport {
    /// Identified risks
    pub risks: Vec<Risk>,
    /// Identified opportunities
    pub opportunities: Vec<Opportunity>,
    /// Contract summary
    pub summary: Option<String>,
    /// Overall score, nominally 1-100
    pub overall_score: Option<String>,
    /// Recommendations (premium)
    pub recommendations: Vec<String>,
    /// Key clauses (premium)
    pub key_clauses: Vec<String>,
    /// Legal compliance assessment (premium)
    pub legal_compliance: Option<String>,
    /// Negotiation points (premium)
    pub negotiation_points: Vec<String>,
    /// Contract duration (premium)
    pub contract_duration: Option<String>,
    /// Termination conditions (premium)
    pub termination_conditions: Option<String>,
    /// Financial terms (premium)
    pub financial_terms: Option<FinancialTerms>,
    /// Performance metrics (premium)
    pub performance_metrics: Vec<String>,
    /// Clauses specific to the contract type (premium)
    pub specific_clauses: Option<String>,
}

impl AnalysisReport {
    /// Build a report from an arbitrary JSON value
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            risks: list(obj, "risks").iter().map(risk_from_value).collect(),
            opportunities: list(obj, "opportunities")
                .iter()
                .map(opportunity_from_value)
                .collect(),
            summary: text_field(obj, "summary"),
            overall_score: text_field(obj, "overallScore"),
            recommendations: text_list(obj, "recommendations"),
            key_clauses: text_list(obj, "keyClauses"),
            legal_compliance: text_field(obj, "legalCompliance"),
            negotiation_points: text_list(obj, "negotiationPoints"),
            contract_duration: text_field(obj, "contractDuration"),
            termination_conditions: text_field(obj, "terminationConditions"),
            financial_terms: obj.get("financialTerms").and_then(financial_terms_from_value),
            performance_metrics: text_list(obj, "performanceMetrics"),
            specific_clauses: text_field(obj, "specificClauses"),
        }
    }
}

fn list<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(text)
}

fn text_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    list(obj, key).iter().filter_map(text).collect()
}

fn risk_from_value(value: &Value) -> Risk {
    match value.as_object() {
        Some(obj) => Risk {
            risk: text_field(obj, "risk").unwrap_or_default(),
            explanation: text_field(obj, "explanation").unwrap_or_default(),
            severity: text_field(obj, "severity"),
        },
        None => Risk {
            risk: text(value).unwrap_or_default(),
            ..Risk::default()
        },
    }
}

fn opportunity_from_value(value: &Value) -> Opportunity {
    match value.as_object() {
        Some(obj) => Opportunity {
            opportunity: text_field(obj, "opportunity").unwrap_or_default(),
            explanation: text_field(obj, "explanation").unwrap_or_default(),
            impact: text_field(obj, "impact"),
        },
        None => Opportunity {
            opportunity: text(value).unwrap_or_default(),
            ..Opportunity::default()
        },
    }
}

fn financial_terms_from_value(value: &Value) -> Option<FinancialTerms> {
    match value {
        Value::Null => None,
        Value::Object(obj) => Some(FinancialTerms {
            description: text_field(obj, "description").unwrap_or_default(),
            details: text_list(obj, "details"),
        }),
        other => text(other).map(|description| FinancialTerms {
            description,
            details: Vec::new(),
        }),
    }
}
