//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use clausewise_analyzer::PipelineOutcome;
use clausewise_domain::{AnalysisReport, Opportunity, Risk};
use colored::*;
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format extracted contract text.
    pub fn format_text(&self, text: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({ "text": text }))?),
            OutputFormat::Table => Ok(text.to_string()),
        }
    }

    /// Format a detected contract type.
    pub fn format_contract_type(&self, contract_type: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(
                &json!({ "contractType": contract_type }),
            )?),
            OutputFormat::Table => Ok(contract_type.to_string()),
        }
    }

    /// Format a full analysis.
    pub fn format_outcome(&self, outcome: &PipelineOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
                "contractType": outcome.contract_type,
                "degraded": outcome.analysis.is_degraded(),
                "analysis": outcome.analysis.to_json(),
            }))?),
            OutputFormat::Table => Ok(self.format_report(
                &outcome.contract_type,
                &outcome.analysis.report(),
            )),
        }
    }

    /// Render a report as headed sections and tables.
    fn format_report(&self, contract_type: &str, report: &AnalysisReport) -> String {
        let mut sections = Vec::new();

        let mut header = format!("{} {}", self.bold("Contract type:"), contract_type);
        if let Some(score) = &report.overall_score {
            header.push_str(&format!("\n{} {}", self.bold("Overall score:"), score));
        }
        sections.push(header);

        if let Some(summary) = &report.summary {
            sections.push(format!("{}\n{}", self.heading("Summary"), summary));
        }

        sections.push(format!(
            "{}\n{}",
            self.heading("Risks"),
            self.risks_table(&report.risks)
        ));
        sections.push(format!(
            "{}\n{}",
            self.heading("Opportunities"),
            self.opportunities_table(&report.opportunities)
        ));

        let text_sections = [
            ("Legal compliance", &report.legal_compliance),
            ("Contract duration", &report.contract_duration),
            ("Termination conditions", &report.termination_conditions),
            ("Specific clauses", &report.specific_clauses),
        ];
        for (title, value) in text_sections {
            if let Some(value) = value {
                sections.push(format!("{}\n{}", self.heading(title), value));
            }
        }

        let list_sections = [
            ("Recommendations", &report.recommendations),
            ("Key clauses", &report.key_clauses),
            ("Negotiation points", &report.negotiation_points),
            ("Performance metrics", &report.performance_metrics),
        ];
        for (title, items) in list_sections {
            if !items.is_empty() {
                sections.push(format!("{}\n{}", self.heading(title), bullets(items)));
            }
        }

        if let Some(terms) = &report.financial_terms {
            let mut body = terms.description.clone();
            if !terms.details.is_empty() {
                body.push('\n');
                body.push_str(&bullets(&terms.details));
            }
            sections.push(format!("{}\n{}", self.heading("Financial terms"), body));
        }

        sections.join("\n\n")
    }

    fn risks_table(&self, risks: &[Risk]) -> String {
        if risks.is_empty() {
            return self.colorize("No risks identified.", "yellow");
        }

        let with_severity = risks.iter().any(|r| r.severity.is_some());
        let mut builder = Builder::default();
        if with_severity {
            builder.push_record(["Risk", "Explanation", "Severity"]);
        } else {
            builder.push_record(["Risk", "Explanation"]);
        }

        for risk in risks {
            let mut row = vec![risk.risk.clone(), risk.explanation.clone()];
            if with_severity {
                row.push(risk.severity.clone().unwrap_or_default());
            }
            builder.push_record(row);
        }

        render(builder)
    }

    fn opportunities_table(&self, opportunities: &[Opportunity]) -> String {
        if opportunities.is_empty() {
            return self.colorize("No opportunities identified.", "yellow");
        }

        let with_impact = opportunities.iter().any(|o| o.impact.is_some());
        let mut builder = Builder::default();
        if with_impact {
            builder.push_record(["Opportunity", "Explanation", "Impact"]);
        } else {
            builder.push_record(["Opportunity", "Explanation"]);
        }

        for opportunity in opportunities {
            let mut row = vec![
                opportunity.opportunity.clone(),
                opportunity.explanation.clone(),
            ];
            if with_impact {
                row.push(opportunity.impact.clone().unwrap_or_default());
            }
            builder.push_record(row);
        }

        render(builder)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn heading(&self, title: &str) -> String {
        self.colorize(title, "cyan")
    }

    fn bold(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("  • {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_domain::{ContractAnalysis, FallbackAnalysis};

    fn premium_outcome() -> PipelineOutcome {
        PipelineOutcome {
            contract_type: "Lease".to_string(),
            analysis: ContractAnalysis::Complete(json!({
                "risks": [{"risk": "No cap", "explanation": "Unlimited damages", "severity": "high"}],
                "opportunities": [{"opportunity": "Renewal", "explanation": "Option to renew"}],
                "summary": "Commercial lease",
                "overallScore": 70,
                "recommendations": ["Add a liability cap"],
                "financialTerms": {"description": "Monthly rent", "details": ["$4,000"]}
            })),
        }
    }

    #[test]
    fn test_json_outcome() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_outcome(&premium_outcome()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["contractType"], "Lease");
        assert_eq!(value["degraded"], false);
        assert_eq!(value["analysis"]["overallScore"], 70);
    }

    #[test]
    fn test_table_outcome() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_outcome(&premium_outcome()).unwrap();

        assert!(output.contains("Contract type: Lease"));
        assert!(output.contains("Overall score: 70"));
        assert!(output.contains("Severity"));
        assert!(output.contains("Unlimited damages"));
        assert!(!output.contains("Impact"));
        assert!(output.contains("• Add a liability cap"));
        assert!(output.contains("Monthly rent"));
        assert!(!output.contains("Key clauses"));
    }

    #[test]
    fn test_table_fallback_outcome() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let outcome = PipelineOutcome {
            contract_type: "NDA".to_string(),
            analysis: ContractAnalysis::Fallback(FallbackAnalysis::default()),
        };
        let output = formatter.format_outcome(&outcome).unwrap();

        assert!(output.contains("Error analyzing contract"));
        assert!(output.contains("No risks identified."));
        assert!(output.contains("No opportunities identified."));
        assert!(!output.contains("Overall score"));
    }

    #[test]
    fn test_plain_text_and_type() {
        let table = Formatter::new(OutputFormat::Table, true);
        assert_eq!(table.format_text("Clause 1").unwrap(), "Clause 1");
        assert_eq!(table.format_contract_type("Sales").unwrap(), "Sales");

        let json = Formatter::new(OutputFormat::Json, false);
        let value: serde_json::Value =
            serde_json::from_str(&json.format_contract_type("Sales").unwrap()).unwrap();
        assert_eq!(value, json!({"contractType": "Sales"}));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.warning("partial"), "⚠ partial");
    }

    #[test]
    fn test_colorize_enabled() {
        colored::control::set_override(true);
        let formatter = Formatter::new(OutputFormat::Table, true);
        assert_eq!(formatter.warning("partial"), "⚠ partial".yellow().to_string());
        assert_eq!(formatter.heading("Risks"), "Risks".cyan().to_string());
        assert_eq!(formatter.colorize("plain", "magenta"), "plain");
    }
}
