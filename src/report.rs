//! Dispatch reports
//!
//! Runs a batch of entities and values through the dispatcher and collects
//! the results in a form that can be printed as text or exported as JSON.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::dispatch::{Classification, TypeDispatcher};
use crate::entity::{Entity, EntityKind};
use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::value::DynValue;

/// Results for one entity
#[derive(Debug, Clone, Serialize)]
pub struct EntityReport {
    pub name: String,
    pub kind: EntityKind,
    pub fingerprint: Fingerprint,
    pub classification: Classification,
    /// Sentence produced by the exact-type query
    pub type_check: String,
    /// Sentence produced by the safe downcast
    pub downcast: String,
    /// Breed, when the downcast reached the dog view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
}

/// Results for one heterogeneous value
#[derive(Debug, Clone, Serialize)]
pub struct ValueReport {
    pub input: String,
    pub label: String,
    pub message: String,
}

/// Full report for a batch
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub generated_at: DateTime<Utc>,
    pub entities: Vec<EntityReport>,
    pub values: Vec<ValueReport>,
    pub stats: ReportStats,
}

/// Counts per outcome
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportStats {
    pub dogs: usize,
    pub mammals: usize,
    pub animals: usize,
    pub unknown_values: usize,
}

impl DispatchReport {
    /// Build a report from entities and values
    pub fn build(dispatcher: &TypeDispatcher, entities: &[Entity], values: &[DynValue]) -> Self {
        let mut stats = ReportStats::default();

        let entities: Vec<EntityReport> = entities
            .iter()
            .map(|entity| {
                let classification = dispatcher.classify(entity);
                match classification {
                    Classification::Dog => stats.dogs += 1,
                    Classification::Mammal => stats.mammals += 1,
                    Classification::Animal => stats.animals += 1,
                }
                let view = dispatcher.safe_downcast(entity);
                EntityReport {
                    name: entity.name().to_string(),
                    kind: entity.kind(),
                    fingerprint: Fingerprint::of(entity),
                    classification,
                    type_check: classification.describe(entity.name()),
                    downcast: view.to_string(),
                    breed: view.breed().map(str::to_string),
                }
            })
            .collect();

        let values: Vec<ValueReport> = values
            .iter()
            .map(|value| {
                let label = dispatcher.dispatch_any(value);
                if label.is_unknown() {
                    stats.unknown_values += 1;
                }
                ValueReport {
                    input: value.to_string(),
                    label: label.label().to_string(),
                    message: label.to_string(),
                }
            })
            .collect();

        tracing::debug!(
            entities = entities.len(),
            values = values.len(),
            "built dispatch report"
        );

        Self {
            generated_at: Utc::now(),
            entities,
            values,
            stats,
        }
    }

    /// Plain sentences, grouped by operation
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        out.push_str("== Type checks ==\n");
        for entity in &self.entities {
            out.push_str(&entity.type_check);
            out.push('\n');
        }

        out.push_str("\n== Downcasts ==\n");
        for entity in &self.entities {
            out.push_str(&entity.downcast);
            out.push('\n');
        }

        out.push_str("\n== Any values ==\n");
        for value in &self.values {
            out.push_str(&value.message);
            out.push('\n');
        }

        out
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Text => self.to_text(),
            OutputFormat::Pretty => serde_json::to_string_pretty(self)?,
            OutputFormat::Compact => serde_json::to_string(self)?,
        })
    }
}
