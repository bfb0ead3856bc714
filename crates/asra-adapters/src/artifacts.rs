//! Payloads tipados de cada artifact del pipeline.
//!
//! El core sólo ve JSON; aquí se fija la forma de cada entrada y su
//! validación. Un payload que no valida no llega al artifact (el item cuenta
//! como fallo `NonConforming`).

use std::collections::BTreeMap;

use asra_core::model::PayloadSpec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entrada de `literature_analysis.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteratureInsights {
    pub key_insights: Vec<String>,
    pub importance_scores: Vec<f64>,
}

impl PayloadSpec for LiteratureInsights {
    fn validate(&self) -> Result<(), String> {
        if self.key_insights.is_empty() {
            return Err("no key insights".into());
        }
        if self.key_insights.len() != self.importance_scores.len() {
            return Err(format!("{} insights but {} scores", self.key_insights.len(), self.importance_scores.len()));
        }
        if let Some(bad) = self.importance_scores.iter().find(|s| !(0.0..=1.0).contains(*s)) {
            return Err(format!("importance score {bad} outside [0, 1]"));
        }
        Ok(())
    }
}

/// Entrada de `generated_hypotheses.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisRecord {
    pub context: String,
    pub generated_hypothesis: Value,
}

impl HypothesisRecord {
    /// Texto principal de la hipótesis, o el JSON compacto si no lo hay.
    pub fn statement(&self) -> String {
        self.generated_hypothesis
            .get("hypothesis")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.generated_hypothesis.to_string())
    }
}

impl PayloadSpec for HypothesisRecord {
    fn validate(&self) -> Result<(), String> {
        if self.context.trim().is_empty() {
            return Err("empty context".into());
        }
        match self.generated_hypothesis.as_object() {
            Some(obj) if !obj.is_empty() => Ok(()),
            Some(_) => Err("generated hypothesis is an empty object".into()),
            None => Err("generated hypothesis is not a JSON object".into()),
        }
    }
}

/// Entrada de `experimental_analysis.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentalAnalysis {
    pub feature_importance: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_values: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ExperimentalAnalysis {
    /// Features ordenadas por importancia descendente (empates por nombre).
    pub fn ranked_features(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.feature_importance.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

impl PayloadSpec for ExperimentalAnalysis {
    fn validate(&self) -> Result<(), String> {
        if self.feature_importance.is_empty() {
            return Err("no feature importance".into());
        }
        if let Some((name, _)) = self.feature_importance.iter().find(|(_, v)| !v.is_finite()) {
            return Err(format!("feature {name} has a non-finite importance"));
        }
        match (&self.predictions, &self.actual_values) {
            (None, None) => Ok(()),
            (Some(p), Some(a)) if p.len() == a.len() => Ok(()),
            (Some(p), Some(a)) => Err(format!("{} predictions but {} actual values", p.len(), a.len())),
            _ => Err("predictions and actual_values must come together".into()),
        }
    }
}
