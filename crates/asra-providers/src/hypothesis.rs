use serde_json::{json, Value};

use crate::error::ProviderError;
use crate::text::top_terms;
use crate::traits::HypothesisGenerator;

/// Genera una hipótesis estructurada a partir de los términos dominantes del
/// contexto. Determinista: mismo contexto, mismo documento.
#[derive(Debug, Clone)]
pub struct TemplateHypothesisGenerator {
    model: String,
}

impl TemplateHypothesisGenerator {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into() }
    }
}

impl HypothesisGenerator for TemplateHypothesisGenerator {
    fn get_name(&self) -> &str {
        &self.model
    }

    fn generate_hypothesis(&self, context: &str) -> Result<Value, ProviderError> {
        let vars = top_terms(context, 4);
        if vars.len() < 2 {
            return Err(ProviderError::InvalidInput("context needs at least two distinct terms".into()));
        }
        let (cause, effect) = (&vars[0], &vars[1]);
        Ok(json!({
            "hypothesis": format!("Changes in {cause} produce a measurable change in {effect}."),
            "independent_variable": cause,
            "dependent_variable": effect,
            "controls": &vars[2..],
            "experiment": format!("Vary {cause} across controlled samples and record {effect}, holding the remaining variables fixed."),
            "model": self.model,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_object_from_dominant_terms() {
        let gen = TemplateHypothesisGenerator::new("template");
        let h = gen.generate_hypothesis("strain strain strain graphene graphene conductivity").unwrap();

        assert_eq!(h["independent_variable"], "strain");
        assert_eq!(h["dependent_variable"], "graphene");
        assert_eq!(h["controls"], json!(["conductivity"]));
        assert_eq!(h["model"], "template");
    }

    #[test]
    fn thin_context_is_rejected() {
        let gen = TemplateHypothesisGenerator::new("template");
        assert!(gen.generate_hypothesis("strain").is_err());
    }
}
