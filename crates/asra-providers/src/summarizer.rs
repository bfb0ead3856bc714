use log::debug;

use crate::error::ProviderError;
use crate::text::{sentences, term_frequencies, terms};
use crate::traits::{RankedPoints, Summarizer};

/// Extrae las frases más representativas de un texto.
///
/// Puntuación de una frase: media de la frecuencia (en todo el documento) de
/// sus términos, normalizada por la máxima. Resultado en `[0, 1]`, orden
/// descendente y empates por posición.
#[derive(Debug, Clone)]
pub struct FrequencySummarizer {
    model: String,
    top_k: usize,
}

impl FrequencySummarizer {
    pub fn new(model: impl Into<String>, top_k: usize) -> Self {
        Self { model: model.into(), top_k: top_k.max(1) }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

impl Summarizer for FrequencySummarizer {
    fn get_name(&self) -> &str {
        &self.model
    }

    fn embed_and_rank(&self, text: &str) -> Result<RankedPoints, ProviderError> {
        let freq = term_frequencies(text);
        if freq.is_empty() {
            return Err(ProviderError::EmptyInput("no rankable terms".into()));
        }
        let mut scored: Vec<(usize, String, f64)> =
            sentences(text).into_iter()
                           .enumerate()
                           .filter_map(|(pos, s)| {
                               let ts = terms(&s);
                               if ts.is_empty() {
                                   return None;
                               }
                               let sum: usize = ts.iter().map(|t| freq.get(t).copied().unwrap_or(0)).sum();
                               Some((pos, s, sum as f64 / ts.len() as f64))
                           })
                           .collect();
        let max = scored.iter().map(|(_, _, v)| *v).fold(0.0_f64, f64::max);
        if max <= 0.0 {
            return Err(ProviderError::EmptyInput("no rankable sentences".into()));
        }
        scored.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(self.top_k);
        debug!("summarizer:rank model={} points={}", self.model, scored.len());

        let (key_points, scores) = scored.into_iter().map(|(_, s, v)| (s, round4(v / max))).unzip();
        Ok(RankedPoints { key_points, scores })
    }
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
