//! Análisis de datasets tabulares (CSV numérico).

use table::FeatureTable;
use log::debug;
use serde_json::{json, Map, Value};

use crate::error::ProviderError;
use crate::traits::DatasetAnalyzer;

/// Importancia de cada feature = |correlación de Pearson| con la última
/// columna (target). Las predicciones salen de un ajuste lineal por mínimos
/// cuadrados sobre la feature más fuerte.
#[derive(Debug, Clone, Default)]
pub struct CorrelationAnalyzer;

impl CorrelationAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl DatasetAnalyzer for CorrelationAnalyzer {
    fn get_name(&self) -> &str {
        "correlation"
    }

    fn analyze(&self, name: &str, content: &str) -> Result<Value, ProviderError> {
        let table = FeatureTable::parse(content)?;
        let (target_name, target) = table.target();
        let mut importance = Map::new();
        let mut strongest: Option<(usize, f64)> = None;
        for (idx, (feature, column)) in table.features().enumerate() {
            let r = pearson(column, target).abs();
            importance.insert(feature.to_string(), json!(round4(r)));
            if strongest.map(|(_, best)| r > best).unwrap_or(true) {
                strongest = Some((idx, r));
            }
        }
        let (best_idx, _) = strongest.ok_or_else(|| ProviderError::InvalidInput(format!("{name}: no features")))?;
        let (_, best_col) = table.features()
                                 .nth(best_idx)
                                 .ok_or_else(|| ProviderError::InvalidInput(format!("{name}: no features")))?;
        let (slope, intercept) = least_squares(best_col, target);
        let predictions: Vec<f64> = best_col.iter().map(|x| round4(slope * x + intercept)).collect();
        debug!("analyzer:done dataset={name} rows={} features={}", target.len(), importance.len());

        Ok(json!({
            "feature_importance": importance,
            "predictions": predictions,
            "actual_values": target,
            "target": target_name,
        }))
    }
}

mod table {
    use crate::error::ProviderError;

    /// Columnas numéricas de un CSV con cabecera. La última es el target.
    pub struct FeatureTable {
        names: Vec<String>,
        columns: Vec<Vec<f64>>,
    }

    impl FeatureTable {
        /// Filas con celdas no numéricas o de longitud distinta se descartan.
        pub fn parse(content: &str) -> Result<Self, ProviderError> {
            let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());
            let header = lines.next().ok_or_else(|| ProviderError::EmptyInput("dataset has no header".into()))?;
            let names: Vec<String> = header.split(',').map(|h| h.trim().trim_matches('"').to_string()).collect();
            if names.len() < 2 {
                return Err(ProviderError::InvalidInput("dataset needs a feature and a target column".into()));
            }
            let mut columns = vec![Vec::new(); names.len()];
            for line in lines {
                let cells: Option<Vec<f64>> = line.split(',').map(|c| c.trim().parse::<f64>().ok()).collect();
                match cells {
                    Some(row) if row.len() == names.len() && row.iter().all(|v| v.is_finite()) => {
                        for (col, v) in columns.iter_mut().zip(row) {
                            col.push(v);
                        }
                    }
                    _ => log::debug!("analyzer:skip_row row={line:?}"),
                }
            }
            if columns[0].len() < 2 {
                return Err(ProviderError::InvalidInput("dataset needs at least two numeric rows".into()));
            }
            Ok(Self { names, columns })
        }

        pub fn target(&self) -> (&str, &[f64]) {
            let last = self.names.len() - 1;
            (&self.names[last], &self.columns[last])
        }

        pub fn features(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
            let n = self.names.len() - 1;
            self.names.iter().zip(&self.columns).take(n).map(|(name, col)| (name.as_str(), col.as_slice()))
        }
    }
}

fn mean(v: &[f64]) -> f64 {
    v.iter().sum::<f64>() / v.len() as f64
}

/// Correlación de Pearson; 0 si alguna serie es constante.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let (mx, my) = (mean(x), mean(y));
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx).powi(2);
        syy += (b - my).powi(2);
    }
    if sxx == 0.0 || syy == 0.0 {
        0.0
    } else {
        sxy / (sxx.sqrt() * syy.sqrt())
    }
}

/// Recta `y = slope * x + intercept`; con `x` constante predice la media.
pub fn least_squares(x: &[f64], y: &[f64]) -> (f64, f64) {
    let (mx, my) = (mean(x), mean(y));
    let sxx: f64 = x.iter().map(|a| (a - mx).powi(2)).sum();
    if sxx == 0.0 {
        return (0.0, my);
    }
    let sxy: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    let slope = sxy / sxx;
    (slope, my - slope * mx)
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "temperature,pressure,noise,yield\n\
                       10,1,5,20\n\
                       20,1,3,40\n\
                       30,2,9,60\n\
                       bad,row,here,1\n\
                       40,2,1,80\n";

    #[test]
    fn strongest_feature_drives_predictions() {
        let out = CorrelationAnalyzer::new().analyze("run1", CSV).unwrap();

        assert_eq!(out["feature_importance"]["temperature"], json!(1.0));
        assert!(out["feature_importance"]["noise"].as_f64().unwrap() < 1.0);
        assert_eq!(out["predictions"], json!([20.0, 40.0, 60.0, 80.0]));
        assert_eq!(out["actual_values"], json!([20.0, 40.0, 60.0, 80.0]));
        assert_eq!(out["target"], "yield");
    }

    #[test]
    fn constant_series_has_zero_correlation() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(least_squares(&[2.0, 2.0], &[1.0, 3.0]), (0.0, 2.0));
    }

    #[test]
    fn single_column_is_rejected() {
        assert!(CorrelationAnalyzer::new().analyze("d", "only\n1\n2\n").is_err());
        assert!(CorrelationAnalyzer::new().analyze("d", "").is_err());
    }
}
