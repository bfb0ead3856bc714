//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
use std::env;

use asra_adapters::ToolkitSettings;
use asra_persistence::{init_dotenv, DataLayout};
use once_cell::sync::Lazy;

pub const DEFAULT_SUMMARIZER_MODEL: &str = "allenai/specter";
pub const DEFAULT_HYPOTHESIS_MODEL: &str = "deepseek-ai/deepseek-coder-6.7b-instruct";
pub const DEFAULT_VISUALIZATION_MODEL: &str = "stabilityai/sd-v1-5";

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directorios de papers, datos experimentales y outputs.
    pub layout: DataLayout,
    /// Items en paralelo por stage; 1 = secuencial.
    pub workers: usize,
    /// Modelos y parámetros de los colaboradores.
    pub toolkit: ToolkitSettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        init_dotenv();
        Self { layout: DataLayout::from_env(),
               workers: parse_var("ASRA_WORKERS").unwrap_or(1).max(1),
               toolkit: ToolkitSettings { summarizer_model: text_var("ASRA_SUMMARIZER_MODEL",
                                                                      DEFAULT_SUMMARIZER_MODEL),
                                          hypothesis_model: text_var("ASRA_HYPOTHESIS_MODEL",
                                                                     DEFAULT_HYPOTHESIS_MODEL),
                                          visualization_model: text_var("ASRA_VISUALIZATION_MODEL",
                                                                        DEFAULT_VISUALIZATION_MODEL),
                                          top_k: parse_var("ASRA_TOP_K").unwrap_or(5).max(1) } }
    }

    /// Copia con `workers` sobrescrito (p. ej. desde la línea de comandos).
    pub fn with_workers(&self, workers: Option<usize>) -> Self {
        let mut cfg = self.clone();
        if let Some(w) = workers {
            cfg.workers = w.max(1);
        }
        cfg
    }
}

fn parse_var(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn text_var(name: &str, default: &str) -> String {
    env::var(name).ok().filter(|v| !v.trim().is_empty()).unwrap_or_else(|| default.to_string())
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn workers_override_never_drops_below_one() {
        let cfg = AppConfig { layout: DataLayout::new("d"),
                              workers: 4,
                              toolkit: ToolkitSettings { summarizer_model: "s".into(),
                                                         hypothesis_model: "h".into(),
                                                         visualization_model: "v".into(),
                                                         top_k: 5 } };
        assert_eq!(cfg.with_workers(None).workers, 4);
        assert_eq!(cfg.with_workers(Some(0)).workers, 1);
        assert_eq!(cfg.with_workers(Some(8)).layout.outputs_dir, PathBuf::from("d/outputs"));
    }
}
