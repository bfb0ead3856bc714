use sha2::{Digest, Sha256};

use crate::error::ProviderError;
use crate::traits::{RenderedImage, VisualRenderer};

const WIDTH: usize = 640;
const LINE_CHARS: usize = 56;
const MAX_LINES: usize = 12;

/// Renderiza el prompt como una tarjeta SVG. Colores derivados del hash del
/// prompt, así que la salida es estable entre ejecuciones.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    model: String,
}

impl SvgRenderer {
    pub fn new(model: impl Into<String>) -> Self {
        Self { model: model.into() }
    }
}

impl VisualRenderer for SvgRenderer {
    fn get_name(&self) -> &str {
        &self.model
    }

    fn render_visual(&self, prompt: &str) -> Result<RenderedImage, ProviderError> {
        if prompt.trim().is_empty() {
            return Err(ProviderError::EmptyInput("visual prompt".into()));
        }
        let digest = Sha256::digest(prompt.as_bytes());
        let bg = format!("#{:02x}{:02x}{:02x}", digest[0] / 4 + 191, digest[1] / 4 + 191, digest[2] / 4 + 191);
        let accent = format!("#{:02x}{:02x}{:02x}", digest[3] / 2, digest[4] / 2, digest[5] / 2);
        let lines = wrap(prompt, LINE_CHARS);
        let height = 80 + 22 * lines.len();

        let mut svg = format!("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{height}\" \
                               viewBox=\"0 0 {WIDTH} {height}\">\n");
        svg.push_str(&format!("  <rect width=\"100%\" height=\"100%\" fill=\"{bg}\"/>\n"));
        svg.push_str(&format!("  <rect x=\"0\" y=\"0\" width=\"12\" height=\"{height}\" fill=\"{accent}\"/>\n"));
        for (i, line) in lines.iter().enumerate() {
            svg.push_str(&format!("  <text x=\"32\" y=\"{}\" font-family=\"monospace\" font-size=\"15\" \
                                   fill=\"#1a1a1a\">{}</text>\n",
                                  48 + 22 * i,
                                  escape_xml(line)));
        }
        svg.push_str("</svg>\n");
        Ok(RenderedImage { bytes: svg.into_bytes(), extension: "svg".into() })
    }
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.len() > MAX_LINES {
        lines.truncate(MAX_LINES);
        if let Some(last) = lines.last_mut() {
            last.push_str(" …");
        }
    }
    lines
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_escaped_deterministic_svg() {
        let r = SvgRenderer::new("svg");
        let a = r.render_visual("Strain <increases> conductivity & yield").unwrap();
        let b = r.render_visual("Strain <increases> conductivity & yield").unwrap();

        assert_eq!(a, b);
        assert_eq!(a.extension, "svg");
        let text = String::from_utf8(a.bytes).unwrap();
        assert!(text.starts_with("<svg"));
        assert!(text.contains("&lt;increases&gt; conductivity &amp; yield"));
    }

    #[test]
    fn long_prompts_are_wrapped_and_capped() {
        let prompt = "word ".repeat(400);
        let lines = wrap(&prompt, LINE_CHARS);
        assert_eq!(lines.len(), MAX_LINES);
        assert!(lines.iter().all(|l| l.chars().count() <= LINE_CHARS + 2));
    }

    #[test]
    fn empty_prompt_is_rejected() {
        assert!(SvgRenderer::new("svg").render_visual(" ").is_err());
    }
}
