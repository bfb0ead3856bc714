//! Utilidades de texto compartidas por los colaboradores locales.

use std::collections::HashMap;

const STOPWORDS: &[&str] = &["a", "an", "and", "are", "as", "at", "be", "been", "but", "by", "can", "for", "from",
                             "has", "have", "in", "into", "is", "it", "its", "of", "on", "or", "our", "that", "the",
                             "their", "these", "this", "to", "was", "we", "were", "which", "with"];

/// Palabras en minúscula, sin puntuación ni stopwords.
pub fn terms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '-')
        .map(|w| w.trim_matches('-').to_lowercase())
        .filter(|w| w.chars().count() > 2 && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Frases de `text` (separadas por `.`, `!`, `?` o líneas en blanco).
pub fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            push_sentence(&mut out, &mut current);
            continue;
        }
        for c in line.chars() {
            current.push(c);
            if matches!(c, '.' | '!' | '?') {
                push_sentence(&mut out, &mut current);
            }
        }
        current.push(' ');
    }
    push_sentence(&mut out, &mut current);
    out
}

fn push_sentence(out: &mut Vec<String>, current: &mut String) {
    let s = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !s.is_empty() {
        out.push(s);
    }
    current.clear();
}

/// Frecuencia de términos.
pub fn term_frequencies(text: &str) -> HashMap<String, usize> {
    let mut freq = HashMap::new();
    for t in terms(text) {
        *freq.entry(t).or_insert(0) += 1;
    }
    freq
}

/// Términos más frecuentes; empates por orden alfabético.
pub fn top_terms(text: &str, n: usize) -> Vec<String> {
    let mut ranked: Vec<(String, usize)> = term_frequencies(text).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(n).map(|(t, _)| t).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_sentences_across_lines() {
        let s = sentences("First line\ncontinues here. Second!\n\nThird paragraph");
        assert_eq!(s, vec!["First line continues here.", "Second!", "Third paragraph"]);
    }

    #[test]
    fn top_terms_are_stable() {
        let t = top_terms("graphene graphene conductivity the of graphene conductivity lattice", 2);
        assert_eq!(t, vec!["graphene", "conductivity"]);
    }
}
