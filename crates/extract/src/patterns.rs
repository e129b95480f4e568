use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;

use crate::config::{ExtractorConfig, PatternRule};
use crate::schema::{Entity, EntityLabel};

struct CompiledPattern {
    label: EntityLabel,
    regex: Regex,
}

fn compile_rules(rules: &[PatternRule], case_insensitive: bool) -> Result<Vec<CompiledPattern>> {
    rules
        .iter()
        .map(|rule| {
            let source = if case_insensitive {
                format!("(?i){}", rule.pattern)
            } else {
                rule.pattern.clone()
            };
            let regex = Regex::new(&source)
                .with_context(|| format!("Invalid {} pattern: {}", rule.label, rule.pattern))?;
            Ok(CompiledPattern {
                label: rule.label,
                regex,
            })
        })
        .collect()
}

/// Pattern-based field extraction: declarations, formats and keyword markers.
pub struct PatternExtractor {
    declaration: Option<Regex>,
    declaration_labels: HashMap<String, EntityLabel>,
    blank_line: Regex,
    lookahead: usize,
    patterns: Vec<CompiledPattern>,
    markers: Vec<CompiledPattern>,
}

impl PatternExtractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let mut declaration_labels = HashMap::new();
        let mut alternatives = Vec::new();
        for rule in &config.declarations {
            for keyword in &rule.keywords {
                declaration_labels.insert(keyword.to_uppercase(), rule.label);
                alternatives.push(regex::escape(keyword));
            }
        }

        let declaration = if alternatives.is_empty() {
            None
        } else {
            let source = format!(r"(?i)\b({})\s*:", alternatives.join("|"));
            Some(Regex::new(&source).context("Invalid declaration header keywords")?)
        };

        Ok(Self {
            declaration,
            declaration_labels,
            blank_line: Regex::new(r"\n[ \t]*\n").context("Invalid blank-line pattern")?,
            lookahead: config.declaration_lookahead,
            patterns: compile_rules(&config.patterns, false)?,
            markers: compile_rules(&config.markers, true)?,
        })
    }

    /// Values following `CONTRATANTE:` style headers.
    ///
    /// A value runs to the next header, a blank-line run, or the lookahead
    /// bound, whichever comes first.
    pub fn declarations(&self, text: &str) -> Vec<Entity> {
        let Some(declaration) = &self.declaration else {
            return Vec::new();
        };

        let headers: Vec<_> = declaration.captures_iter(text).collect();
        let mut entities = Vec::new();

        for (i, caps) in headers.iter().enumerate() {
            let (Some(whole), Some(keyword)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(&label) = self.declaration_labels.get(&keyword.as_str().to_uppercase()) else {
                continue;
            };

            let start = whole.end();
            let rest = &text[start..];

            let mut end = rest.len();
            if let Some(next) = headers.get(i + 1).and_then(|c| c.get(0)) {
                end = end.min(next.start() - start);
            }
            if let Some(blank) = self.blank_line.find(rest) {
                end = end.min(blank.start());
            }
            if let Some((offset, _)) = rest.char_indices().nth(self.lookahead) {
                end = end.min(offset);
            }

            let value = rest[..end].trim();
            if !value.is_empty() {
                entities.push(Entity::new(value, label));
            }
        }

        entities
    }

    /// Tax identifiers, dates, amounts and durations, in configured order.
    /// Matches are upper-cased, so `12 meses` and `12 MESES` are one value.
    pub fn formats(&self, text: &str) -> Vec<Entity> {
        self.patterns
            .iter()
            .flat_map(|p| {
                p.regex
                    .find_iter(text)
                    .map(|m| Entity::new(m.as_str().to_uppercase(), p.label))
            })
            .collect()
    }

    /// One marker entity per configured term present anywhere in the text.
    pub fn markers(&self, text: &str) -> Vec<Entity> {
        self.markers
            .iter()
            .filter(|m| m.regex.is_match(text))
            .map(|m| Entity::new(m.label.as_str(), m.label))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PatternExtractor {
        PatternExtractor::new(&ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn test_declarations_stop_at_next_header() {
        let text = "CONTRATANTE: Acme Ltda, CNPJ 12.345.678/0001-90\n\
            CONTRATADA: Beta Serviços ME\n\nOBJETO: consultoria tributária";
        let found = extractor().declarations(text);

        assert_eq!(found.len(), 3);
        assert_eq!(found[0].label, EntityLabel::Contratante);
        assert_eq!(found[0].text, "Acme Ltda, CNPJ 12.345.678/0001-90");
        assert_eq!(found[1].label, EntityLabel::Contratado);
        assert_eq!(found[1].text, "Beta Serviços ME");
        assert_eq!(found[2].label, EntityLabel::Objeto);
        assert_eq!(found[2].text, "consultoria tributária");
    }

    #[test]
    fn test_declaration_requires_colon() {
        let found = extractor().declarations("A CONTRATANTE pagará mensalmente.");
        assert!(found.is_empty());
    }

    #[test]
    fn test_declaration_lookahead_is_bounded() {
        let config = ExtractorConfig {
            declaration_lookahead: 10,
            ..Default::default()
        };
        let extractor = PatternExtractor::new(&config).unwrap();
        let found = extractor.declarations("OBJETO: prestação de serviços de consultoria");
        assert_eq!(found[0].text, "prestação");
    }

    #[test]
    fn test_formats() {
        let text = "CNPJ 12.345.678/0001-90, assinado em 01/02/2024, \
            valor de R$ 10.000,00 pelo prazo de 12 meses.";
        let found = extractor().formats(text);

        let labels: Vec<_> = found.iter().map(|e| (e.label, e.text.as_str())).collect();
        assert_eq!(
            labels,
            vec![
                (EntityLabel::Cnpj, "12.345.678/0001-90"),
                (EntityLabel::Data, "01/02/2024"),
                (EntityLabel::Valor, "R$ 10.000,00"),
                (EntityLabel::Prazo, "12 MESES"),
            ]
        );
    }

    #[test]
    fn test_markers_are_case_insensitive_singletons() {
        let text = "Multa de 2%. Outra MULTA. Rescisão com aviso. Foro de Campinas.";
        let found = extractor().markers(text);

        let labels: Vec<_> = found.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec![EntityLabel::Multa, EntityLabel::Rescisao, EntityLabel::Foro]);
        assert_eq!(found[0].text, "MULTA");
    }
}
