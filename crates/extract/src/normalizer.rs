use crate::schema::{Entity, EntityLabel};

/// Characters stripped from the edges of a span after whitespace collapsing.
const EDGE_PUNCTUATION: &[char] = &[',', ';', ':', '.', '-', '–', '—'];

/// Strip edge punctuation, keeping the closing period of dotted
/// abbreviations such as `S.A.`.
fn trim_edges(text: &str) -> &str {
    let text = text.trim_start_matches(EDGE_PUNCTUATION);
    let trimmed = text.trim_end_matches(EDGE_PUNCTUATION);

    let mut tail = trimmed.chars().rev();
    let abbreviation = matches!(
        (tail.next(), tail.next()),
        (Some(letter), Some('.')) if letter.is_alphabetic()
    );

    if abbreviation && text[trimmed.len()..].starts_with('.') {
        &text[..trimmed.len() + 1]
    } else {
        trimmed
    }
}

/// Canonical text form of entities before they enter a graph.
#[derive(Debug, Clone, Default)]
pub struct EntityNormalizer;

impl EntityNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Collapse whitespace, trim edge punctuation and case-fold per label.
    pub fn normalize(&self, text: &str, label: EntityLabel) -> String {
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

        let mut normalized = trim_edges(&collapsed).trim().to_string();

        if label.is_case_folded() {
            normalized = normalized.to_uppercase();
        }

        normalized
    }

    pub fn normalize_entity(&self, entity: Entity) -> Entity {
        let text = self.normalize(&entity.text, entity.label);
        Entity {
            text,
            label: entity.label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let normalizer = EntityNormalizer::new();

        assert_eq!(normalizer.normalize("  Acme   Ltda.  ", EntityLabel::Empresa), "ACME LTDA");
        assert_eq!(normalizer.normalize("acme\n ltda,", EntityLabel::Contratante), "ACME LTDA");
        assert_eq!(normalizer.normalize("r$ 1.000,00", EntityLabel::Valor), "R$ 1.000,00");
    }

    #[test]
    fn test_clause_labels_keep_case() {
        let normalizer = EntityNormalizer::new();
        assert_eq!(
            normalizer.normalize("Prestação de serviços\n de consultoria.", EntityLabel::Objeto),
            "Prestação de serviços de consultoria"
        );
        assert_eq!(
            normalizer.normalize("Vigência de 12 meses.", EntityLabel::Prazo),
            "Vigência de 12 meses"
        );
    }

    #[test]
    fn test_dotted_abbreviation_keeps_final_period() {
        let normalizer = EntityNormalizer::new();

        assert_eq!(normalizer.normalize("Beta S.A.", EntityLabel::Contratado), "BETA S.A.");
        assert_eq!(normalizer.normalize("Beta S.A.,", EntityLabel::Empresa), "BETA S.A.");
        assert_eq!(normalizer.normalize("Beta s.a.", EntityLabel::Contratado), "BETA S.A.");
        assert_eq!(normalizer.normalize("Gama Ltda.", EntityLabel::Contratado), "GAMA LTDA");
        assert_eq!(normalizer.normalize("-.", EntityLabel::Contratado), "");
    }
}
