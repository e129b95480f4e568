use serde::{Deserialize, Serialize};

use crate::schema::EntityLabel;

/// A regex whose matches become entities of `label`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRule {
    pub label: EntityLabel,
    pub pattern: String,
}

/// Header keywords introducing a declaration line, e.g. `CONTRATANTE:`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationRule {
    pub label: EntityLabel,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Max chars read after a declaration header.
    pub declaration_lookahead: usize,
    /// Max chars of a clause body kept as an entity.
    pub clause_text_limit: usize,
    /// Recognizer spans shorter than this after normalization are dropped.
    pub min_named_entity_chars: usize,
    pub declarations: Vec<DeclarationRule>,
    pub patterns: Vec<PatternRule>,
    /// Case-insensitive patterns; any match adds a singleton marker entity.
    pub markers: Vec<PatternRule>,
    pub generic_object_terms: Vec<String>,
    pub organization_blacklist: Vec<String>,
}

fn pattern(label: EntityLabel, pattern: &str) -> PatternRule {
    PatternRule {
        label,
        pattern: pattern.to_string(),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            declaration_lookahead: 300,
            clause_text_limit: 300,
            min_named_entity_chars: 3,
            declarations: vec![
                DeclarationRule {
                    label: EntityLabel::Contratante,
                    keywords: strings(&["CONTRATANTE"]),
                },
                DeclarationRule {
                    label: EntityLabel::Contratado,
                    keywords: strings(&["CONTRATADO", "CONTRATADA"]),
                },
                DeclarationRule {
                    label: EntityLabel::Objeto,
                    keywords: strings(&["OBJETO"]),
                },
            ],
            patterns: vec![
                pattern(EntityLabel::Cnpj, r"\b\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}\b"),
                pattern(EntityLabel::Data, r"\b\d{1,2}/\d{1,2}/\d{4}\b"),
                pattern(EntityLabel::Valor, r"R\$\s?\d+(?:\.\d{3})*(?:,\d{2})?"),
                pattern(EntityLabel::Prazo, r"(?i)\b\d+\s*(?:dias|meses|anos)\b"),
            ],
            markers: vec![
                pattern(EntityLabel::Confidencialidade, "confidencialidade"),
                pattern(EntityLabel::Multa, "multa"),
                pattern(EntityLabel::Rescisao, "rescis[ãa]o"),
                pattern(EntityLabel::Foro, r"\bforo\b"),
            ],
            generic_object_terms: strings(&[
                "contrato",
                "do contrato",
                "deste contrato",
                "presente contrato",
                "o presente contrato",
                "instrumento",
                "do presente instrumento",
            ]),
            organization_blacklist: strings(&[
                "CLÁUSULA",
                "CLAUSULA",
                "CONTRATANTE",
                "CONTRATADO",
                "CONTRATADA",
                "OBJETO",
                "PRAZO",
                "PAGAMENTO",
                "MULTA",
                "RESCISÃO",
                "FORO",
                "CONFIDENCIALIDADE",
                "DISPOSIÇÕES GERAIS",
                "TESTEMUNHAS",
            ]),
        }
    }
}
