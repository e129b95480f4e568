use serde::{Deserialize, Serialize};
use std::fmt;

/// Legal topic a clause block addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseType {
    Objeto,
    Prazo,
    Pagamento,
    Multa,
    Rescisao,
    Foro,
    Confidencialidade,
    ObrigacoesContratado,
    ObrigacoesContratante,
    DisposicoesGerais,
    Outros,
}

impl ClauseType {
    pub const ALL: [ClauseType; 11] = [
        ClauseType::Objeto,
        ClauseType::Prazo,
        ClauseType::Pagamento,
        ClauseType::Multa,
        ClauseType::Rescisao,
        ClauseType::Foro,
        ClauseType::Confidencialidade,
        ClauseType::ObrigacoesContratado,
        ClauseType::ObrigacoesContratante,
        ClauseType::DisposicoesGerais,
        ClauseType::Outros,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseType::Objeto => "OBJETO",
            ClauseType::Prazo => "PRAZO",
            ClauseType::Pagamento => "PAGAMENTO",
            ClauseType::Multa => "MULTA",
            ClauseType::Rescisao => "RESCISAO",
            ClauseType::Foro => "FORO",
            ClauseType::Confidencialidade => "CONFIDENCIALIDADE",
            ClauseType::ObrigacoesContratado => "OBRIGACOES_CONTRATADO",
            ClauseType::ObrigacoesContratante => "OBRIGACOES_CONTRATANTE",
            ClauseType::DisposicoesGerais => "DISPOSICOES_GERAIS",
            ClauseType::Outros => "OUTROS",
        }
    }

    pub fn is_classified(&self) -> bool {
        *self != ClauseType::Outros
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contract section between two heading markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseBlock {
    pub heading: String,
    pub body: String,
    pub inferred_type: ClauseType,
    /// Fixed heuristic constant, not a computed probability.
    pub confidence: f32,
}

impl ClauseBlock {
    /// Heading and body joined, the way classification and scoring read a block.
    pub fn full_text(&self) -> String {
        if self.body.is_empty() {
            self.heading.clone()
        } else {
            format!("{}\n{}", self.heading, self.body)
        }
    }
}
