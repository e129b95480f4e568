use ingest::ClauseType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Justification text and statutory citation for a clause type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalBasis {
    pub justification: String,
    pub citation: String,
}

impl LegalBasis {
    pub fn new(justification: &str, citation: &str) -> Self {
        Self {
            justification: justification.to_string(),
            citation: citation.to_string(),
        }
    }

    pub fn unmapped() -> Self {
        Self::new("Nenhuma base legal mapeada para esta cláusula.", "Desconhecida")
    }
}

/// Static reference table; replaceable through configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalBasisTable {
    pub entries: BTreeMap<ClauseType, LegalBasis>,
    pub unmapped: LegalBasis,
}

impl LegalBasisTable {
    /// Unknown clause types resolve to the unmapped entry, never an error.
    pub fn lookup(&self, clause: ClauseType) -> &LegalBasis {
        self.entries.get(&clause).unwrap_or(&self.unmapped)
    }
}

impl Default for LegalBasisTable {
    fn default() -> Self {
        let entries = BTreeMap::from([
            (
                ClauseType::Objeto,
                LegalBasis::new(
                    "Todo contrato deve conter objeto claro e determinado. \
                    Ausência compromete a validade do negócio jurídico.",
                    "Código Civil, art. 104, I",
                ),
            ),
            (
                ClauseType::Prazo,
                LegalBasis::new(
                    "É essencial estabelecer vigência contratual \
                    para caracterizar obrigações no tempo.",
                    "Código Civil, art. 421-A, §1º",
                ),
            ),
            (
                ClauseType::Pagamento,
                LegalBasis::new(
                    "A contraprestação deve ser definida para caracterizar sinalagmática. \
                    Omissão pode gerar nulidade.",
                    "Código Civil, art. 319",
                ),
            ),
            (
                ClauseType::Multa,
                LegalBasis::new(
                    "A multa contratual funciona como cláusula penal \
                    e deve seguir limites de razoabilidade.",
                    "Código Civil, art. 408",
                ),
            ),
            (
                ClauseType::Foro,
                LegalBasis::new(
                    "Definir o foro competente previne conflitos de jurisdição em caso de litígio.",
                    "CPC, art. 63",
                ),
            ),
            (
                ClauseType::Rescisao,
                LegalBasis::new(
                    "Deve haver previsão de rescisão contratual unilateral e bilateral \
                    com aviso prévio.",
                    "CLT, art. 473, II / Código Civil, art. 473",
                ),
            ),
            (
                ClauseType::Confidencialidade,
                LegalBasis::new(
                    "Proteção de informações sensíveis é obrigatória \
                    em relações com acesso a dados sigilosos.",
                    "LGPD, art. 6º, I / Código Civil, art. 422",
                ),
            ),
        ]);

        Self {
            entries,
            unmapped: LegalBasis::unmapped(),
        }
    }
}
