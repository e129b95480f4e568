use ingest::ClauseType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic tag of an extracted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityLabel {
    Contratante,
    Contratado,
    Valor,
    Data,
    Prazo,
    Cnpj,
    Objeto,
    Pagamento,
    Multa,
    Rescisao,
    Foro,
    Confidencialidade,
    ObrigacoesContratado,
    ObrigacoesContratante,
    DisposicoesGerais,
    Empresa,
    Pessoa,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Contratante => "CONTRATANTE",
            EntityLabel::Contratado => "CONTRATADO",
            EntityLabel::Valor => "VALOR",
            EntityLabel::Data => "DATA",
            EntityLabel::Prazo => "PRAZO",
            EntityLabel::Cnpj => "CNPJ",
            EntityLabel::Objeto => "OBJETO",
            EntityLabel::Pagamento => "PAGAMENTO",
            EntityLabel::Multa => "MULTA",
            EntityLabel::Rescisao => "RESCISAO",
            EntityLabel::Foro => "FORO",
            EntityLabel::Confidencialidade => "CONFIDENCIALIDADE",
            EntityLabel::ObrigacoesContratado => "OBRIGACOES_CONTRATADO",
            EntityLabel::ObrigacoesContratante => "OBRIGACOES_CONTRATANTE",
            EntityLabel::DisposicoesGerais => "DISPOSICOES_GERAIS",
            EntityLabel::Empresa => "EMPRESA",
            EntityLabel::Pessoa => "PESSOA",
        }
    }

    /// Label under which a segmented clause body is stored.
    pub fn from_clause(clause: ClauseType) -> Option<Self> {
        match clause {
            ClauseType::Objeto => Some(EntityLabel::Objeto),
            ClauseType::Prazo => Some(EntityLabel::Prazo),
            ClauseType::Pagamento => Some(EntityLabel::Pagamento),
            ClauseType::Multa => Some(EntityLabel::Multa),
            ClauseType::Rescisao => Some(EntityLabel::Rescisao),
            ClauseType::Foro => Some(EntityLabel::Foro),
            ClauseType::Confidencialidade => Some(EntityLabel::Confidencialidade),
            ClauseType::ObrigacoesContratado => Some(EntityLabel::ObrigacoesContratado),
            ClauseType::ObrigacoesContratante => Some(EntityLabel::ObrigacoesContratante),
            ClauseType::DisposicoesGerais => Some(EntityLabel::DisposicoesGerais),
            ClauseType::Outros => None,
        }
    }

    /// Clause type this label directly evidences, if any.
    pub fn clause_type(&self) -> Option<ClauseType> {
        match self {
            EntityLabel::Objeto => Some(ClauseType::Objeto),
            EntityLabel::Prazo => Some(ClauseType::Prazo),
            EntityLabel::Pagamento => Some(ClauseType::Pagamento),
            EntityLabel::Multa => Some(ClauseType::Multa),
            EntityLabel::Rescisao => Some(ClauseType::Rescisao),
            EntityLabel::Foro => Some(ClauseType::Foro),
            EntityLabel::Confidencialidade => Some(ClauseType::Confidencialidade),
            EntityLabel::ObrigacoesContratado => Some(ClauseType::ObrigacoesContratado),
            EntityLabel::ObrigacoesContratante => Some(ClauseType::ObrigacoesContratante),
            EntityLabel::DisposicoesGerais => Some(ClauseType::DisposicoesGerais),
            _ => None,
        }
    }

    /// Parties, names, identifiers, amounts and dates are stored upper-cased.
    /// Clause-type labels keep the contract's own casing.
    pub fn is_case_folded(&self) -> bool {
        matches!(
            self,
            EntityLabel::Contratante
                | EntityLabel::Contratado
                | EntityLabel::Empresa
                | EntityLabel::Pessoa
                | EntityLabel::Cnpj
                | EntityLabel::Valor
                | EntityLabel::Data
        )
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    pub fn to_ref(&self) -> EntityRef {
        EntityRef {
            text: self.text.clone(),
            label: self.label,
        }
    }
}

/// Key of an entity within the same graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    pub text: String,
    pub label: EntityLabel,
}

impl EntityRef {
    pub fn matches(&self, entity: &Entity) -> bool {
        self.label == entity.label && self.text == entity.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    /// Contracting party pays the contracted party.
    Pagamento,
    /// A term binds the contract object.
    PrazoObjeto,
    /// A clause applies to the contract object.
    Clausula,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Pagamento => "pagamento",
            RelationType::PrazoObjeto => "prazo_objeto",
            RelationType::Clausula => "clausula",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub source: EntityRef,
    pub target: EntityRef,
    #[serde(rename = "type")]
    pub relation_type: RelationType,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
}
