use extract::{EntityLabel, RelationType};
use ingest::ClauseType;
use serde::{Deserialize, Serialize};

use crate::legal_basis::LegalBasisTable;

/// Extra evidence that a clause type is present besides its own label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceRule {
    pub clause: ClauseType,
    /// Any of these labels satisfies the clause.
    #[serde(default)]
    pub labels: Vec<EntityLabel>,
    /// Case-insensitive patterns over the combined entity text.
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// Fires when every trigger is present and a required label is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InconsistencyRule {
    #[serde(default)]
    pub when_labels: Vec<EntityLabel>,
    #[serde(default)]
    pub when_relation: Option<RelationType>,
    pub requires_labels: Vec<EntityLabel>,
    pub message: String,
}

/// Clause types that `clause` presupposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyRule {
    pub clause: ClauseType,
    pub requires: Vec<ClauseType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub risk: u8,
    pub quality: u8,
    pub rationale: String,
}

impl ScoreOutcome {
    pub fn new(risk: u8, quality: u8, rationale: &str) -> Self {
        Self {
            risk,
            quality,
            rationale: rationale.to_string(),
        }
    }
}

/// Matches when every group has at least one keyword in the clause text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTier {
    pub all_of: Vec<Vec<String>>,
    pub outcome: ScoreOutcome,
}

/// Ordered tiers for one clause type, first match wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringRule {
    pub clause: ClauseType,
    pub tiers: Vec<ScoreTier>,
    pub fallback: ScoreOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub mandatory: Vec<ClauseType>,
    pub presence: Vec<PresenceRule>,
    pub inconsistencies: Vec<InconsistencyRule>,
    pub dependencies: Vec<DependencyRule>,
    pub scoring: Vec<ScoringRule>,
    /// Outcome for clause types without a scoring rule.
    pub default_score: ScoreOutcome,
    pub legal_basis: LegalBasisTable,
    /// `{clause}` is replaced by the missing clause type.
    pub missing_risk_template: String,
    /// `{message}` is replaced by the inconsistency message.
    pub inconsistency_risk_template: String,
    /// `{clause}` and `{dependency}` are replaced by clause types.
    pub correlation_template: String,
}

const ADEQUATE: &str = "Cláusula adequada.";

fn keywords(groups: &[&[&str]]) -> Vec<Vec<String>> {
    groups
        .iter()
        .map(|group| group.iter().map(|k| k.to_string()).collect())
        .collect()
}

fn tier(groups: &[&[&str]], risk: u8, quality: u8, rationale: &str) -> ScoreTier {
    ScoreTier {
        all_of: keywords(groups),
        outcome: ScoreOutcome::new(risk, quality, rationale),
    }
}

fn default_scoring() -> Vec<ScoringRule> {
    vec![
        ScoringRule {
            clause: ClauseType::Objeto,
            tiers: vec![tier(&[&["prestação de serviços", "serviços de"]], 3, 9, ADEQUATE)],
            fallback: ScoreOutcome::new(7, 5, "Cláusula vaga ou sem descrição clara dos serviços."),
        },
        ScoringRule {
            clause: ClauseType::Prazo,
            tiers: vec![
                tier(&[&["vigência", "prazo de"], &["início"], &["término"]], 3, 9, ADEQUATE),
                tier(
                    &[&["vigência", "prazo de"]],
                    6,
                    6,
                    "Cláusula sem definição clara de início e término.",
                ),
            ],
            fallback: ScoreOutcome::new(
                8,
                5,
                "Cláusula sem referência direta a duração ou vigência.",
            ),
        },
        ScoringRule {
            clause: ClauseType::Multa,
            tiers: vec![tier(&[&["percentual", "%"]], 3, 8, ADEQUATE)],
            fallback: ScoreOutcome::new(
                6,
                5,
                "Cláusula de multa sem valor definido pode gerar insegurança jurídica.",
            ),
        },
        ScoringRule {
            clause: ClauseType::Confidencialidade,
            tiers: vec![tier(&[&["sigilo", "informações confidenciais"]], 3, 8, ADEQUATE)],
            fallback: ScoreOutcome::new(
                7,
                8,
                "Falta menção clara a dever de sigilo e escopo das informações protegidas.",
            ),
        },
        ScoringRule {
            clause: ClauseType::Foro,
            tiers: vec![tier(&[&["comarca"]], 3, 9, ADEQUATE)],
            fallback: ScoreOutcome::new(
                6,
                8,
                "Foro não definido corretamente prejudica resolução de disputas.",
            ),
        },
        ScoringRule {
            clause: ClauseType::Rescisao,
            tiers: vec![tier(&[&["aviso prévio"]], 3, 8, ADEQUATE)],
            fallback: ScoreOutcome::new(
                7,
                8,
                "Ausência de condições claras para rescisão contratual.",
            ),
        },
    ]
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            mandatory: vec![
                ClauseType::Objeto,
                ClauseType::Prazo,
                ClauseType::Pagamento,
                ClauseType::Multa,
                ClauseType::Foro,
                ClauseType::Rescisao,
                ClauseType::Confidencialidade,
            ],
            presence: vec![
                PresenceRule {
                    clause: ClauseType::Pagamento,
                    labels: vec![EntityLabel::Valor],
                    patterns: vec![],
                },
                PresenceRule {
                    clause: ClauseType::Prazo,
                    labels: vec![],
                    patterns: vec![
                        r"\bvig[êe]ncia\b".to_string(),
                        r"prazo\s+indeterminado".to_string(),
                    ],
                },
            ],
            inconsistencies: vec![
                InconsistencyRule {
                    when_labels: vec![EntityLabel::Valor],
                    when_relation: None,
                    requires_labels: vec![EntityLabel::Contratante, EntityLabel::Contratado],
                    message: "VALOR presente sem especificação de CONTRATANTE ou CONTRATADO"
                        .to_string(),
                },
                InconsistencyRule {
                    when_labels: vec![EntityLabel::Prazo],
                    when_relation: None,
                    requires_labels: vec![EntityLabel::Objeto],
                    message: "PRAZO estabelecido sem definir o OBJETO do contrato".to_string(),
                },
                InconsistencyRule {
                    when_labels: vec![],
                    when_relation: Some(RelationType::Pagamento),
                    requires_labels: vec![EntityLabel::Multa],
                    message: "Não há cláusula de MULTA mesmo existindo obrigação de pagamento"
                        .to_string(),
                },
            ],
            dependencies: vec![
                DependencyRule {
                    clause: ClauseType::Multa,
                    requires: vec![ClauseType::Prazo],
                },
                DependencyRule {
                    clause: ClauseType::Confidencialidade,
                    requires: vec![ClauseType::Multa],
                },
                DependencyRule {
                    clause: ClauseType::Rescisao,
                    requires: vec![ClauseType::Objeto],
                },
                DependencyRule {
                    clause: ClauseType::Pagamento,
                    requires: vec![ClauseType::Objeto, ClauseType::Prazo],
                },
            ],
            scoring: default_scoring(),
            default_score: ScoreOutcome::new(3, 8, ADEQUATE),
            legal_basis: LegalBasisTable::default(),
            missing_risk_template:
                "Ausência da cláusula {clause} pode comprometer a segurança jurídica".to_string(),
            inconsistency_risk_template: "Inconsistência detectada: {message}".to_string(),
            correlation_template:
                "A cláusula '{clause}' exige a presença de '{dependency}', mas esta está ausente."
                    .to_string(),
        }
    }
}
