use compliance::ComplianceFinding;
use extract::{Entity, Relation};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpinionStatus {
    OkToProceed,
    ReviewRequired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    pub narrative: String,
    pub recommendation: String,
    pub status: OpinionStatus,
}

/// Fixed sentences of the opinion. `{list}` is substituted where it appears.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpinionTemplates {
    pub title: String,
    pub title_rule: String,
    pub clean: String,
    pub missing: String,
    pub missing_consequence: String,
    pub inconsistencies: String,
    pub risks: String,
    pub closing: String,
    pub review_recommendation: String,
    pub proceed_recommendation: String,
}

impl Default for OpinionTemplates {
    fn default() -> Self {
        Self {
            title: "Parecer Jurídico".to_string(),
            title_rule: "=".to_string(),
            clean: "A análise do contrato de prestação de serviços empresariais não indicou \
                    ausência de cláusulas essenciais ou incoerências."
                .to_string(),
            missing: "Foram identificadas as seguintes cláusulas obrigatórias ausentes: {list}."
                .to_string(),
            missing_consequence: "A inexistência destas disposições pode fragilizar a segurança \
                                  jurídica do ajuste."
                .to_string(),
            inconsistencies: "Inconsistências verificadas: {list}.".to_string(),
            risks: "Principais riscos apurados: {list}.".to_string(),
            closing: "Recomenda-se a revisão minuciosa do instrumento contratual para adequar as \
                      cláusulas à legislação aplicável e aos interesses das partes."
                .to_string(),
            review_recommendation:
                "Revisar e complementar as cláusulas faltantes antes da assinatura".to_string(),
            proceed_recommendation: "Prosseguir com a formalização do contrato".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OpinionComposer {
    templates: OpinionTemplates,
}

impl OpinionComposer {
    pub fn new(templates: OpinionTemplates) -> Self {
        Self { templates }
    }

    /// The narrative branches only on the finding: clean bill, or one
    /// paragraph per non-empty missing/inconsistency/risk list.
    pub fn compose(
        &self,
        entities: &[Entity],
        relations: &[Relation],
        finding: &ComplianceFinding,
    ) -> Opinion {
        let t = &self.templates;
        let needs_review =
            !finding.missing_clauses.is_empty() || !finding.inconsistencies.is_empty();

        let mut lines = vec![t.title.clone(), t.title_rule.clone()];

        if needs_review {
            if !finding.missing_clauses.is_empty() {
                let list: Vec<&str> = finding.missing_clauses.iter().map(|c| c.as_str()).collect();
                lines.push(t.missing.replace("{list}", &list.join(", ")));
                lines.push(t.missing_consequence.clone());
            }
            if !finding.inconsistencies.is_empty() {
                lines.push(
                    t.inconsistencies
                        .replace("{list}", &finding.inconsistencies.join("; ")),
                );
            }
            if !finding.risks.is_empty() {
                lines.push(t.risks.replace("{list}", &finding.risks.join("; ")));
            }
        } else {
            lines.push(t.clean.clone());
        }

        lines.push(t.closing.clone());

        let (recommendation, status) = if needs_review {
            (t.review_recommendation.clone(), OpinionStatus::ReviewRequired)
        } else {
            (t.proceed_recommendation.clone(), OpinionStatus::OkToProceed)
        };

        debug!(
            entities = entities.len(),
            relations = relations.len(),
            paragraphs = lines.len(),
            status = ?status,
            "Opinion composed"
        );

        Opinion {
            narrative: lines.join("\n"),
            recommendation,
            status,
        }
    }
}
