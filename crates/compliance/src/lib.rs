pub mod config;
pub mod correlation;
pub mod finding;
pub mod inconsistency;
pub mod legal_basis;
pub mod presence;
pub mod scoring;

pub use config::{
    DependencyRule, InconsistencyRule, PresenceRule, RulesConfig, ScoreOutcome, ScoreTier,
    ScoringRule,
};
pub use correlation::correlate;
pub use finding::{ClauseScore, ComplianceFinding, ComplianceStatus};
pub use inconsistency::detect_inconsistencies;
pub use legal_basis::{LegalBasis, LegalBasisTable};
pub use presence::{missing_clauses, ClausePresence};
pub use scoring::ClauseScorer;

use anyhow::Result;
use ingest::{ClauseBlock, ClauseType};
use std::collections::BTreeMap;
use store::ContractGraph;
use tracing::debug;

pub struct ComplianceEngine {
    config: RulesConfig,
    presence: ClausePresence,
    scorer: ClauseScorer,
}

impl ComplianceEngine {
    pub fn new(config: RulesConfig) -> Result<Self> {
        let presence = ClausePresence::new(&config.presence)?;
        let scorer = ClauseScorer::new(&config.scoring, &config.default_score, &config.legal_basis);

        Ok(Self {
            config,
            presence,
            scorer,
        })
    }

    pub fn evaluate(&self, graph: &ContractGraph, blocks: &[ClauseBlock]) -> ComplianceFinding {
        let present = self.presence.present(graph);
        let missing = missing_clauses(&self.config.mandatory, &present);
        let inconsistencies = detect_inconsistencies(graph, &self.config.inconsistencies);

        let mut risks: Vec<String> = missing
            .iter()
            .map(|clause| self.config.missing_risk_template.replace("{clause}", clause.as_str()))
            .collect();
        let template = &self.config.inconsistency_risk_template;
        risks.extend(
            inconsistencies
                .iter()
                .map(|message| template.replace("{message}", message)),
        );

        let mut per_clause_score: BTreeMap<ClauseType, ClauseScore> = BTreeMap::new();
        for block in blocks {
            per_clause_score
                .entry(block.inferred_type)
                .or_insert_with(|| self.scorer.score(&block.body, block.inferred_type));
        }

        let correlation_alerts = correlate(
            &present,
            &self.config.dependencies,
            &self.config.correlation_template,
        );
        let status = ComplianceStatus::from_checks(&missing, &inconsistencies);

        debug!(
            graph_id = %graph.id,
            present = present.len(),
            missing = missing.len(),
            inconsistencies = inconsistencies.len(),
            alerts = correlation_alerts.len(),
            status = %status,
            "Compliance evaluated"
        );

        ComplianceFinding {
            detected_clauses: blocks.iter().map(|b| b.inferred_type).collect(),
            missing_clauses: missing,
            inconsistencies,
            risks,
            per_clause_score,
            correlation_alerts,
            status,
        }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::{derive_relations, Entity, EntityLabel};
    use store::GraphId;

    fn graph(entities: Vec<Entity>) -> ContractGraph {
        let relations = derive_relations(&entities);
        ContractGraph::new(GraphId::new(), entities, relations).unwrap()
    }

    fn block(clause: ClauseType, body: &str) -> ClauseBlock {
        ClauseBlock {
            heading: format!("CLÁUSULA - {}", clause),
            body: body.to_string(),
            inferred_type: clause,
            confidence: 0.9,
        }
    }

    fn complete_entities() -> Vec<Entity> {
        vec![
            Entity::new("ALFA LTDA", EntityLabel::Contratante),
            Entity::new("BETA S.A.", EntityLabel::Contratado),
            Entity::new("R$ 5.000,00", EntityLabel::Valor),
            Entity::new("prestação de serviços de consultoria", EntityLabel::Objeto),
            Entity::new("12 MESES", EntityLabel::Prazo),
            Entity::new("MULTA", EntityLabel::Multa),
            Entity::new("FORO", EntityLabel::Foro),
            Entity::new("RESCISAO", EntityLabel::Rescisao),
            Entity::new("CONFIDENCIALIDADE", EntityLabel::Confidencialidade),
        ]
    }

    #[test]
    fn test_empty_graph_misses_everything() {
        let engine = ComplianceEngine::new(RulesConfig::default()).unwrap();
        let finding = engine.evaluate(&graph(vec![]), &[]);

        assert_eq!(finding.missing_clauses.len(), 7);
        assert!(finding.inconsistencies.is_empty());
        assert_eq!(finding.risks.len(), 7);
        assert!(finding.per_clause_score.is_empty());
        assert!(finding.correlation_alerts.is_empty());
        assert_eq!(finding.status, ComplianceStatus::Attention);
    }

    #[test]
    fn test_payment_without_penalty() {
        let engine = ComplianceEngine::new(RulesConfig::default()).unwrap();
        let finding = engine.evaluate(
            &graph(vec![
                Entity::new("ALFA LTDA", EntityLabel::Contratante),
                Entity::new("BETA S.A.", EntityLabel::Contratado),
                Entity::new("R$ 5.000,00", EntityLabel::Valor),
            ]),
            &[],
        );

        assert!(finding.missing_clauses.contains(&ClauseType::Multa));
        assert!(!finding.missing_clauses.contains(&ClauseType::Pagamento));
        assert!(finding
            .inconsistencies
            .iter()
            .any(|m| m.contains("MULTA")));
        let missing_risk = "Ausência da cláusula MULTA pode comprometer a segurança jurídica";
        assert!(finding.risks.iter().any(|r| r == missing_risk));
        assert!(finding.risks.iter().any(|r| r.starts_with("Inconsistência detectada: ")));
        assert_eq!(finding.status, ComplianceStatus::Attention);
    }

    #[test]
    fn test_complete_contract_is_ok() {
        let engine = ComplianceEngine::new(RulesConfig::default()).unwrap();
        let finding = engine.evaluate(&graph(complete_entities()), &[]);

        assert!(finding.missing_clauses.is_empty());
        assert!(finding.inconsistencies.is_empty());
        assert!(finding.risks.is_empty());
        assert!(finding.correlation_alerts.is_empty());
        assert_eq!(finding.status, ComplianceStatus::Ok);
        assert!(!finding.requires_review());
    }

    #[test]
    fn test_removing_mandatory_label_never_clears_attention() {
        let engine = ComplianceEngine::new(RulesConfig::default()).unwrap();
        let full = complete_entities();

        for skipped in 0..full.len() {
            let partial: Vec<Entity> = full
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skipped)
                .map(|(_, e)| e.clone())
                .collect();
            let before = engine.evaluate(&graph(partial.clone()), &[]);

            // Dropping another mandatory-clause label keeps the verdict at ATTENTION.
            let reduced: Vec<Entity> = partial
                .into_iter()
                .filter(|e| e.label != EntityLabel::Foro)
                .collect();
            let after = engine.evaluate(&graph(reduced), &[]);

            assert!(before.missing_clauses.is_subset(&after.missing_clauses));
            assert_eq!(after.status, ComplianceStatus::Attention);
        }
    }

    #[test]
    fn test_first_block_of_each_type_is_scored() {
        let engine = ComplianceEngine::new(RulesConfig::default()).unwrap();
        let blocks = vec![
            block(ClauseType::Objeto, "Prestação de serviços de consultoria."),
            block(ClauseType::Objeto, "Texto vago."),
            block(ClauseType::Outros, "Assinaturas."),
        ];
        let finding = engine.evaluate(&graph(vec![]), &blocks);

        assert_eq!(
            finding.detected_clauses,
            vec![ClauseType::Objeto, ClauseType::Objeto, ClauseType::Outros]
        );
        assert_eq!(finding.per_clause_score.len(), 2);
        assert_eq!(finding.per_clause_score[&ClauseType::Objeto].quality, 9);
        assert_eq!(finding.per_clause_score[&ClauseType::Outros].citation, "Desconhecida");
    }

    #[test]
    fn test_correlation_alerts_follow_presence() {
        let engine = ComplianceEngine::new(RulesConfig::default()).unwrap();
        let finding = engine.evaluate(&graph(vec![Entity::new("MULTA", EntityLabel::Multa)]), &[]);

        assert_eq!(
            finding.correlation_alerts,
            vec![
                "A cláusula 'MULTA' exige a presença de 'PRAZO', mas esta está ausente."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_invalid_presence_pattern_fails_construction() {
        let mut config = RulesConfig::default();
        config.presence[1].patterns.push("(".to_string());
        assert!(ComplianceEngine::new(config).is_err());
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let engine = ComplianceEngine::new(RulesConfig::default()).unwrap();
        let g = graph(complete_entities()[..4].to_vec());
        assert_eq!(engine.evaluate(&g, &[]), engine.evaluate(&g, &[]));
    }
}
