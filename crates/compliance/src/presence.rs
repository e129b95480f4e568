use anyhow::{Context, Result};
use extract::EntityLabel;
use ingest::ClauseType;
use regex::Regex;
use std::collections::BTreeSet;
use store::ContractGraph;

use crate::config::PresenceRule;

struct CompiledPresence {
    clause: ClauseType,
    labels: Vec<EntityLabel>,
    patterns: Vec<Regex>,
}

/// Decides which clause types a graph evidences.
pub struct ClausePresence {
    rules: Vec<CompiledPresence>,
}

impl ClausePresence {
    pub fn new(rules: &[PresenceRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| {
                let patterns = rule
                    .patterns
                    .iter()
                    .map(|p| {
                        Regex::new(&format!("(?i){}", p)).with_context(|| {
                            format!("Invalid presence pattern for {}: {}", rule.clause, p)
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledPresence {
                    clause: rule.clause,
                    labels: rule.labels.clone(),
                    patterns,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Clause types with a direct label, an alternate label, or a matching
    /// phrase anywhere in the combined entity text.
    pub fn present(&self, graph: &ContractGraph) -> BTreeSet<ClauseType> {
        let labels = graph.labels();
        let mut present: BTreeSet<ClauseType> =
            labels.iter().filter_map(|l| l.clause_type()).collect();

        let combined = graph.combined_text();
        for rule in &self.rules {
            if present.contains(&rule.clause) {
                continue;
            }
            let by_label = rule.labels.iter().any(|l| labels.contains(l));
            let by_phrase = rule.patterns.iter().any(|p| p.is_match(&combined));
            if by_label || by_phrase {
                present.insert(rule.clause);
            }
        }

        present
    }
}

/// Mandatory clause types not evidenced by the graph.
pub fn missing_clauses(
    mandatory: &[ClauseType],
    present: &BTreeSet<ClauseType>,
) -> BTreeSet<ClauseType> {
    mandatory
        .iter()
        .filter(|clause| !present.contains(clause))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use extract::Entity;
    use store::GraphId;

    fn graph(entities: Vec<Entity>) -> ContractGraph {
        ContractGraph::new(GraphId::new(), entities, vec![]).unwrap()
    }

    fn presence() -> ClausePresence {
        ClausePresence::new(&RulesConfig::default().presence).unwrap()
    }

    #[test]
    fn test_direct_labels_count() {
        let graph = graph(vec![
            Entity::new("MULTA", EntityLabel::Multa),
            Entity::new("ACME LTDA", EntityLabel::Contratante),
        ]);
        let present = presence().present(&graph);
        assert_eq!(present, BTreeSet::from([ClauseType::Multa]));
    }

    #[test]
    fn test_value_satisfies_payment() {
        let graph = graph(vec![Entity::new("R$ 100,00", EntityLabel::Valor)]);
        assert!(presence().present(&graph).contains(&ClauseType::Pagamento));
    }

    #[test]
    fn test_vigencia_phrase_satisfies_term() {
        let graph = graph(vec![Entity::new(
            "Consultoria com vigência de 12 meses",
            EntityLabel::Objeto,
        )]);
        let present = presence().present(&graph);
        assert!(present.contains(&ClauseType::Prazo));

        let graph = graph_with("contrato por PRAZO INDETERMINADO");
        assert!(presence().present(&graph).contains(&ClauseType::Prazo));
    }

    fn graph_with(text: &str) -> ContractGraph {
        graph(vec![Entity::new(text, EntityLabel::DisposicoesGerais)])
    }

    #[test]
    fn test_missing_is_mandatory_minus_present() {
        let mandatory = RulesConfig::default().mandatory;
        let present =
            BTreeSet::from([ClauseType::Objeto, ClauseType::Foro, ClauseType::DisposicoesGerais]);
        let missing = missing_clauses(&mandatory, &present);

        assert_eq!(
            missing,
            BTreeSet::from([
                ClauseType::Prazo,
                ClauseType::Pagamento,
                ClauseType::Multa,
                ClauseType::Rescisao,
                ClauseType::Confidencialidade,
            ])
        );
    }
}
