use std::collections::HashSet;
use store::ContractGraph;

use crate::config::InconsistencyRule;

/// Evaluate every rule against the graph; each firing rule adds its message.
pub fn detect_inconsistencies(graph: &ContractGraph, rules: &[InconsistencyRule]) -> Vec<String> {
    let labels = graph.labels();
    let relation_types: HashSet<_> = graph.relations.iter().map(|r| r.relation_type).collect();

    rules
        .iter()
        .filter(|rule| {
            let triggered = rule.when_labels.iter().all(|l| labels.contains(l))
                && rule.when_relation.is_none_or(|r| relation_types.contains(&r));
            let unmet = rule.requires_labels.iter().any(|l| !labels.contains(l));
            triggered && unmet
        })
        .map(|rule| rule.message.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;
    use extract::{derive_relations, Entity, EntityLabel};
    use store::GraphId;

    fn check(entities: Vec<Entity>) -> Vec<String> {
        let relations = derive_relations(&entities);
        let graph = ContractGraph::new(GraphId::new(), entities, relations).unwrap();
        detect_inconsistencies(&graph, &RulesConfig::default().inconsistencies)
    }

    #[test]
    fn test_value_without_parties() {
        let found = check(vec![
            Entity::new("R$ 100,00", EntityLabel::Valor),
            Entity::new("ACME LTDA", EntityLabel::Contratante),
        ]);
        assert_eq!(found, vec!["VALOR presente sem especificação de CONTRATANTE ou CONTRATADO"]);
    }

    #[test]
    fn test_term_without_object() {
        let found = check(vec![Entity::new("30 dias", EntityLabel::Prazo)]);
        assert_eq!(found, vec!["PRAZO estabelecido sem definir o OBJETO do contrato"]);
    }

    #[test]
    fn test_payment_without_penalty() {
        let parties = vec![
            Entity::new("ACME LTDA", EntityLabel::Contratante),
            Entity::new("BETA ME", EntityLabel::Contratado),
            Entity::new("R$ 100,00", EntityLabel::Valor),
        ];
        assert_eq!(
            check(parties.clone()),
            vec!["Não há cláusula de MULTA mesmo existindo obrigação de pagamento"]
        );

        let mut with_penalty = parties;
        with_penalty.push(Entity::new("MULTA", EntityLabel::Multa));
        assert!(check(with_penalty).is_empty());
    }

    #[test]
    fn test_all_rules_are_evaluated() {
        let found = check(vec![
            Entity::new("R$ 100,00", EntityLabel::Valor),
            Entity::new("30 dias", EntityLabel::Prazo),
        ]);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_empty_graph_is_consistent() {
        assert!(check(vec![]).is_empty());
    }
}
