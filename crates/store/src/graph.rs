use chrono::{DateTime, Utc};
use extract::{Entity, EntityLabel, EntityRef, Relation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(Uuid);

impl GraphId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for GraphId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for GraphId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("Graph not found: {0}")]
    NotFound(GraphId),

    /// A relation endpoint is missing from the graph's entity set.
    #[error("Relation {relation} references an entity not in the graph: {label} '{text}'")]
    DanglingRelation {
        relation: String,
        label: EntityLabel,
        text: String,
    },
}

/// Per-document knowledge graph. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractGraph {
    pub id: GraphId,
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
    pub created_at: DateTime<Utc>,
}

impl ContractGraph {
    /// Assemble a graph, dropping duplicate entities and rejecting relations
    /// whose endpoints are not among the entities.
    pub fn new(
        id: GraphId,
        entities: Vec<Entity>,
        relations: Vec<Relation>,
    ) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        let entities: Vec<Entity> = entities
            .into_iter()
            .filter(|e| seen.insert((e.label, e.text.clone())))
            .collect();

        for relation in &relations {
            for endpoint in [&relation.source, &relation.target] {
                if !seen.contains(&(endpoint.label, endpoint.text.clone())) {
                    return Err(StoreError::DanglingRelation {
                        relation: relation.relation_type.to_string(),
                        label: endpoint.label,
                        text: endpoint.text.clone(),
                    });
                }
            }
        }

        Ok(Self {
            id,
            entities,
            relations,
            created_at: Utc::now(),
        })
    }

    pub fn has_label(&self, label: EntityLabel) -> bool {
        self.entities.iter().any(|e| e.label == label)
    }

    pub fn labels(&self) -> HashSet<EntityLabel> {
        self.entities.iter().map(|e| e.label).collect()
    }

    pub fn entity(&self, reference: &EntityRef) -> Option<&Entity> {
        self.entities.iter().find(|e| reference.matches(e))
    }

    /// All entity texts joined by spaces.
    pub fn combined_text(&self) -> String {
        self.entities
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::{derive_relations, RelationType};
    use std::collections::BTreeMap;

    fn entities() -> Vec<Entity> {
        vec![
            Entity::new("ACME LTDA", EntityLabel::Contratante),
            Entity::new("BETA ME", EntityLabel::Contratado),
            Entity::new("R$ 1.000,00", EntityLabel::Valor),
            Entity::new("ACME LTDA", EntityLabel::Contratante),
        ]
    }

    #[test]
    fn test_duplicates_are_removed() {
        let graph = ContractGraph::new(GraphId::new(), entities(), vec![]).unwrap();
        assert_eq!(graph.entities.len(), 3);
        assert!(graph.has_label(EntityLabel::Valor));
        assert_eq!(graph.combined_text(), "ACME LTDA BETA ME R$ 1.000,00");
    }

    #[test]
    fn test_derived_relations_resolve() {
        let entities = entities();
        let relations = derive_relations(&entities);
        let graph = ContractGraph::new(GraphId::new(), entities, relations).unwrap();

        let payment = &graph.relations[0];
        assert_eq!(graph.entity(&payment.source).unwrap().text, "ACME LTDA");
    }

    #[test]
    fn test_dangling_relation_is_rejected() {
        let relation = Relation {
            source: Entity::new("ACME LTDA", EntityLabel::Contratante).to_ref(),
            target: Entity::new("GHOST SA", EntityLabel::Contratado).to_ref(),
            relation_type: RelationType::Pagamento,
            attributes: BTreeMap::new(),
        };
        let err = ContractGraph::new(GraphId::new(), entities(), vec![relation]).unwrap_err();

        assert_eq!(
            err,
            StoreError::DanglingRelation {
                relation: "pagamento".to_string(),
                label: EntityLabel::Contratado,
                text: "GHOST SA".to_string(),
            }
        );
    }

    #[test]
    fn test_graph_id_round_trips_through_string() {
        let id = GraphId::new();
        let parsed: GraphId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert_eq!(serde_json::to_value(id).unwrap(), serde_json::json!(id.to_string()));
    }
}
