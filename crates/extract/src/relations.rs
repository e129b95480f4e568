use std::collections::BTreeMap;

use crate::schema::{Entity, EntityLabel, Relation, RelationType};

fn first(entities: &[Entity], label: EntityLabel) -> Option<&Entity> {
    entities.iter().find(|e| e.label == label)
}

fn link(source: &Entity, target: &Entity, relation_type: RelationType) -> Relation {
    Relation {
        source: source.to_ref(),
        target: target.to_ref(),
        relation_type,
        attributes: BTreeMap::new(),
    }
}

/// Derive typed relations from label co-occurrence.
///
/// The first entity of each label in extraction order is used. A relation
/// whose required labels are absent is skipped.
pub fn derive_relations(entities: &[Entity]) -> Vec<Relation> {
    let mut relations = Vec::new();

    let contratante = first(entities, EntityLabel::Contratante);
    let contratado = first(entities, EntityLabel::Contratado);
    let valor = first(entities, EntityLabel::Valor);
    let objeto = first(entities, EntityLabel::Objeto);
    let prazo = first(entities, EntityLabel::Prazo);

    if let (Some(contratante), Some(contratado), Some(valor)) = (contratante, contratado, valor) {
        let mut payment = link(contratante, contratado, RelationType::Pagamento);
        payment.attributes.insert("valor".to_string(), valor.text.clone());
        relations.push(payment);
    }

    if let (Some(objeto), Some(prazo)) = (objeto, prazo) {
        relations.push(link(prazo, objeto, RelationType::PrazoObjeto));
    }

    if let Some(objeto) = objeto {
        for label in [EntityLabel::Multa, EntityLabel::Confidencialidade] {
            if let Some(clause) = first(entities, label) {
                relations.push(link(clause, objeto, RelationType::Clausula));
            }
        }
    }

    relations
}
