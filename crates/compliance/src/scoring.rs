use ingest::ClauseType;
use std::collections::HashMap;

use crate::config::{ScoreOutcome, ScoreTier, ScoringRule};
use crate::finding::ClauseScore;
use crate::legal_basis::LegalBasisTable;

const MAX_SCORE: u8 = 10;

struct CompiledRule {
    tiers: Vec<ScoreTier>,
    fallback: ScoreOutcome,
}

/// Keyword-heuristic risk/quality scorer with legal-basis lookup.
pub struct ClauseScorer {
    rules: HashMap<ClauseType, CompiledRule>,
    default_score: ScoreOutcome,
    legal_basis: LegalBasisTable,
}

fn clamp(mut outcome: ScoreOutcome) -> ScoreOutcome {
    outcome.risk = outcome.risk.min(MAX_SCORE);
    outcome.quality = outcome.quality.min(MAX_SCORE);
    outcome
}

impl ClauseScorer {
    pub fn new(
        scoring: &[ScoringRule],
        default_score: &ScoreOutcome,
        legal_basis: &LegalBasisTable,
    ) -> Self {
        let mut rules = HashMap::new();
        for rule in scoring {
            let tiers = rule
                .tiers
                .iter()
                .map(|tier| ScoreTier {
                    all_of: tier
                        .all_of
                        .iter()
                        .map(|group| group.iter().map(|k| k.to_lowercase()).collect())
                        .collect(),
                    outcome: clamp(tier.outcome.clone()),
                })
                .collect();
            // First rule for a clause type wins.
            rules.entry(rule.clause).or_insert(CompiledRule {
                tiers,
                fallback: clamp(rule.fallback.clone()),
            });
        }

        Self {
            rules,
            default_score: clamp(default_score.clone()),
            legal_basis: legal_basis.clone(),
        }
    }

    /// Score a clause body. Pure: same text and type, same score.
    pub fn score(&self, body: &str, clause: ClauseType) -> ClauseScore {
        let outcome = self.outcome(&body.to_lowercase(), clause);
        let basis = self.legal_basis.lookup(clause);

        ClauseScore {
            risk: outcome.risk,
            quality: outcome.quality,
            rationale: outcome.rationale.clone(),
            legal_basis: basis.justification.clone(),
            citation: basis.citation.clone(),
        }
    }

    fn outcome(&self, body_lower: &str, clause: ClauseType) -> &ScoreOutcome {
        let Some(rule) = self.rules.get(&clause) else {
            return &self.default_score;
        };

        rule.tiers
            .iter()
            .find(|tier| {
                tier.all_of
                    .iter()
                    .all(|group| group.iter().any(|k| body_lower.contains(k.as_str())))
            })
            .map(|tier| &tier.outcome)
            .unwrap_or(&rule.fallback)
    }
}
