use ingest::ClauseType;
use std::collections::BTreeSet;

use crate::config::DependencyRule;

/// One alert per present clause whose prerequisite clause is absent.
pub fn correlate(
    present: &BTreeSet<ClauseType>,
    rules: &[DependencyRule],
    template: &str,
) -> Vec<String> {
    let mut alerts = Vec::new();

    for rule in rules.iter().filter(|r| present.contains(&r.clause)) {
        for dependency in rule.requires.iter().filter(|d| !present.contains(d)) {
            alerts.push(
                template
                    .replace("{clause}", rule.clause.as_str())
                    .replace("{dependency}", dependency.as_str()),
            );
        }
    }

    alerts
}
