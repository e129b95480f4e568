use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlankFieldConfig {
    pub patterns: Vec<String>,
}

impl Default for BlankFieldConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                r"R\$ ?_{2,}".to_string(),          // amount left blank
                r"[A-Z ]{3,}[:：] ?_+".to_string(), // "NOME: ____"
                r"\bFORO\b[^\n]*_{2,}".to_string(),
                r"_{3,}".to_string(),
                r"X{3,}".to_string(),
                r"\( ?[Xx] ?\)".to_string(),        // checkbox option left open
                r"\[MNg\d+\]".to_string(),          // reviewer comment marker
            ],
        }
    }
}

/// Flags unfilled template fields left in a contract.
pub struct BlankFieldDetector {
    patterns: Vec<Regex>,
}

impl BlankFieldDetector {
    pub fn new(config: &BlankFieldConfig) -> Result<Self> {
        let patterns = config
            .patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid blank-field pattern: {}", p)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Every match of every pattern, in pattern order. A span already
    /// reported by an earlier pattern is not reported again.
    pub fn detect(&self, text: &str) -> Vec<String> {
        let mut covered: Vec<(usize, usize)> = Vec::new();
        let mut found = Vec::new();

        for pattern in &self.patterns {
            for m in pattern.find_iter(text) {
                let overlaps = covered
                    .iter()
                    .any(|&(start, end)| m.start() < end && start < m.end());
                if overlaps {
                    continue;
                }
                covered.push((m.start(), m.end()));
                found.push(m.as_str().trim().to_string());
            }
        }

        found
    }
}
