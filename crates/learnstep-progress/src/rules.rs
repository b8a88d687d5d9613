//! Static per-module completion policy and page-count tables.
//!
//! Math, English, and Aptitude require a 95% score and sequential
//! progression through pages and levels. Drawing, German, German (kids),
//! Stories, and EQ complete by manual marking and navigate freely.
//! Unknown modules fall back to free navigation for access, but have no
//! page counts — so their levels can never be marked complete.

use std::collections::HashMap;

use learnstep_core::model::CompletionRule;

/// Score a page must reach to count as completed in score-based modules.
pub const COMPLETION_THRESHOLD: u8 = 95;

const SCORED_SEQUENTIAL: CompletionRule = CompletionRule {
    requires_score: true,
    threshold: COMPLETION_THRESHOLD,
    sequential_pages: true,
    sequential_levels: true,
};

/// The per-module completion rule table. Configurable: deployments may
/// override or add modules, with unknown modules falling back to free
/// navigation.
#[derive(Debug, Clone)]
pub struct Rules {
    rules: HashMap<String, CompletionRule>,
}

impl Rules {
    /// The platform's built-in eight modules.
    pub fn builtin() -> Self {
        let mut rules = HashMap::new();
        for module in ["math", "english", "aptitude"] {
            rules.insert(module.to_string(), SCORED_SEQUENTIAL);
        }
        for module in ["drawing", "german", "german-kids", "stories", "eq"] {
            rules.insert(module.to_string(), CompletionRule::FREE);
        }
        Self { rules }
    }

    pub fn rule_for(&self, module: &str) -> CompletionRule {
        self.rules.get(module).copied().unwrap_or(CompletionRule::FREE)
    }

    /// Override or add a module's rule.
    pub fn set(&mut self, module: &str, rule: CompletionRule) {
        self.rules.insert(module.to_string(), rule);
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Pages per level for each module. `None` for unknown modules — an
/// unconfigured module must fail closed, not silently unlock.
#[derive(Debug, Clone)]
pub struct PageCounts {
    counts: HashMap<String, u32>,
}

impl PageCounts {
    pub fn builtin() -> Self {
        let counts = [
            ("math", 150),
            ("aptitude", 50),
            ("english", 20),
            ("stories", 2),
            ("drawing", 5),
            ("german", 5),
            ("german-kids", 5),
            ("eq", 10),
        ]
        .into_iter()
        .map(|(module, pages)| (module.to_string(), pages))
        .collect();
        Self { counts }
    }

    pub fn total_pages(&self, module: &str) -> Option<u32> {
        self.counts.get(module).copied()
    }

    pub fn set(&mut self, module: &str, pages: u32) {
        self.counts.insert(module.to_string(), pages);
    }
}

impl Default for PageCounts {
    fn default() -> Self {
        Self::builtin()
    }
}
