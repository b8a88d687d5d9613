//! The completion gate: navigation decisions derived from completion
//! records.
//!
//! Pages and levels move Locked → Unlockable → Completed purely as a
//! function of stored completion facts. Gate reads never throw: a missing
//! record means "not completed", and a storage outage fails closed with a
//! reason rather than unlocking anything.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use learnstep_core::model::{CompletionRecord, CompletionRule, Level};
use learnstep_core::traits::CompletionStore;

use crate::rules::{PageCounts, Rules};

/// Whether a navigation attempt is allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: String,
}

/// Whether a page's result counts as completed under its module's rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageStatus {
    pub completed: bool,
    pub reason: String,
}

/// Aggregate completion of one level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelCompletion {
    pub completed: bool,
    pub completed_pages: u32,
    pub total_pages: u32,
}

/// A level navigation decision with the aggregate that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelAccess {
    pub allowed: bool,
    pub reason: String,
    pub completion: Option<LevelCompletion>,
}

/// A finished page as reported by the worksheet UI.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub score: u8,
    pub correct_count: u32,
    pub total_problems: u32,
    pub manually_marked: bool,
    pub elapsed_time: String,
    pub attempts: u32,
}

/// The completion gate over a persistence store.
pub struct CompletionGate {
    store: Arc<dyn CompletionStore>,
    rules: Rules,
    pages: PageCounts,
}

impl CompletionGate {
    pub fn new(store: Arc<dyn CompletionStore>) -> Self {
        Self {
            store,
            rules: Rules::builtin(),
            pages: PageCounts::builtin(),
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_page_counts(mut self, pages: PageCounts) -> Self {
        self.pages = pages;
        self
    }

    pub fn rule_for(&self, module: &str) -> CompletionRule {
        self.rules.rule_for(module)
    }

    /// Does this score / manual mark complete a page of the module?
    /// Manual-completion modules never look at the score.
    pub fn is_page_completed(&self, module: &str, score: u8, manually_marked: bool) -> PageStatus {
        let rule = self.rules.rule_for(module);

        if !rule.requires_score {
            return PageStatus {
                completed: manually_marked,
                reason: if manually_marked {
                    "Manually marked as complete".to_string()
                } else {
                    "Not marked as complete yet".to_string()
                },
            };
        }

        if score >= rule.threshold {
            PageStatus {
                completed: true,
                reason: format!("Score {score}% meets {}% threshold", rule.threshold),
            }
        } else {
            PageStatus {
                completed: false,
                reason: format!(
                    "Score {score}% is below {}% threshold. Try again!",
                    rule.threshold
                ),
            }
        }
    }

    /// Apply the module's completion rule to a finished page and persist
    /// the record (overwriting any previous save for the identifier).
    pub async fn save_page_result(
        &self,
        child_id: &str,
        module: &str,
        identifier: &str,
        result: PageResult,
    ) -> Result<CompletionRecord, learnstep_core::error::StorageError> {
        let status = self.is_page_completed(module, result.score, result.manually_marked);
        let record = CompletionRecord {
            score: result.score,
            correct_count: result.correct_count,
            total_problems: result.total_problems,
            completed: status.completed,
            manually_marked: result.manually_marked,
            elapsed_time: result.elapsed_time,
            attempts: result.attempts,
            timestamp: Utc::now(),
        };
        self.store
            .put_completion(child_id, module, identifier, record.clone())
            .await?;
        Ok(record)
    }

    /// May the child navigate from `current_page` to `target_page`?
    ///
    /// Backward navigation is always allowed; forward navigation in a
    /// sequential module requires the immediately preceding page to be
    /// completed. `identifier_prefix` scopes page identifiers for modules
    /// whose pages are keyed per operation/level (e.g. "addition-level1").
    pub async fn can_access_page(
        &self,
        child_id: &str,
        module: &str,
        target_page: u32,
        current_page: u32,
        identifier_prefix: Option<&str>,
    ) -> AccessDecision {
        let rule = self.rules.rule_for(module);

        if !rule.sequential_pages {
            return AccessDecision {
                allowed: true,
                reason: "Free navigation allowed".to_string(),
            };
        }

        if target_page <= current_page {
            return AccessDecision {
                allowed: true,
                reason: "Can navigate to previous pages".to_string(),
            };
        }

        let previous_page = target_page - 1;
        let identifier = match identifier_prefix {
            Some(prefix) => format!("{prefix}-page{previous_page}"),
            None => format!("{module}-page{previous_page}"),
        };

        let completion = match self.store.completion(child_id, module, &identifier).await {
            Ok(completion) => completion,
            Err(e) => {
                tracing::warn!(module, identifier, error = %e, "completion read failed");
                return AccessDecision {
                    allowed: false,
                    reason: "Progress could not be checked - please try again".to_string(),
                };
            }
        };

        match completion {
            Some(record) if record.completed => AccessDecision {
                allowed: true,
                reason: "Previous page completed".to_string(),
            },
            _ => AccessDecision {
                allowed: false,
                reason: format!(
                    "Complete page {previous_page} first (requires {}% score)",
                    rule.threshold
                ),
            },
        }
    }

    /// Aggregate completion of a level: completed pages counted from
    /// stored records against the static page-count configuration. A
    /// module with no configured page count can never complete a level.
    pub async fn level_completion(
        &self,
        child_id: &str,
        module: &str,
        level: Level,
        identifier_prefix: Option<&str>,
    ) -> LevelCompletion {
        let prefix = match identifier_prefix {
            Some(prefix) => format!("{prefix}-level{}", level.get()),
            None => format!("{module}-level{}", level.get()),
        };

        let completions = match self
            .store
            .completions_with_prefix(child_id, module, &prefix)
            .await
        {
            Ok(completions) => completions,
            Err(e) => {
                tracing::warn!(module, prefix, error = %e, "level completion read failed");
                Vec::new()
            }
        };

        let completed_pages = completions.iter().filter(|c| c.completed).count() as u32;
        let total_pages = self.pages.total_pages(module).unwrap_or(0);

        LevelCompletion {
            completed: total_pages > 0 && completed_pages >= total_pages,
            completed_pages,
            total_pages,
        }
    }

    /// May the child enter this level? Level 1 is always open; in a
    /// sequential module every other level requires the previous level to
    /// be fully completed.
    pub async fn can_access_level(
        &self,
        child_id: &str,
        module: &str,
        level: Level,
        identifier_prefix: Option<&str>,
    ) -> LevelAccess {
        let rule = self.rules.rule_for(module);

        if !rule.sequential_levels {
            return LevelAccess {
                allowed: true,
                reason: "Free navigation allowed".to_string(),
                completion: None,
            };
        }

        if level == Level::MIN {
            return LevelAccess {
                allowed: true,
                reason: "Starting level".to_string(),
                completion: None,
            };
        }

        let previous =
            Level::new(level.get() - 1).expect("levels above MIN have a predecessor");
        let completion = self
            .level_completion(child_id, module, previous, identifier_prefix)
            .await;

        if completion.completed {
            LevelAccess {
                allowed: true,
                reason: "Previous level completed".to_string(),
                completion: Some(completion),
            }
        } else {
            LevelAccess {
                allowed: false,
                reason: format!(
                    "Complete all pages in Level {} first ({}/{} done)",
                    previous.get(),
                    completion.completed_pages,
                    completion.total_pages
                ),
                completion: Some(completion),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnstep_core::model::CompletionRule;
    use learnstep_store::memory::MemoryStore;

    fn gate() -> (Arc<MemoryStore>, CompletionGate) {
        let store = Arc::new(MemoryStore::new());
        let gate = CompletionGate::new(store.clone());
        (store, gate)
    }

    fn page_result(score: u8) -> PageResult {
        PageResult {
            score,
            correct_count: u32::from(score) / 5,
            total_problems: 20,
            manually_marked: false,
            elapsed_time: "03:10".to_string(),
            attempts: 1,
        }
    }

    #[test]
    fn page_completion_threshold() {
        let (_, gate) = gate();

        let passed = gate.is_page_completed("math", 95, false);
        assert!(passed.completed);
        assert!(passed.reason.contains("meets 95%"));

        let failed = gate.is_page_completed("math", 94, false);
        assert!(!failed.completed);
        assert!(failed.reason.contains("below 95%"));
    }

    #[test]
    fn manual_modules_ignore_score() {
        let (_, gate) = gate();

        let unmarked = gate.is_page_completed("drawing", 100, false);
        assert!(!unmarked.completed);

        let marked = gate.is_page_completed("drawing", 0, true);
        assert!(marked.completed);
        assert_eq!(marked.reason, "Manually marked as complete");
    }

    #[tokio::test]
    async fn sequential_module_blocks_without_prior_completion() {
        let (_, gate) = gate();
        let decision = gate
            .can_access_page("child-1", "math", 2, 1, Some("addition-level1"))
            .await;
        assert!(!decision.allowed);
        assert!(decision.reason.contains("Complete page 1 first"));
        assert!(decision.reason.contains("95%"));
    }

    #[tokio::test]
    async fn sequential_module_unlocks_after_completion() {
        let (_, gate) = gate();
        gate.save_page_result("child-1", "math", "addition-level1-page1", page_result(97))
            .await
            .unwrap();

        let decision = gate
            .can_access_page("child-1", "math", 2, 1, Some("addition-level1"))
            .await;
        assert!(decision.allowed, "{}", decision.reason);
    }

    #[tokio::test]
    async fn below_threshold_save_does_not_unlock() {
        let (_, gate) = gate();
        let record = gate
            .save_page_result("child-1", "math", "addition-level1-page1", page_result(80))
            .await
            .unwrap();
        assert!(!record.completed);

        let decision = gate
            .can_access_page("child-1", "math", 2, 1, Some("addition-level1"))
            .await;
        assert!(!decision.allowed);
    }

    #[tokio::test]
    async fn backward_navigation_is_always_allowed() {
        let (_, gate) = gate();
        let decision = gate
            .can_access_page("child-1", "math", 3, 7, Some("addition-level1"))
            .await;
        assert!(decision.allowed);
        assert_eq!(decision.reason, "Can navigate to previous pages");
    }

    #[tokio::test]
    async fn free_module_ignores_history() {
        let (_, gate) = gate();
        let decision = gate
            .can_access_page("child-1", "drawing", 5, 1, None)
            .await;
        assert!(decision.allowed);
        assert_eq!(decision.reason, "Free navigation allowed");
    }

    #[tokio::test]
    async fn storage_outage_fails_closed() {
        let (store, gate) = gate();
        store.set_unavailable(true);

        let decision = gate
            .can_access_page("child-1", "math", 2, 1, None)
            .await;
        assert!(!decision.allowed);
        assert!(decision.reason.contains("could not be checked"));
    }

    #[tokio::test]
    async fn level_one_is_always_open() {
        let (_, gate) = gate();
        let access = gate
            .can_access_level("child-1", "math", Level::MIN, Some("addition"))
            .await;
        assert!(access.allowed);
        assert_eq!(access.reason, "Starting level");
    }

    #[tokio::test]
    async fn level_requires_previous_level_complete() {
        let (_, gate) = gate();
        // Shrink the page count so the test can complete a level.
        let mut pages = PageCounts::builtin();
        pages.set("math", 2);
        let gate = gate.with_page_counts(pages);

        let level2 = Level::new(2).unwrap();
        let locked = gate
            .can_access_level("child-1", "math", level2, Some("addition"))
            .await;
        assert!(!locked.allowed);
        assert!(locked.reason.contains("Complete all pages in Level 1"));

        for page in 1..=2 {
            gate.save_page_result(
                "child-1",
                "math",
                &format!("addition-level1-page{page}"),
                page_result(100),
            )
            .await
            .unwrap();
        }

        let unlocked = gate
            .can_access_level("child-1", "math", level2, Some("addition"))
            .await;
        assert!(unlocked.allowed, "{}", unlocked.reason);
        let completion = unlocked.completion.unwrap();
        assert_eq!(completion.completed_pages, 2);
        assert_eq!(completion.total_pages, 2);
    }

    #[tokio::test]
    async fn unknown_module_level_never_completes() {
        let (_, gate) = gate();
        // Give the unknown module sequential rules but no page count.
        let mut rules = Rules::builtin();
        rules.set(
            "chess",
            CompletionRule {
                requires_score: true,
                threshold: 95,
                sequential_pages: true,
                sequential_levels: true,
            },
        );
        let gate = gate.with_rules(rules);

        gate.save_page_result("child-1", "chess", "chess-level1-page1", page_result(100))
            .await
            .unwrap();

        let completion = gate
            .level_completion("child-1", "chess", Level::MIN, None)
            .await;
        assert!(!completion.completed, "unconfigured module must fail closed");
        assert_eq!(completion.total_pages, 0);
    }

    #[tokio::test]
    async fn resave_overwrites_not_appends() {
        let (store, gate) = gate();
        gate.save_page_result("child-1", "math", "addition-level1-page1", page_result(60))
            .await
            .unwrap();
        gate.save_page_result("child-1", "math", "addition-level1-page1", page_result(98))
            .await
            .unwrap();

        let completions = store
            .completions_with_prefix("child-1", "math", "addition-level1")
            .await
            .unwrap();
        assert_eq!(completions.len(), 1, "same identifier must overwrite");
        assert_eq!(completions[0].score, 98);
        assert!(completions[0].completed);
    }
}
