//! Quick assessment example — minimal programmatic usage of learnstep.
//!
//! Runs a full diagnostic assessment for one child against the built-in
//! content registry and an in-memory store, then checks what the
//! completion gate makes of the resulting level.
//!
//! ```bash
//! cargo run --example quick_assessment
//! ```

use std::sync::Arc;

use learnstep_core::engine::SubmittedAnswer;
use learnstep_core::model::{AgeGroup, Subject};
use learnstep_core::traits::CompletionStore;

use learnstep_content::BuiltinContent;
use learnstep_store::cached::CachedStore;
use learnstep_store::config::{build_engine, load_config};
use learnstep_store::memory::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Load config from learnstep.toml if present; defaults otherwise.
    let config = load_config()?;

    let store = Arc::new(CachedStore::new(MemoryStore::new()));
    let engine = build_engine(&config, Arc::new(BuiltinContent), store.clone());

    let child_id = "demo-child";
    let subject = Subject::Addition;
    let age_group = AgeGroup::Seven;

    // Generate the 20-question diagnostic.
    let questions = engine.begin(child_id, subject, age_group)?;
    println!("Assessment for age group {age_group} ({} questions):", questions.len());
    for (i, q) in questions.iter().enumerate() {
        println!("  {:2}. [{}] {}", i + 1, q.tier, q.prompt);
    }

    // Answer the younger-easy and current-easy tiers correctly and leave
    // the rest blank — a plausible on-the-bubble child.
    let answers: Vec<SubmittedAnswer> = questions
        .iter()
        .map(|q| {
            if q.source_difficulty == learnstep_core::model::Difficulty::Easy
                && q.source_age <= age_group
            {
                SubmittedAnswer::Typed(q.expected.to_string())
            } else {
                SubmittedAnswer::Typed(String::new())
            }
        })
        .collect();

    let outcome = engine
        .submit(child_id, subject, age_group, &questions, answers)
        .await;

    println!();
    println!(
        "Score: {}/{} ({}%), validated {:?}",
        outcome.summary.correct_count,
        outcome.summary.total,
        outcome.summary.percentage,
        outcome.validated_by,
    );
    println!(
        "Assigned: {} ({} {})",
        outcome.assignment.level, outcome.assignment.age_group, outcome.assignment.difficulty
    );
    println!("Reason: {}", outcome.assignment.reason);

    let record = store.assessment(child_id, subject).await?;
    println!("Stored record: {record:?}");

    Ok(())
}
