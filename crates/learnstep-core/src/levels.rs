//! Level mapping between (age group, difficulty) pairs and the linear
//! 1–12 level progression.
//!
//! The mapping is a fixed folding table, not computed: each age group owns
//! two adjacent levels, with easy on the odd level and medium/hard folded
//! onto the even one. These functions are pure and total — the enum domain
//! makes the invalid-input branch unrepresentable.
//!
//! Level 1:  Ages 4-5 easy        Level 2:  Ages 4-5 medium/hard
//! Level 3:  Age 6 easy           Level 4:  Age 6 medium/hard
//! Level 5:  Age 7 easy           Level 6:  Age 7 medium/hard
//! Level 7:  Age 8 easy           Level 8:  Age 8 medium/hard
//! Level 9:  Ages 9+ easy         Level 10: Ages 9+ medium/hard
//! Level 11: Ages 10+ easy        Level 12: Ages 10+ medium/hard

use std::str::FromStr;

use crate::model::{AgeGroup, Difficulty, Level};

/// Map an (age group, difficulty) pair onto its level. Medium and hard
/// fold onto the same (even) level.
pub fn level_for(age_group: AgeGroup, difficulty: Difficulty) -> Level {
    let base = match age_group {
        AgeGroup::FourToFive => 1,
        AgeGroup::Six => 3,
        AgeGroup::Seven => 5,
        AgeGroup::Eight => 7,
        AgeGroup::NinePlus => 9,
        AgeGroup::TenPlus => 11,
    };
    let n = match difficulty {
        Difficulty::Easy => base,
        Difficulty::Medium | Difficulty::Hard => base + 1,
    };
    Level::new(n).expect("level table stays within 1-12")
}

/// The age group a level belongs to.
pub fn age_group_for(level: Level) -> AgeGroup {
    match level.get() {
        1 | 2 => AgeGroup::FourToFive,
        3 | 4 => AgeGroup::Six,
        5 | 6 => AgeGroup::Seven,
        7 | 8 => AgeGroup::Eight,
        9 | 10 => AgeGroup::NinePlus,
        _ => AgeGroup::TenPlus,
    }
}

/// The difficulty a level unfolds to: easy for odd levels, medium for even
/// (the hard half of the fold is only reachable going the other way).
pub fn difficulty_for(level: Level) -> Difficulty {
    if level.get() % 2 == 1 {
        Difficulty::Easy
    } else {
        Difficulty::Medium
    }
}

/// Long display name shown on level selection screens.
pub fn display_name(level: Level) -> &'static str {
    match level.get() {
        1 => "Level 1 - Basic Foundations",
        2 => "Level 2 - Pre-K Advanced",
        3 => "Level 3 - Kindergarten Basics",
        4 => "Level 4 - Kindergarten Advanced",
        5 => "Level 5 - 1st Grade Basics",
        6 => "Level 6 - 1st Grade Advanced",
        7 => "Level 7 - 2nd Grade Basics",
        8 => "Level 8 - 2nd Grade Advanced",
        9 => "Level 9 - 3rd Grade Basics",
        10 => "Level 10 - 4th Grade Advanced",
        11 => "Level 11 - Advanced Basics",
        _ => "Level 12 - Pre-Teen Advanced",
    }
}

/// Short level description.
pub fn description(level: Level) -> &'static str {
    match level.get() {
        1 => "Basic foundations for early learners",
        2 => "Advanced pre-kindergarten content",
        3 => "Kindergarten level basics",
        4 => "Advanced kindergarten content",
        5 => "First grade fundamentals",
        6 => "Advanced first grade content",
        7 => "Second grade fundamentals",
        8 => "Advanced second grade content",
        9 => "Third grade level content",
        10 => "Fourth grade level content",
        11 => "Advanced elementary content",
        _ => "Pre-teen advanced content",
    }
}

/// The two levels a child of the given age would plausibly start in, used
/// to seed the initial assessment suggestion.
pub fn suggested_levels_for_age(age: u8) -> [Level; 2] {
    let start = starting_level_for_age(age);
    [start, start.next()]
}

/// Conservative recommended starting level for an age: the easy level of
/// the child's own age group.
pub fn starting_level_for_age(age: u8) -> Level {
    level_for(AgeGroup::from_age(age), Difficulty::Easy)
}

/// Convert a legacy age-based page identifier to the level-based form,
/// e.g. `addition-6-medium` → `addition-level4`. Identifiers that don't
/// match the legacy shape are returned unchanged.
pub fn to_level_identifier(identifier: &str) -> String {
    let Some((head, difficulty_part)) = identifier.rsplit_once('-') else {
        return identifier.to_string();
    };
    let Ok(difficulty) = Difficulty::from_str(difficulty_part) else {
        return identifier.to_string();
    };
    // The age token may itself contain a dash ("4-5"), so peel the age off
    // the tail of what remains.
    for (operation, age_part) in candidate_splits(head) {
        if let Ok(age_group) = AgeGroup::from_str(age_part) {
            let level = level_for(age_group, difficulty);
            return format!("{operation}-level{}", level.get());
        }
    }
    identifier.to_string()
}

fn candidate_splits(head: &str) -> impl Iterator<Item = (&str, &str)> {
    head.char_indices()
        .filter(|&(_, c)| c == '-')
        .map(|(i, _)| (&head[..i], &head[i + 1..]))
}

/// Convert a level-based identifier back to the legacy age-based form,
/// e.g. `addition-level4` → `addition-6-medium`.
pub fn from_level_identifier(identifier: &str) -> String {
    let Some((operation, level_part)) = identifier.rsplit_once("-level") else {
        return identifier.to_string();
    };
    let Some(level) = level_part.parse::<u8>().ok().and_then(Level::new) else {
        return identifier.to_string();
    };
    format!(
        "{operation}-{}-{}",
        age_group_for(level),
        difficulty_for(level)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_table() {
        assert_eq!(level_for(AgeGroup::FourToFive, Difficulty::Easy).get(), 1);
        assert_eq!(level_for(AgeGroup::FourToFive, Difficulty::Hard).get(), 2);
        assert_eq!(level_for(AgeGroup::Six, Difficulty::Medium).get(), 4);
        assert_eq!(level_for(AgeGroup::Seven, Difficulty::Medium).get(), 6);
        assert_eq!(level_for(AgeGroup::NinePlus, Difficulty::Easy).get(), 9);
        assert_eq!(level_for(AgeGroup::TenPlus, Difficulty::Hard).get(), 12);
    }

    #[test]
    fn medium_and_hard_fold_together() {
        for group in AgeGroup::ALL {
            assert_eq!(
                level_for(group, Difficulty::Medium),
                level_for(group, Difficulty::Hard)
            );
        }
    }

    #[test]
    fn round_trip_all_levels() {
        for level in Level::all() {
            let back = level_for(age_group_for(level), difficulty_for(level));
            assert_eq!(back, level, "round trip failed for {level}");
        }
    }

    #[test]
    fn starting_levels() {
        assert_eq!(starting_level_for_age(4).get(), 1);
        assert_eq!(starting_level_for_age(6).get(), 3);
        assert_eq!(starting_level_for_age(7).get(), 5);
        assert_eq!(starting_level_for_age(8).get(), 7);
        assert_eq!(starting_level_for_age(9).get(), 9);
        assert_eq!(starting_level_for_age(12).get(), 11);
        assert_eq!(
            suggested_levels_for_age(7).map(Level::get),
            [5, 6]
        );
    }

    #[test]
    fn display_names_cover_all_levels() {
        for level in Level::all() {
            assert!(display_name(level).starts_with(&format!("Level {}", level.get())));
            assert!(!description(level).is_empty());
        }
    }

    #[test]
    fn identifier_migration() {
        assert_eq!(to_level_identifier("addition-6-medium"), "addition-level4");
        assert_eq!(to_level_identifier("division-4-5-easy"), "division-level1");
        assert_eq!(to_level_identifier("addition-9+-hard"), "addition-level10");
        assert_eq!(to_level_identifier("not-an-identifier"), "not-an-identifier");
        assert_eq!(from_level_identifier("addition-level4"), "addition-6-medium");
        assert_eq!(from_level_identifier("english-level1"), "english-4-5-easy");
        assert_eq!(from_level_identifier("addition-level99"), "addition-level99");
    }

    #[test]
    fn identifier_round_trip() {
        for level in Level::all() {
            let id = format!("subtraction-level{}", level.get());
            assert_eq!(to_level_identifier(&from_level_identifier(&id)), id);
        }
    }
}
