//! Built-in English question bank.
//!
//! Unlike math, English content is keyed by (age group, difficulty) only.
//! Each cell holds a small bank of prompt/answer pairs; a pull picks
//! uniformly from the bank. The full story-comprehension banks live
//! outside this crate — this is the typed-answer subset the assessment
//! pipeline needs.

use rand::seq::SliceRandom;
use rand::RngCore;

use learnstep_core::model::{AgeGroup, Difficulty, ExpectedAnswer, Problem};

type Item = (&'static str, &'static str);

/// Look up the bank for an (age group, difficulty) cell.
pub fn bank_for(age_group: AgeGroup, difficulty: Difficulty) -> Option<&'static [Item]> {
    use AgeGroup::*;
    use Difficulty::*;

    let bank: &'static [Item] = match (age_group, difficulty) {
        (FourToFive, Easy) => &[
            ("Which letter does 'apple' start with?", "a"),
            ("Which letter does 'ball' start with?", "b"),
            ("Which letter does 'cat' start with?", "c"),
            ("Which letter does 'dog' start with?", "d"),
            ("Which letter does 'egg' start with?", "e"),
        ],
        (FourToFive, Medium) => &[
            ("Which letter does 'sun' end with?", "n"),
            ("Which letter does 'hat' end with?", "t"),
            ("Which letter does 'frog' end with?", "g"),
            ("Which letter does 'star' end with?", "r"),
            ("Which letter does 'bus' end with?", "s"),
        ],
        (FourToFive, Hard) => &[
            ("Fill in the missing letter: c_t (a pet that says meow)", "a"),
            ("Fill in the missing letter: d_g (a pet that barks)", "o"),
            ("Fill in the missing letter: s_n (it shines in the sky)", "u"),
            ("Fill in the missing letter: b_d (you sleep in it)", "e"),
            ("Fill in the missing letter: p_g (a pink farm animal)", "i"),
        ],
        (Six, Easy) => &[
            ("Which word rhymes with 'cat': hat or dog?", "hat"),
            ("Which word rhymes with 'sun': fun or moon?", "fun"),
            ("Which word rhymes with 'tree': bee or bird?", "bee"),
            ("Which word rhymes with 'ball': tall or small cup?", "tall"),
            ("Which word rhymes with 'night': light or dark?", "light"),
        ],
        (Six, Medium) => &[
            ("What is the plural of 'cat'?", "cats"),
            ("What is the plural of 'dog'?", "dogs"),
            ("What is the plural of 'book'?", "books"),
            ("What is the plural of 'tree'?", "trees"),
            ("What is the plural of 'car'?", "cars"),
        ],
        (Six, Hard) => &[
            ("What is the opposite of 'hot'?", "cold"),
            ("What is the opposite of 'big'?", "small"),
            ("What is the opposite of 'up'?", "down"),
            ("What is the opposite of 'day'?", "night"),
            ("What is the opposite of 'fast'?", "slow"),
        ],
        (Seven, Easy) => &[
            ("What is the opposite of 'happy'?", "sad"),
            ("What is the opposite of 'open'?", "closed"),
            ("What is the opposite of 'wet'?", "dry"),
            ("What is the opposite of 'loud'?", "quiet"),
            ("What is the opposite of 'full'?", "empty"),
        ],
        (Seven, Medium) => &[
            ("What is the past tense of 'jump'?", "jumped"),
            ("What is the past tense of 'play'?", "played"),
            ("What is the past tense of 'walk'?", "walked"),
            ("What is the past tense of 'talk'?", "talked"),
            ("What is the past tense of 'look'?", "looked"),
        ],
        (Seven, Hard) => &[
            ("What is the past tense of 'go'?", "went"),
            ("What is the past tense of 'see'?", "saw"),
            ("What is the past tense of 'eat'?", "ate"),
            ("What is the past tense of 'run'?", "ran"),
            ("What is the past tense of 'come'?", "came"),
        ],
        (Eight, Easy) => &[
            ("Which word means the same as 'big': large or tiny?", "large"),
            ("Which word means the same as 'fast': quick or slow?", "quick"),
            ("Which word means the same as 'happy': glad or sad?", "glad"),
            ("Which word means the same as 'small': little or huge?", "little"),
            ("Which word means the same as 'begin': start or stop?", "start"),
        ],
        (Eight, Medium) => &[
            ("What is the plural of 'mouse'?", "mice"),
            ("What is the plural of 'child'?", "children"),
            ("What is the plural of 'foot'?", "feet"),
            ("What is the plural of 'tooth'?", "teeth"),
            ("What is the plural of 'goose'?", "geese"),
        ],
        (Eight, Hard) => &[
            ("Complete: good, better, ...?", "best"),
            ("Complete: bad, worse, ...?", "worst"),
            ("Complete: big, bigger, ...?", "biggest"),
            ("Complete: happy, happier, ...?", "happiest"),
            ("Complete: far, farther, ...?", "farthest"),
        ],
        (NinePlus, Easy) => &[
            ("What is the comparative of 'tall'?", "taller"),
            ("What is the comparative of 'cold'?", "colder"),
            ("What is the comparative of 'strong'?", "stronger"),
            ("What is the comparative of 'bright'?", "brighter"),
            ("What is the comparative of 'deep'?", "deeper"),
        ],
        (NinePlus, Medium) => &[
            ("Add a prefix to make the opposite of 'happy'", "unhappy"),
            ("Add a prefix to make the opposite of 'possible'", "impossible"),
            ("Add a prefix to make the opposite of 'agree'", "disagree"),
            ("Add a prefix to make the opposite of 'visible'", "invisible"),
            ("Add a prefix to make the opposite of 'like'", "dislike"),
        ],
        (NinePlus, Hard) => &[
            ("Which word sounds like 'sea': see or saw?", "see"),
            ("Which word sounds like 'two': too or ten?", "too"),
            ("Which word sounds like 'hear': here or hair?", "here"),
            ("Which word sounds like 'write': right or rot?", "right"),
            ("Which word sounds like 'knight': night or neat?", "night"),
        ],
        (TenPlus, Easy) => &[
            ("Turn 'care' into an adjective ending in -ful", "careful"),
            ("Turn 'help' into an adjective ending in -ful", "helpful"),
            ("Turn 'use' into an adjective ending in -ful", "useful"),
            ("Turn 'color' into an adjective ending in -ful", "colorful"),
            ("Turn 'thank' into an adjective ending in -ful", "thankful"),
        ],
        (TenPlus, Medium) => &[
            ("What compound word combines 'rain' and 'bow'?", "rainbow"),
            ("What compound word combines 'sun' and 'flower'?", "sunflower"),
            ("What compound word combines 'foot' and 'ball'?", "football"),
            ("What compound word combines 'book' and 'shelf'?", "bookshelf"),
            ("What compound word combines 'butter' and 'fly'?", "butterfly"),
        ],
        (TenPlus, Hard) => &[
            ("Which word means 'very large': enormous or tiny?", "enormous"),
            ("Which word means 'very old': ancient or recent?", "ancient"),
            ("Which word means 'very fast': rapid or sluggish?", "rapid"),
            ("Which word means 'very small': minuscule or vast?", "minuscule"),
            ("Which word means 'very tired': exhausted or alert?", "exhausted"),
        ],
    };
    Some(bank)
}

/// Draw `count` problems from the bank, uniformly with replacement.
pub fn problems(
    age_group: AgeGroup,
    difficulty: Difficulty,
    count: usize,
    rng: &mut dyn RngCore,
) -> Option<Vec<Problem>> {
    let bank = bank_for(age_group, difficulty)?;
    Some(
        (0..count)
            .map(|_| {
                let (prompt, answer) = bank.choose(rng).expect("banks are non-empty");
                Problem {
                    prompt: (*prompt).to_string(),
                    answer: ExpectedAnswer::Text((*answer).to_string()),
                }
            })
            .collect(),
    )
}
