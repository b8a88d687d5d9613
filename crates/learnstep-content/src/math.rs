//! Parameterized math problem generators.
//!
//! Each (operation, age group, difficulty) cell maps to one generator
//! family with fixed parameters. The table is the curriculum: which number
//! ranges, multiplication tables, decimals, and fractions a child meets at
//! each step. Division with remainder and all fraction problems carry
//! string answers; everything else is numeric.

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use learnstep_core::model::{
    format_number, AgeGroup, Difficulty, ExpectedAnswer, Problem, Subject,
};

/// Problems per worksheet page.
pub const PROBLEMS_PER_PAGE: usize = 20;

/// One cell of the curriculum table.
#[derive(Debug, Clone, Copy)]
pub struct MathConfig {
    pub name: &'static str,
    pub description: &'static str,
    pub problem_count: usize,
    spec: GeneratorSpec,
}

impl MathConfig {
    pub fn generate(&self, rng: &mut dyn RngCore) -> Problem {
        self.spec.generate(rng)
    }
}

#[derive(Debug, Clone, Copy)]
enum GeneratorSpec {
    /// Addition with both addends in [min, max] and the sum capped.
    SimpleAddition { min: i64, max: i64, sum_limit: i64 },
    /// Addition with independently ranged addends.
    MixedAddition { min1: i64, max1: i64, min2: i64, max2: i64 },
    /// Subtraction within [min, max], never negative.
    SimpleSubtraction { min: i64, max: i64 },
    /// Subtraction with independently ranged operands, swapped to stay
    /// non-negative.
    MixedSubtraction { min1: i64, max1: i64, min2: i64, max2: i64 },
    /// Times-table practice over a fixed multiplier set.
    TableMultiplication { multipliers: &'static [i64], min: i64, max: i64 },
    /// Multiplication with independently ranged factors.
    AdvancedMultiplication { min1: i64, max1: i64, min2: i64, max2: i64 },
    /// Exact division over a fixed divisor set.
    TableDivision { divisors: &'static [i64], min_quotient: i64, max_quotient: i64 },
    /// Division with ranged dividend/divisor, optionally with remainder.
    AdvancedDivision { min: i64, max: i64, min_divisor: i64, max_divisor: i64, with_remainder: bool },
    DecimalAddition { min: i64, max: i64, places: u32 },
    DecimalSubtraction { min: i64, max: i64, places: u32 },
    DecimalMultiplication { min: i64, max: i64, places: u32 },
    DecimalDivision { places: u32 },
    FractionAddition,
    FractionSubtraction,
    FractionMultiplication,
    FractionDivision,
}

fn prompt(a: impl std::fmt::Display, op: Subject, b: impl std::fmt::Display) -> String {
    let symbol = op.symbol().expect("math operation has a symbol");
    format!("{a} {symbol} {b} =")
}

fn numeric(a: i64, op: Subject, b: i64, answer: i64) -> Problem {
    Problem {
        prompt: prompt(a, op, b),
        answer: ExpectedAnswer::Number(answer as f64),
    }
}

/// A fixed-point decimal value: `scaled / 10^places`, rendered without
/// trailing zeros so "42.0" shows as "42".
fn decimal(scaled: i64, places: u32) -> f64 {
    scaled as f64 / 10f64.powi(places as i32)
}

impl GeneratorSpec {
    fn generate(&self, rng: &mut dyn RngCore) -> Problem {
        match *self {
            GeneratorSpec::SimpleAddition { min, max, sum_limit } => {
                let min_sum = min + min;
                let max_sum = (max + max).min(sum_limit);
                let target = rng.gen_range(min_sum..=max_sum);
                let min_a = min.max(target - max);
                let max_a = max.min(target - min);
                let a = rng.gen_range(min_a..=max_a);
                let b = target - a;
                numeric(a, Subject::Addition, b, a + b)
            }
            GeneratorSpec::MixedAddition { min1, max1, min2, max2 } => {
                let a = rng.gen_range(min1..=max1);
                let b = rng.gen_range(min2..=max2);
                numeric(a, Subject::Addition, b, a + b)
            }
            GeneratorSpec::SimpleSubtraction { min, max } => {
                let a = rng.gen_range(min..=max);
                let b = rng.gen_range(1..=a);
                numeric(a, Subject::Subtraction, b, a - b)
            }
            GeneratorSpec::MixedSubtraction { min1, max1, min2, max2 } => {
                let mut a = rng.gen_range(min1..=max1);
                let mut b = rng.gen_range(min2..=max2);
                if b > a {
                    std::mem::swap(&mut a, &mut b);
                }
                numeric(a, Subject::Subtraction, b, a - b)
            }
            GeneratorSpec::TableMultiplication { multipliers, min, max } => {
                let multiplier = *multipliers.choose(rng).expect("multiplier table is non-empty");
                let multiplicand = rng.gen_range(min..=max);
                numeric(
                    multiplicand,
                    Subject::Multiplication,
                    multiplier,
                    multiplicand * multiplier,
                )
            }
            GeneratorSpec::AdvancedMultiplication { min1, max1, min2, max2 } => {
                let a = rng.gen_range(min1..=max1);
                let b = rng.gen_range(min2..=max2);
                numeric(a, Subject::Multiplication, b, a * b)
            }
            GeneratorSpec::TableDivision { divisors, min_quotient, max_quotient } => {
                let divisor = *divisors.choose(rng).expect("divisor table is non-empty");
                let quotient = rng.gen_range(min_quotient..=max_quotient);
                numeric(divisor * quotient, Subject::Division, divisor, quotient)
            }
            GeneratorSpec::AdvancedDivision { min, max, min_divisor, max_divisor, with_remainder } => {
                let divisor = rng.gen_range(min_divisor..=max_divisor);
                if with_remainder {
                    let dividend = rng.gen_range(min..=max);
                    let quotient = dividend / divisor;
                    let remainder = dividend % divisor;
                    let answer = if remainder > 0 {
                        format!("{quotient} R{remainder}")
                    } else {
                        format!("{quotient}")
                    };
                    Problem {
                        prompt: prompt(dividend, Subject::Division, divisor),
                        answer: ExpectedAnswer::Text(answer),
                    }
                } else {
                    let quotient = rng.gen_range(min / divisor..=max / divisor);
                    numeric(divisor * quotient, Subject::Division, divisor, quotient)
                }
            }
            GeneratorSpec::DecimalAddition { min, max, places } => {
                let scale = 10i64.pow(places);
                let a = rng.gen_range(0..(max - min + 1) * scale) + min * scale;
                let b = rng.gen_range(0..(max - min + 1) * scale) + min * scale;
                Problem {
                    prompt: prompt(
                        format_number(decimal(a, places)),
                        Subject::Addition,
                        format_number(decimal(b, places)),
                    ),
                    answer: ExpectedAnswer::Number(decimal(a + b, places)),
                }
            }
            GeneratorSpec::DecimalSubtraction { min, max, places } => {
                let scale = 10i64.pow(places);
                let a = rng.gen_range(0..(max - min + 1) * scale) + min * scale;
                let b = rng.gen_range(0..a);
                Problem {
                    prompt: prompt(
                        format_number(decimal(a, places)),
                        Subject::Subtraction,
                        format_number(decimal(b, places)),
                    ),
                    answer: ExpectedAnswer::Number(decimal(a - b, places)),
                }
            }
            GeneratorSpec::DecimalMultiplication { min, max, places } => {
                let scale = 10i64.pow(places);
                let a = rng.gen_range(0..(max - min + 1) * scale) + min * scale;
                let b = rng.gen_range(0..10 * scale) + scale;
                // The product of two p-place values has 2p places; the
                // scaled integer keeps the answer exact.
                let answer = (a * b) as f64 / (scale * scale) as f64;
                Problem {
                    prompt: prompt(
                        format_number(decimal(a, places)),
                        Subject::Multiplication,
                        format_number(decimal(b, places)),
                    ),
                    answer: ExpectedAnswer::Number(answer),
                }
            }
            GeneratorSpec::DecimalDivision { places } => {
                let scale = 10i64.pow(places);
                let divisor = rng.gen_range(0..9 * scale) + scale;
                let quotient = rng.gen_range(0..20 * scale) + scale;
                let dividend = (divisor * quotient) as f64 / (scale * scale) as f64;
                Problem {
                    prompt: prompt(
                        format_number(dividend),
                        Subject::Division,
                        format_number(decimal(divisor, places)),
                    ),
                    answer: ExpectedAnswer::Number(decimal(quotient, places)),
                }
            }
            GeneratorSpec::FractionAddition => {
                let denominator = *[2, 3, 4, 5, 6, 8, 10].choose(rng).unwrap();
                let num1 = rng.gen_range(1..denominator);
                let num2 = rng.gen_range(1..denominator);
                let sum = num1 + num2;
                let whole = sum / denominator;
                let numerator = sum % denominator;
                let answer = match (whole, numerator) {
                    (0, n) => format!("{n}/{denominator}"),
                    (w, 0) => format!("{w}"),
                    (w, n) => format!("{w} {n}/{denominator}"),
                };
                Problem {
                    prompt: prompt(
                        format!("{num1}/{denominator}"),
                        Subject::Addition,
                        format!("{num2}/{denominator}"),
                    ),
                    answer: ExpectedAnswer::Text(answer),
                }
            }
            GeneratorSpec::FractionSubtraction => {
                let denominator = *[2, 3, 4, 5, 6, 8, 10].choose(rng).unwrap();
                let num1 = rng.gen_range(2..=denominator);
                let num2 = rng.gen_range(1..num1);
                Problem {
                    prompt: prompt(
                        format!("{num1}/{denominator}"),
                        Subject::Subtraction,
                        format!("{num2}/{denominator}"),
                    ),
                    answer: ExpectedAnswer::Text(format!("{}/{denominator}", num1 - num2)),
                }
            }
            GeneratorSpec::FractionMultiplication => {
                let denom1 = *[2, 3, 4, 5, 6].choose(rng).unwrap();
                let denom2 = *[2, 3, 4, 5, 6].choose(rng).unwrap();
                let num1 = rng.gen_range(1..denom1);
                let num2 = rng.gen_range(1..denom2);
                Problem {
                    prompt: prompt(
                        format!("{num1}/{denom1}"),
                        Subject::Multiplication,
                        format!("{num2}/{denom2}"),
                    ),
                    answer: ExpectedAnswer::Text(format!("{}/{}", num1 * num2, denom1 * denom2)),
                }
            }
            GeneratorSpec::FractionDivision => {
                let denom1 = *[2, 3, 4, 5, 6].choose(rng).unwrap();
                let denom2 = *[2, 3, 4, 5, 6].choose(rng).unwrap();
                let num1 = rng.gen_range(1..denom1);
                let num2 = rng.gen_range(1..denom2);
                Problem {
                    prompt: prompt(
                        format!("{num1}/{denom1}"),
                        Subject::Division,
                        format!("{num2}/{denom2}"),
                    ),
                    answer: ExpectedAnswer::Text(format!("{}/{}", num1 * denom2, denom1 * num2)),
                }
            }
        }
    }
}

/// Look up the curriculum cell for (operation, age group, difficulty).
/// Returns `None` for `Subject::English` — English lives in its own bank.
pub fn config_for(
    subject: Subject,
    age_group: AgeGroup,
    difficulty: Difficulty,
) -> Option<MathConfig> {
    use AgeGroup::*;
    use Difficulty::*;
    use GeneratorSpec::*;

    let (name, description, spec) = match (subject, age_group, difficulty) {
        // Addition -----------------------------------------------------
        (Subject::Addition, FourToFive, Easy) => ("Ages 4-5 - Easy Addition", "Adding numbers up to 5", SimpleAddition { min: 1, max: 4, sum_limit: 5 }),
        (Subject::Addition, FourToFive, Medium) => ("Ages 4-5 - Medium Addition", "Adding numbers up to 10", SimpleAddition { min: 1, max: 9, sum_limit: 10 }),
        (Subject::Addition, FourToFive, Hard) => ("Ages 4-5 - Hard Addition", "Adding numbers up to 15", SimpleAddition { min: 1, max: 10, sum_limit: 15 }),
        (Subject::Addition, Six, Easy) => ("Age 6 - Easy Addition", "Adding numbers up to 12", SimpleAddition { min: 2, max: 10, sum_limit: 12 }),
        (Subject::Addition, Six, Medium) => ("Age 6 - Medium Addition", "Adding numbers up to 20", SimpleAddition { min: 5, max: 15, sum_limit: 20 }),
        (Subject::Addition, Six, Hard) => ("Age 6 - Hard Addition", "Two-digit + One-digit numbers", MixedAddition { min1: 10, max1: 99, min2: 1, max2: 9 }),
        (Subject::Addition, Seven, Easy) => ("Age 7 - Easy Addition", "Adding numbers up to 25", SimpleAddition { min: 10, max: 20, sum_limit: 25 }),
        (Subject::Addition, Seven, Medium) => ("Age 7 - Medium Addition", "Two-digit + One-digit numbers", MixedAddition { min1: 10, max1: 99, min2: 1, max2: 9 }),
        (Subject::Addition, Seven, Hard) => ("Age 7 - Hard Addition", "Two-digit + Two-digit numbers", MixedAddition { min1: 10, max1: 99, min2: 10, max2: 99 }),
        (Subject::Addition, Eight, Easy) => ("Age 8 - Easy Addition", "Two-digit + Two-digit (small numbers)", MixedAddition { min1: 10, max1: 50, min2: 10, max2: 50 }),
        (Subject::Addition, Eight, Medium) => ("Age 8 - Medium Addition", "Two-digit + Two-digit numbers", MixedAddition { min1: 10, max1: 99, min2: 10, max2: 99 }),
        (Subject::Addition, Eight, Hard) => ("Age 8 - Hard Addition", "Three-digit operations", MixedAddition { min1: 100, max1: 999, min2: 10, max2: 99 }),
        (Subject::Addition, NinePlus, Easy) => ("Ages 9+ - Easy Addition", "Complex two-digit addition", MixedAddition { min1: 50, max1: 99, min2: 50, max2: 99 }),
        (Subject::Addition, NinePlus, Medium) => ("Ages 9+ - Medium Addition", "Three-digit addition", MixedAddition { min1: 100, max1: 999, min2: 100, max2: 999 }),
        (Subject::Addition, NinePlus, Hard) => ("Ages 9+ - Hard Addition", "Decimal addition", DecimalAddition { min: 1, max: 100, places: 1 }),
        (Subject::Addition, TenPlus, Easy) => ("Ages 10+ - Easy Addition", "Four-digit addition", MixedAddition { min1: 1000, max1: 9999, min2: 100, max2: 999 }),
        (Subject::Addition, TenPlus, Medium) => ("Ages 10+ - Medium Addition", "Decimal addition (2 places)", DecimalAddition { min: 1, max: 100, places: 2 }),
        (Subject::Addition, TenPlus, Hard) => ("Ages 10+ - Hard Addition", "Fraction addition", FractionAddition),

        // Subtraction --------------------------------------------------
        (Subject::Subtraction, FourToFive, Easy) => ("Ages 4-5 - Easy Subtraction", "Subtracting within 5", SimpleSubtraction { min: 1, max: 5 }),
        (Subject::Subtraction, FourToFive, Medium) => ("Ages 4-5 - Medium Subtraction", "Subtracting within 10", SimpleSubtraction { min: 1, max: 10 }),
        (Subject::Subtraction, FourToFive, Hard) => ("Ages 4-5 - Hard Subtraction", "Subtracting within 15", SimpleSubtraction { min: 1, max: 15 }),
        (Subject::Subtraction, Six, Easy) => ("Age 6 - Easy Subtraction", "Subtracting within 12", SimpleSubtraction { min: 3, max: 12 }),
        (Subject::Subtraction, Six, Medium) => ("Age 6 - Medium Subtraction", "Subtracting within 20", SimpleSubtraction { min: 5, max: 20 }),
        (Subject::Subtraction, Six, Hard) => ("Age 6 - Hard Subtraction", "Two-digit - One-digit numbers", MixedSubtraction { min1: 10, max1: 99, min2: 1, max2: 9 }),
        (Subject::Subtraction, Seven, Easy) => ("Age 7 - Easy Subtraction", "Subtracting within 25", SimpleSubtraction { min: 10, max: 25 }),
        (Subject::Subtraction, Seven, Medium) => ("Age 7 - Medium Subtraction", "Two-digit - One-digit numbers", MixedSubtraction { min1: 10, max1: 99, min2: 1, max2: 9 }),
        (Subject::Subtraction, Seven, Hard) => ("Age 7 - Hard Subtraction", "Two-digit - Two-digit numbers", MixedSubtraction { min1: 20, max1: 99, min2: 10, max2: 30 }),
        (Subject::Subtraction, Eight, Easy) => ("Age 8 - Easy Subtraction", "Two-digit - Two-digit (easier)", MixedSubtraction { min1: 30, max1: 99, min2: 10, max2: 40 }),
        (Subject::Subtraction, Eight, Medium) => ("Age 8 - Medium Subtraction", "Two-digit - Two-digit numbers", MixedSubtraction { min1: 20, max1: 99, min2: 10, max2: 30 }),
        (Subject::Subtraction, Eight, Hard) => ("Age 8 - Hard Subtraction", "Three-digit operations", MixedSubtraction { min1: 100, max1: 999, min2: 10, max2: 99 }),
        (Subject::Subtraction, NinePlus, Easy) => ("Ages 9+ - Easy Subtraction", "Complex two-digit subtraction", MixedSubtraction { min1: 50, max1: 99, min2: 10, max2: 50 }),
        (Subject::Subtraction, NinePlus, Medium) => ("Ages 9+ - Medium Subtraction", "Three-digit subtraction", MixedSubtraction { min1: 100, max1: 999, min2: 100, max2: 500 }),
        (Subject::Subtraction, NinePlus, Hard) => ("Ages 9+ - Hard Subtraction", "Decimal subtraction", DecimalSubtraction { min: 1, max: 100, places: 1 }),
        (Subject::Subtraction, TenPlus, Easy) => ("Ages 10+ - Easy Subtraction", "Four-digit subtraction", MixedSubtraction { min1: 1000, max1: 9999, min2: 100, max2: 999 }),
        (Subject::Subtraction, TenPlus, Medium) => ("Ages 10+ - Medium Subtraction", "Decimal subtraction (2 places)", DecimalSubtraction { min: 1, max: 100, places: 2 }),
        (Subject::Subtraction, TenPlus, Hard) => ("Ages 10+ - Hard Subtraction", "Fraction subtraction", FractionSubtraction),

        // Multiplication -----------------------------------------------
        (Subject::Multiplication, FourToFive, Easy) => ("Ages 4-5 - Easy Multiplication", "Multiply by 1", TableMultiplication { multipliers: &[1], min: 1, max: 10 }),
        (Subject::Multiplication, FourToFive, Medium) => ("Ages 4-5 - Medium Multiplication", "Multiply by 1 and 2", TableMultiplication { multipliers: &[1, 2], min: 1, max: 5 }),
        (Subject::Multiplication, FourToFive, Hard) => ("Ages 4-5 - Hard Multiplication", "Multiply by 1 and 2", TableMultiplication { multipliers: &[1, 2], min: 1, max: 10 }),
        (Subject::Multiplication, Six, Easy) => ("Age 6 - Easy Multiplication", "Multiply by 2 and 3", TableMultiplication { multipliers: &[2, 3], min: 1, max: 10 }),
        (Subject::Multiplication, Six, Medium) => ("Age 6 - Medium Multiplication", "Multiply by 3, 4, 5", TableMultiplication { multipliers: &[3, 4, 5], min: 1, max: 10 }),
        (Subject::Multiplication, Six, Hard) => ("Age 6 - Hard Multiplication", "Multiply by 2-5", TableMultiplication { multipliers: &[2, 3, 4, 5], min: 1, max: 10 }),
        (Subject::Multiplication, Seven, Easy) => ("Age 7 - Easy Multiplication", "Multiply by 4, 5, 6", TableMultiplication { multipliers: &[4, 5, 6], min: 1, max: 10 }),
        (Subject::Multiplication, Seven, Medium) => ("Age 7 - Medium Multiplication", "Multiply by 6, 7, 8, 9", TableMultiplication { multipliers: &[6, 7, 8, 9], min: 1, max: 10 }),
        (Subject::Multiplication, Seven, Hard) => ("Age 7 - Hard Multiplication", "Two-digit x One-digit", AdvancedMultiplication { min1: 10, max1: 99, min2: 2, max2: 9 }),
        (Subject::Multiplication, Eight, Easy) => ("Age 8 - Easy Multiplication", "Multiply by 7, 8, 9, 10", TableMultiplication { multipliers: &[7, 8, 9, 10], min: 1, max: 12 }),
        (Subject::Multiplication, Eight, Medium) => ("Age 8 - Medium Multiplication", "Two-digit x One-digit", AdvancedMultiplication { min1: 10, max1: 99, min2: 2, max2: 9 }),
        (Subject::Multiplication, Eight, Hard) => ("Age 8 - Hard Multiplication", "Two-digit x Two-digit", AdvancedMultiplication { min1: 10, max1: 50, min2: 10, max2: 50 }),
        (Subject::Multiplication, NinePlus, Easy) => ("Ages 9+ - Easy Multiplication", "Two-digit x One-digit (larger)", AdvancedMultiplication { min1: 20, max1: 99, min2: 5, max2: 9 }),
        (Subject::Multiplication, NinePlus, Medium) => ("Ages 9+ - Medium Multiplication", "Larger two-digit multiplication", AdvancedMultiplication { min1: 20, max1: 99, min2: 10, max2: 99 }),
        (Subject::Multiplication, NinePlus, Hard) => ("Ages 9+ - Hard Multiplication", "Three-digit x Two-digit", AdvancedMultiplication { min1: 100, max1: 999, min2: 10, max2: 99 }),
        (Subject::Multiplication, TenPlus, Easy) => ("Ages 10+ - Easy Multiplication", "Two-digit x Two-digit (larger)", AdvancedMultiplication { min1: 30, max1: 99, min2: 20, max2: 99 }),
        (Subject::Multiplication, TenPlus, Medium) => ("Ages 10+ - Medium Multiplication", "Decimal multiplication", DecimalMultiplication { min: 1, max: 50, places: 1 }),
        (Subject::Multiplication, TenPlus, Hard) => ("Ages 10+ - Hard Multiplication", "Fraction multiplication", FractionMultiplication),

        // Division -----------------------------------------------------
        (Subject::Division, FourToFive, Easy) => ("Ages 4-5 - Easy Division", "Divide by 1", TableDivision { divisors: &[1], min_quotient: 1, max_quotient: 10 }),
        (Subject::Division, FourToFive, Medium) => ("Ages 4-5 - Medium Division", "Divide by 1 and 2", TableDivision { divisors: &[1, 2], min_quotient: 1, max_quotient: 5 }),
        (Subject::Division, FourToFive, Hard) => ("Ages 4-5 - Hard Division", "Divide by 1 and 2", TableDivision { divisors: &[1, 2], min_quotient: 1, max_quotient: 10 }),
        (Subject::Division, Six, Easy) => ("Age 6 - Easy Division", "Divide by 2 and 3", TableDivision { divisors: &[2, 3], min_quotient: 1, max_quotient: 10 }),
        (Subject::Division, Six, Medium) => ("Age 6 - Medium Division", "Divide by 3, 4, 5", TableDivision { divisors: &[3, 4, 5], min_quotient: 1, max_quotient: 10 }),
        (Subject::Division, Six, Hard) => ("Age 6 - Hard Division", "Divide by 2-5", TableDivision { divisors: &[2, 3, 4, 5], min_quotient: 1, max_quotient: 10 }),
        (Subject::Division, Seven, Easy) => ("Age 7 - Easy Division", "Divide by 4, 5, 6", TableDivision { divisors: &[4, 5, 6], min_quotient: 1, max_quotient: 10 }),
        (Subject::Division, Seven, Medium) => ("Age 7 - Medium Division", "Divide by 6, 7, 8, 9", TableDivision { divisors: &[6, 7, 8, 9], min_quotient: 1, max_quotient: 10 }),
        (Subject::Division, Seven, Hard) => ("Age 7 - Hard Division", "Two-digit / One-digit", AdvancedDivision { min: 10, max: 99, min_divisor: 2, max_divisor: 9, with_remainder: false }),
        (Subject::Division, Eight, Easy) => ("Age 8 - Easy Division", "Divide by 7, 8, 9, 10", TableDivision { divisors: &[7, 8, 9, 10], min_quotient: 1, max_quotient: 12 }),
        (Subject::Division, Eight, Medium) => ("Age 8 - Medium Division", "Two-digit / One-digit", AdvancedDivision { min: 10, max: 99, min_divisor: 2, max_divisor: 9, with_remainder: false }),
        (Subject::Division, Eight, Hard) => ("Age 8 - Hard Division", "Division with remainders", AdvancedDivision { min: 10, max: 99, min_divisor: 2, max_divisor: 9, with_remainder: true }),
        (Subject::Division, NinePlus, Easy) => ("Ages 9+ - Easy Division", "Two-digit / One-digit (larger)", AdvancedDivision { min: 20, max: 99, min_divisor: 5, max_divisor: 9, with_remainder: false }),
        (Subject::Division, NinePlus, Medium) => ("Ages 9+ - Medium Division", "Three-digit / Two-digit", AdvancedDivision { min: 100, max: 999, min_divisor: 10, max_divisor: 50, with_remainder: false }),
        (Subject::Division, NinePlus, Hard) => ("Ages 9+ - Hard Division", "Complex division with remainders", AdvancedDivision { min: 100, max: 999, min_divisor: 10, max_divisor: 50, with_remainder: true }),
        (Subject::Division, TenPlus, Easy) => ("Ages 10+ - Easy Division", "Division with remainders (advanced)", AdvancedDivision { min: 50, max: 200, min_divisor: 6, max_divisor: 12, with_remainder: true }),
        (Subject::Division, TenPlus, Medium) => ("Ages 10+ - Medium Division", "Decimal division", DecimalDivision { places: 1 }),
        (Subject::Division, TenPlus, Hard) => ("Ages 10+ - Hard Division", "Fraction division", FractionDivision),

        (Subject::English, _, _) => return None,
    };

    Some(MathConfig {
        name,
        description,
        problem_count: PROBLEMS_PER_PAGE,
        spec,
    })
}
