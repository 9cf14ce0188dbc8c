use once_cell::sync::Lazy;
use regex::Regex;

/// Contest ids of the AtCoder Grand Contest series (`agc001`, `agc002`, ...).
pub static GRAND_CONTEST_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^agc\d{3}$").unwrap());

/// Contest ids of the AtCoder Beginner Contest series (`abc001`, ...).
pub static BEGINNER_CONTEST_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^abc\d{3}$").unwrap());

/// Contest ids of the AtCoder Regular Contest series (`arc001`, ...).
pub static REGULAR_CONTEST_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^arc\d{3}$").unwrap());

/// Contest ids of any of the three canonical series.
pub static CANONICAL_CONTEST_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^a[rgb]c\d{3}$").unwrap());

/// Problem ids following the Grand Contest convention (`agc001_a`, ...).
pub static GRAND_PROBLEM_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^agc\d{3}_\w$").unwrap());

/// The table a contest belongs to.
///
/// Beginner and Regular contests are handled as a linked pair rather than
/// tagged individually, because simultaneous rounds of the two series pool
/// their problems (see the table module).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContestCategory {
    Grand,
    BeginnerRegular,
    Other,
}

/// Categorizes a contest id by its series pattern. Problems classify
/// transitively through their contest.
pub fn classify(contest_id: &str) -> ContestCategory {
    if GRAND_CONTEST_ID.is_match(contest_id) {
        ContestCategory::Grand
    } else if BEGINNER_CONTEST_ID.is_match(contest_id) || REGULAR_CONTEST_ID.is_match(contest_id) {
        ContestCategory::BeginnerRegular
    } else {
        ContestCategory::Other
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classify_grand_contests() {
        assert_eq!(classify("agc001"), ContestCategory::Grand);
        assert_eq!(classify("agc032"), ContestCategory::Grand);
    }

    #[test]
    fn classify_beginner_and_regular_contests() {
        assert_eq!(classify("abc001"), ContestCategory::BeginnerRegular);
        assert_eq!(classify("abc126"), ContestCategory::BeginnerRegular);
        assert_eq!(classify("arc058"), ContestCategory::BeginnerRegular);
        assert_eq!(classify("arc102"), ContestCategory::BeginnerRegular);
    }

    #[test]
    fn classify_everything_else_as_other() {
        assert_eq!(classify("atc001"), ContestCategory::Other);
        assert_eq!(classify("apc001"), ContestCategory::Other);
        assert_eq!(classify("joi2008yo"), ContestCategory::Other);
        assert_eq!(classify("code-festival-2014-final"), ContestCategory::Other);
        assert_eq!(classify("tenka1-2018"), ContestCategory::Other);
    }

    #[test]
    fn canonical_series_require_exactly_three_digits() {
        assert_eq!(classify("abc1000"), ContestCategory::Other);
        assert_eq!(classify("abc12"), ContestCategory::Other);
        assert_eq!(classify("agc0001"), ContestCategory::Other);
        assert_eq!(classify("xabc001"), ContestCategory::Other);
        assert_eq!(classify("abc001x"), ContestCategory::Other);
    }

    #[test]
    fn grand_problem_id_pattern_requires_single_index_character() {
        assert!(GRAND_PROBLEM_ID.is_match("agc001_a"));
        assert!(GRAND_PROBLEM_ID.is_match("agc001_f"));
        assert!(!GRAND_PROBLEM_ID.is_match("agc001"));
        assert!(!GRAND_PROBLEM_ID.is_match("agc001_ab"));
        assert!(!GRAND_PROBLEM_ID.is_match("abc001_a"));
    }
}
