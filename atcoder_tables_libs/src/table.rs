use crate::classify::{
    classify, ContestCategory, BEGINNER_CONTEST_ID, CANONICAL_CONTEST_ID, GRAND_PROBLEM_ID,
    REGULAR_CONTEST_ID,
};
use crate::resource::model::{Contest, Problem};
use crate::status::Status;
use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

type Result<T> = std::result::Result<T, TableError>;

/// Number of positional slots in a Grand Contest row (columns A to F).
pub const GRAND_SLOTS: usize = 6;

/// Number of positional slots in a Beginner/Regular row (columns A to D).
pub const REGULAR_SLOTS: usize = 4;

/// Data-integrity violations between the contests and problems inputs.
///
/// These are fatal for the whole refresh: the upstream resources contradict
/// each other and recomputing over the same data cannot repair them.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("contest {contest_id} does not exist")]
    UnknownContest { contest_id: String },
    #[error("problem {problem_id} does not follow the grand contest id convention")]
    InvalidGrandProblemId { problem_id: String },
}

/// A problem joined with its owning contest and its resolved status.
///
/// Instances are built once per refresh and replaced wholesale on the next
/// one; nothing mutates them in place. `contest.id == contest_id` holds by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemWithStatus {
    pub id: String,
    pub contest_id: String,
    pub title: String,
    pub status: Status,
    pub contest: Contest,
}

/// One row of the Grand Contest table. Slot `i` holds the problem with the
/// (i+1)-th smallest id of the contest, or nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrandRow {
    pub contest_id: String,
    pub problems: [Option<ProblemWithStatus>; GRAND_SLOTS],
}

/// One row of the Beginner or the Regular table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularRow {
    pub contest_id: String,
    pub problems: [Option<ProblemWithStatus>; REGULAR_SLOTS],
}

/// One unbounded row of the table of non-canonical contests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherRow {
    pub contest: Contest,
    pub problems: Vec<ProblemWithStatus>,
}

/// The complete output of one refresh.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSet {
    pub grand: Vec<GrandRow>,
    pub beginner: Vec<RegularRow>,
    pub regular: Vec<RegularRow>,
    pub other: Vec<OtherRow>,
}

impl TableSet {
    /// Total number of rows across the four collections.
    pub fn contest_count(&self) -> usize {
        self.grand.len() + self.beginner.len() + self.regular.len() + self.other.len()
    }

    /// Total number of filled cells across the four collections. A problem
    /// shared by a simultaneous Beginner/Regular pair counts once per row it
    /// appears in.
    pub fn problem_count(&self) -> usize {
        let grand: usize = self
            .grand
            .iter()
            .map(|row| row.problems.iter().flatten().count())
            .sum();
        let beginner: usize = self
            .beginner
            .iter()
            .map(|row| row.problems.iter().flatten().count())
            .sum();
        let regular: usize = self
            .regular
            .iter()
            .map(|row| row.problems.iter().flatten().count())
            .sum();
        let other: usize = self.other.iter().map(|row| row.problems.len()).sum();

        grand + beginner + regular + other
    }
}

/// Joins every problem with its contest and its resolved status.
///
/// Statuses missing from the map default to [`Status::Nothing`]; a problem
/// referencing a contest the contests input does not contain is fatal.
pub fn compose(
    problems: &[Problem],
    contests: &[Contest],
    statuses: &HashMap<String, Status>,
) -> Result<Vec<ProblemWithStatus>> {
    let contest_map: HashMap<&str, &Contest> = contests
        .iter()
        .map(|contest| (contest.id.as_str(), contest))
        .collect();

    problems
        .iter()
        .map(|problem| {
            let contest = contest_map.get(problem.contest_id.as_str()).ok_or_else(|| {
                TableError::UnknownContest {
                    contest_id: problem.contest_id.clone(),
                }
            })?;
            let status = statuses.get(&problem.id).copied().unwrap_or_default();

            Ok(ProblemWithStatus {
                id: problem.id.clone(),
                contest_id: problem.contest_id.clone(),
                title: problem.title.clone(),
                status,
                contest: (*contest).clone(),
            })
        })
        .collect()
}

fn fill_slots<const N: usize>(
    problems: impl IntoIterator<Item = ProblemWithStatus>,
) -> [Option<ProblemWithStatus>; N] {
    let mut slots: [Option<ProblemWithStatus>; N] = std::array::from_fn(|_| None);
    for (slot, problem) in slots.iter_mut().zip(problems) {
        *slot = Some(problem);
    }
    slots
}

/// Builds the Grand Contest table: one six-slot row per `agc` contest,
/// newest contest id first, problems slotted in ascending id order.
///
/// Slotting is purely positional. Problem ids of the series are contiguous
/// and alphabetically ordered by convention, so the i-th sorted problem is
/// the column-i problem; the id pattern check below is what keeps that
/// assumption honest.
pub fn grand_table(contests: &[Contest], problems: &[ProblemWithStatus]) -> Result<Vec<GrandRow>> {
    // BTreeMap so rows fall out ordered by contest id.
    let mut by_contest: BTreeMap<&str, Vec<&ProblemWithStatus>> = contests
        .iter()
        .filter(|contest| classify(&contest.id) == ContestCategory::Grand)
        .map(|contest| (contest.id.as_str(), Vec::new()))
        .collect();

    for problem in problems.iter() {
        if classify(&problem.contest_id) != ContestCategory::Grand {
            continue;
        }
        if !GRAND_PROBLEM_ID.is_match(&problem.id) {
            return Err(TableError::InvalidGrandProblemId {
                problem_id: problem.id.clone(),
            });
        }
        by_contest
            .get_mut(problem.contest_id.as_str())
            .ok_or_else(|| TableError::UnknownContest {
                contest_id: problem.contest_id.clone(),
            })?
            .push(problem);
    }

    Ok(by_contest
        .into_iter()
        .rev()
        .map(|(contest_id, mut problems)| {
            problems.sort_by(|a, b| a.id.cmp(&b.id));
            GrandRow {
                contest_id: String::from(contest_id),
                problems: fill_slots(problems.into_iter().cloned()),
            }
        })
        .collect())
}

enum Anchor {
    Front,
    Back,
}

/// Builds the Beginner and Regular tables as a linked pair.
///
/// Rows are keyed by contest start time: when an `abc` and an `arc` round
/// ran simultaneously the two contests pool their problems into both rows,
/// and the positional trim (first four slots for Beginner, last four for
/// Regular) splits the pool back into the columns each audience saw.
pub fn beginner_regular_tables(
    contests: &[Contest],
    problems: &[ProblemWithStatus],
) -> (Vec<RegularRow>, Vec<RegularRow>) {
    let beginner = series_rows(contests, problems, &BEGINNER_CONTEST_ID, Anchor::Front);
    let regular = series_rows(contests, problems, &REGULAR_CONTEST_ID, Anchor::Back);
    (beginner, regular)
}

fn series_rows(
    contests: &[Contest],
    problems: &[ProblemWithStatus],
    series: &Regex,
    anchor: Anchor,
) -> Vec<RegularRow> {
    // Keyed by start time, not contest id; start times are unique within one
    // series, so entries cannot collide.
    let mut by_start: HashMap<i64, (&Contest, Vec<&ProblemWithStatus>)> = contests
        .iter()
        .filter(|contest| series.is_match(&contest.id))
        .map(|contest| (contest.start_epoch_second, (contest, Vec::new())))
        .collect();

    for problem in problems.iter() {
        if let Some((_, list)) = by_start.get_mut(&problem.contest.start_epoch_second) {
            list.push(problem);
        }
    }

    by_start
        .into_values()
        .sorted_by(|a, b| b.0.start_epoch_second.cmp(&a.0.start_epoch_second))
        .map(|(contest, mut problems)| {
            problems.sort_by(|a, b| a.id.cmp(&b.id));
            let skip = match anchor {
                Anchor::Front => 0,
                // Rows shorter than the slot count stay front-filled.
                Anchor::Back => problems.len().saturating_sub(REGULAR_SLOTS),
            };
            RegularRow {
                contest_id: contest.id.clone(),
                problems: fill_slots(problems.into_iter().skip(skip).cloned()),
            }
        })
        .collect()
}

/// Builds the rows of every contest outside the three canonical series,
/// newest contest first. Problems are ordered by title here, not by id, and
/// rows are never trimmed.
pub fn other_contest_tables(problems: &[ProblemWithStatus]) -> Vec<OtherRow> {
    let mut by_contest: BTreeMap<&str, Vec<&ProblemWithStatus>> = BTreeMap::new();
    for problem in problems.iter() {
        if CANONICAL_CONTEST_ID.is_match(&problem.contest.id) {
            continue;
        }
        by_contest
            .entry(problem.contest.id.as_str())
            .or_default()
            .push(problem);
    }

    by_contest
        .into_values()
        .map(|mut problems| {
            problems.sort_by(|a, b| a.title.cmp(&b.title));
            OtherRow {
                // Groups only exist for problems, so the first entry is there.
                contest: problems[0].contest.clone(),
                problems: problems.into_iter().cloned().collect(),
            }
        })
        .sorted_by(|a, b| b.contest.start_epoch_second.cmp(&a.contest.start_epoch_second))
        .collect()
}

/// Runs the three table builders over one composed snapshot.
pub fn organize(contests: &[Contest], problems: &[ProblemWithStatus]) -> Result<TableSet> {
    let grand = grand_table(contests, problems)?;
    let (beginner, regular) = beginner_regular_tables(contests, problems);
    let other = other_contest_tables(problems);

    Ok(TableSet {
        grand,
        beginner,
        regular,
        other,
    })
}
