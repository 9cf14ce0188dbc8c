use crate::resource::model::{Problem, Submission};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Solve status of a problem relative to the primary user and the rivals.
///
/// Variants are ordered by precedence: when a problem carries several
/// conflicting signals, the largest status wins.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Nothing,
    Trying,
    RivalSolved,
    Solved,
}

/// Resolves the status of every given problem from the submission records.
///
/// A submission counts only when it belongs to the primary user, or to a
/// rival and the acceptance predicate holds for its verdict; everything else
/// is discarded, so a rival's failed attempts never influence a status.
/// Conflicts are folded with a max-by-status rule, which makes the result
/// independent of the order of the submission sequence. Problems nobody
/// submitted to resolve to [`Status::Nothing`].
pub fn resolve<F>(
    problems: &[Problem],
    submissions: &[Submission],
    primary_user: &str,
    rivals: &[String],
    is_accepted: F,
) -> HashMap<String, Status>
where
    F: Fn(&str) -> bool,
{
    let rivals: HashSet<&str> = rivals.iter().map(String::as_str).collect();

    let mut resolved: HashMap<&str, Status> = HashMap::new();
    for submission in submissions.iter() {
        let status = if submission.user_id == primary_user {
            if is_accepted(&submission.result) {
                Status::Solved
            } else {
                Status::Trying
            }
        } else if rivals.contains(submission.user_id.as_str()) && is_accepted(&submission.result) {
            Status::RivalSolved
        } else {
            continue;
        };

        resolved
            .entry(submission.problem_id.as_str())
            .and_modify(|current| *current = status.max(*current))
            .or_insert(status);
    }

    problems
        .iter()
        .map(|problem| {
            let status = resolved
                .get(problem.id.as_str())
                .copied()
                .unwrap_or_default();
            (problem.id.clone(), status)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn problem(id: &str) -> Problem {
        Problem {
            id: String::from(id),
            contest_id: String::from(&id[..6]),
            title: String::from(id),
        }
    }

    fn submission(user_id: &str, problem_id: &str, result: &str) -> Submission {
        Submission {
            user_id: String::from(user_id),
            problem_id: String::from(problem_id),
            result: String::from(result),
        }
    }

    fn is_accepted(result: &str) -> bool {
        result == "AC"
    }

    #[test]
    fn status_precedence_follows_declaration_order() {
        assert!(Status::Nothing < Status::Trying);
        assert!(Status::Trying < Status::RivalSolved);
        assert!(Status::RivalSolved < Status::Solved);
    }

    #[test]
    fn problems_without_submissions_resolve_to_nothing() {
        let problems = vec![problem("abc001_1"), problem("abc001_2")];

        let statuses = resolve(&problems, &[], "u1", &[], is_accepted);

        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses["abc001_1"], Status::Nothing);
        assert_eq!(statuses["abc001_2"], Status::Nothing);
    }

    #[test]
    fn accepted_primary_submission_resolves_to_solved() {
        let problems = vec![problem("abc001_1"), problem("abc001_2")];
        let submissions = vec![submission("u1", "abc001_1", "AC")];

        let statuses = resolve(&problems, &submissions, "u1", &[], is_accepted);

        assert_eq!(statuses["abc001_1"], Status::Solved);
        assert_eq!(statuses["abc001_2"], Status::Nothing);
    }

    #[test]
    fn primary_solve_dominates_rival_solve_and_own_failures() {
        let problems = vec![problem("abc001_1")];
        let submissions = vec![
            submission("u1", "abc001_1", "WA"),
            submission("rival", "abc001_1", "AC"),
            submission("u1", "abc001_1", "AC"),
            submission("u1", "abc001_1", "TLE"),
        ];
        let rivals = vec![String::from("rival")];

        let statuses = resolve(&problems, &submissions, "u1", &rivals, is_accepted);

        assert_eq!(statuses["abc001_1"], Status::Solved);
    }

    #[test]
    fn rival_solve_dominates_primary_failure() {
        let problems = vec![problem("abc001_1")];
        let submissions = vec![
            submission("u1", "abc001_1", "WA"),
            submission("rival", "abc001_1", "AC"),
        ];
        let rivals = vec![String::from("rival")];

        let statuses = resolve(&problems, &submissions, "u1", &rivals, is_accepted);

        assert_eq!(statuses["abc001_1"], Status::RivalSolved);
    }

    #[test]
    fn primary_failure_alone_resolves_to_trying() {
        let problems = vec![problem("abc001_1")];
        let submissions = vec![
            submission("u1", "abc001_1", "WA"),
            submission("rival", "abc001_1", "RE"),
        ];
        let rivals = vec![String::from("rival")];

        let statuses = resolve(&problems, &submissions, "u1", &rivals, is_accepted);

        assert_eq!(statuses["abc001_1"], Status::Trying);
    }

    #[test]
    fn rival_failures_never_influence_status() {
        let problems = vec![problem("abc001_1")];
        let submissions = vec![submission("rival", "abc001_1", "WA")];
        let rivals = vec![String::from("rival")];

        let statuses = resolve(&problems, &submissions, "u1", &rivals, is_accepted);

        assert_eq!(statuses["abc001_1"], Status::Nothing);
    }

    #[test]
    fn submissions_of_unrelated_users_are_discarded() {
        let problems = vec![problem("abc001_1")];
        let submissions = vec![submission("stranger", "abc001_1", "AC")];

        let statuses = resolve(&problems, &submissions, "u1", &[], is_accepted);

        assert_eq!(statuses["abc001_1"], Status::Nothing);
    }

    #[test]
    fn resolution_without_primary_user_derives_from_rivals_only() {
        let problems = vec![problem("abc001_1"), problem("abc001_2")];
        let submissions = vec![
            submission("rival", "abc001_1", "AC"),
            submission("rival", "abc001_2", "WA"),
        ];
        let rivals = vec![String::from("rival")];

        let statuses = resolve(&problems, &submissions, "", &rivals, is_accepted);

        assert_eq!(statuses["abc001_1"], Status::RivalSolved);
        assert_eq!(statuses["abc001_2"], Status::Nothing);
    }

    #[test]
    fn resolution_is_order_independent() {
        let problems = vec![problem("abc001_1"), problem("abc001_2")];
        let mut submissions = vec![
            submission("u1", "abc001_1", "AC"),
            submission("u1", "abc001_1", "WA"),
            submission("rival", "abc001_1", "AC"),
            submission("rival", "abc001_2", "AC"),
            submission("u1", "abc001_2", "TLE"),
        ];
        let rivals = vec![String::from("rival")];

        let expected = resolve(&problems, &submissions, "u1", &rivals, is_accepted);

        submissions.reverse();
        assert_eq!(
            resolve(&problems, &submissions, "u1", &rivals, is_accepted),
            expected
        );

        submissions.swap(0, 2);
        submissions.swap(1, 4);
        assert_eq!(
            resolve(&problems, &submissions, "u1", &rivals, is_accepted),
            expected
        );

        assert_eq!(expected["abc001_1"], Status::Solved);
        assert_eq!(expected["abc001_2"], Status::RivalSolved);
    }

    #[test]
    fn submissions_to_unknown_problems_are_ignored() {
        let problems = vec![problem("abc001_1")];
        let submissions = vec![submission("u1", "abc999_1", "AC")];

        let statuses = resolve(&problems, &submissions, "u1", &[], is_accepted);

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses["abc001_1"], Status::Nothing);
    }
}
