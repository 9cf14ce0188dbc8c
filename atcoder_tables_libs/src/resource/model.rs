use serde::{Deserialize, Serialize};

/// Contest information delivered by the AtCoder Problems API.
///
/// The wire format carries more fields (`duration_second`, `rate_change`);
/// only the ones the tables are built from are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contest {
    pub id: String,
    pub title: String,
    pub start_epoch_second: i64,
}

/// Problem information delivered by the AtCoder Problems API.
///
/// `contest_id` must name a contest present in the contests resource; the
/// composition step treats a dangling reference as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub contest_id: String,
    pub title: String,
}

/// A single submission record.
///
/// `result` holds the raw judge verdict (`"AC"`, `"WA"`, `"TLE"`, ...);
/// interpreting it is left to the caller-supplied acceptance predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub user_id: String,
    pub problem_id: String,
    pub result: String,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialize_contest() {
        let raw = r#"
        {
            "id": "abc001",
            "start_epoch_second": 1381579200,
            "duration_second": 7200,
            "title": "AtCoder Beginner Contest 001",
            "rate_change": "-"
        }
        "#;

        let contest: Contest = serde_json::from_str(raw).unwrap();
        assert_eq!(contest.id, "abc001");
        assert_eq!(contest.title, "AtCoder Beginner Contest 001");
        assert_eq!(contest.start_epoch_second, 1381579200);
    }

    #[test]
    fn test_deserialize_problem() {
        let raw = r#"
        {
            "id": "abc001_1",
            "contest_id": "abc001",
            "title": "A. 積雪深差"
        }
        "#;

        let problem: Problem = serde_json::from_str(raw).unwrap();
        assert_eq!(problem.id, "abc001_1");
        assert_eq!(problem.contest_id, "abc001");
        assert_eq!(problem.title, "A. 積雪深差");
    }

    #[test]
    fn test_deserialize_submission() {
        let raw = r#"
        {
            "id": 3041431,
            "epoch_second": 1514034818,
            "problem_id": "abc079_d",
            "contest_id": "abc079",
            "user_id": "kenkoooo",
            "language": "Rust (1.15.1)",
            "point": 400.0,
            "length": 922,
            "result": "AC",
            "execution_time": 2
        }
        "#;

        let submission: Submission = serde_json::from_str(raw).unwrap();
        assert_eq!(submission.user_id, "kenkoooo");
        assert_eq!(submission.problem_id, "abc079_d");
        assert_eq!(submission.result, "AC");
    }

    #[test]
    fn test_deserialize_submission_list() {
        let raw = r#"
        [
            {"id": 1, "epoch_second": 1505739600, "problem_id": "arc001_1", "contest_id": "arc001", "user_id": "iwiwi", "language": "C++14 (GCC 5.4.1)", "point": 100.0, "length": 422, "result": "AC", "execution_time": 12},
            {"id": 2, "epoch_second": 1505739900, "problem_id": "arc001_2", "contest_id": "arc001", "user_id": "iwiwi", "language": "C++14 (GCC 5.4.1)", "point": 0.0, "length": 350, "result": "WA", "execution_time": 20}
        ]
        "#;

        let submissions: Vec<Submission> = serde_json::from_str(raw).unwrap();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].result, "AC");
        assert_eq!(submissions[1].result, "WA");
    }
}
