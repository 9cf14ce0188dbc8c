use crate::resource::model::{Contest, Problem, Submission};
use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;
use tokio::time::Duration;

type Result<T> = std::result::Result<T, ResourceError>;

/// Default location of the AtCoder Problems API.
pub const DEFAULT_BASE_URL: &str = "https://kenkoooo.com/atcoder";

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to request to AtCoder Problems API")]
    RequestError(#[from] reqwest::Error),
    #[error("invalid API url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("{0}")]
    UnexpectedError(String),
}

/// Source of the three table inputs: contests, problems and per-user
/// submissions. The table pipeline is written against this trait so tests
/// can drive it with canned data.
#[async_trait]
pub trait ProblemsResource {
    async fn fetch_contests(&self) -> Result<Vec<Contest>>;
    async fn fetch_problems(&self) -> Result<Vec<Problem>>;
    async fn fetch_user_submissions(&self, user_id: &str) -> Result<Vec<Submission>>;
}

pub struct AtcoderProblemsClient {
    contests_url: Url,
    problems_url: Url,
    results_url: Url,
    client: Client,
}

impl AtcoderProblemsClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // Url::join drops the last path segment unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        let contests_url = base_url.join("resources/contests.json")?;
        let problems_url = base_url.join("resources/problems.json")?;
        let results_url = base_url.join("atcoder-api/results")?;

        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(AtcoderProblemsClient {
            contests_url,
            problems_url,
            results_url,
            client,
        })
    }
}

#[async_trait]
impl ProblemsResource for AtcoderProblemsClient {
    async fn fetch_contests(&self) -> Result<Vec<Contest>> {
        tracing::info!("Start to retrieve contests information from AtCoder Problems");
        let res = self.client.get(self.contests_url.clone()).send().await?;
        match res.error_for_status_ref() {
            Ok(_) => {
                let contests: Vec<Contest> = res.json().await?;
                tracing::info!(
                    "{} contests information successfully retrieved.",
                    contests.len()
                );
                Ok(contests)
            }
            Err(e) => Err(ResourceError::UnexpectedError(format!(
                "error response returned from the contests resource: {}",
                e
            ))),
        }
    }

    async fn fetch_problems(&self) -> Result<Vec<Problem>> {
        tracing::info!("Start to retrieve problems information from AtCoder Problems");
        let res = self.client.get(self.problems_url.clone()).send().await?;
        match res.error_for_status_ref() {
            Ok(_) => {
                let problems: Vec<Problem> = res.json().await?;
                tracing::info!(
                    "{} problems information successfully retrieved.",
                    problems.len()
                );
                Ok(problems)
            }
            Err(e) => Err(ResourceError::UnexpectedError(format!(
                "error response returned from the problems resource: {}",
                e
            ))),
        }
    }

    async fn fetch_user_submissions(&self, user_id: &str) -> Result<Vec<Submission>> {
        tracing::info!("Start to retrieve submissions of {}", user_id);
        let res = self
            .client
            .get(self.results_url.clone())
            .query(&[("user", user_id)])
            .send()
            .await?;
        match res.error_for_status_ref() {
            Ok(_) => {
                let submissions: Vec<Submission> = res.json().await?;
                tracing::info!(
                    "{} submissions of {} successfully retrieved.",
                    submissions.len(),
                    user_id
                );
                Ok(submissions)
            }
            Err(e) => Err(ResourceError::UnexpectedError(format!(
                "error response returned from the results resource: {}",
                e
            ))),
        }
    }
}
