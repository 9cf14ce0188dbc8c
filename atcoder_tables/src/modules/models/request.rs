use crate::modules::models::response::TableResponse;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::Json;
use http::request::Parts;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

/// AtCoder user ids are short alphanumeric names; this also bounds what we
/// forward to the submissions endpoint.
static USER_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z_]{1,30}$").unwrap());

fn validate_user_id(value: &str) -> Result<(), ValidationError> {
    if USER_ID.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid user id"))
    }
}

fn validate_rival_list(values: &str) -> Result<(), ValidationError> {
    if values
        .split(',')
        .all(|value| USER_ID.is_match(value.trim()))
    {
        Ok(())
    } else {
        Err(ValidationError::new("invalid rival user id"))
    }
}

/// Query parameters of the table endpoint. Both fields absent means the
/// caller wants the warm snapshot of the server's default user set.
#[derive(Debug, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct TableQueryParameters {
    #[validate(custom = "validate_user_id")]
    pub user: Option<String>,
    #[validate(custom = "validate_rival_list")]
    pub rivals: Option<String>,
}

impl TableQueryParameters {
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.rivals.is_none()
    }

    /// The rival ids as a list, trimmed, in query order.
    pub fn rival_list(&self) -> Vec<String> {
        self.rivals
            .as_deref()
            .map(|rivals| {
                rivals
                    .split(',')
                    .map(|rival| rival.trim().to_string())
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub struct ValidatedTableQueryParameters<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedTableQueryParameters<T>
where
    T: DeserializeOwned + Validate + Serialize,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<TableResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let value: T = serde_urlencoded::from_str(query).map_err(|rejection| {
            tracing::error!("Parsing error: {}", rejection);
            (
                StatusCode::BAD_REQUEST,
                Json(TableResponse::error(
                    &Value::Null,
                    format!("invalid format query string: [{}]", rejection),
                )),
            )
        })?;

        value.validate().map_err(|rejection| {
            tracing::error!("Validation error: {}", rejection);
            (
                StatusCode::BAD_REQUEST,
                Json(TableResponse::error(
                    &value,
                    format!("Validation error: [{}]", rejection).replace('\n', ", "),
                )),
            )
        })?;

        Ok(ValidatedTableQueryParameters(value))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_plain_user_ids() {
        let params: TableQueryParameters =
            serde_urlencoded::from_str("user=tourist&rivals=rng_58,chokudai").unwrap();

        assert!(params.validate().is_ok());
        assert_eq!(params.user.as_deref(), Some("tourist"));
        assert_eq!(params.rival_list(), vec!["rng_58", "chokudai"]);
    }

    #[test]
    fn rejects_a_malformed_user_id() {
        let params = TableQueryParameters {
            user: Some(String::from("not a user id!")),
            rivals: None,
        };

        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_an_empty_rival_entry() {
        let params = TableQueryParameters {
            user: None,
            rivals: Some(String::from("rng_58,,chokudai")),
        };

        assert!(params.validate().is_err());
    }

    #[test]
    fn an_empty_query_selects_the_warm_snapshot() {
        let params: TableQueryParameters = serde_urlencoded::from_str("").unwrap();

        assert!(params.is_empty());
        assert!(params.validate().is_ok());
    }
}
