pub mod dump;
pub mod server;

use atcoder_tables_libs::resource::client::DEFAULT_BASE_URL;
use std::env;

/// The AtCoder Problems endpoint to fetch from, public instance by default.
pub fn base_url() -> String {
    env::var("ATCODER_PROBLEMS_URL").unwrap_or_else(|_| {
        tracing::warn!(
            "ATCODER_PROBLEMS_URL environment variable is not set. Default value `{}` will be used.",
            DEFAULT_BASE_URL
        );
        String::from(DEFAULT_BASE_URL)
    })
}

/// The primary user id, from the argument or the TABLE_USER environment
/// variable. Empty means no primary user.
pub fn primary_user(arg: Option<String>) -> String {
    arg.or_else(|| env::var("TABLE_USER").ok())
        .unwrap_or_default()
}

/// The rival user ids, from the argument or the TABLE_RIVALS environment
/// variable. Both forms are comma separated lists.
pub fn rival_users(arg: Option<String>) -> Vec<String> {
    arg.or_else(|| env::var("TABLE_RIVALS").ok())
        .map(|rivals| {
            rivals
                .split(',')
                .map(|rival| rival.trim().to_string())
                .filter(|rival| !rival.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
