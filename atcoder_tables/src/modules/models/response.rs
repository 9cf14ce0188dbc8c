use atcoder_tables_libs::table::TableSet;
use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct TableResponse {
    pub stats: TableStats,
    pub tables: TableSet,
    pub message: Option<String>,
}

impl TableResponse {
    pub fn error(params: &impl Serialize, message: impl ToString) -> Self {
        Self {
            stats: TableStats {
                time: 0,
                contests: 0,
                problems: 0,
                params: json!(params),
                generated_at: Local::now().fixed_offset(),
            },
            tables: TableSet::default(),
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TableStats {
    pub time: u32,
    pub contests: u32,
    pub problems: u32,
    pub params: Value,
    pub generated_at: DateTime<FixedOffset>,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub published: bool,
    pub message: Option<String>,
}
