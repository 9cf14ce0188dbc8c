pub mod classify;
pub mod resource;
pub mod status;
pub mod table;

pub use resource::client::{AtcoderProblemsClient, ProblemsResource};
pub use status::Status;
pub use table::TableSet;
