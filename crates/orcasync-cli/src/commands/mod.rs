pub mod backup;
pub mod clean;
pub mod common;
pub mod config;
pub mod diff;
pub mod fetch;
pub mod flatten;
pub mod git;
pub mod history;
pub mod list;
pub mod push;
pub mod restore;
pub mod status;
pub mod validate;

pub use backup::Backup;
pub use clean::Clean;
pub use config::Config;
pub use diff::Diff;
pub use fetch::Fetch;
pub use flatten::Flatten;
pub use git::Git;
pub use history::History;
pub use list::List;
pub use push::Push;
pub use restore::Restore;
pub use status::Status;
pub use validate::Validate;
