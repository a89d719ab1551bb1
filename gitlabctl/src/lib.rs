#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod audit;
pub mod config;
pub mod discovery;
mod fan_out;
pub mod gitlab;
pub mod runner;
pub mod summary;

pub use audit::audit_branches;
pub use config::{Config, ConfigError};
pub use discovery::{deduplicate_projects, parse_search_terms, resolve_projects};
pub use gitlab::{BranchStatus, GitlabClient, GitlabError, Project, PRIVATE_TOKEN_HEADER};
pub use runner::{Runner, RunnerError};
pub use summary::{VerifyReport, ALL_PASS_MESSAGE};
