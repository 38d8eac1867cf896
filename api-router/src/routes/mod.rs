pub mod liveness;
pub mod projects;
pub mod query;
pub mod readiness;
pub mod upload;
