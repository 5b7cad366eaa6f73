pub mod dashboard;
pub mod page;
pub mod snapshot;
