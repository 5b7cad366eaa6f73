pub mod kpi;
pub mod snapshot;
