mod litter_report_repository;

pub use litter_report_repository::{LitterReportRepository, PgLitterReportRepository};
