mod litter_report;

pub use litter_report::{LitterReport, LitterReportStatus, NewLitterReport, Severity};
