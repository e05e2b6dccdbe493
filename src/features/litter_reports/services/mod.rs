mod litter_report_service;

pub use litter_report_service::LitterReportService;
