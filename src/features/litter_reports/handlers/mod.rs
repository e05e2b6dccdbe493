pub mod litter_report_handler;
