mod litter_report_dto;

pub use litter_report_dto::{
    CoordinatesDto, CreateLitterReportDto, ListLitterReportsQuery, LitterReportResponseDto,
    ReportLocationDto, UpdateLitterReportDto,
};
