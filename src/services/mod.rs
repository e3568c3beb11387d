pub mod analyzer;
pub mod report;

pub use analyzer::AnalyzerService;
pub use report::{build_report, build_rows, write_workbook, ReportRow};
