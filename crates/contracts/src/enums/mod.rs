pub mod report_dimension;

pub use report_dimension::ReportDimension;
