pub mod aggregate;
pub mod error;

pub use aggregate::*;
pub use error::ReportError;
