pub mod executor;
pub mod parsers;
pub mod raw_table;

pub use executor::{ingest, Ingested};
pub use parsers::MAX_COMMISSION;
pub use raw_table::RawTable;
