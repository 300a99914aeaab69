use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categorical column of an affiliate export that can be filtered and grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportDimension {
    Status,
    Channel,
    Category,
}

impl ReportDimension {
    pub fn all() -> [ReportDimension; 3] {
        [Self::Status, Self::Channel, Self::Category]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Channel => "channel",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for ReportDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReportDimension {
    type Err = String;

    /// Accepts the lowercase code; surrounding whitespace and case are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "channel" => Ok(Self::Channel),
            "category" => Ok(Self::Category),
            other => Err(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension() {
        assert_eq!("status".parse::<ReportDimension>(), Ok(ReportDimension::Status));
        assert_eq!(" Channel ".parse::<ReportDimension>(), Ok(ReportDimension::Channel));
        assert_eq!("category".parse::<ReportDimension>(), Ok(ReportDimension::Category));
        assert_eq!("brand".parse::<ReportDimension>(), Err("brand".to_string()));
    }

    #[test]
    fn test_code_roundtrip() {
        for dimension in ReportDimension::all() {
            assert_eq!(dimension.code().parse::<ReportDimension>(), Ok(dimension));
        }
    }
}
