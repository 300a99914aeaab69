use crate::domain::a025_affiliate_order::ReportError;

/// Uploaded table before normalization: header row plus string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Reads comma-separated UTF-8 text with a header row.
    /// Short rows are accepted; missing cells read as empty.
    pub fn from_csv(csv_text: &str) -> Result<Self, ReportError> {
        // Strip UTF-8 BOM if present
        let text = csv_text.trim_start_matches('\u{FEFF}');

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| ReportError::InvalidCsv(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| ReportError::InvalidCsv(e.to_string()))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Position of a column, comparing trimmed header names
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, ReportError> {
        self.column_index(name)
            .ok_or_else(|| ReportError::MissingColumn(name.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_headers_and_rows() {
        let table = RawTable::from_csv("\u{FEFF}A,B\n1,2\n3\n").unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3"]]);
    }

    #[test]
    fn test_quoted_commission_with_comma() {
        let table = RawTable::from_csv("Status,Valor\nConcluído,\"R$1.234,56\"\n").unwrap();
        assert_eq!(table.rows[0][1], "R$1.234,56");
    }

    #[test]
    fn test_column_lookup_ignores_padding() {
        let table = RawTable::new(vec!["  Canal ".to_string(), "Status".to_string()], vec![]);
        assert_eq!(table.column_index("Canal"), Some(0));
        assert_eq!(table.column_index(" Status"), Some(1));
        assert_eq!(
            table.require_column("Categoria Global L2"),
            Err(ReportError::MissingColumn("Categoria Global L2".to_string()))
        );
    }
}
