use std::collections::HashSet;

use anyhow::{Context, Result, anyhow};

/// One named column of raw string cells, one cell per row.
///
/// The source feed is textual (CSV), so cells stay strings and are
/// coerced to numbers on demand via [`parse_number`].
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<String>,
}

impl Column {
    /// A column counts as numeric when it has at least one non-empty
    /// cell and every non-empty cell parses as a number.
    pub fn is_numeric(&self) -> bool {
        let mut seen_value = false;
        for cell in &self.cells {
            if cell.trim().is_empty() {
                continue;
            }
            if parse_number(cell).is_none() {
                return false;
            }
            seen_value = true;
        }
        seen_value
    }
}

/// Columnar table: ordered named columns over a fixed row count.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: Vec<Column>,
    rows: usize,
}

impl DataTable {
    pub fn new(columns: Vec<Column>) -> Self {
        let rows = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&Column> {
        self.columns.get(idx)
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&str> {
        self.columns.get(col)?.cells.get(row).map(|s| s.as_str())
    }

    /// Numeric view of a cell; unparseable or missing cells read as 0.
    pub fn numeric_cell(&self, col: usize, row: usize) -> f64 {
        self.cell(col, row)
            .and_then(parse_number)
            .unwrap_or(0.0)
    }

    /// Indices of numeric columns in original column order.
    pub fn numeric_column_indices(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_numeric())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Drop rows whose identifier cell repeats an earlier one
    /// (case-insensitive, trimmed). The first occurrence wins and row
    /// order is otherwise preserved.
    pub fn dedupe_by(&mut self, id_col: usize) {
        if id_col >= self.columns.len() {
            return;
        }
        let mut seen: HashSet<String> = HashSet::new();
        let mut keep: Vec<bool> = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let key = self.columns[id_col]
                .cells
                .get(row)
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_default();
            keep.push(seen.insert(key));
        }
        for col in &mut self.columns {
            let mut row = 0usize;
            col.cells.retain(|_| {
                let k = keep.get(row).copied().unwrap_or(false);
                row += 1;
                k
            });
        }
        self.rows = keep.iter().filter(|k| **k).count();
    }
}

/// Parse a CSV body into a [`DataTable`]. Short records are padded with
/// empty cells so every column spans every row.
pub fn parse_csv(body: &str) -> Result<DataTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let headers = reader.headers().context("read csv header")?.clone();
    if headers.is_empty() {
        return Err(anyhow!("csv has no header row"));
    }

    let mut columns: Vec<Column> = headers
        .iter()
        .map(|name| Column {
            name: name.to_string(),
            cells: Vec::new(),
        })
        .collect();

    let mut rows = 0usize;
    for record in reader.records() {
        let record = record.context("read csv record")?;
        for (idx, col) in columns.iter_mut().enumerate() {
            col.cells
                .push(record.get(idx).unwrap_or_default().to_string());
        }
        rows += 1;
    }

    Ok(DataTable { columns, rows })
}

/// Lenient numeric parse: strips currency/percent decorations and
/// thousands separators, keeps sign and decimal point. Empty or `-`
/// cells are "no value".
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_number;

    #[test]
    fn parse_number_strips_decorations() {
        assert_eq!(parse_number("1,234"), Some(1234.0));
        assert_eq!(parse_number("55.5%"), Some(55.5));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("n/a"), None);
    }
}
