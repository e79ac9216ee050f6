// ---------------------------------------------------------------------------
// Cell – a single value in the raw grid
// ---------------------------------------------------------------------------

/// A raw table cell, resolved once when the table is extracted.
///
/// Sources disagree on typing (CSV is all text, Parquet is typed), so every
/// loader funnels its values through this enum and nothing downstream has to
/// re-inspect strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Resolve a textual cell. Surrounding whitespace is ignored.
    ///
    /// A cell counts as a number when it *starts* with one, so `"12 kg"` is
    /// 12 and `"5%"` is 5. Only cells with no leading number are text.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Cell::Empty;
        }
        match leading_number(s) {
            Some(v) => Cell::Number(v),
            None => Cell::Text(s.to_string()),
        }
    }

    /// The value as a clean sample: only finite numbers qualify.
    pub fn as_sample(&self) -> Option<f64> {
        match self {
            Cell::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }
}

/// The longest prefix of `s` that reads as a decimal number:
/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`, or a signed
/// `Infinity`. An exponent marker without digits is not part of the number.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// RawTable – what a loader hands to the pipeline
// ---------------------------------------------------------------------------

/// Header row plus data rows. Rows may be shorter or longer than the header.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Human-readable origin, e.g. a file name or "clipboard".
    pub source: String,
}

impl RawTable {
    /// The cell at (`row`, `col`), `None` when the row is too short.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

// ---------------------------------------------------------------------------
// Column – one header column with its clean samples
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Header label; not required to be unique.
    pub label: String,
    /// Ordinal position in the header row.
    pub index: usize,
    /// Finite numeric samples in row order.
    pub samples: Vec<f64>,
}

impl Column {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
