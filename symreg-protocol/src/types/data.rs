//! Tabular data sets and ASCII import/export

use std::io::{self, BufRead, BufReader, Write};
use std::ops::{Index, IndexMut};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Data set import/export error
#[derive(Debug, thiserror::Error)]
pub enum DataSetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("First line is malformed or an unrecognized header")]
    Header,

    #[error("Missing or non-numeric value at row {row}, column {col}: '{token}'")]
    Parse {
        row: usize,
        col: usize,
        token: String,
    },

    #[error("Row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Final data set is incomplete or invalid")]
    Invalid,
}

/// Main structure for holding the data a search runs against.
///
/// Values are a dense row-major matrix of observations, one column per
/// variable. The series, ordering, and weight vectors are optional: either
/// empty or one entry per row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// Series identifier per row (optional)
    pub series: Vec<i32>,
    /// Time ordering values (optional)
    pub ordering: Vec<f32>,
    /// Weight values (optional)
    pub weights: Vec<f32>,
    /// Symbols for the data columns
    pub symbols: Vec<String>,
    values: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl DataSet {
    /// A zero-filled data set with default symbols
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut data = Self {
            values: vec![0.0; rows * cols],
            rows,
            cols,
            ..Self::default()
        };
        data.set_default_symbols();
        data
    }

    /// Number of data points (rows)
    pub fn size(&self) -> usize {
        self.rows
    }

    /// Number of variables (columns)
    pub fn num_vars(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn value(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.cols + col]
    }

    pub fn set_value(&mut self, row: usize, col: usize, value: f32) {
        self.values[row * self.cols + col] = value;
    }

    /// Sets symbols as `x0, x1, x2, ...`
    pub fn set_default_symbols(&mut self) {
        self.symbols = (0..self.cols).map(|j| format!("x{}", j)).collect();
    }

    /// Test if the data set is sized and filled in correctly
    pub fn is_valid(&self) -> bool {
        let optional_ok = |len: usize| len == 0 || len == self.rows;
        self.rows > 0
            && self.cols > 0
            && optional_ok(self.series.len())
            && optional_ok(self.ordering.len())
            && optional_ok(self.weights.len())
            && self.values.len() == self.rows * self.cols
            && self.symbols.len() == self.cols
    }

    /// Resize the value matrix, preserving values in the overlapping region.
    /// Non-empty optional vectors are resized to the new row count; symbols
    /// reset to defaults when the column count changes.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let mut values = vec![0.0; rows * cols];
        for i in 0..rows.min(self.rows) {
            for j in 0..cols.min(self.cols) {
                values[i * cols + j] = self.values[i * self.cols + j];
            }
        }
        self.values = values;
        self.rows = rows;
        if cols != self.cols {
            self.cols = cols;
            self.set_default_symbols();
        }
        if !self.series.is_empty() {
            self.series.resize(rows, 0);
        }
        if !self.ordering.is_empty() {
            self.ordering.resize(rows, 0.0);
        }
        if !self.weights.is_empty() {
            self.weights.resize(rows, 0.0);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Short text summary of the data set
    pub fn summary(&self) -> String {
        let mut s = String::new();
        if !self.is_valid() {
            s.push_str("Invalid! ");
        }
        s.push_str(&format!(
            "{} data points, {} variables",
            self.size(),
            self.num_vars()
        ));
        if !self.series.is_empty() {
            s.push_str(", series identifiers");
        }
        if !self.ordering.is_empty() {
            s.push_str(", ordering values");
        }
        if !self.weights.is_empty() {
            s.push_str(", weight values");
        }
        s
    }

    /// Imports a plain ASCII text file.
    ///
    /// The first non-empty line may be a bar-delimited header (`% r t w |
    /// x0 x1 | ...`, the form [`export_ascii`](Self::export_ascii) writes), a
    /// plain column-symbol header, or data (no header). Values are delimited
    /// by whitespace or commas; lines starting with `%` are comments.
    pub fn import_ascii<R: BufRead>(reader: R) -> Result<Self, DataSetError> {
        let mut lines = reader.lines();

        // first non-empty line decides the header form
        let mut header_line = String::new();
        for line in lines.by_ref() {
            let line = line?;
            if !line.trim().is_empty() {
                header_line = line;
                break;
            }
        }
        if header_line.is_empty() {
            return Err(DataSetError::Invalid);
        }

        let header: Vec<&str> = header_line
            .split(|c: char| c == '%' || c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();
        let bars = header.iter().filter(|t| **t == "|").count();

        let layout = if bars == 2 {
            Layout::from_bar_header(&header)?
        } else if bars == 0 && header[0].parse::<f64>().is_ok() {
            // headerless: the first line is already data
            Layout::headerless(header.len())
        } else if bars == 0 {
            Layout::plain(header.iter().map(|t| t.to_string()).collect())
        } else {
            return Err(DataSetError::Header);
        };

        let mut data = DataSet {
            cols: layout.x_count,
            ..DataSet::default()
        };
        match &layout.symbols {
            Some(symbols) => data.symbols = symbols.clone(),
            None => data.set_default_symbols(),
        }

        if layout.first_line_is_data {
            layout.parse_row(&header, 1, &mut data)?;
        }
        for line in lines {
            let line = line?;
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            let tokens: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .collect();
            layout.parse_row(&tokens, data.rows + 1, &mut data)?;
        }

        if !data.is_valid() {
            return Err(DataSetError::Invalid);
        }
        Ok(data)
    }

    /// Imports an ASCII text file from a path
    pub fn import_ascii_file(path: impl AsRef<Path>) -> Result<Self, DataSetError> {
        let file = std::fs::File::open(path)?;
        Self::import_ascii(BufReader::new(file))
    }

    /// Writes the bar-delimited ASCII form this type can re-import
    pub fn export_ascii<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "% ")?;
        if !self.series.is_empty() {
            write!(out, "r\t")?;
        }
        if !self.ordering.is_empty() {
            write!(out, "t\t")?;
        }
        if !self.weights.is_empty() {
            write!(out, "w\t")?;
        }
        write!(out, "| ")?;
        for symbol in &self.symbols {
            write!(out, "{}\t", symbol)?;
        }
        writeln!(out, "| ")?;

        for i in 0..self.rows {
            if !self.series.is_empty() {
                write!(out, "{}\t", self.series[i])?;
            }
            if !self.ordering.is_empty() {
                write!(out, "{}\t", self.ordering[i])?;
            }
            if !self.weights.is_empty() {
                write!(out, "{}\t", self.weights[i])?;
            }
            for j in 0..self.cols {
                write!(out, "{}\t", self.value(i, j))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Writes the ASCII form to a file
    pub fn export_ascii_file(&self, path: impl AsRef<Path>) -> io::Result<()> {
        self.export_ascii(std::fs::File::create(path)?)
    }
}

impl Index<(usize, usize)> for DataSet {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.values[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for DataSet {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.values[row * self.cols + col]
    }
}

/// Column layout derived from the header line
struct Layout {
    r_col: Option<usize>,
    t_col: Option<usize>,
    w_col: Option<usize>,
    /// meta columns preceding the data columns
    meta_count: usize,
    /// data (x) column count
    x_count: usize,
    /// trailing reserved columns, parsed then discarded
    y_count: usize,
    symbols: Option<Vec<String>>,
    first_line_is_data: bool,
}

impl Layout {
    fn from_bar_header(header: &[&str]) -> Result<Self, DataSetError> {
        let sep1 = header.iter().position(|t| *t == "|").ok_or(DataSetError::Header)?;
        let sep2 = sep1
            + 1
            + header[sep1 + 1..]
                .iter()
                .position(|t| *t == "|")
                .ok_or(DataSetError::Header)?;

        let mut layout = Self {
            r_col: None,
            t_col: None,
            w_col: None,
            meta_count: sep1,
            x_count: sep2 - sep1 - 1,
            y_count: header.len() - sep2 - 1,
            symbols: Some(
                header[sep1 + 1..sep2]
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            ),
            first_line_is_data: false,
        };
        for (j, token) in header[..sep1].iter().enumerate() {
            match *token {
                "r" => layout.r_col = Some(j),
                "t" => layout.t_col = Some(j),
                "w" => layout.w_col = Some(j),
                _ => return Err(DataSetError::Header),
            }
        }
        if layout.x_count == 0 {
            return Err(DataSetError::Header);
        }
        Ok(layout)
    }

    fn plain(symbols: Vec<String>) -> Self {
        Self {
            r_col: None,
            t_col: None,
            w_col: None,
            meta_count: 0,
            x_count: symbols.len(),
            y_count: 0,
            symbols: Some(symbols),
            first_line_is_data: false,
        }
    }

    fn headerless(cols: usize) -> Self {
        Self {
            r_col: None,
            t_col: None,
            w_col: None,
            meta_count: 0,
            x_count: cols,
            y_count: 0,
            symbols: None,
            first_line_is_data: true,
        }
    }

    fn expected_width(&self) -> usize {
        self.meta_count + self.x_count + self.y_count
    }

    fn parse_row(
        &self,
        tokens: &[&str],
        row: usize,
        data: &mut DataSet,
    ) -> Result<(), DataSetError> {
        if tokens.len() != self.expected_width() {
            return Err(DataSetError::RowWidth {
                row,
                found: tokens.len(),
                expected: self.expected_width(),
            });
        }

        for (j, token) in tokens.iter().enumerate() {
            let value: f32 = token.parse().map_err(|_| DataSetError::Parse {
                row,
                col: j + 1,
                token: token.to_string(),
            })?;

            if self.r_col == Some(j) {
                data.series.push(value as i32);
            } else if self.t_col == Some(j) {
                data.ordering.push(value);
            } else if self.w_col == Some(j) {
                data.weights.push(value);
            } else if j >= self.meta_count && j < self.meta_count + self.x_count {
                data.values.push(value);
            }
            // reserved trailing columns are validated but dropped
        }
        data.rows += 1;
        Ok(())
    }
}
