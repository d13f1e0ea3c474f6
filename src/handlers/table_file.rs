// internal modules
use crate::handlers::{parsers, FileHandler, FileMode, OpenArgs};
use crate::utils::*;

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

// external crates
use anyhow::{anyhow, bail, Context, Result};
use itertools::Itertools;
use log::trace;

/// Handler for plain numeric column data
///
/// Whitespace-delimited columns of numbers, with `#` comment lines allowed
/// anywhere. Data are exchanged column-wise, so `columns[1][0]` is the first
/// entry of the second column.
///
/// On write, every value goes out as padded scientific notation and a header
/// comment is taken from the `comment` open option when one is provided:
///
/// ```text
/// # energy flux error
///   1.00000000e+00   4.20000000e-01   1.00000000e-02
/// ```
#[derive(Debug)]
pub struct TableFile {
    path: PathBuf,
    args: OpenArgs,
}

impl TableFile {
    pub fn new(path: &Path, args: &OpenArgs) -> Self {
        Self {
            path: path.to_path_buf(),
            args: args.clone(),
        }
    }
}

impl FileHandler for TableFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn format_name(&self) -> &'static str {
        "table"
    }

    fn read_data(&self) -> Result<Vec<Vec<f64>>> {
        let file = File::open(&self.path)
            .with_context(|| f!("Could not open {}", self.path.display()))?;
        let reader = BufReader::new(file);

        let mut columns: Vec<Vec<f64>> = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            if parsers::is_table_comment(line) {
                trace!("[Comment] {line}");
                continue;
            }

            let (_, row) = parsers::data_row(line)
                .map_err(|_| anyhow!("Failed to parse data row from \"{line}\""))?;

            if columns.is_empty() {
                columns = vec![Vec::new(); row.len()];
            } else if row.len() != columns.len() {
                bail!(
                    "Inconsistent column count in {}: expected {}, found {} in \"{line}\"",
                    self.path.display(),
                    columns.len(),
                    row.len()
                );
            }

            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }

        if columns.is_empty() {
            bail!("No data rows found in {}", self.path.display());
        }

        Ok(columns)
    }

    fn write_data(&self, columns: &[Vec<f64>]) -> Result<()> {
        if self.args.mode != FileMode::Write {
            bail!("{} was not opened for writing", self.path.display());
        }

        let Some(first) = columns.first() else {
            bail!("No columns provided for {}", self.path.display());
        };
        if columns.iter().any(|column| column.len() != first.len()) {
            bail!("All columns must be of equal length");
        }

        let file = File::create(&self.path)
            .with_context(|| f!("Could not create {}", self.path.display()))?;
        let mut writer = BufWriter::new(file);

        if let Some(comment) = self.args.option("comment") {
            writeln!(writer, "# {comment}")?;
        }

        for row in 0..first.len() {
            let line = columns
                .iter()
                .map(|column| f!("{:>16}", column[row].sci(8, 2)))
                .join(" ");
            writeln!(writer, "{line}")?;
        }

        Ok(())
    }
}
