//! Column-wise LP storage.
//!
//! Columns are kept as sorted sparse vectors so that appending rows and
//! columns and editing single coefficients stay cheap. Solvers take a CSC
//! snapshot with [`LpData::to_csc`].

use sprs::{CsMat, TriMat};

use crate::error::{LpError, LpResult};

/// Sparse matrix in CSC format.
pub type SparseCsc = CsMat<f64>;

/// LP data: ranged rows, bounded columns, minimization objective.
#[derive(Debug, Clone, Default)]
pub struct LpData {
    nrows: usize,
    cols: Vec<Vec<(usize, f64)>>,
    obj: Vec<f64>,
    lb: Vec<f64>,
    ub: Vec<f64>,
    lhs: Vec<f64>,
    rhs: Vec<f64>,
}

impl LpData {
    /// Create an empty LP.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.cols.len()
    }

    /// Total number of stored nonzeros.
    pub fn nnz(&self) -> usize {
        self.cols.iter().map(Vec::len).sum()
    }

    pub(crate) fn check_row(&self, row: usize) -> LpResult<()> {
        if row >= self.nrows {
            return Err(LpError::RowOutOfRange {
                index: row,
                nrows: self.nrows,
            });
        }
        Ok(())
    }

    pub(crate) fn check_col(&self, col: usize) -> LpResult<()> {
        if col >= self.cols.len() {
            return Err(LpError::ColOutOfRange {
                index: col,
                ncols: self.cols.len(),
            });
        }
        Ok(())
    }

    /// Append empty rows.
    pub fn add_rows(&mut self, lhs: &[f64], rhs: &[f64]) -> LpResult<()> {
        if lhs.len() != rhs.len() {
            return Err(LpError::DimensionMismatch(format!(
                "{} lhs values but {} rhs values",
                lhs.len(),
                rhs.len()
            )));
        }
        for (l, r) in lhs.iter().zip(rhs) {
            check_range(*l, *r, "row sides")?;
        }
        self.lhs.extend_from_slice(lhs);
        self.rhs.extend_from_slice(rhs);
        self.nrows += lhs.len();
        Ok(())
    }

    /// Append a column given by bounds, objective and `(row, value)` entries.
    ///
    /// Duplicate row entries are summed; explicit zeros are dropped.
    pub fn add_col(&mut self, obj: f64, lb: f64, ub: f64, entries: &[(usize, f64)]) -> LpResult<()> {
        check_range(lb, ub, "column bounds")?;
        let mut col: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for &(row, value) in entries {
            self.check_row(row)?;
            if !value.is_finite() {
                return Err(LpError::InvalidData(format!(
                    "non-finite coefficient {} in row {}",
                    value, row
                )));
            }
            col.push((row, value));
        }
        col.sort_by_key(|&(row, _)| row);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(col.len());
        for (row, value) in col {
            match merged.last_mut() {
                Some(last) if last.0 == row => last.1 += value,
                _ => merged.push((row, value)),
            }
        }
        merged.retain(|&(_, v)| v != 0.0);

        self.cols.push(merged);
        self.obj.push(obj);
        self.lb.push(lb);
        self.ub.push(ub);
        Ok(())
    }

    /// Objective coefficient.
    pub fn obj(&self, col: usize) -> LpResult<f64> {
        self.check_col(col)?;
        Ok(self.obj[col])
    }

    /// Objective vector.
    pub fn obj_vec(&self) -> &[f64] {
        &self.obj
    }

    /// Set an objective coefficient.
    pub fn set_obj(&mut self, col: usize, value: f64) -> LpResult<()> {
        self.check_col(col)?;
        self.obj[col] = value;
        Ok(())
    }

    /// Column bounds.
    pub fn bounds(&self, col: usize) -> LpResult<(f64, f64)> {
        self.check_col(col)?;
        Ok((self.lb[col], self.ub[col]))
    }

    /// Set column bounds.
    pub fn set_bounds(&mut self, col: usize, lb: f64, ub: f64) -> LpResult<()> {
        self.check_col(col)?;
        check_range(lb, ub, "column bounds")?;
        self.lb[col] = lb;
        self.ub[col] = ub;
        Ok(())
    }

    /// Row sides.
    pub fn sides(&self, row: usize) -> LpResult<(f64, f64)> {
        self.check_row(row)?;
        Ok((self.lhs[row], self.rhs[row]))
    }

    /// Set row sides.
    pub fn set_sides(&mut self, row: usize, lhs: f64, rhs: f64) -> LpResult<()> {
        self.check_row(row)?;
        check_range(lhs, rhs, "row sides")?;
        self.lhs[row] = lhs;
        self.rhs[row] = rhs;
        Ok(())
    }

    /// Set a single coefficient; zero removes the entry.
    pub fn set_coef(&mut self, row: usize, col: usize, value: f64) -> LpResult<()> {
        self.check_row(row)?;
        self.check_col(col)?;
        let column = &mut self.cols[col];
        match column.binary_search_by_key(&row, |&(r, _)| r) {
            Ok(pos) => {
                if value == 0.0 {
                    column.remove(pos);
                } else {
                    column[pos].1 = value;
                }
            }
            Err(pos) => {
                if value != 0.0 {
                    column.insert(pos, (row, value));
                }
            }
        }
        Ok(())
    }

    /// Coefficient at `(row, col)`.
    pub fn coef(&self, row: usize, col: usize) -> LpResult<f64> {
        self.check_row(row)?;
        self.check_col(col)?;
        let column = &self.cols[col];
        Ok(column
            .binary_search_by_key(&row, |&(r, _)| r)
            .map(|pos| column[pos].1)
            .unwrap_or(0.0))
    }

    /// Entries of a column, sorted by row.
    pub fn col(&self, col: usize) -> LpResult<&[(usize, f64)]> {
        self.check_col(col)?;
        Ok(&self.cols[col])
    }

    /// Entries of a row, sorted by column.
    pub fn row(&self, row: usize) -> LpResult<Vec<(usize, f64)>> {
        self.check_row(row)?;
        let mut entries = Vec::new();
        for (j, column) in self.cols.iter().enumerate() {
            if let Ok(pos) = column.binary_search_by_key(&row, |&(r, _)| r) {
                entries.push((j, column[pos].1));
            }
        }
        Ok(entries)
    }

    /// Column bounds as slices.
    pub fn col_bounds(&self) -> (&[f64], &[f64]) {
        (&self.lb, &self.ub)
    }

    /// Row sides as slices.
    pub fn row_sides(&self) -> (&[f64], &[f64]) {
        (&self.lhs, &self.rhs)
    }

    /// Snapshot of the constraint matrix in CSC format.
    pub fn to_csc(&self) -> SparseCsc {
        let mut tri = TriMat::new((self.nrows, self.cols.len()));
        for (j, column) in self.cols.iter().enumerate() {
            for &(i, v) in column {
                tri.add_triplet(i, j, v);
            }
        }
        tri.to_csc()
    }
}

fn check_range(lower: f64, upper: f64, what: &str) -> LpResult<()> {
    if lower.is_nan() || upper.is_nan() {
        return Err(LpError::InvalidData(format!("NaN in {}", what)));
    }
    if lower > upper {
        return Err(LpError::InvalidData(format!(
            "{}: lower {} exceeds upper {}",
            what, lower, upper
        )));
    }
    Ok(())
}
