//! Feature Matrix
//!
//! Rectangular f32 table: rows = flow records, columns = features.
//! Every cell is finite once constructed.

use ndarray::{Array2, ArrayView1, ArrayView2, ShapeError};

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    values: Array2<f32>,
}

impl FeatureMatrix {
    /// Build from row-major data. Non-finite cells are replaced with 0.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<f32>>) -> Result<Self, ShapeError> {
        let width = columns.len();
        let height = rows.len();
        let flat: Vec<f32> = rows
            .into_iter()
            .flatten()
            .map(|v| if v.is_finite() { v } else { 0.0 })
            .collect();

        let values = Array2::from_shape_vec((height, width), flat)?;
        Ok(Self { columns, values })
    }

    /// Column names exactly as the input header declared them
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> ArrayView2<'_, f32> {
        self.values.view()
    }

    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f32>> {
        (index < self.rows()).then(|| self.values.row(index))
    }

    pub fn rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn features(&self) -> usize {
        self.values.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_shape() {
        let m = FeatureMatrix::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
        )
        .unwrap();

        assert_eq!(m.rows(), 3);
        assert_eq!(m.features(), 2);
        assert_eq!(m.row(1).unwrap().to_vec(), vec![3.0, 4.0]);
        assert!(m.row(3).is_none());
    }

    #[test]
    fn test_from_rows_scrubs_non_finite() {
        let m = FeatureMatrix::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![f32::INFINITY, f32::NAN]],
        )
        .unwrap();

        assert!(m.values().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let result = FeatureMatrix::from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![1.0, 2.0], vec![3.0]],
        );
        assert!(result.is_err());
    }
}
