use std::ops::Mul;

/// Dense row-major matrix used by the training step.
///
/// Weights live on the neurons themselves; a `Matrix` is assembled from them
/// on demand (see `Layer::weights`) so the backward pass can be written as
/// plain matrix products.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |row| row.len()),
            data,
        }
    }

    /// `n × 1` column vector.
    pub fn column(values: Vec<f64>) -> Matrix {
        Matrix::from_data(values.into_iter().map(|v| vec![v]).collect())
    }

    /// `1 × n` row vector.
    pub fn row(values: Vec<f64>) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: vec![values],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    /// Flattens a column (or row) vector back into its values.
    pub fn into_values(self) -> Vec<f64> {
        self.data.into_iter().flatten().collect()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.cols != rhs.rows {
            panic!(
                "cannot multiply a {}x{} matrix by a {}x{} matrix",
                self.rows, self.cols, rhs.rows, rhs.cols
            )
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }
}
