use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;

use crate::error::{NetError, Result};

/// Bytes in the binary shape header: rows then cols, each a little-endian u64.
const HEADER_LEN: usize = 16;

/// Dense row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wraps row-major `data`. Fails if its length is not `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Matrix> {
        if data.len() != rows * cols {
            return Err(NetError::dimension("matrix data", rows * cols, data.len()));
        }
        Ok(Matrix { rows, cols, data })
    }

    /// Uniform samples in `[-1/sqrt(cols), 1/sqrt(cols)]`; `cols` is the fan-in.
    pub fn uniform_fan_in<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let bound = 1.0 / (cols.max(1) as f64).sqrt();
        let data = (0..rows * cols)
            .map(|_| rng.gen_range(-bound..=bound))
            .collect();
        Matrix { rows, cols, data }
    }

    /// Samples from N(0, 1) for every entry.
    pub fn standard_normal<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let data = (0..rows * cols)
            .map(|_| Matrix::sample_standard_normal(rng))
            .collect();
        Matrix { rows, cols, data }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        // Both uniforms live in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// `self · v`, treating `v` as a column vector of length `cols`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.rows);
        self.mul_vec_into(v, &mut out);
        out
    }

    /// [`Matrix::mul_vec`] into a caller-owned buffer, which is cleared first.
    pub fn mul_vec_into(&self, v: &[f64], out: &mut Vec<f64>) {
        debug_assert_eq!(v.len(), self.cols);
        out.clear();
        out.extend((0..self.rows).map(|i| self.row(i).iter().zip(v).map(|(w, x)| w * x).sum::<f64>()));
    }

    /// `transpose(self) · v` without materialising the transpose.
    /// `v` has length `rows`; the result has length `cols`.
    pub fn transpose_mul_vec(&self, v: &[f64]) -> Vec<f64> {
        debug_assert_eq!(v.len(), self.rows);
        let mut out = vec![0.0; self.cols];
        for (i, &vi) in v.iter().enumerate() {
            for (o, w) in out.iter_mut().zip(self.row(i)) {
                *o += w * vi;
            }
        }
        out
    }

    /// `self += scale * (col · transpose(row))`.
    ///
    /// `col` has length `rows`, `row` has length `cols`.
    pub fn add_scaled_outer(&mut self, scale: f64, col: &[f64], row: &[f64]) {
        debug_assert_eq!(col.len(), self.rows);
        debug_assert_eq!(row.len(), self.cols);
        let cols = self.cols;
        for (i, &c) in col.iter().enumerate() {
            let factor = scale * c;
            for (w, &r) in self.data[i * cols..(i + 1) * cols].iter_mut().zip(row) {
                *w += factor * r;
            }
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.set(i, j, self.get(j, i));
            }
        }

        res
    }

    /// Binary encoding: rows and cols as little-endian u64, then every value
    /// in row-major order as little-endian f64.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.data.len() * 8);
        out.extend_from_slice(&(self.rows as u64).to_le_bytes());
        out.extend_from_slice(&(self.cols as u64).to_le_bytes());
        for v in &self.data {
            out.extend_from_slice(&v.to_le_bytes());
        }
        out
    }

    /// Inverse of [`Matrix::to_bytes`]. The payload length must agree exactly
    /// with the shape header.
    pub fn from_bytes(bytes: &[u8]) -> Result<Matrix> {
        if bytes.len() < HEADER_LEN {
            return Err(NetError::CorruptWeights(format!(
                "matrix blob is {} bytes, shorter than its header",
                bytes.len()
            )));
        }
        let rows = read_u64(&bytes[0..8]) as usize;
        let cols = read_u64(&bytes[8..16]) as usize;
        let payload = &bytes[HEADER_LEN..];

        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(8))
            .ok_or_else(|| NetError::CorruptWeights(format!("matrix shape {rows}x{cols} overflows")))?;
        if payload.len() != expected {
            return Err(NetError::CorruptWeights(format!(
                "{rows}x{cols} matrix needs {expected} payload bytes, found {}",
                payload.len()
            )));
        }

        let data = payload
            .chunks_exact(8)
            .map(|chunk| {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(chunk);
                f64::from_le_bytes(buf)
            })
            .collect();
        Ok(Matrix { rows, cols, data })
    }
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Matrix {
        // [[1, 2, 3],
        //  [4, 5, 6]]
        Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap()
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert!(matches!(
            Matrix::from_vec(2, 2, vec![1.0; 3]),
            Err(NetError::DimensionMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn mul_vec_is_row_dot_products() {
        assert_eq!(sample().mul_vec(&[1.0, 0.0, -1.0]), vec![-2.0, -2.0]);
    }

    #[test]
    fn transpose_mul_vec_matches_explicit_transpose() {
        let m = sample();
        let e = [0.5, -1.0];
        assert_eq!(m.transpose_mul_vec(&e), m.transpose().mul_vec(&e));
        assert_eq!(m.transpose_mul_vec(&e), vec![-3.5, -4.0, -4.5]);
    }

    #[test]
    fn add_scaled_outer_updates_every_entry() {
        let mut m = Matrix::zeros(2, 3);
        m.add_scaled_outer(2.0, &[1.0, -1.0], &[1.0, 2.0, 3.0]);
        assert_eq!(m.as_slice(), &[2.0, 4.0, 6.0, -2.0, -4.0, -6.0]);
    }

    #[test]
    fn byte_encoding_rejects_truncated_payload() {
        let mut bytes = sample().to_bytes();
        assert_eq!(Matrix::from_bytes(&bytes).unwrap(), sample());
        bytes.pop();
        assert!(matches!(Matrix::from_bytes(&bytes), Err(NetError::CorruptWeights(_))));
        assert!(matches!(Matrix::from_bytes(&bytes[..10]), Err(NetError::CorruptWeights(_))));
    }

    #[test]
    fn uniform_fan_in_respects_bound() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = Matrix::uniform_fan_in(20, 16, &mut rng);
        assert!(m.as_slice().iter().all(|w| w.abs() <= 0.25));
        assert!(m.as_slice().iter().any(|&w| w != 0.0));
    }

    #[test]
    fn standard_normal_is_roughly_centred() {
        let mut rng = StdRng::seed_from_u64(11);
        let m = Matrix::standard_normal(100, 100, &mut rng);
        let mean = m.as_slice().iter().sum::<f64>() / 10_000.0;
        assert!(mean.abs() < 0.05, "mean was {mean}");
    }
}
