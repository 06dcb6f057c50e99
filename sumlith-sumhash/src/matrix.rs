//! The compression matrix.
//!
//! `A` has [`ROWS`] rows of [`COLUMNS`] 64-bit entries. Entries are read
//! row-major, little-endian, from the SHAKE256 stream of
//! `le16(512 / 8) ‖ le16(ROWS) ‖ le16(COLUMNS) ‖ seed`.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;
use std::sync::OnceLock;

/// Number of matrix rows, one per output word.
pub const ROWS: usize = 8;

/// Number of matrix columns, one per input bit of a compression call.
pub const COLUMNS: usize = 1024;

/// Bytes consumed by one compression call: chaining value plus block.
pub(crate) const INPUT_BYTES: usize = COLUMNS / 8;

const OUTPUT_BYTES: u16 = (ROWS * 8) as u16;

const DEFAULT_SEED: &[u8] = b"Algorand";

/// Subset-sum compression matrix.
#[derive(Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Box<[[u64; COLUMNS]]>,
}

impl Matrix {
    /// Expand a matrix from `seed`.
    pub fn from_seed(seed: &[u8]) -> Self {
        let mut xof = Shake256::default();
        xof.update(&OUTPUT_BYTES.to_le_bytes());
        xof.update(&(ROWS as u16).to_le_bytes());
        xof.update(&(COLUMNS as u16).to_le_bytes());
        xof.update(seed);
        let mut reader = xof.finalize_xof();

        let mut rows = vec![[0u64; COLUMNS]; ROWS].into_boxed_slice();
        let mut word = [0u8; 8];
        for row in rows.iter_mut() {
            for entry in row.iter_mut() {
                reader.read(&mut word);
                *entry = u64::from_le_bytes(word);
            }
        }
        Self { rows }
    }

    /// The matrix every Sumhash512 state uses, expanded on first access.
    pub fn shared() -> &'static Self {
        static SHARED: OnceLock<Matrix> = OnceLock::new();
        SHARED.get_or_init(|| Matrix::from_seed(DEFAULT_SEED))
    }

    /// Entry at `row`, `col`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn entry(&self, row: usize, col: usize) -> u64 {
        self.rows[row][col]
    }

    /// Compress 1024 input bits into 8 words.
    ///
    /// Bit `j` of byte `i` selects column `8 * i + j`. Selection is done
    /// with a mask so every column is touched regardless of the input.
    pub(crate) fn compress(&self, input: &[u8; INPUT_BYTES]) -> [u64; ROWS] {
        let mut out = [0u64; ROWS];
        for (i, &byte) in input.iter().enumerate() {
            for j in 0..8 {
                let mask = 0u64.wrapping_sub(u64::from((byte >> j) & 1));
                let col = 8 * i + j;
                for (acc, row) in out.iter_mut().zip(self.rows.iter()) {
                    *acc = acc.wrapping_add(row[col] & mask);
                }
            }
        }
        out
    }
}

impl core::fmt::Debug for Matrix {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &ROWS)
            .field("columns", &COLUMNS)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_matrix_corners() {
        let a = Matrix::shared();
        assert_eq!(a.entry(0, 0), 0xc0df_2685_a9f8_a108);
        assert_eq!(a.entry(ROWS - 1, COLUMNS - 1), 0xd254_76de_b555_b6cb);
    }

    #[test]
    fn test_shared_is_cached() {
        assert!(core::ptr::eq(Matrix::shared(), Matrix::shared()));
    }

    #[test]
    fn test_seed_changes_matrix() {
        assert_ne!(Matrix::from_seed(b"Algorand"), Matrix::from_seed(b"Algorane"));
        assert_eq!(&Matrix::from_seed(b"Algorand"), Matrix::shared());
    }

    #[test]
    fn test_compress_zero_input() {
        let a = Matrix::shared();
        assert_eq!(a.compress(&[0u8; INPUT_BYTES]), [0u64; ROWS]);
    }

    #[test]
    fn test_compress_selects_columns() {
        let a = Matrix::shared();
        let mut input = [0u8; INPUT_BYTES];
        input[0] = 0b0000_0101;
        input[INPUT_BYTES - 1] = 0x80;
        let out = a.compress(&input);
        for (k, word) in out.iter().enumerate() {
            let expected = a
                .entry(k, 0)
                .wrapping_add(a.entry(k, 2))
                .wrapping_add(a.entry(k, COLUMNS - 1));
            assert_eq!(*word, expected);
        }
    }
}
