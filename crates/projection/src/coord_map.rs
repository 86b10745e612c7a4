//! Per-pixel source lookup tables.
//!
//! A [`CoordinateMap`] stores, for every destination pixel, the fractional
//! source pixel `(x, y)` to sample. NaN marks pixels with no source; the
//! resampler writes the background color there.
//!
//! Maps are built once by a pure function of the destination pixel and are
//! never mutated afterwards.

use gore_common::{GoreError, GoreResult};
use rayon::prelude::*;

/// Source coordinates for each destination pixel, row-major.
#[derive(Debug, Clone)]
pub struct CoordinateMap {
    width: u32,
    height: u32,
    x_src: Vec<f32>,
    y_src: Vec<f32>,
}

impl CoordinateMap {
    /// A map where every pixel is invalid.
    pub fn invalid(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            x_src: vec![f32::NAN; len],
            y_src: vec![f32::NAN; len],
        }
    }

    /// Map each destination pixel to itself.
    pub fn identity(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |col, row| Some((col as f64, row as f64)))
    }

    /// Build a map by evaluating `f(col, row)` for every destination pixel.
    ///
    /// Rows are evaluated in parallel. `None` or a non-finite result marks the
    /// pixel invalid.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: Fn(u32, u32) -> Option<(f64, f64)> + Sync,
    {
        let mut map = Self::invalid(width, height);
        if width == 0 || height == 0 {
            return map;
        }
        let row_len = width as usize;

        map.x_src
            .par_chunks_mut(row_len)
            .zip(map.y_src.par_chunks_mut(row_len))
            .enumerate()
            .for_each(|(row, (xs, ys))| {
                for col in 0..row_len {
                    if let Some((x, y)) = f(col as u32, row as u32) {
                        if x.is_finite() && y.is_finite() {
                            xs[col] = x as f32;
                            ys[col] = y as f32;
                        }
                    }
                }
            });

        map
    }

    /// Assemble a map from raw grids, checking their lengths.
    pub fn from_parts(width: u32, height: u32, x_src: Vec<f32>, y_src: Vec<f32>) -> GoreResult<Self> {
        let len = width as usize * height as usize;
        if x_src.len() != len || y_src.len() != len {
            return Err(GoreError::ShapeMismatch {
                expected: format!("{} entries ({}x{})", len, width, height),
                actual: format!("{} x / {} y entries", x_src.len(), y_src.len()),
            });
        }
        Ok(Self {
            width,
            height,
            x_src,
            y_src,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Source coordinate for a destination pixel, `None` if it has no source.
    #[inline]
    pub fn get(&self, col: u32, row: u32) -> Option<(f32, f32)> {
        let idx = row as usize * self.width as usize + col as usize;
        let x = *self.x_src.get(idx)?;
        let y = *self.y_src.get(idx)?;
        if x.is_nan() || y.is_nan() {
            None
        } else {
            Some((x, y))
        }
    }

    /// One row of source x coordinates.
    pub fn row_x(&self, row: u32) -> &[f32] {
        let start = row as usize * self.width as usize;
        &self.x_src[start..start + self.width as usize]
    }

    /// One row of source y coordinates.
    pub fn row_y(&self, row: u32) -> &[f32] {
        let start = row as usize * self.width as usize;
        &self.y_src[start..start + self.width as usize]
    }

    /// Count pixels that have a source coordinate.
    pub fn valid_count(&self) -> usize {
        self.x_src
            .par_iter()
            .zip(self.y_src.par_iter())
            .filter(|(x, y)| !x.is_nan() && !y.is_nan())
            .count()
    }

    /// Fail with `ShapeMismatch` unless the map is `width × height`.
    pub fn ensure_shape(&self, width: u32, height: u32) -> GoreResult<()> {
        if (self.width, self.height) != (width, height) {
            return Err(GoreError::shape_mismatch(
                (width as usize, height as usize),
                (self.width as usize, self.height as usize),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_map() {
        let map = CoordinateMap::identity(7, 3);
        assert_eq!(map.get(4, 2), Some((4.0, 2.0)));
        assert_eq!(map.valid_count(), 21);
    }

    #[test]
    fn test_non_finite_marks_invalid() {
        let map = CoordinateMap::from_fn(4, 4, |col, _| {
            if col == 0 {
                Some((f64::INFINITY, 0.0))
            } else if col == 1 {
                None
            } else {
                Some((1.0, 1.0))
            }
        });
        assert_eq!(map.get(0, 0), None);
        assert_eq!(map.get(1, 3), None);
        assert_eq!(map.valid_count(), 8);
    }

    #[test]
    fn test_from_parts_checks_length() {
        let err = CoordinateMap::from_parts(2, 2, vec![0.0; 4], vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, GoreError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_ensure_shape() {
        let map = CoordinateMap::invalid(5, 2);
        assert!(map.ensure_shape(5, 2).is_ok());
        assert!(map.ensure_shape(2, 5).is_err());
        assert_eq!(map.row_x(1).len(), 5);
    }
}
