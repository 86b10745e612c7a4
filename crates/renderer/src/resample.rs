//! Pull-resampling through a [`CoordinateMap`].
//!
//! For each destination pixel the map names a fractional source position.
//! Positions that are finite and inside `[0, width) × [0, height)` are
//! sampled; everything else gets the background pixel. Sampling outside the
//! source is the normal "nothing here" case and never an error.

use gore_common::{GoreResult, InterpolationMethod};
use image::{ImageBuffer, Pixel};
use projection::CoordinateMap;
use rayon::prelude::*;

/// Resample `source` into a new image shaped like `map`.
pub fn resample<P>(
    source: &ImageBuffer<P, Vec<u8>>,
    map: &CoordinateMap,
    background: P,
    method: InterpolationMethod,
) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8> + Send + Sync,
{
    let (width, height) = map.dimensions();
    let mut output = ImageBuffer::from_pixel(width, height, background);
    fill_rows(source, map, background, method, &mut output);
    output
}

/// Resample `source` into an existing buffer, which must match the map's shape.
pub fn resample_into<P>(
    source: &ImageBuffer<P, Vec<u8>>,
    map: &CoordinateMap,
    background: P,
    method: InterpolationMethod,
    output: &mut ImageBuffer<P, Vec<u8>>,
) -> GoreResult<()>
where
    P: Pixel<Subpixel = u8> + Send + Sync,
{
    map.ensure_shape(output.width(), output.height())?;
    fill_rows(source, map, background, method, output);
    Ok(())
}

fn fill_rows<P>(
    source: &ImageBuffer<P, Vec<u8>>,
    map: &CoordinateMap,
    background: P,
    method: InterpolationMethod,
    output: &mut ImageBuffer<P, Vec<u8>>,
) where
    P: Pixel<Subpixel = u8> + Send + Sync,
{
    let channels = P::CHANNEL_COUNT as usize;
    let row_len = map.width() as usize * channels;
    if row_len == 0 {
        return;
    }
    let sampler = Sampler {
        data: source.as_raw(),
        width: source.width(),
        height: source.height(),
        channels,
    };
    let bg = background.channels();

    output
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(row, out_row)| {
            let xs = map.row_x(row as u32);
            let ys = map.row_y(row as u32);
            for (col, out_px) in out_row.chunks_exact_mut(channels).enumerate() {
                let written = match method {
                    InterpolationMethod::Nearest => sampler.nearest(xs[col], ys[col], out_px),
                    InterpolationMethod::Bilinear => sampler.bilinear(xs[col], ys[col], out_px),
                };
                if !written {
                    out_px.copy_from_slice(bg);
                }
            }
        });
}

/// Raw view of a source image.
struct Sampler<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    channels: usize,
}

impl Sampler<'_> {
    #[inline]
    fn contains(&self, x: f32, y: f32) -> bool {
        x.is_finite()
            && y.is_finite()
            && x >= 0.0
            && y >= 0.0
            && x < self.width as f32
            && y < self.height as f32
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let start = (y as usize * self.width as usize + x as usize) * self.channels;
        &self.data[start..start + self.channels]
    }

    #[inline]
    fn nearest(&self, x: f32, y: f32, out: &mut [u8]) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let xi = ((x + 0.5).floor() as u32).min(self.width - 1);
        let yi = ((y + 0.5).floor() as u32).min(self.height - 1);
        out.copy_from_slice(self.pixel(xi, yi));
        true
    }

    #[inline]
    fn bilinear(&self, x: f32, y: f32, out: &mut [u8]) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        // neighbours clamp at the last row/column
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let p00 = self.pixel(x0, y0);
        let p10 = self.pixel(x1, y0);
        let p01 = self.pixel(x0, y1);
        let p11 = self.pixel(x1, y1);

        for c in 0..self.channels {
            let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
            let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
            let v = top * (1.0 - fy) + bottom * fy;
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        true
    }
}
