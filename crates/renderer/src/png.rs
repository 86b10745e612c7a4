//! PNG encoding for rosette images.
//!
//! Writes 8-bit truecolor PNGs, with alpha (color type 6) or without
//! (color type 2). Each scanline gets the filter that minimizes the sum of
//! absolute filtered bytes, the usual heuristic for photographic content;
//! rows are filtered in parallel and the result is zlib-compressed.

use std::io::Write;
use std::path::Path;

use gore_common::{GoreError, GoreResult};
use image::{RgbImage, RgbaImage};
use rayon::prelude::*;

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Pixel layout written to IHDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngColor {
    Rgb,
    Rgba,
}

impl PngColor {
    fn color_type(self) -> u8 {
        match self {
            PngColor::Rgb => 2,
            PngColor::Rgba => 6,
        }
    }

    fn bytes_per_pixel(self) -> usize {
        match self {
            PngColor::Rgb => 3,
            PngColor::Rgba => 4,
        }
    }
}

/// Encode an RGBA image.
pub fn encode_rgba(image: &RgbaImage) -> GoreResult<Vec<u8>> {
    encode(image.as_raw(), image.width(), image.height(), PngColor::Rgba)
}

/// Encode an opaque RGB image.
pub fn encode_rgb(image: &RgbImage) -> GoreResult<Vec<u8>> {
    encode(image.as_raw(), image.width(), image.height(), PngColor::Rgb)
}

/// Encode and write an RGBA image to `path`.
pub fn write_rgba(path: impl AsRef<Path>, image: &RgbaImage) -> GoreResult<()> {
    let bytes = encode_rgba(image)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Encode and write an RGB image to `path`.
pub fn write_rgb(path: impl AsRef<Path>, image: &RgbImage) -> GoreResult<()> {
    let bytes = encode_rgb(image)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Encode raw interleaved 8-bit samples.
pub fn encode(pixels: &[u8], width: u32, height: u32, color: PngColor) -> GoreResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(GoreError::EmptyImage { width, height });
    }
    let bpp = color.bytes_per_pixel();
    let stride = width as usize * bpp;
    if pixels.len() != stride * height as usize {
        return Err(GoreError::Encode(format!(
            "expected {} bytes for {}x{} {:?}, got {}",
            stride * height as usize,
            width,
            height,
            color,
            pixels.len()
        )));
    }

    let mut png = Vec::with_capacity(pixels.len() / 2 + 64);
    png.extend_from_slice(&SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, color.color_type(), 0, 0, 0]);
    write_chunk(&mut png, b"IHDR", &ihdr);

    let filtered = filter_scanlines(pixels, stride, bpp);
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(&filtered)
        .map_err(|e| GoreError::Encode(format!("IDAT compression failed: {}", e)))?;
    let idat = encoder
        .finish()
        .map_err(|e| GoreError::Encode(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat);

    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn write_chunk(png: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(kind);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix every scanline with its best filter type and filter it.
fn filter_scanlines(pixels: &[u8], stride: usize, bpp: usize) -> Vec<u8> {
    let mut out = vec![0u8; (stride + 1) * (pixels.len() / stride)];
    out.par_chunks_mut(stride + 1)
        .enumerate()
        .for_each(|(row, dst)| {
            let cur = &pixels[row * stride..(row + 1) * stride];
            let prev = if row == 0 {
                None
            } else {
                Some(&pixels[(row - 1) * stride..row * stride])
            };
            let mut best_cost = u64::MAX;
            let mut scratch = vec![0u8; stride];
            for filter in 0..5u8 {
                apply_filter(filter, cur, prev, bpp, &mut scratch);
                let cost: u64 = scratch.iter().map(|&b| (b as i8).unsigned_abs() as u64).sum();
                if cost < best_cost {
                    best_cost = cost;
                    dst[0] = filter;
                    dst[1..].copy_from_slice(&scratch);
                }
            }
        });
    out
}

fn apply_filter(filter: u8, cur: &[u8], prev: Option<&[u8]>, bpp: usize, out: &mut [u8]) {
    for i in 0..cur.len() {
        let a = if i >= bpp { cur[i - bpp] } else { 0 };
        let b = prev.map_or(0, |p| p[i]);
        let c = match prev {
            Some(p) if i >= bpp => p[i - bpp],
            _ => 0,
        };
        let predicted = match filter {
            0 => 0,
            1 => a,
            2 => b,
            3 => ((a as u16 + b as u16) / 2) as u8,
            _ => paeth(a, b, c),
        };
        out[i] = cur[i].wrapping_sub(predicted);
    }
}

#[inline]
fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paeth_predictor() {
        assert_eq!(paeth(10, 20, 10), 20);
        assert_eq!(paeth(20, 10, 10), 20);
        assert_eq!(paeth(0, 0, 0), 0);
    }

    #[test]
    fn test_constant_rows_prefer_up_or_sub() {
        let pixels = vec![7u8; 4 * 4 * 3];
        let filtered = filter_scanlines(&pixels, 12, 3);
        // second row is identical to the first, so Up zeroes it completely
        assert!(filtered[13..26].iter().skip(1).all(|&b| b == 0));
        assert_ne!(filtered[13], 0);
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(encode(&[0u8; 10], 2, 2, PngColor::Rgba).is_err());
        assert!(encode(&[], 0, 2, PngColor::Rgb).is_err());
    }
}
