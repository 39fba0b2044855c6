/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversion between float planes and 8-bit sample buffers
use lofi_core::errors::GlitchErrors;
use lofi_core::image::Plane;

/// Quantize a plane into one unsigned byte per pixel, row-major
///
/// Each value is scaled by 255, rounded and clamped into `[0, 255]`,
/// NaN maps to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn plane_to_samples(plane: &Plane) -> Vec<u8> {
    plane
        .data()
        .iter()
        .map(|x| {
            let x = if x.is_nan() { 0.0 } else { *x };
            (x * 255.0).round().clamp(0.0, 255.0) as u8
        })
        .collect()
}

/// Fold a decoded byte stream back into a `width × height` plane
///
/// With `n = width*height` and `d = decoded.len()`, the stream is
/// sampled every `stride = d / n` bytes, the first `n` picks are scaled
/// back into `[0, 1]` and clamped.
///
/// # Errors
/// - [`GlitchErrors::InsufficientDecodedData`] if `d < n`
pub fn reconstruct(decoded: &[u8], width: usize, height: usize) -> Result<Plane, GlitchErrors> {
    let expected = width * height;
    let stride = decoded.len().checked_div(expected).unwrap_or(0);

    if stride == 0 {
        return Err(GlitchErrors::InsufficientDecodedData {
            decoded: decoded.len(),
            expected
        });
    }
    let data: Vec<f32> = decoded
        .iter()
        .step_by(stride)
        .take(expected)
        .map(|x| (f32::from(*x) / 255.0).clamp(0.0, 1.0))
        .collect();

    Plane::new(data, width, height)
}

#[cfg(test)]
mod tests {
    use lofi_core::errors::GlitchErrors;
    use lofi_core::image::Plane;

    use crate::quantize::{plane_to_samples, reconstruct};

    #[test]
    fn quantize_rounds_and_clamps() {
        let plane = Plane::new(vec![0.0, 0.5, 1.0, 1.5, -0.2, f32::NAN], 3, 2).unwrap();
        assert_eq!(plane_to_samples(&plane), [0, 128, 255, 255, 0, 0]);
    }

    #[test]
    fn stride_one_is_identity_on_quantized_values() {
        let bytes: Vec<u8> = (0..12).map(|x| x * 20).collect();
        let plane = reconstruct(&bytes, 4, 3).unwrap();

        assert_eq!(plane.dimensions(), (4, 3));
        assert_eq!(plane_to_samples(&plane), bytes);
    }

    #[test]
    fn stride_picks_every_nth_byte() {
        // two bytes per sample, plus a trailing odd byte that floors away
        let bytes = [10, 0, 20, 0, 30, 0, 40, 0, 99];
        let plane = reconstruct(&bytes, 2, 2).unwrap();

        assert_eq!(plane_to_samples(&plane), [10, 20, 30, 40]);
    }

    #[test]
    fn short_stream_is_insufficient() {
        let result = reconstruct(&[1, 2, 3], 2, 2);

        assert!(matches!(
            result,
            Err(GlitchErrors::InsufficientDecodedData {
                decoded:  3,
                expected: 4
            })
        ));
    }
}
