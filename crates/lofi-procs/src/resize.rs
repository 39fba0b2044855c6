/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bilinear resizing of float planes
use lofi_core::errors::GlitchErrors;
use lofi_core::image::{Image, Plane};
use lofi_core::traits::OperationsTrait;
use log::debug;

/// Resize every plane of an image to new dimensions
pub struct Resize {
    new_width:  usize,
    new_height: usize
}

impl Resize {
    /// Create a new resize operation
    ///
    /// # Arguments
    /// - new_width: The new image width
    /// - new_height: The new image height.
    #[must_use]
    pub fn new(new_width: usize, new_height: usize) -> Resize {
        Resize {
            new_width,
            new_height
        }
    }
}

impl OperationsTrait for Resize {
    fn name(&self) -> &'static str {
        "Resize"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        let (old_w, old_h) = image.dimensions();

        debug!(
            "Resizing from {old_w}x{old_h} to {}x{}",
            self.new_width, self.new_height
        );

        let planes = image
            .planes_ref()
            .iter()
            .map(|plane| resize_plane(plane, self.new_width, self.new_height))
            .collect::<Result<Vec<Plane>, GlitchErrors>>()?;

        *image = Image::from_planes(planes)?;

        Ok(())
    }
}

/// Resize a plane to `out_width × out_height`
///
/// # Errors
/// [`GlitchErrors::GeometryError`] if either the source or the
/// target has a zero dimension
pub fn resize_plane(
    plane: &Plane, out_width: usize, out_height: usize
) -> Result<Plane, GlitchErrors> {
    let (in_width, in_height) = plane.dimensions();

    if out_width == 0 || out_height == 0 || in_width == 0 || in_height == 0 {
        return Err(GlitchErrors::GeometryError(format!(
            "cannot resize {in_width}x{in_height} plane to {out_width}x{out_height}"
        )));
    }
    let mut out = vec![0.0; out_width * out_height];

    resize(
        plane.data(),
        &mut out,
        in_width,
        in_height,
        out_width,
        out_height
    );

    Plane::new(out, out_width, out_height)
}

/// Bilinear interpolation of a single channel
///
/// Sample centers are aligned, so output pixel `x` reads from
/// `(x + 0.5) * in_width / out_width - 0.5` in the input, edges are clamped.
/// Resizing to the same dimensions copies the input.
///
/// # Panics
/// - `in_width*in_height` does not match `in_channel.len()`.
/// - `out_width*out_height` does not match `out_channel.len()`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
pub fn resize(
    in_channel: &[f32], out_channel: &mut [f32], in_width: usize, in_height: usize,
    out_width: usize, out_height: usize
) {
    assert_eq!(in_channel.len(), in_width * in_height);
    assert_eq!(out_channel.len(), out_width * out_height);

    if in_width == out_width && in_height == out_height {
        out_channel.copy_from_slice(in_channel);
        return;
    }

    let w_ratio = in_width as f32 / out_width as f32;
    let h_ratio = in_height as f32 / out_height as f32;

    // (index, index + 1, weight of index + 1) along one axis
    let source = |pos: usize, ratio: f32, limit: usize| -> (usize, usize, f32) {
        let src = ((pos as f32 + 0.5) * ratio - 0.5).max(0.0);
        let p0 = (src.floor() as usize).min(limit - 1);
        let p1 = (p0 + 1).min(limit - 1);

        (p0, p1, (src - p0 as f32).clamp(0.0, 1.0))
    };

    let columns: Vec<(usize, usize, f32)> = (0..out_width)
        .map(|x| source(x, w_ratio, in_width))
        .collect();

    for (y, out_row) in out_channel.chunks_exact_mut(out_width).enumerate() {
        let (y0, y1, b) = source(y, h_ratio, in_height);

        let row0 = &in_channel[y0 * in_width..(y0 + 1) * in_width];
        let row1 = &in_channel[y1 * in_width..(y1 + 1) * in_width];

        for (out, &(x0, x1, a)) in out_row.iter_mut().zip(&columns) {
            let p00 = row0[x0];
            let p10 = row0[x1];
            let p01 = row1[x0];
            let p11 = row1[x1];

            *out = p00 * (1.0 - a) * (1.0 - b)
                + p10 * a * (1.0 - b)
                + p01 * (1.0 - a) * b
                + p11 * a * b;
        }
    }
}
