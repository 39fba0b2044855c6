/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Crop a plane
//!
//! A crop is a view into a sub-plane copied out row by row:
//!
//! ```text
//!    width ──────────────────────────────►
//! │ ┌─────────────────────────────────────┐
//! │ │   (x,y)     out width               │
//! │ │     ┌────────────────────┐          │
//! │ │   o │                    │          │
//! │ │   u │   CROPPED PLANE    │          │
//! │ │   t │                    │          │
//! │ │     └────────────────────┘          │
//! ▼ │                                     │
//!   └─────────────────────────────────────┘
//! ```
use lofi_core::errors::GlitchErrors;
use lofi_core::image::Plane;
use zune_imageprocs::crop::crop;

/// Copy the `width × height` window starting at `(x, y)` out of `plane`
///
/// # Errors
/// [`GlitchErrors::GeometryError`] if the window is empty or reaches
/// past the plane edges
pub fn crop_plane(
    plane: &Plane, x: usize, y: usize, width: usize, height: usize
) -> Result<Plane, GlitchErrors> {
    let (in_width, in_height) = plane.dimensions();

    if width == 0 || height == 0 {
        return Err(GlitchErrors::GeometryError(format!(
            "crop window must be positive, found {width}x{height}"
        )));
    }
    if x + width > in_width || y + height > in_height {
        return Err(GlitchErrors::GeometryError(format!(
            "crop window {width}x{height} at ({x},{y}) exceeds {in_width}x{in_height} plane"
        )));
    }
    let mut out = vec![0.0; width * height];

    crop(plane.data(), in_width, &mut out, width, height, x, y);

    Plane::new(out, width, height)
}
