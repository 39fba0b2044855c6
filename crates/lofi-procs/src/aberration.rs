/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Chromatic aberration
//!
//! Each color plane is scaled to a different size and the three are
//! center-cropped to a common extent, which misaligns them by an amount
//! growing towards the image edges, like lens color fringing.
//!
//! For an offset `kt` on an `h × w` image:
//!
//! | plane | resized to          | cropped from     |
//! |-------|---------------------|------------------|
//! | red   | `h × w`             | `kt`             |
//! | green | `(h-kt) × (w-kt)`   | `kt/2`           |
//! | blue  | `(h-2kt) × (w-2kt)` | not cropped      |
//!
//! The stacked `(h-2kt) × (w-2kt)` composite is then resized back to `h × w`.
use lofi_core::errors::GlitchErrors;
use lofi_core::image::{Image, Plane};
use lofi_core::traits::OperationsTrait;
use log::debug;

use crate::crop::crop_plane;
use crate::resize::resize_plane;

/// Offset color planes against each other
pub struct ChromaticAberration {
    offset: usize
}

impl ChromaticAberration {
    /// Create a new aberration operation
    ///
    /// Odd offsets are bumped to the next even value so the green
    /// plane can be cropped symmetrically.
    #[must_use]
    pub fn new(offset: usize) -> ChromaticAberration {
        let offset = if offset % 2 != 0 { offset.saturating_add(1) } else { offset };

        ChromaticAberration { offset }
    }

    /// The even offset actually applied
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

impl OperationsTrait for ChromaticAberration {
    fn name(&self) -> &'static str {
        "Chromatic aberration"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        let kt = self.offset;

        if kt == 0 {
            return Ok(());
        }
        let (width, height) = image.dimensions();
        let twice = kt.saturating_mul(2);

        let (inner_w, inner_h) = match (
            width.checked_sub(twice).filter(|x| *x > 0),
            height.checked_sub(twice).filter(|x| *x > 0)
        ) {
            (Some(w), Some(h)) => (w, h),
            _ => {
                return Err(GlitchErrors::GeometryError(format!(
                    "aberration offset {kt} leaves no pixels on a {width}x{height} image"
                )))
            }
        };

        debug!("Aberration offset {kt}, common extent {inner_w}x{inner_h}");

        let planes = image.planes_ref();

        let red = crop_plane(&planes[0], kt, kt, inner_w, inner_h)?;

        let green = resize_plane(&planes[1], width - kt, height - kt)?;
        let green = crop_plane(&green, kt / 2, kt / 2, inner_w, inner_h)?;

        let blue = resize_plane(&planes[2], inner_w, inner_h)?;

        let planes = [red, green, blue]
            .iter()
            .map(|plane| resize_plane(plane, width, height))
            .collect::<Result<Vec<Plane>, GlitchErrors>>()?;

        *image = Image::from_planes(planes)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lofi_core::errors::GlitchErrors;
    use lofi_core::image::Image;
    use lofi_core::traits::OperationsTrait;

    use crate::aberration::ChromaticAberration;

    #[allow(clippy::cast_precision_loss)]
    fn gradient(width: usize, height: usize) -> Image {
        Image::from_fn(width, height, |y, x, c| {
            ((x + y + c) as f32 / (width + height + 2) as f32).min(1.0)
        })
    }

    #[test]
    fn zero_offset_is_identity() {
        let original = gradient(16, 12);
        let mut image = original.clone();

        ChromaticAberration::new(0).execute(&mut image).unwrap();
        assert_eq!(image, original);
    }

    #[test]
    fn odd_offsets_become_even() {
        assert_eq!(ChromaticAberration::new(3).offset(), 4);
        assert_eq!(ChromaticAberration::new(16).offset(), 16);
    }

    #[test]
    fn shape_is_preserved() {
        let mut image = gradient(40, 30);

        ChromaticAberration::new(4).execute(&mut image).unwrap();

        assert_eq!(image.dimensions(), (40, 30));
        for plane in image.planes_ref() {
            assert!(plane.data().iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn planes_are_misaligned() {
        let original = gradient(40, 30);
        let mut image = original.clone();

        ChromaticAberration::new(4).execute(&mut image).unwrap();
        assert_ne!(image.planes_ref()[0], original.planes_ref()[0]);
    }

    #[test]
    fn offset_too_large_is_geometry_error() {
        let mut image = gradient(20, 8);

        // 8 - 2*4 == 0
        let result = ChromaticAberration::new(4).execute(&mut image);
        assert!(matches!(result, Err(GlitchErrors::GeometryError(_))));

        let result = ChromaticAberration::new(100).execute(&mut image);
        assert!(matches!(result, Err(GlitchErrors::GeometryError(_))));
        // failed operations leave the image alone
        assert_eq!(image.dimensions(), (20, 8));
    }
}
