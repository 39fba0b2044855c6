/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Soft tinted horizontal stripe
use lofi_core::errors::GlitchErrors;
use lofi_core::image::{Image, CHANNELS};
use lofi_core::traits::OperationsTrait;
use log::debug;
use nanorand::{Rng, WyRand};
use zune_imageprocs::gaussian_blur::gaussian_blur_f32;

/// Pink-ish tint added by the stripe
const STRIPE_COLOR: [f32; CHANNELS] = [1.0, 0.3, 0.75];

/// How strongly the stripe is blended in
const STRIPE_ALPHA: f32 = 0.6;

/// Overlay a blurred horizontal band of fixed tint at a random height
///
/// Band height lies in `[h/24, h/8]` and its vertical position is
/// uniform over the image. The same seed always yields the same band.
pub struct Stripe {
    seed: u64
}

impl Stripe {
    #[must_use]
    pub fn new(seed: u64) -> Stripe {
        Stripe { seed }
    }

    /// Return `(top, band_height)` for an image `height` rows tall
    fn placement(&self, height: usize) -> (usize, usize) {
        let mut rng = WyRand::new_seed(self.seed);

        let lo = (height / 24).max(1);
        let hi = (height / 8).max(lo).min(height);
        let lo = lo.min(hi);

        let band = rng.generate_range(lo..=hi);
        let top = rng.generate_range(0..=height - band);

        (top, band)
    }
}

impl OperationsTrait for Stripe {
    fn name(&self) -> &'static str {
        "Stripe"
    }

    #[allow(clippy::cast_precision_loss)]
    fn execute_impl(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        let (width, height) = image.dimensions();
        let (top, band) = self.placement(height);

        debug!("Stripe rows {top}..{}", top + band);

        let mut mask = vec![0.0_f32; width * height];
        mask[top * width..(top + band) * width]
            .iter_mut()
            .for_each(|x| *x = 1.0);

        // single row or column passes are skipped by the blur, seeding the
        // scratch with the mask keeps the band instead of zeroing it
        let mut scratch = mask.clone();
        gaussian_blur_f32(&mut mask, &mut scratch, width, height, band as f32 / 3.0);

        for (plane, color) in image.planes_mut().iter_mut().zip(STRIPE_COLOR) {
            let weight = STRIPE_ALPHA * color;

            for (px, m) in plane.data_mut().iter_mut().zip(&mask) {
                *px = (*px + weight * m).min(1.0);
            }
        }
        Ok(())
    }
}
