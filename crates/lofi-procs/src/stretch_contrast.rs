/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Percentile based contrast stretching
use lofi_core::errors::GlitchErrors;
use lofi_core::image::Image;
use lofi_core::traits::OperationsTrait;
use log::debug;

/// Linearly stretch the contrast of an image
///
/// The `lower` percentile of all samples (every plane pooled together)
/// becomes 0, the `upper` percentile becomes 1, values outside the range
/// are clamped.
pub struct PercentileStretch {
    lower: f32,
    upper: f32
}

impl PercentileStretch {
    /// Create a new stretch operation
    ///
    /// # Arguments
    /// - lower: percentile in `[0, 100]` mapped to black
    /// - upper: percentile in `[0, 100]` mapped to white
    #[must_use]
    pub fn new(lower: f32, upper: f32) -> PercentileStretch {
        PercentileStretch { lower, upper }
    }
}

impl OperationsTrait for PercentileStretch {
    fn name(&self) -> &'static str {
        "Percentile contrast stretch"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        if !(0.0..=100.0).contains(&self.lower)
            || !(0.0..=100.0).contains(&self.upper)
            || self.lower > self.upper
        {
            return Err(GlitchErrors::InvalidParameter(format!(
                "percentiles must satisfy 0 <= low <= high <= 100, found {} and {}",
                self.lower, self.upper
            )));
        }
        image.clamp();

        let mut samples: Vec<f32> = image
            .planes_ref()
            .iter()
            .flat_map(|plane| plane.data().iter().copied())
            .collect();
        samples.sort_unstable_by(f32::total_cmp);

        let low = percentile(&samples, self.lower);
        let high = percentile(&samples, self.upper);

        debug!(
            "Stretching [{low}, {high}] (percentiles {} and {})",
            self.lower, self.upper
        );

        if high - low <= f32::EPSILON {
            // flat range, nothing to stretch
            return Ok(());
        }
        for plane in image.planes_mut() {
            stretch_contrast(plane.data_mut(), low, high);
        }
        Ok(())
    }
}

/// Value at percentile `p` of already sorted `sorted`, linearly
/// interpolating between the closest ranks
///
/// Matches `numpy.percentile` with its default interpolation.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
pub fn percentile(sorted: &[f32], p: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f32;
    let lo = (rank.floor() as usize).min(sorted.len() - 1);
    let hi = (rank.ceil() as usize).min(sorted.len() - 1);
    let fraction = rank - lo as f32;

    sorted[lo] + (sorted[hi] - sorted[lo]) * fraction
}

/// Map `[lower, upper]` onto `[0, 1]` in place, clamping values outside
///
/// `zune_imageprocs::stretch_contrast::stretch_contrast_f32` maps the
/// interior as `(1 - px) / (upper - lower)`, which inverts the ramp, so
/// the linear map is kept here.
pub fn stretch_contrast(image: &mut [f32], lower: f32, upper: f32) {
    let scale = 1.0 / (upper - lower);

    for pixel in image.iter_mut() {
        *pixel = ((*pixel - lower) * scale).clamp(0.0, 1.0);
    }
}
