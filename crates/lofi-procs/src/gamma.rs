/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use lofi_core::errors::GlitchErrors;
use lofi_core::image::Image;
use lofi_core::traits::OperationsTrait;

/// Power law tone mapping, `out = in ^ gamma`
///
/// Values below one darken mid-tones less than highlights, values
/// above one the reverse, and `1.0` leaves the image untouched.
pub struct Gamma {
    value: f32
}

impl Gamma {
    #[must_use]
    pub fn new(value: f32) -> Gamma {
        Gamma { value }
    }
}

impl OperationsTrait for Gamma {
    fn name(&self) -> &'static str {
        "Gamma Correction"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        if !self.value.is_finite() || self.value < 0.0 {
            return Err(GlitchErrors::InvalidParameter(format!(
                "gamma must be a finite value >= 0, found {}",
                self.value
            )));
        }
        // negative bases would produce NaN
        image.clamp();

        for plane in image.planes_mut() {
            gamma(plane.data_mut(), self.value);
        }
        Ok(())
    }
}

pub fn gamma(pixels: &mut [f32], value: f32) {
    if (value - 1.0).abs() < f32::EPSILON {
        return;
    }
    for px in pixels {
        *px = px.powf(value);
    }
}
