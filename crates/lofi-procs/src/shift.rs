/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Horizontal wrap-around shifting
use lofi_core::errors::GlitchErrors;
use lofi_core::image::Image;
use lofi_core::traits::OperationsTrait;

/// Circularly rotate every row of the image
///
/// A positive shift moves pixels to the right, pixels pushed past the
/// right edge re-enter on the left. Shifts larger than the width wrap.
pub struct HorizontalShift {
    shift: i64
}

impl HorizontalShift {
    #[must_use]
    pub fn new(shift: i64) -> HorizontalShift {
        HorizontalShift { shift }
    }
}

impl OperationsTrait for HorizontalShift {
    fn name(&self) -> &'static str {
        "Horizontal shift"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        let (width, _) = image.dimensions();

        for plane in image.planes_mut() {
            roll_rows(plane.data_mut(), width, self.shift);
        }
        Ok(())
    }
}

/// Rotate each `width` long row of `data` right by `shift`
///
/// Equivalent to `numpy.roll(data, shift, axis=1)` on a 2-D array.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn roll_rows<T>(data: &mut [T], width: usize, shift: i64) {
    if width == 0 {
        return;
    }
    // rem_euclid is never negative and always below width
    let amount = shift.rem_euclid(width as i64) as usize;

    if amount == 0 {
        return;
    }
    for row in data.chunks_exact_mut(width) {
        row.rotate_right(amount);
    }
}
