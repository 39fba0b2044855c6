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
use log::debug;
use nanorand::{Rng, WyRand};

use crate::shift::roll_rows;

/// Average the image with a horizontally rolled copy of itself
///
/// The roll is between 30 and 130 pixels in a random direction,
/// producing a ghosted double image.
pub struct Amplify {
    seed: u64
}

impl Amplify {
    #[must_use]
    pub fn new(seed: u64) -> Amplify {
        Amplify { seed }
    }

    fn offset(&self) -> i64 {
        let mut rng = WyRand::new_seed(self.seed);
        let magnitude = rng.generate_range(30_i64..=130);

        if rng.generate_range(0_u8..2) == 0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl OperationsTrait for Amplify {
    fn name(&self) -> &'static str {
        "Amplify"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        let (width, _) = image.dimensions();
        let offset = self.offset();

        debug!("Overlapping image with itself shifted by {offset}");

        for plane in image.planes_mut() {
            let mut rolled = plane.data().to_vec();
            roll_rows(&mut rolled, width, offset);

            for (px, other) in plane.data_mut().iter_mut().zip(rolled) {
                *px = 0.5 * *px + 0.5 * other;
            }
        }
        Ok(())
    }
}
