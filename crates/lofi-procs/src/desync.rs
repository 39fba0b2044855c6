/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Horizontal block desync
//!
//! The image is cut into horizontal bands at random rows. Every other band
//! is rolled sideways by a few pixels and may have its color planes
//! rotated, imitating a video signal losing horizontal sync.
use lofi_core::errors::GlitchErrors;
use lofi_core::image::{Image, CHANNELS};
use lofi_core::traits::OperationsTrait;
use log::debug;
use nanorand::{Rng, WyRand};

use crate::resize::resize_plane;
use crate::shift::roll_rows;

/// Largest sideways roll applied to a band, exclusive
const MAX_BAND_ROLL: i64 = 20;

/// Split the image into bands and knock alternating ones out of sync
pub struct BlockDesync {
    seed: u64
}

/// A band of rows `start..end` and what happens to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Band {
    start:  usize,
    end:    usize,
    roll:   i64,
    rotate: bool
}

impl BlockDesync {
    #[must_use]
    pub fn new(seed: u64) -> BlockDesync {
        BlockDesync { seed }
    }

    /// Pick band boundaries and per band effects for `height` rows
    fn bands(&self, height: usize) -> Vec<Band> {
        let mut rng = WyRand::new_seed(self.seed);

        // odd, between 7 and 15, never more bands than rows
        let rows = height.max(1);
        let count = (7 + 2 * rng.generate_range(0_usize..5)).min(rows - (1 - rows % 2));

        let mut boundaries: Vec<usize> = Vec::with_capacity(count + 1);
        boundaries.push(0);

        if height > 1 {
            let mut cuts: Vec<usize> = Vec::with_capacity(count);
            while cuts.len() + 1 < count {
                let cut = rng.generate_range(1..height);
                if !cuts.contains(&cut) {
                    cuts.push(cut);
                }
            }
            cuts.sort_unstable();
            boundaries.extend(cuts);
        }
        boundaries.push(height);

        boundaries
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let affected = i % 2 == 1;
                Band {
                    start:  w[0],
                    end:    w[1],
                    roll:   if affected { rng.generate_range(0..MAX_BAND_ROLL) } else { 0 },
                    rotate: affected && rng.generate_range(0_u8..2) == 1
                }
            })
            .collect()
    }
}

impl OperationsTrait for BlockDesync {
    fn name(&self) -> &'static str {
        "Block desync"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        let (width, height) = image.dimensions();
        let bands = self.bands(height);

        debug!("Desync bands {bands:?}");

        let mut planes = image.planes_ref().to_vec();

        for band in &bands {
            let range = band.start * width..band.end * width;

            if band.rotate {
                // new[c] = old[c - 1]
                let old: Vec<Vec<f32>> = planes
                    .iter()
                    .map(|plane| plane.data()[range.clone()].to_vec())
                    .collect();

                for (c, plane) in planes.iter_mut().enumerate() {
                    let source = &old[(c + CHANNELS - 1) % CHANNELS];
                    plane.data_mut()[range.clone()].copy_from_slice(source);
                }
            }
            if band.roll != 0 {
                for plane in &mut planes {
                    roll_rows(&mut plane.data_mut()[range.clone()], width, band.roll);
                }
            }
        }
        // bands cover every row so the reassembled image already has the
        // original size, resizing keeps the contract explicit
        let planes = planes
            .iter()
            .map(|plane| resize_plane(plane, width, height))
            .collect::<Result<Vec<_>, GlitchErrors>>()?;

        *image = Image::from_planes(planes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lofi_core::image::Image;
    use lofi_core::traits::OperationsTrait;

    use crate::desync::BlockDesync;

    #[allow(clippy::cast_precision_loss)]
    fn striped(width: usize, height: usize) -> Image {
        Image::from_fn(width, height, |y, x, c| ((x * 3 + y + c * 17) % 50) as f32 / 50.0)
    }

    #[test]
    fn bands_partition_all_rows() {
        for seed in 0..32 {
            let bands = BlockDesync::new(seed).bands(120);

            assert_eq!(bands.len() % 2, 1);
            assert!((7..=15).contains(&bands.len()));
            assert_eq!(bands[0].start, 0);
            assert_eq!(bands.last().unwrap().end, 120);

            for pair in bands.windows(2) {
                assert_eq!(pair[0].end, pair[1].start);
                assert!(pair[0].start < pair[0].end);
            }
            // even bands are untouched
            for band in bands.iter().step_by(2) {
                assert_eq!(band.roll, 0);
                assert!(!band.rotate);
            }
        }
    }

    #[test]
    fn short_images_get_fewer_bands() {
        let bands = BlockDesync::new(5).bands(3);
        assert_eq!(bands.len(), 3);
        assert!(bands.iter().all(|b| b.end - b.start == 1));
    }

    #[test]
    fn even_heights_still_get_odd_band_counts() {
        for height in [1, 2, 4, 6, 8, 10, 14] {
            for seed in 0..16 {
                let bands = BlockDesync::new(seed).bands(height);

                assert_eq!(bands.len() % 2, 1, "height {height}, seed {seed}");
                assert_eq!(bands.last().unwrap().end, height);
                assert!(bands.iter().all(|b| b.start < b.end));
            }
        }
        // two rows only fit one band, which is left alone
        let bands = BlockDesync::new(0).bands(2);
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].roll, 0);
    }

    #[test]
    fn desync_keeps_shape_and_is_deterministic() {
        let mut a = striped(30, 64);
        let mut b = a.clone();

        BlockDesync::new(77).execute(&mut a).unwrap();
        BlockDesync::new(77).execute(&mut b).unwrap();

        assert_eq!(a.dimensions(), (30, 64));
        assert_eq!(a, b);
    }

    #[test]
    fn first_band_is_untouched() {
        let original = striped(30, 64);
        let mut image = original.clone();
        let desync = BlockDesync::new(11);
        let first = desync.bands(64)[0];

        desync.execute(&mut image).unwrap();

        for (a, b) in image.planes_ref().iter().zip(original.planes_ref()) {
            assert_eq!(
                a.data()[..first.end * 30],
                b.data()[..first.end * 30]
            );
        }
    }
}
