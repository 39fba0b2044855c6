/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Planar floating point images
//!
//! An [`Image`] is stored as three separate [`Plane`]s (red, green, blue),
//! each a row-major `height × width` grid of `f32` values expected to
//! lie in `[0, 1]`.
//!
//! Keeping channels separate means per-channel operations (resizing each
//! plane to a different size, round-tripping a plane through an audio codec)
//! don't need to de-interleave on every call.
use crate::errors::GlitchErrors;

/// Number of color planes an [`Image`] carries
pub const CHANNELS: usize = 3;

/// A single color channel
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    width:  usize,
    height: usize,
    data:   Vec<f32>
}

impl Plane {
    /// Create a plane from row-major data
    ///
    /// # Errors
    /// - `data.len()` is not `width*height`
    pub fn new(data: Vec<f32>, width: usize, height: usize) -> Result<Plane, GlitchErrors> {
        let expected = width
            .checked_mul(height)
            .ok_or(GlitchErrors::GenericStr("Plane dimensions overflow usize"))?;

        if data.len() != expected {
            return Err(GlitchErrors::DimensionsMisMatch(expected, data.len()));
        }
        Ok(Plane {
            width,
            height,
            data
        })
    }

    /// Create a plane where every value is `value`
    pub fn fill(value: f32, width: usize, height: usize) -> Plane {
        Plane {
            width,
            height,
            data: vec![value; width * height]
        }
    }

    /// Create a plane by calling `func(y, x)` for every position
    pub fn from_fn<F>(width: usize, height: usize, func: F) -> Plane
    where
        F: Fn(usize, usize) -> f32
    {
        let mut data = Vec::with_capacity(width * height);

        for y in 0..height {
            for x in 0..width {
                data.push(func(y, x));
            }
        }
        Plane {
            width,
            height,
            data
        }
    }

    /// Return `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Value at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Clamp every value into `[0, 1]`
    ///
    /// NaN values become zero.
    pub fn clamp(&mut self) {
        for value in &mut self.data {
            *value = if value.is_nan() {
                0.0
            } else {
                value.clamp(0.0, 1.0)
            };
        }
    }
}

/// A three channel RGB image with float samples
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width:  usize,
    height: usize,
    planes: Vec<Plane>
}

impl Image {
    /// Assemble an image from its color planes
    ///
    /// # Errors
    /// - There are not exactly [`CHANNELS`] planes
    /// - The planes do not share the same dimensions
    /// - Either dimension is zero
    pub fn from_planes(planes: Vec<Plane>) -> Result<Image, GlitchErrors> {
        if planes.len() != CHANNELS {
            return Err(GlitchErrors::WrongPlaneCount(planes.len()));
        }
        let (width, height) = planes[0].dimensions();

        let image = Image {
            width,
            height,
            planes
        };
        image.validate()?;

        Ok(image)
    }

    /// Create an image where every sample in every plane is `value`
    pub fn fill(value: f32, width: usize, height: usize) -> Image {
        Image {
            width,
            height,
            planes: vec![Plane::fill(value, width, height); CHANNELS]
        }
    }

    /// Create an image by calling `func(y, x, channel)` for every sample
    pub fn from_fn<F>(width: usize, height: usize, func: F) -> Image
    where
        F: Fn(usize, usize, usize) -> f32
    {
        let planes = (0..CHANNELS)
            .map(|c| Plane::from_fn(width, height, |y, x| func(y, x, c)))
            .collect();

        Image {
            width,
            height,
            planes
        }
    }

    /// Build an image from interleaved `RGBRGB..` 8-bit pixels,
    /// samples are scaled into `[0, 1]`
    ///
    /// # Errors
    /// - `pixels.len()` is not `width*height*3`
    pub fn from_interleaved_u8(
        pixels: &[u8], width: usize, height: usize
    ) -> Result<Image, GlitchErrors> {
        let expected = width * height * CHANNELS;

        if pixels.len() != expected {
            return Err(GlitchErrors::DimensionsMisMatch(expected, pixels.len()));
        }
        let mut planes = vec![Vec::with_capacity(width * height); CHANNELS];

        for pixel in pixels.chunks_exact(CHANNELS) {
            for (plane, sample) in planes.iter_mut().zip(pixel) {
                plane.push(f32::from(*sample) / 255.0);
            }
        }
        let planes = planes
            .into_iter()
            .map(|data| Plane::new(data, width, height))
            .collect::<Result<Vec<Plane>, GlitchErrors>>()?;

        Image::from_planes(planes)
    }

    /// Interleave the planes into `RGBRGB..` 8-bit pixels,
    /// clamping and rounding each sample
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_interleaved_u8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width * self.height * CHANNELS);

        for pos in 0..self.width * self.height {
            for plane in &self.planes {
                let value = plane.data[pos];
                let value = if value.is_nan() { 0.0 } else { value };

                out.push((value * 255.0).round().clamp(0.0, 255.0) as u8);
            }
        }
        out
    }

    /// Return `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn planes_ref(&self) -> &[Plane] {
        &self.planes
    }

    /// Mutable access to the planes
    ///
    /// Operations may replace planes wholesale, [`validate`](Self::validate)
    /// confirms they kept the image consistent.
    pub fn planes_mut(&mut self) -> &mut [Plane] {
        &mut self.planes
    }

    /// Clamp every plane into `[0, 1]`
    pub fn clamp(&mut self) {
        self.planes.iter_mut().for_each(Plane::clamp);
    }

    /// Confirm the image carries three non-empty planes of the
    /// recorded dimensions
    ///
    /// # Errors
    /// Reports the first inconsistency found
    pub fn validate(&self) -> Result<(), GlitchErrors> {
        if self.planes.len() != CHANNELS {
            return Err(GlitchErrors::WrongPlaneCount(self.planes.len()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(GlitchErrors::GeometryError(format!(
                "Image dimensions must be positive, found {}x{}",
                self.width, self.height
            )));
        }
        for plane in &self.planes {
            if plane.dimensions() != (self.width, self.height) {
                return Err(GlitchErrors::DimensionsMisMatch(
                    self.width * self.height,
                    plane.width * plane.height
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::GlitchErrors;
    use crate::image::{Image, Plane};

    #[test]
    fn plane_rejects_wrong_length() {
        let result = Plane::new(vec![0.0; 5], 2, 3);
        assert!(matches!(result, Err(GlitchErrors::DimensionsMisMatch(6, 5))));
    }

    #[test]
    fn image_rejects_mismatched_planes() {
        let planes = vec![
            Plane::fill(0.0, 4, 4),
            Plane::fill(0.0, 4, 4),
            Plane::fill(0.0, 3, 4),
        ];
        assert!(Image::from_planes(planes).is_err());
    }

    #[test]
    fn image_rejects_two_planes() {
        let planes = vec![Plane::fill(0.0, 4, 4), Plane::fill(0.0, 4, 4)];
        assert!(matches!(
            Image::from_planes(planes),
            Err(GlitchErrors::WrongPlaneCount(2))
        ));
    }

    #[test]
    fn interleave_matches_deinterleave() {
        let pixels: Vec<u8> = (0..4 * 3 * 3).map(|x| (x * 7) as u8).collect();
        let image = Image::from_interleaved_u8(&pixels, 4, 3).unwrap();

        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(image.planes_ref()[1].get(0, 0), 7.0 / 255.0);
        assert_eq!(image.to_interleaved_u8(), pixels);
    }

    #[test]
    fn clamp_handles_nan() {
        let mut plane = Plane::new(vec![-1.0, 0.5, 2.0, f32::NAN], 2, 2).unwrap();
        plane.clamp();
        assert_eq!(plane.data(), &[0.0, 0.5, 1.0, 0.0]);
    }
}
