/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Reading and writing raster files
//!
//! Decoding and encoding is delegated to `zune-image`, which picks the
//! format from file contents on read and from the extension on write.
//! Whatever the source layout, images come out of here as 8-bit RGB
//! scaled into float planes.
use std::path::Path;

use log::{debug, info};
use zune_core::bit_depth::BitDepth;
use zune_core::colorspace::ColorSpace;
use zune_image::core_filters::colorspace::ColorspaceConv;
use zune_image::core_filters::depth::Depth;
use zune_image::image::Image as ZuneImage;
use zune_image::traits::OperationsTrait as ZuneOperationsTrait;

use crate::errors::GlitchErrors;
use crate::image::Image;

impl Image {
    /// Decode an image file into float RGB planes
    ///
    /// Grayscale inputs are expanded to RGB, alpha is dropped and
    /// deeper bit depths are reduced to 8 bits.
    ///
    /// # Errors
    /// - The file cannot be read or has no supported decoder
    /// - The decoded image carries no frames
    pub fn open<P: AsRef<Path>>(file: P) -> Result<Image, GlitchErrors> {
        let file = file.as_ref();

        info!("Decoding {:?}", file);

        let mut image = ZuneImage::open(file)?;

        debug!(
            "Decoded image colorspace: {:?}, depth: {:?}",
            image.colorspace(),
            image.depth()
        );

        ColorspaceConv::new(ColorSpace::RGB).execute(&mut image)?;
        Depth::new(BitDepth::Eight).execute(&mut image)?;

        let (width, height) = image.dimensions();

        let frames = image.flatten_to_u8();
        let pixels = frames
            .first()
            .ok_or(GlitchErrors::GenericStr("Decoded image has no frames"))?;

        Image::from_interleaved_u8(pixels, width, height)
    }

    /// Encode the image to `file`, the format is picked from its extension
    ///
    /// Samples are clamped to `[0, 1]` and quantized to 8 bits.
    ///
    /// # Errors
    /// - No encoder exists for the extension
    /// - The file cannot be written
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<(), GlitchErrors> {
        let file = file.as_ref();
        let (width, height) = self.dimensions();

        info!("Encoding {width}x{height} image to {:?}", file);

        let pixels = self.to_interleaved_u8();
        let image = ZuneImage::from_u8(&pixels, width, height, ColorSpace::RGB);

        image.save(file)?;

        Ok(())
    }
}
