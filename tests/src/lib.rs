/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use lofi_core::image::Image;

#[cfg(test)]
mod end_to_end;
#[cfg(test)]
mod files;
#[cfg(test)]
mod lame;

/// A smooth diagonal gradient with a different slope per channel
#[allow(clippy::cast_precision_loss)]
pub fn gradient(width: usize, height: usize) -> Image {
    Image::from_fn(width, height, |y, x, c| {
        let t = (x * (c + 1) + y * (3 - c)) as f32;
        let max = ((width - 1) * (c + 1) + (height - 1) * (3 - c)).max(1) as f32;
        t / max
    })
}

/// Per test scratch directory under the system temp dir
pub fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("lofi-tests-{name}-{}", std::process::id()))
}

/// Hash of the 8-bit rendition of an image
#[cfg(test)]
fn hash(image: &Image) -> u128 {
    xxhash_rust::xxh3::xxh3_128(&image.to_interleaved_u8())
}
