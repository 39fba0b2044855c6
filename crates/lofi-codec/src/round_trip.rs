/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sending color planes through an audio codec
use std::path::PathBuf;
use std::sync::Arc;

use lofi_core::errors::GlitchErrors;
use lofi_core::image::{Image, Plane};
use lofi_core::traits::OperationsTrait;
use log::{debug, trace};

use crate::codec::{AudioCodec, PcmFormat, SampleFormat};
use crate::corrupt::corrupt_stream;
use crate::quantize::{plane_to_samples, reconstruct};
use crate::scratch::{ScratchSpace, DEFAULT_SCRATCH_ROOT};

/// Encode each plane as mono audio and decode it again
///
/// Every plane is quantized to unsigned bytes, written out as 8-bit PCM,
/// compressed, optionally corrupted, decompressed and folded back into a
/// plane of the original size. Each plane works in its own scratch
/// directory which is removed once the plane is done.
pub struct CodecRoundTrip {
    codec:        Arc<dyn AudioCodec>,
    sample_rate:  u32,
    corrupt:      bool,
    scratch_root: PathBuf
}

impl CodecRoundTrip {
    /// Create a round-trip through `codec`, declaring planes to be
    /// sampled at `sample_rate` Hz
    pub fn new(codec: Arc<dyn AudioCodec>, sample_rate: u32) -> CodecRoundTrip {
        CodecRoundTrip {
            codec,
            sample_rate,
            corrupt: false,
            scratch_root: PathBuf::from(DEFAULT_SCRATCH_ROOT)
        }
    }

    /// Corrupt the compressed stream before decoding
    #[must_use]
    pub fn set_corrupt(mut self, corrupt: bool) -> CodecRoundTrip {
        self.corrupt = corrupt;
        self
    }

    /// Directory under which per plane scratch directories are created
    #[must_use]
    pub fn set_scratch_root<P: Into<PathBuf>>(mut self, root: P) -> CodecRoundTrip {
        self.scratch_root = root.into();
        self
    }

    /// Round-trip a single plane, `channel` is its index in the image
    ///
    /// # Errors
    /// - Scratch directory creation or file I/O fails
    /// - The codec fails or times out
    /// - The decoded stream is shorter than the plane
    pub fn round_trip_plane(&self, plane: &Plane, channel: usize) -> Result<Plane, GlitchErrors> {
        let (width, height) = plane.dimensions();
        let scratch = ScratchSpace::new(&self.scratch_root)?;

        let raw = scratch.file("raw.blob");
        let compressed = scratch.file("compressed.mp3");
        let decoded = scratch.file("decoded.blob");

        std::fs::write(&raw, plane_to_samples(plane))?;

        self.codec.encode(
            &raw,
            &compressed,
            PcmFormat::new(SampleFormat::U8, self.sample_rate)
        )?;

        if self.corrupt {
            corrupt_stream(
                self.codec.as_ref(),
                &compressed,
                &scratch.file("corrupt.blob"),
                height,
                channel
            )?;
        }
        self.codec.decode(&compressed, &decoded)?;

        let bytes = std::fs::read(&decoded)?;
        trace!(
            "Channel {channel}: {} samples decoded into {} bytes",
            width * height,
            bytes.len()
        );
        reconstruct(&bytes, width, height)
    }
}

impl OperationsTrait for CodecRoundTrip {
    fn name(&self) -> &'static str {
        "Codec round-trip"
    }

    fn execute_impl(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        debug!(
            "Round-tripping through {} at {} Hz, corruption: {}",
            self.codec.name(),
            self.sample_rate,
            self.corrupt
        );
        image.clamp();

        #[cfg(not(feature = "threads"))]
        let planes = {
            trace!("Running codec round-trip in single threaded mode");

            image
                .planes_ref()
                .iter()
                .enumerate()
                .map(|(channel, plane)| self.round_trip_plane(plane, channel))
                .collect::<Result<Vec<Plane>, GlitchErrors>>()?
        };

        #[cfg(feature = "threads")]
        let planes = {
            trace!("Running codec round-trip in multithreaded mode");

            std::thread::scope(|s| {
                // one codec pipeline per plane
                let handles: Vec<_> = image
                    .planes_ref()
                    .iter()
                    .enumerate()
                    .map(|(channel, plane)| s.spawn(move || self.round_trip_plane(plane, channel)))
                    .collect();

                handles
                    .into_iter()
                    .map(|handle| {
                        handle
                            .join()
                            .map_err(|_| GlitchErrors::GenericStr("Codec round-trip thread panicked"))?
                    })
                    .collect::<Result<Vec<Plane>, GlitchErrors>>()
            })?
        };

        *image = Image::from_planes(planes)?;
        image.clamp();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lofi_core::image::Image;
    use lofi_core::traits::OperationsTrait;

    use crate::passthrough::PassthroughCodec;
    use crate::quantize::plane_to_samples;
    use crate::round_trip::CodecRoundTrip;

    fn scratch_root() -> std::path::PathBuf {
        std::env::temp_dir().join("lofi-round-trip-unit")
    }

    #[test]
    fn passthrough_preserves_quantized_planes() {
        #[allow(clippy::cast_precision_loss)]
        let original = Image::from_fn(13, 7, |y, x, c| ((x * 7 + y * 3 + c) % 256) as f32 / 255.0);
        let mut image = original.clone();

        CodecRoundTrip::new(Arc::new(PassthroughCodec::new()), 16000)
            .set_scratch_root(scratch_root())
            .execute(&mut image)
            .unwrap();

        assert_eq!(image.dimensions(), (13, 7));
        for (a, b) in image.planes_ref().iter().zip(original.planes_ref()) {
            assert_eq!(plane_to_samples(a), plane_to_samples(b));
        }
    }

    #[test]
    fn corruption_is_deterministic() {
        #[allow(clippy::cast_precision_loss)]
        let original = Image::from_fn(16, 12, |y, x, c| ((x * 11 + y * 5 + c * 3) % 256) as f32 / 255.0);
        let op = CodecRoundTrip::new(Arc::new(PassthroughCodec::new()), 16000)
            .set_scratch_root(scratch_root())
            .set_corrupt(true);

        let mut a = original.clone();
        let mut b = original.clone();
        op.execute(&mut a).unwrap();
        op.execute(&mut b).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, original);
    }
}
