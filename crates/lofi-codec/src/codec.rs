/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The audio codec seam
//!
//! A codec turns a file of raw PCM samples into a compressed stream and
//! back. The round-trip stage only speaks to this trait, so the lossy
//! external encoder can be swapped for a lossless stand-in.
use std::path::Path;

use lofi_core::errors::GlitchErrors;

/// Layout of a single raw PCM sample
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SampleFormat {
    /// Unsigned 8 bit, silence at 128
    U8,
    /// Signed 16 bit little endian
    S16LE,
    /// Signed 16 bit big endian
    S16BE
}

impl SampleFormat {
    /// Number of bytes a single sample occupies
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::U8 => 1,
            SampleFormat::S16LE | SampleFormat::S16BE => 2
        }
    }

    /// Parse raw bytes into samples, trailing partial samples are dropped
    pub fn read_samples(self, bytes: &[u8]) -> Vec<i32> {
        match self {
            SampleFormat::U8 => bytes.iter().map(|x| i32::from(*x)).collect(),
            SampleFormat::S16LE => bytes
                .chunks_exact(2)
                .map(|x| i32::from(i16::from_le_bytes([x[0], x[1]])))
                .collect(),
            SampleFormat::S16BE => bytes
                .chunks_exact(2)
                .map(|x| i32::from(i16::from_be_bytes([x[0], x[1]])))
                .collect()
        }
    }

    /// Serialize samples, values outside the format's range saturate
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn write_samples(self, samples: &[i32]) -> Vec<u8> {
        let mut out = Vec::with_capacity(samples.len() * self.bytes_per_sample());

        for sample in samples {
            match self {
                SampleFormat::U8 => out.push((*sample).clamp(0, 255) as u8),
                SampleFormat::S16LE => {
                    let value = (*sample).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
                    out.extend_from_slice(&value.to_le_bytes());
                }
                SampleFormat::S16BE => {
                    let value = (*sample).clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
                    out.extend_from_slice(&value.to_be_bytes());
                }
            }
        }
        out
    }
}

/// Describes a raw PCM file handed to or produced by a codec
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PcmFormat {
    pub sample_format: SampleFormat,
    /// Sample rate in Hz
    pub sample_rate:   u32
}

impl PcmFormat {
    pub const fn new(sample_format: SampleFormat, sample_rate: u32) -> PcmFormat {
        PcmFormat {
            sample_format,
            sample_rate
        }
    }
}

/// A mono audio codec working on files
pub trait AudioCodec: Send + Sync {
    /// Name of the codec, used in logs
    fn name(&self) -> &'static str;

    /// Compress the raw mono PCM in `raw`, laid out as `format`,
    /// into `compressed`
    ///
    /// # Errors
    /// [`GlitchErrors::ExternalCodecFailure`] if encoding fails
    fn encode(&self, raw: &Path, compressed: &Path, format: PcmFormat) -> Result<(), GlitchErrors>;

    /// Decompress `compressed` into raw mono PCM at `decoded`,
    /// returning the layout of the decoded samples
    ///
    /// # Errors
    /// [`GlitchErrors::ExternalCodecFailure`] if decoding fails
    fn decode(&self, compressed: &Path, decoded: &Path) -> Result<PcmFormat, GlitchErrors>;
}

#[cfg(test)]
mod tests {
    use crate::codec::SampleFormat;

    #[test]
    fn sixteen_bit_layouts_differ_in_byte_order() {
        let samples = [1, -2, 300];

        let le = SampleFormat::S16LE.write_samples(&samples);
        let be = SampleFormat::S16BE.write_samples(&samples);

        assert_eq!(&le[..2], &[1, 0]);
        assert_eq!(&be[..2], &[0, 1]);
        assert_eq!(SampleFormat::S16LE.read_samples(&le), samples);
        assert_eq!(SampleFormat::S16BE.read_samples(&be), samples);
    }

    #[test]
    fn writing_saturates() {
        assert_eq!(SampleFormat::U8.write_samples(&[-4, 300, 7]), [0, 255, 7]);
        assert_eq!(
            SampleFormat::S16BE.read_samples(&SampleFormat::S16BE.write_samples(&[70000])),
            [i32::from(i16::MAX)]
        );
    }

    #[test]
    fn partial_samples_are_dropped() {
        assert_eq!(SampleFormat::S16LE.read_samples(&[1, 0, 9]), [1]);
    }
}
