/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Compressed stream corruption
//!
//! The compressed stream is decoded, every odd block of samples is made
//! to stutter, and the result is encoded back over the original stream.
//! Later decoding then sees artifacts from a second lossy generation in
//! those blocks.
use std::path::Path;

use lofi_core::errors::GlitchErrors;
use log::debug;

use crate::codec::AudioCodec;

/// Base of the per channel stutter modulus, channel `c` uses `BASE + c`
const STUTTER_MODULUS_BASE: usize = 10;

/// Make odd blocks of `samples` stutter
///
/// Samples are split into consecutive blocks of `block` samples. In
/// every odd block `b`, sample `i` is replaced by sample
/// `i - ((block * b) mod (10 + channel))`. Replacement runs forward in place so each
/// affected block becomes a periodic repetition of its first samples.
/// Even blocks are left alone.
pub fn stutter<T: Copy>(samples: &mut [T], block: usize, channel: usize) {
    let len = samples.len();

    if block == 0 || len == 0 {
        return;
    }
    let modulus = STUTTER_MODULUS_BASE + channel;

    for b in (1..len.div_ceil(block)).step_by(2) {
        let back = (block * b) % modulus;

        if back == 0 {
            continue;
        }
        let start = b * block;
        let end = (start + block).min(len);

        // back <= block * b == start, so the source index never wraps
        for i in start..end {
            samples[i] = samples[i - back];
        }
    }
}

/// Corrupt the compressed stream at `compressed` in place
///
/// `raw` is used as scratch for the decoded samples, `block` is the
/// stutter block length and `channel` selects the modulus.
///
/// # Errors
/// Any codec or file system failure
pub fn corrupt_stream(
    codec: &dyn AudioCodec, compressed: &Path, raw: &Path, block: usize, channel: usize
) -> Result<(), GlitchErrors> {
    let format = codec.decode(compressed, raw)?;

    let bytes = std::fs::read(raw)?;
    let mut samples = format.sample_format.read_samples(&bytes);

    debug!(
        "Corrupting {} {:?} samples of channel {channel} in blocks of {block}",
        samples.len(),
        format.sample_format
    );
    stutter(&mut samples, block, channel);

    std::fs::write(raw, format.sample_format.write_samples(&samples))?;
    codec.encode(raw, compressed, format)
}
