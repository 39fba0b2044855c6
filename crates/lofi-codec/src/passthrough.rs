/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use lofi_core::errors::GlitchErrors;
use log::trace;

use crate::codec::{AudioCodec, PcmFormat, SampleFormat};

/// Rate reported for decoded passthrough streams
const PASSTHROUGH_SAMPLE_RATE: u32 = 16000;

/// Lossless stand-in codec
///
/// The "compressed" stream is a single byte naming the sample format
/// followed by the raw PCM, decoding strips the tag again. A plane sent
/// through this codec comes back exactly as it was quantized.
#[derive(Debug, Default, Copy, Clone)]
pub struct PassthroughCodec;

impl PassthroughCodec {
    pub const fn new() -> PassthroughCodec {
        PassthroughCodec
    }
}

const fn format_tag(format: SampleFormat) -> u8 {
    match format {
        SampleFormat::U8 => 0,
        SampleFormat::S16LE => 1,
        SampleFormat::S16BE => 2
    }
}

fn tag_format(tag: u8) -> Option<SampleFormat> {
    match tag {
        0 => Some(SampleFormat::U8),
        1 => Some(SampleFormat::S16LE),
        2 => Some(SampleFormat::S16BE),
        _ => None
    }
}

impl AudioCodec for PassthroughCodec {
    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn encode(&self, raw: &Path, compressed: &Path, format: PcmFormat) -> Result<(), GlitchErrors> {
        let samples = std::fs::read(raw)?;

        let mut stream = Vec::with_capacity(samples.len() + 1);
        stream.push(format_tag(format.sample_format));
        stream.extend_from_slice(&samples);

        trace!("Passthrough encoded {} sample bytes", samples.len());
        std::fs::write(compressed, stream)?;
        Ok(())
    }

    fn decode(&self, compressed: &Path, decoded: &Path) -> Result<PcmFormat, GlitchErrors> {
        let stream = std::fs::read(compressed)?;

        let (tag, samples) = stream.split_first().ok_or_else(|| {
            GlitchErrors::ExternalCodecFailure {
                command: format!("passthrough decode {compressed:?}"),
                reason:  "empty stream".to_string()
            }
        })?;
        let sample_format = tag_format(*tag).ok_or_else(|| GlitchErrors::ExternalCodecFailure {
            command: format!("passthrough decode {compressed:?}"),
            reason:  format!("unknown sample format tag {tag}")
        })?;

        std::fs::write(decoded, samples)?;

        Ok(PcmFormat::new(sample_format, PASSTHROUGH_SAMPLE_RATE))
    }
}

#[cfg(test)]
mod tests {
    use crate::codec::{AudioCodec, PcmFormat, SampleFormat};
    use crate::passthrough::PassthroughCodec;
    use crate::scratch::ScratchSpace;

    #[test]
    fn stream_round_trips_with_format() {
        let scratch = ScratchSpace::new(std::env::temp_dir().join("lofi-passthrough-unit")).unwrap();
        let (raw, compressed, decoded) = (
            scratch.file("raw.blob"),
            scratch.file("compressed.bin"),
            scratch.file("decoded.blob")
        );
        std::fs::write(&raw, [5, 6, 7, 8]).unwrap();

        let codec = PassthroughCodec::new();
        codec
            .encode(&raw, &compressed, PcmFormat::new(SampleFormat::S16LE, 8000))
            .unwrap();
        let format = codec.decode(&compressed, &decoded).unwrap();

        assert_eq!(format.sample_format, SampleFormat::S16LE);
        assert_eq!(std::fs::read(&decoded).unwrap(), [5, 6, 7, 8]);
    }

    #[test]
    fn garbage_tag_is_rejected() {
        let scratch = ScratchSpace::new(std::env::temp_dir().join("lofi-passthrough-unit")).unwrap();
        std::fs::write(scratch.file("bad"), [9, 1, 2]).unwrap();

        let result = PassthroughCodec::new().decode(&scratch.file("bad"), &scratch.file("out"));
        assert!(result.is_err());
    }
}
