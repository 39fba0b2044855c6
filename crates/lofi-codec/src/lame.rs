/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! MP3 round-trips through the `lame` command line encoder
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lofi_core::errors::GlitchErrors;

use crate::codec::{AudioCodec, PcmFormat, SampleFormat};
use crate::process::Invocation;

/// Program looked up on `PATH` when no explicit binary is given
pub const DEFAULT_LAME_BINARY: &str = "lame";

/// Rate every stream is resampled to before encoding, in kHz
const RESAMPLE_KHZ: &str = "16";

/// Rate decoded streams come back at
const DECODED_SAMPLE_RATE: u32 = 16000;

/// Byte order of decoded streams, `-x` swaps away from the host order
const DECODED_SAMPLE_FORMAT: SampleFormat = if cfg!(target_endian = "little") {
    SampleFormat::S16BE
} else {
    SampleFormat::S16LE
};

/// Lossy MP3 codec backed by the external `lame` binary
///
/// Streams are encoded mono at a constant bitrate, decoding produces
/// signed 16 bit PCM byte swapped from the host order.
#[derive(Debug, Clone)]
pub struct LameCodec {
    binary:  PathBuf,
    bitrate: u32,
    quality: u8,
    timeout: Duration
}

impl LameCodec {
    /// Create a codec using `lame` from `PATH`
    ///
    /// # Arguments
    /// - bitrate: constant bitrate in kbps
    /// - quality: algorithm quality, 0 best, 9 fastest
    /// - timeout: bound on each encoder or decoder run
    pub fn new(bitrate: u32, quality: u8, timeout: Duration) -> LameCodec {
        LameCodec {
            binary: PathBuf::from(DEFAULT_LAME_BINARY),
            bitrate,
            quality,
            timeout
        }
    }

    /// Use a specific `lame` executable
    #[must_use]
    pub fn set_binary<P: Into<PathBuf>>(mut self, binary: P) -> LameCodec {
        self.binary = binary.into();
        self
    }

    /// Arguments for encoding `raw` into `compressed`
    pub fn encode_args(&self, raw: &Path, compressed: &Path, format: PcmFormat) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-r".into()];

        match format.sample_format {
            SampleFormat::U8 => {
                args.extend(["--unsigned".into(), "--bitwidth".into(), "8".into()]);
            }
            SampleFormat::S16LE => {
                args.extend([
                    "--signed".into(),
                    "--little-endian".into(),
                    "--bitwidth".into(),
                    "16".into()
                ]);
            }
            SampleFormat::S16BE => {
                args.extend([
                    "--signed".into(),
                    "--big-endian".into(),
                    "--bitwidth".into(),
                    "16".into()
                ]);
            }
        }
        args.extend([
            "-s".into(),
            khz(format.sample_rate).into(),
            "-q".into(),
            self.quality.to_string().into(),
            "--resample".into(),
            RESAMPLE_KHZ.into(),
            "-b".into(),
            self.bitrate.to_string().into(),
            "-m".into(),
            "m".into(),
            "--quiet".into(),
            raw.into(),
            compressed.into()
        ]);
        args
    }

    /// Arguments for decoding `compressed` into raw PCM at `decoded`
    pub fn decode_args(compressed: &Path, decoded: &Path) -> Vec<OsString> {
        vec![
            "--decode".into(),
            "-x".into(),
            "-t".into(),
            "--quiet".into(),
            compressed.into(),
            decoded.into(),
        ]
    }
}

/// Format a rate in Hz as the kHz value lame expects, `16000` -> `16`
fn khz(rate: u32) -> String {
    format!("{}", f64::from(rate) / 1000.0)
}

impl AudioCodec for LameCodec {
    fn name(&self) -> &'static str {
        "lame"
    }

    fn encode(&self, raw: &Path, compressed: &Path, format: PcmFormat) -> Result<(), GlitchErrors> {
        Invocation::new(&self.binary)
            .args(self.encode_args(raw, compressed, format))
            .run(self.timeout)
    }

    fn decode(&self, compressed: &Path, decoded: &Path) -> Result<PcmFormat, GlitchErrors> {
        Invocation::new(&self.binary)
            .args(LameCodec::decode_args(compressed, decoded))
            .run(self.timeout)?;

        Ok(PcmFormat::new(DECODED_SAMPLE_FORMAT, DECODED_SAMPLE_RATE))
    }
}
