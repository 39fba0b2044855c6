/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during a glitch run
//!
//! Every error is terminal, the pipeline has no partial-result recovery,
//! a caller seeing any of these should not write an output file.
use std::fmt::{Debug, Display, Formatter};

use zune_image::errors::ImageErrors;

/// All errors possible while running the glitch pipeline
pub enum GlitchErrors {
    /// A configuration value is outside its documented range
    InvalidParameter(String),
    /// The external audio encoder or decoder exited with a non-zero
    /// status, could not be spawned or ran past its timeout
    ExternalCodecFailure {
        command: String,
        reason:  String
    },
    /// The decoded byte stream is shorter than the sample buffer
    /// it should be folded back into
    InsufficientDecodedData {
        decoded:  usize,
        expected: usize
    },
    /// A geometric operation would produce a non-positive extent
    GeometryError(String),
    /// Plane or buffer lengths do not match, `(expected, found)`
    DimensionsMisMatch(usize, usize),
    /// The image does not carry exactly three color planes
    WrongPlaneCount(usize),
    IoErrors(std::io::Error),
    /// Decoding or encoding the raster file failed
    ImageIoErrors(String),
    GenericString(String),
    GenericStr(&'static str)
}

impl Debug for GlitchErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter(reason) => {
                writeln!(f, "Invalid parameter: {reason}")
            }
            Self::ExternalCodecFailure { command, reason } => {
                writeln!(f, "External codec command `{command}` failed: {reason}")
            }
            Self::InsufficientDecodedData { decoded, expected } => {
                writeln!(
                    f,
                    "Decoded stream holds {decoded} bytes but {expected} samples are needed"
                )
            }
            Self::GeometryError(reason) => {
                writeln!(f, "Geometry error: {reason}")
            }
            Self::DimensionsMisMatch(expected, found) => {
                writeln!(
                    f,
                    "Dimensions mismatch, expected {expected} elements but found {found}"
                )
            }
            Self::WrongPlaneCount(count) => {
                writeln!(f, "Expected 3 color planes but found {count}")
            }
            Self::IoErrors(err) => {
                writeln!(f, "I/O error: {err}")
            }
            Self::ImageIoErrors(err) => {
                writeln!(f, "Image error: {err}")
            }
            Self::GenericString(err) => {
                writeln!(f, "{err}")
            }
            Self::GenericStr(err) => {
                writeln!(f, "{err}")
            }
        }
    }
}

impl Display for GlitchErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for GlitchErrors {}

impl From<std::io::Error> for GlitchErrors {
    fn from(value: std::io::Error) -> Self {
        GlitchErrors::IoErrors(value)
    }
}

impl From<ImageErrors> for GlitchErrors {
    fn from(value: ImageErrors) -> Self {
        GlitchErrors::ImageIoErrors(format!("{value:?}"))
    }
}

impl From<&'static str> for GlitchErrors {
    fn from(value: &'static str) -> Self {
        GlitchErrors::GenericStr(value)
    }
}

impl From<String> for GlitchErrors {
    fn from(value: String) -> Self {
        GlitchErrors::GenericString(value)
    }
}
