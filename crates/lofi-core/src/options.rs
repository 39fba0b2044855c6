/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Options controlling a glitch run
//!
//! Options are built up with the `set_*` methods and checked once with
//! [`GlitchOptions::validate`] before any image is touched.
use std::time::Duration;

use crate::errors::GlitchErrors;

/// Configuration for one run of the glitch pipeline
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GlitchOptions {
    /// Chromatic aberration offset in pixels.
    ///
    /// - Default value: 16
    /// - Valid range: `>= 0`, odd values are bumped to the next even one
    aberration:      i64,
    /// Power applied to every sample before encoding
    ///
    /// - Default value: 0.4
    /// - Valid range: `>= 0`
    gamma:           f32,
    /// Encoder bitrate in kbps
    ///
    /// - Default value: 12
    bitrate:         i64,
    /// Encoder algorithm quality, 0 is best and slowest
    ///
    /// - Default value: 3
    /// - Valid range: `0..=10`
    quality:         i64,
    /// Percentile mapped to black by the final contrast stretch
    ///
    /// - Default value: 10
    /// - Valid range: `0..=50`
    low_percentile:  f32,
    /// Percentile mapped to white by the final contrast stretch
    ///
    /// - Default value: 95
    /// - Valid range: `50..=100`
    high_percentile: f32,
    stripe:          bool,
    desync:          bool,
    amplify:         bool,
    corrupt_stream:  bool,
    /// Horizontal circular shift applied after the codec round-trip
    ///
    /// - Default value: -580
    shift:           i64,
    /// Working resolution every input is resized to
    ///
    /// - Default value: 1280x960
    width:           usize,
    height:          usize,
    /// Sample rate planes are declared to have when handed to the encoder
    ///
    /// - Default value: 16000 Hz
    sample_rate:     u32,
    /// Upper bound on a single external codec invocation
    ///
    /// - Default value: 120 seconds
    timeout:         Duration,
    /// Seed for the randomized compositing stages
    seed:            Option<u64>
}

impl Default for GlitchOptions {
    fn default() -> Self {
        GlitchOptions::new()
    }
}

impl GlitchOptions {
    /// Create options carrying the default values
    pub const fn new() -> GlitchOptions {
        GlitchOptions {
            aberration:      16,
            gamma:           0.4,
            bitrate:         12,
            quality:         3,
            low_percentile:  10.0,
            high_percentile: 95.0,
            stripe:          false,
            desync:          false,
            amplify:         false,
            corrupt_stream:  false,
            shift:           -580,
            width:           1280,
            height:          960,
            sample_rate:     16000,
            timeout:         Duration::from_secs(120),
            seed:            None
        }
    }

    /// Check every value lies in its documented range
    ///
    /// # Errors
    /// [`GlitchErrors::InvalidParameter`] naming the first offending value
    pub fn validate(&self) -> Result<(), GlitchErrors> {
        if self.aberration < 0 {
            return Err(GlitchErrors::InvalidParameter(format!(
                "aberration offset must be >= 0, found {}",
                self.aberration
            )));
        }
        if !(0.0..=50.0).contains(&self.low_percentile) {
            return Err(GlitchErrors::InvalidParameter(format!(
                "low percentile must be in [0, 50], found {}",
                self.low_percentile
            )));
        }
        if !(50.0..=100.0).contains(&self.high_percentile) {
            return Err(GlitchErrors::InvalidParameter(format!(
                "high percentile must be in [50, 100], found {}",
                self.high_percentile
            )));
        }
        if !self.gamma.is_finite() || self.gamma < 0.0 {
            return Err(GlitchErrors::InvalidParameter(format!(
                "gamma must be a finite value >= 0, found {}",
                self.gamma
            )));
        }
        if self.bitrate < 0 || u32::try_from(self.bitrate).is_err() {
            return Err(GlitchErrors::InvalidParameter(format!(
                "bitrate must be >= 0, found {}",
                self.bitrate
            )));
        }
        if !(0..=10).contains(&self.quality) {
            return Err(GlitchErrors::InvalidParameter(format!(
                "quality must be in [0, 10], found {}",
                self.quality
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(GlitchErrors::InvalidParameter(format!(
                "working resolution must be positive, found {}x{}",
                self.width, self.height
            )));
        }
        if self.sample_rate == 0 {
            return Err(GlitchErrors::InvalidParameter(
                "sample rate must be positive".to_string()
            ));
        }
        if self.timeout.is_zero() {
            return Err(GlitchErrors::InvalidParameter(
                "codec timeout must be positive".to_string()
            ));
        }
        Ok(())
    }

    pub const fn aberration(&self) -> i64 {
        self.aberration
    }

    pub const fn gamma(&self) -> f32 {
        self.gamma
    }

    pub const fn bitrate(&self) -> i64 {
        self.bitrate
    }

    pub const fn quality(&self) -> i64 {
        self.quality
    }

    pub const fn low_percentile(&self) -> f32 {
        self.low_percentile
    }

    pub const fn high_percentile(&self) -> f32 {
        self.high_percentile
    }

    pub const fn stripe(&self) -> bool {
        self.stripe
    }

    pub const fn desync(&self) -> bool {
        self.desync
    }

    pub const fn amplify(&self) -> bool {
        self.amplify
    }

    pub const fn corrupt_stream(&self) -> bool {
        self.corrupt_stream
    }

    pub const fn shift(&self) -> i64 {
        self.shift
    }

    /// Working resolution as `(width, height)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub const fn set_aberration(mut self, aberration: i64) -> Self {
        self.aberration = aberration;
        self
    }

    #[must_use]
    pub const fn set_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    #[must_use]
    pub const fn set_bitrate(mut self, bitrate: i64) -> Self {
        self.bitrate = bitrate;
        self
    }

    #[must_use]
    pub const fn set_quality(mut self, quality: i64) -> Self {
        self.quality = quality;
        self
    }

    /// Set the low and high contrast stretch percentiles
    #[must_use]
    pub const fn set_percentiles(mut self, low: f32, high: f32) -> Self {
        self.low_percentile = low;
        self.high_percentile = high;
        self
    }

    #[must_use]
    pub const fn set_stripe(mut self, yes: bool) -> Self {
        self.stripe = yes;
        self
    }

    #[must_use]
    pub const fn set_desync(mut self, yes: bool) -> Self {
        self.desync = yes;
        self
    }

    #[must_use]
    pub const fn set_amplify(mut self, yes: bool) -> Self {
        self.amplify = yes;
        self
    }

    /// Whether the compressed stream gets stutter corruption before decoding
    #[must_use]
    pub const fn set_corrupt_stream(mut self, yes: bool) -> Self {
        self.corrupt_stream = yes;
        self
    }

    #[must_use]
    pub const fn set_shift(mut self, shift: i64) -> Self {
        self.shift = shift;
        self
    }

    /// Set the working resolution inputs are resized to
    #[must_use]
    pub const fn set_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub const fn set_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    #[must_use]
    pub const fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn set_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
