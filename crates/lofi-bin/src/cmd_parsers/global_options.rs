/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;
use std::time::Duration;

use clap::parser::ValueSource;
use clap::ArgMatches;
use lofi_core::errors::GlitchErrors;
use lofi_core::options::GlitchOptions;
use log::{info, Level};

use crate::cmd_args::CodecChoice;

/// Options steering the run itself rather than the glitch
#[derive(Debug, Clone)]
pub struct CmdOptions {
    pub input:          PathBuf,
    pub output:         PathBuf,
    pub override_files: bool,
    pub codec:          CodecChoice,
    pub lame_binary:    PathBuf,
    pub scratch_dir:    PathBuf
}

/// Fetch an argument that always carries a value, either from the
/// command line or its default
fn required<T: Clone + Send + Sync + 'static>(
    options: &ArgMatches, id: &str
) -> Result<T, GlitchErrors> {
    options
        .get_one::<T>(id)
        .cloned()
        .ok_or_else(|| GlitchErrors::InvalidParameter(format!("Missing value for `--{id}`")))
}

/// Turn command line matches into glitch options and run options
///
/// The glitch options are validated here, before any file is touched.
///
/// # Errors
/// [`GlitchErrors::InvalidParameter`] for missing or out of range values
pub fn parse_options(options: &ArgMatches) -> Result<(GlitchOptions, CmdOptions), GlitchErrors> {
    let low: f32 = required(options, "low-percentile")?;
    let high: f32 = required(options, "high-percentile")?;
    let width: usize = required(options, "width")?;
    let height: usize = required(options, "height")?;
    let timeout: u64 = required(options, "timeout")?;

    let glitch_opts = GlitchOptions::new()
        .set_aberration(required(options, "aberration")?)
        .set_gamma(required(options, "gamma")?)
        .set_bitrate(required(options, "bitrate")?)
        .set_quality(required(options, "quality")?)
        .set_percentiles(low, high)
        .set_shift(required(options, "shift")?)
        .set_dimensions(width, height)
        .set_sample_rate(required(options, "sample-rate")?)
        .set_timeout(Duration::from_secs(timeout))
        .set_stripe(options.get_flag("stripe"))
        .set_desync(options.get_flag("desync"))
        .set_amplify(options.get_flag("amplify"))
        .set_corrupt_stream(options.get_flag("corrupt-stream"))
        .set_seed(options.get_one::<u64>("seed").copied());

    glitch_opts.validate()?;

    info!("Glitch options: {:?}", glitch_opts);

    let override_files = options.value_source("yes") == Some(ValueSource::CommandLine);

    if override_files {
        info!("Setting all commands to yes");
    }

    let cmd_opts = CmdOptions {
        input: required(options, "input")?,
        output: required(options, "output")?,
        override_files,
        codec: required(options, "codec")?,
        lame_binary: required(options, "lame")?,
        scratch_dir: required(options, "scratch-dir")?
    };

    Ok((glitch_opts, cmd_opts))
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("warn") {
        Level::Warn
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
