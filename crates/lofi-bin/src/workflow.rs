/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{stdin, BufRead};
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use lofi_codec::codec::AudioCodec;
use lofi_codec::lame::LameCodec;
use lofi_codec::passthrough::PassthroughCodec;
use lofi_codec::round_trip::CodecRoundTrip;
use lofi_core::errors::GlitchErrors;
use lofi_core::image::Image;
use lofi_core::options::GlitchOptions;
use lofi_core::pipelines::Pipeline;
use lofi_procs::aberration::ChromaticAberration;
use lofi_procs::amplify::Amplify;
use lofi_procs::desync::BlockDesync;
use lofi_procs::gamma::Gamma;
use lofi_procs::resize::Resize;
use lofi_procs::shift::HorizontalShift;
use lofi_procs::stretch_contrast::PercentileStretch;
use lofi_procs::stripe::Stripe;
use log::{debug, info};
use nanorand::{Rng, WyRand};

use crate::cmd_args::CodecChoice;
use crate::cmd_parsers::global_options::CmdOptions;

/// Seeds handed to each randomized stage
///
/// All three are drawn from one run seed so a single `--seed` value
/// reproduces the whole run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StageSeeds {
    pub stripe:  u64,
    pub desync:  u64,
    pub amplify: u64
}

impl StageSeeds {
    pub fn from_run_seed(seed: u64) -> StageSeeds {
        let mut rng = WyRand::new_seed(seed);

        StageSeeds {
            stripe:  rng.generate(),
            desync:  rng.generate(),
            amplify: rng.generate()
        }
    }
}

/// Assemble the glitch pipeline for `options`
///
/// Stages run in this order, the bracketed ones only when enabled:
/// resize to the working size, chromatic aberration, gamma, codec
/// round-trip, horizontal shift, \[stripe\], \[block desync\],
/// \[amplify\], percentile contrast stretch.
///
/// # Errors
/// [`GlitchErrors::InvalidParameter`] if a value does not fit the stage
/// it configures
pub fn create_pipeline(
    options: &GlitchOptions, codec: Arc<dyn AudioCodec>, scratch_root: &Path, seeds: StageSeeds
) -> Result<Pipeline, GlitchErrors> {
    let (width, height) = options.dimensions();
    let aberration = usize::try_from(options.aberration()).map_err(|_| {
        GlitchErrors::InvalidParameter(format!(
            "aberration offset must be >= 0, found {}",
            options.aberration()
        ))
    })?;

    let mut pipeline = Pipeline::new();

    pipeline
        .chain_operations(Box::new(Resize::new(width, height)))
        .chain_operations(Box::new(ChromaticAberration::new(aberration)))
        .chain_operations(Box::new(Gamma::new(options.gamma())))
        .chain_operations(Box::new(
            CodecRoundTrip::new(codec, options.sample_rate())
                .set_corrupt(options.corrupt_stream())
                .set_scratch_root(scratch_root)
        ))
        .chain_operations(Box::new(HorizontalShift::new(options.shift())));

    if options.stripe() {
        pipeline.chain_operations(Box::new(Stripe::new(seeds.stripe)));
    }
    if options.desync() {
        pipeline.chain_operations(Box::new(BlockDesync::new(seeds.desync)));
    }
    if options.amplify() {
        pipeline.chain_operations(Box::new(Amplify::new(seeds.amplify)));
    }
    pipeline.chain_operations(Box::new(PercentileStretch::new(
        options.low_percentile(),
        options.high_percentile()
    )));

    debug!("Pipeline: {:?}", pipeline.operation_names());

    Ok(pipeline)
}

fn create_codec(
    options: &GlitchOptions, cmd_opts: &CmdOptions
) -> Result<Arc<dyn AudioCodec>, GlitchErrors> {
    match cmd_opts.codec {
        CodecChoice::Passthrough => Ok(Arc::new(PassthroughCodec::new())),
        CodecChoice::Lame => {
            let bitrate = u32::try_from(options.bitrate()).map_err(|_| {
                GlitchErrors::InvalidParameter(format!("bitrate {} out of range", options.bitrate()))
            })?;
            let quality = u8::try_from(options.quality()).map_err(|_| {
                GlitchErrors::InvalidParameter(format!("quality {} out of range", options.quality()))
            })?;
            let codec = LameCodec::new(bitrate, quality, options.timeout())
                .set_binary(cmd_opts.lame_binary.clone());

            Ok(Arc::new(codec))
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn run_seed(options: &GlitchOptions) -> u64 {
    match options.seed() {
        Some(seed) => seed,
        None => {
            let seed = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|x| x.as_nanos() as u64)
                .unwrap_or(0);
            info!("No seed given, using {seed}");
            seed
        }
    }
}

pub(crate) fn create_and_exec_workflow_from_cmd(
    options: &GlitchOptions, cmd_opts: &CmdOptions
) -> Result<(), GlitchErrors> {
    info!("Creating workflows from input");

    verify_file_paths(&cmd_opts.input, &cmd_opts.output, cmd_opts.override_files)?;

    let codec = create_codec(options, cmd_opts)?;
    let seeds = StageSeeds::from_run_seed(run_seed(options));
    let pipeline = create_pipeline(options, codec, &cmd_opts.scratch_dir, seeds)?;

    let mut image = Image::open(&cmd_opts.input)?;

    pipeline.execute(&mut image)?;

    // only reached once every stage succeeded
    image.save(&cmd_opts.output)?;

    info!("Wrote {:?}", cmd_opts.output);
    Ok(())
}

fn verify_file_paths(in_path: &Path, out_path: &Path, override_files: bool) -> Result<(), GlitchErrors> {
    if in_path == out_path {
        return Err(GlitchErrors::GenericString(format!(
            "Cannot use {:?} as both input and output",
            in_path
        )));
    }

    if !in_path.exists() {
        return Err(GlitchErrors::GenericString(format!(
            "Path {:?}, does not exist",
            in_path
        )));
    }

    if !in_path.is_file() {
        return Err(GlitchErrors::GenericString(format!(
            "Path {:?} is not a file",
            in_path
        )));
    }

    if out_path.exists() {
        if override_files {
            info!("Overwriting path {:?} ", out_path);
        } else {
            println!("File {:?} exists, overwrite [y/N]", out_path);
            let mut result = String::new();

            stdin().lock().read_line(&mut result)?;

            if result.trim() != "y" {
                return Err(GlitchErrors::GenericString(format!(
                    "Not overwriting file {:?}",
                    out_path
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use lofi_codec::passthrough::PassthroughCodec;
    use lofi_core::options::GlitchOptions;

    use crate::workflow::{create_pipeline, verify_file_paths, StageSeeds};

    #[test]
    fn optional_stages_follow_flags() {
        let seeds = StageSeeds::from_run_seed(1);
        let codec = Arc::new(PassthroughCodec::new());

        let plain = create_pipeline(&GlitchOptions::new(), codec.clone(), Path::new("temp"), seeds).unwrap();
        assert_eq!(
            plain.operation_names(),
            [
                "Resize",
                "Chromatic aberration",
                "Gamma Correction",
                "Codec round-trip",
                "Horizontal shift",
                "Percentile contrast stretch"
            ]
        );

        let options = GlitchOptions::new().set_stripe(true).set_desync(true).set_amplify(true);
        let full = create_pipeline(&options, codec, Path::new("temp"), seeds).unwrap();
        assert_eq!(
            full.operation_names()[5..],
            ["Stripe", "Block desync", "Amplify", "Percentile contrast stretch"]
        );
    }

    #[test]
    fn seeds_are_reproducible() {
        assert_eq!(StageSeeds::from_run_seed(5), StageSeeds::from_run_seed(5));
        assert_ne!(StageSeeds::from_run_seed(5), StageSeeds::from_run_seed(6));
    }

    #[test]
    fn same_input_and_output_is_refused() {
        let path = Path::new("same.png");
        assert!(verify_file_paths(path, path, true).is_err());
    }

    #[test]
    fn missing_input_is_refused() {
        let result = verify_file_paths(
            Path::new("/nonexistent/lofi/in.png"),
            Path::new("/nonexistent/lofi/out.png"),
            true
        );
        assert!(result.is_err());
    }
}
