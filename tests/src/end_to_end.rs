/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::sync::Arc;

use lofi_bin::{create_pipeline, StageSeeds};
use lofi_codec::passthrough::PassthroughCodec;
use lofi_codec::quantize::{plane_to_samples, reconstruct};
use lofi_core::image::Image;
use lofi_core::options::GlitchOptions;
use lofi_core::traits::OperationsTrait;
use lofi_procs::aberration::ChromaticAberration;
use lofi_procs::amplify::Amplify;
use lofi_procs::desync::BlockDesync;
use lofi_procs::gamma::Gamma;
use lofi_procs::resize::Resize;
use lofi_procs::shift::HorizontalShift;
use lofi_procs::stretch_contrast::PercentileStretch;
use lofi_procs::stripe::Stripe;

use crate::{gradient, hash, scratch_path};

/// Lossless codec round-trip done by hand, quantize then reconstruct
fn quantize_image(image: &mut Image) {
    image.clamp();
    let (width, height) = image.dimensions();

    for plane in image.planes_mut() {
        *plane = reconstruct(&plane_to_samples(plane), width, height).unwrap();
    }
}

#[test]
fn pipeline_matches_stage_composition() {
    let (width, height) = (24, 16);
    let options = GlitchOptions::new()
        .set_aberration(2)
        .set_gamma(1.0)
        .set_dimensions(width, height);
    let seeds = StageSeeds::from_run_seed(0);

    let pipeline = create_pipeline(
        &options,
        Arc::new(PassthroughCodec::new()),
        &scratch_path("composition"),
        seeds
    )
    .unwrap();

    let mut piped = gradient(width, height);
    pipeline.execute(&mut piped).unwrap();

    let mut manual = gradient(width, height);
    Resize::new(width, height).execute(&mut manual).unwrap();
    ChromaticAberration::new(2).execute(&mut manual).unwrap();
    Gamma::new(1.0).execute(&mut manual).unwrap();
    quantize_image(&mut manual);
    HorizontalShift::new(-580).execute(&mut manual).unwrap();
    PercentileStretch::new(10.0, 95.0).execute(&mut manual).unwrap();

    assert_eq!(piped.dimensions(), (width, height));
    assert_eq!(piped, manual);
}

#[test]
fn optional_stages_compose_in_order() {
    let (width, height) = (40, 32);
    let options = GlitchOptions::new()
        .set_aberration(4)
        .set_dimensions(width, height)
        .set_stripe(true)
        .set_desync(true)
        .set_amplify(true);
    let seeds = StageSeeds::from_run_seed(1234);

    let pipeline = create_pipeline(
        &options,
        Arc::new(PassthroughCodec::new()),
        &scratch_path("optional"),
        seeds
    )
    .unwrap();

    let mut piped = gradient(width, height);
    pipeline.execute(&mut piped).unwrap();

    let mut manual = gradient(width, height);
    Resize::new(width, height).execute(&mut manual).unwrap();
    ChromaticAberration::new(4).execute(&mut manual).unwrap();
    Gamma::new(0.4).execute(&mut manual).unwrap();
    quantize_image(&mut manual);
    HorizontalShift::new(-580).execute(&mut manual).unwrap();
    Stripe::new(seeds.stripe).execute(&mut manual).unwrap();
    BlockDesync::new(seeds.desync).execute(&mut manual).unwrap();
    Amplify::new(seeds.amplify).execute(&mut manual).unwrap();
    PercentileStretch::new(10.0, 95.0).execute(&mut manual).unwrap();

    assert_eq!(piped, manual);
}

#[test]
fn inputs_are_resized_to_working_size() {
    let options = GlitchOptions::new()
        .set_aberration(2)
        .set_dimensions(32, 24);

    let pipeline = create_pipeline(
        &options,
        Arc::new(PassthroughCodec::new()),
        &scratch_path("resize"),
        StageSeeds::from_run_seed(3)
    )
    .unwrap();

    let mut image = gradient(50, 17);
    pipeline.execute(&mut image).unwrap();

    assert_eq!(image.dimensions(), (32, 24));
    for plane in image.planes_ref() {
        assert!(plane.data().iter().all(|x| (0.0..=1.0).contains(x)));
    }
}

#[test]
fn seeded_runs_with_corruption_are_reproducible() {
    let options = GlitchOptions::new()
        .set_aberration(2)
        .set_dimensions(36, 20)
        .set_corrupt_stream(true)
        .set_stripe(true)
        .set_desync(true)
        .set_amplify(true);

    let run = || {
        let pipeline = create_pipeline(
            &options,
            Arc::new(PassthroughCodec::new()),
            &scratch_path("reproducible"),
            StageSeeds::from_run_seed(99)
        )
        .unwrap();

        let mut image = gradient(36, 20);
        pipeline.execute(&mut image).unwrap();
        hash(&image)
    };

    assert_eq!(run(), run());
}

#[test]
fn aberration_too_large_fails_the_run() {
    let options = GlitchOptions::new()
        .set_aberration(10)
        .set_dimensions(30, 20);

    let pipeline = create_pipeline(
        &options,
        Arc::new(PassthroughCodec::new()),
        &scratch_path("geometry"),
        StageSeeds::from_run_seed(0)
    )
    .unwrap();

    let mut image = gradient(30, 20);
    assert!(matches!(
        pipeline.execute(&mut image),
        Err(lofi_core::errors::GlitchErrors::GeometryError(_))
    ));
}
