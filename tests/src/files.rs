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
use lofi_core::image::Image;
use lofi_core::options::GlitchOptions;

use crate::{gradient, scratch_path};

#[test]
fn png_round_trip_preserves_8_bit_pixels() {
    let dir = scratch_path("png");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("gradient.png");

    let image = gradient(21, 13);
    image.save(&path).unwrap();

    let loaded = Image::open(&path).unwrap();
    assert_eq!(loaded.dimensions(), (21, 13));
    assert_eq!(loaded.to_interleaved_u8(), image.to_interleaved_u8());
}

#[test]
fn glitch_file_to_file() {
    let dir = scratch_path("file-to-file");
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("in.png");
    let output = dir.join("out.png");

    gradient(64, 48).save(&input).unwrap();

    let options = GlitchOptions::new()
        .set_aberration(3)
        .set_dimensions(40, 30)
        .set_stripe(true);
    let pipeline = create_pipeline(
        &options,
        Arc::new(PassthroughCodec::new()),
        &dir.join("temp"),
        StageSeeds::from_run_seed(8)
    )
    .unwrap();

    let mut image = Image::open(&input).unwrap();
    pipeline.execute(&mut image).unwrap();
    image.save(&output).unwrap();

    let written = Image::open(&output).unwrap();
    assert_eq!(written.dimensions(), (40, 30));
}
