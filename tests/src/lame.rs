/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Round-trips through the real `lame` binary, skipped where it is not installed
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::time::Duration;

use lofi_codec::lame::LameCodec;
use lofi_codec::round_trip::CodecRoundTrip;
use lofi_core::traits::OperationsTrait;

use crate::{gradient, scratch_path};

fn lame_available() -> bool {
    Command::new("lame")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

#[test]
fn lame_round_trip_keeps_shape() {
    if !lame_available() {
        eprintln!("lame not installed, skipping");
        return;
    }
    let (width, height) = (64, 48);
    let mut image = gradient(width, height);

    CodecRoundTrip::new(Arc::new(LameCodec::new(12, 3, Duration::from_secs(60))), 16000)
        .set_scratch_root(scratch_path("lame"))
        .execute(&mut image)
        .unwrap();

    assert_eq!(image.dimensions(), (width, height));
    for plane in image.planes_ref() {
        assert!(plane.data().iter().all(|x| (0.0..=1.0).contains(x)));
    }
}

#[test]
fn lame_corrupted_round_trip_keeps_shape() {
    if !lame_available() {
        eprintln!("lame not installed, skipping");
        return;
    }
    let mut image = gradient(48, 32);

    CodecRoundTrip::new(Arc::new(LameCodec::new(12, 3, Duration::from_secs(60))), 16000)
        .set_scratch_root(scratch_path("lame-corrupt"))
        .set_corrupt(true)
        .execute(&mut image)
        .unwrap();

    assert_eq!(image.dimensions(), (48, 32));
}
