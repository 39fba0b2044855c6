/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Audio codec round-trips for `lofi`
//!
//! The heart of the glitch: each color plane is treated as a mono 8-bit
//! audio signal, pushed through a lossy audio codec and folded back into
//! an image plane.
//!
//! - [`AudioCodec`](codec::AudioCodec) abstracts the codec,
//!   [`LameCodec`](lame::LameCodec) runs the external `lame` binary and
//!   [`PassthroughCodec`](passthrough::PassthroughCodec) is a lossless
//!   stand-in.
//! - [`CodecRoundTrip`](round_trip::CodecRoundTrip) is the pipeline stage.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use lofi_core::image::Image;
//! use lofi_core::traits::OperationsTrait;
//! use lofi_codec::passthrough::PassthroughCodec;
//! use lofi_codec::round_trip::CodecRoundTrip;
//!
//! let mut image = Image::fill(0.5, 32, 32);
//! CodecRoundTrip::new(Arc::new(PassthroughCodec::new()), 16000)
//!     .set_scratch_root(std::env::temp_dir().join("lofi-doc"))
//!     .execute(&mut image)
//!     .unwrap();
//! ```
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc
)]

pub mod codec;
pub mod corrupt;
pub mod lame;
pub mod passthrough;
pub mod process;
pub mod quantize;
pub mod round_trip;
pub mod scratch;
