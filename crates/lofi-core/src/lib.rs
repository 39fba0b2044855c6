/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core primitives for the lofi glitch pipeline
//!
//! This crate holds the shared vocabulary the other lofi crates speak:
//!
//! - [`Image`](image::Image) and [`Plane`](image::Plane), planar float images
//! - [`GlitchErrors`](errors::GlitchErrors), the error type every stage returns
//! - [`OperationsTrait`](traits::OperationsTrait), implemented by every stage
//! - [`Pipeline`](pipelines::Pipeline), an ordered chain of stages
//! - [`GlitchOptions`](options::GlitchOptions), the run configuration
//!
//! # Example
//! ```no_run
//! use lofi_core::image::Image;
//!
//! let image = Image::open("input.png").unwrap();
//! image.save("output.png").unwrap();
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

pub mod codecs;
pub mod errors;
pub mod image;
pub mod options;
pub mod pipelines;
pub mod traits;
