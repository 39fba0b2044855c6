/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image processing routines for `lofi`
//!
//! Geometric and photometric stages of the glitch pipeline, each
//! implementing the `OperationsTrait` defined by lofi-core.
//!
//! # Example
//! - Shift every row 10 pixels to the left
//! ```
//! use lofi_core::image::Image;
//! use lofi_core::traits::OperationsTrait;
//! use lofi_procs::shift::HorizontalShift;
//!
//! let mut image = Image::fill(0.5, 100, 100);
//! HorizontalShift::new(-10).execute(&mut image).unwrap();
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
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod aberration;
pub mod amplify;
pub mod crop;
pub mod desync;
pub mod gamma;
pub mod resize;
pub mod shift;
pub mod stretch_contrast;
pub mod stripe;
