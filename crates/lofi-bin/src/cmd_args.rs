/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};

/// Which audio codec planes are sent through
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CodecChoice {
    /// The external `lame` MP3 encoder
    Lame,
    /// Lossless stand-in, useful to see every other stage in isolation
    Passthrough
}

impl ValueEnum for CodecChoice {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Lame, Self::Passthrough]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::Lame => PossibleValue::new("lame"),
            Self::Passthrough => PossibleValue::new("passthrough")
        })
    }
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("lofi")
        .about("Glitch images by sending their color planes through a lossy audio codec")
        .arg(Arg::new("input")
            .help("Input image to read")
            .value_parser(value_parser!(PathBuf))
            .index(1))
        .arg(Arg::new("output")
            .help("Output image to write, format picked from the extension")
            .value_parser(value_parser!(PathBuf))
            .index(2))
        .arg(Arg::new("yes")
            .long("yes")
            .short('y')
            .action(ArgAction::SetTrue)
            .help("Overwrite the output file without asking"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the run"))
        .arg(Arg::new("aberration")
            .long("aberration")
            .short('r')
            .help_heading("GLITCH")
            .help("Chromatic aberration offset in pixels, odd values are rounded up")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64))
            .default_value("16"))
        .arg(Arg::new("gamma")
            .long("gamma")
            .short('g')
            .help_heading("GLITCH")
            .help("Power applied to every sample before encoding")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f32))
            .default_value("0.4"))
        .arg(Arg::new("low-percentile")
            .long("low-percentile")
            .short('l')
            .help_heading("GLITCH")
            .help("Percentile mapped to black by the final contrast stretch, in [0, 50]")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f32))
            .default_value("10"))
        .arg(Arg::new("high-percentile")
            .long("high-percentile")
            .short('u')
            .help_heading("GLITCH")
            .help("Percentile mapped to white by the final contrast stretch, in [50, 100]")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(f32))
            .default_value("95"))
        .arg(Arg::new("shift")
            .long("shift")
            .help_heading("GLITCH")
            .help("Horizontal wrap-around shift applied after the codec, in pixels")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64))
            .default_value("-580"))
        .arg(Arg::new("stripe")
            .long("stripe")
            .action(ArgAction::SetTrue)
            .help_heading("GLITCH")
            .help("Overlay a soft tinted horizontal stripe"))
        .arg(Arg::new("desync")
            .long("desync")
            .action(ArgAction::SetTrue)
            .help_heading("GLITCH")
            .help("Knock alternating horizontal bands out of sync"))
        .arg(Arg::new("amplify")
            .long("amplify")
            .action(ArgAction::SetTrue)
            .help_heading("GLITCH")
            .help("Blend the image with a sideways shifted copy of itself"))
        .arg(Arg::new("corrupt-stream")
            .long("corrupt-stream")
            .action(ArgAction::SetTrue)
            .help_heading("GLITCH")
            .help("Make the compressed audio stutter before it is decoded"))
        .arg(Arg::new("seed")
            .long("seed")
            .help_heading("GLITCH")
            .help("Seed for the randomized stages, a time derived seed is used when absent")
            .value_parser(value_parser!(u64)))
        .arg(Arg::new("width")
            .long("width")
            .help_heading("GLITCH")
            .help("Working width every input is resized to")
            .value_parser(value_parser!(usize))
            .default_value("1280"))
        .arg(Arg::new("height")
            .long("height")
            .help_heading("GLITCH")
            .help("Working height every input is resized to")
            .value_parser(value_parser!(usize))
            .default_value("960"))
        .arg(Arg::new("bitrate")
            .long("bitrate")
            .short('b')
            .help_heading("CODEC")
            .help("Encoder bitrate in kbps")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64))
            .default_value("12"))
        .arg(Arg::new("quality")
            .long("quality")
            .short('q')
            .help_heading("CODEC")
            .help("Encoder quality, 0 is best and slowest, in [0, 10]")
            .allow_negative_numbers(true)
            .value_parser(value_parser!(i64))
            .default_value("3"))
        .arg(Arg::new("sample-rate")
            .long("sample-rate")
            .help_heading("CODEC")
            .help("Sample rate planes are declared to have, in Hz")
            .value_parser(value_parser!(u32))
            .default_value("16000"))
        .arg(Arg::new("timeout")
            .long("timeout")
            .help_heading("CODEC")
            .help("Seconds a single encoder or decoder run may take before it is killed")
            .value_parser(value_parser!(u64))
            .default_value("120"))
        .arg(Arg::new("codec")
            .long("codec")
            .help_heading("CODEC")
            .help("Audio codec planes are sent through")
            .value_parser(value_parser!(CodecChoice))
            .default_value("lame"))
        .arg(Arg::new("lame")
            .long("lame")
            .help_heading("CODEC")
            .help("Path to the lame executable")
            .value_parser(value_parser!(PathBuf))
            .default_value("lame"))
        .arg(Arg::new("scratch-dir")
            .long("scratch-dir")
            .help_heading("ADVANCED")
            .help("Directory holding per plane scratch files, removed after each plane")
            .value_parser(value_parser!(PathBuf))
            .default_value("temp"))
}
