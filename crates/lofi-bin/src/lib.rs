/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;
use std::process::exit;

use log::error;

use crate::workflow::create_and_exec_workflow_from_cmd;
pub use crate::workflow::{create_pipeline, StageSeeds};

mod cmd_args;
mod cmd_parsers;
mod workflow;

/// Exit code of a run that did not write its output
const FAILURE_EXIT_CODE: i32 = 1;

pub fn main() {
    exit(run(std::env::args_os()));
}

/// Parse `args`, run the workflow and return the process exit code
///
/// A command line without an input or output prints usage and succeeds.
/// Argument errors exit with clap's usage code, workflow errors with
/// [`FAILURE_EXIT_CODE`].
pub fn run<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone
{
    let mut cmd = cmd_args::create_cmd_args();

    let options = match cmd.try_get_matches_from_mut(args) {
        Ok(options) => options,
        Err(err) => {
            // also reached for --help, which exits with success
            let _ = err.print();
            return err.exit_code();
        }
    };

    if options.get_one::<std::path::PathBuf>("input").is_none()
        || options.get_one::<std::path::PathBuf>("output").is_none()
    {
        // nothing to glitch, show usage
        let _ = cmd.print_help();
        return 0;
    }

    cmd_parsers::global_options::setup_logger(&options);

    let result = cmd_parsers::global_options::parse_options(&options)
        .and_then(|(glitch_opts, cmd_opts)| {
            create_and_exec_workflow_from_cmd(&glitch_opts, &cmd_opts)
        });

    if let Err(err) = result {
        println!();
        error!(" Could not complete workflow, reason {:?}", err);
        eprintln!("lofi: {err}");
        return FAILURE_EXIT_CODE;
    }
    0
}
