/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Pipelines, ordered operation chains
//!
use std::time::Instant;

use log::Level::Trace;
use log::{log_enabled, trace};

use crate::errors::GlitchErrors;
use crate::image::Image;
use crate::traits::OperationsTrait;

/// An ordered chain of operations run against a single image
///
/// Data flows strictly forward, each operation sees the output
/// of the one chained before it.
#[derive(Default)]
pub struct Pipeline {
    operations: Vec<Box<dyn OperationsTrait>>
}

impl Pipeline {
    /// Create a pipeline with no operations
    pub fn new() -> Pipeline {
        Pipeline { operations: vec![] }
    }

    /// Add a new operation to the end of the pipeline.
    ///
    /// This is used as a way to chain multiple operations in a builder
    /// pattern style
    pub fn chain_operations(&mut self, operation: Box<dyn OperationsTrait>) -> &mut Pipeline {
        self.operations.push(operation);
        self
    }

    /// Names of the chained operations, in execution order
    pub fn operation_names(&self) -> Vec<&'static str> {
        self.operations.iter().map(|x| x.name()).collect()
    }

    /// Run every operation on `image` in the order they were chained
    ///
    /// # Errors
    /// The first operation error stops the pipeline and is returned
    pub fn execute(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        if log_enabled!(Trace) && !self.operations.is_empty() {
            trace!("Running {} operations", self.operations.len());
        }
        for operation in &self.operations {
            let operation_name = operation.name();

            trace!("Running {}", operation_name);

            let start = Instant::now();

            operation.execute(image)?;

            let stop = Instant::now();

            trace!(
                "Finished running `{operation_name}` in {} ms",
                (stop - start).as_millis()
            );
        }
        Ok(())
    }
}
