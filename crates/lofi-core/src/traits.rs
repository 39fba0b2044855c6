/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits implemented by pipeline stages
use crate::errors::GlitchErrors;
use crate::image::Image;

/// An operation that can be chained into a [`Pipeline`](crate::pipelines::Pipeline)
///
/// Implementors provide [`execute_impl`](Self::execute_impl), callers use
/// [`execute`](Self::execute) which checks the image is consistent before
/// and after the operation runs.
pub trait OperationsTrait: Send + Sync {
    /// Name of the operation, used in logs
    fn name(&self) -> &'static str;

    /// Carry out the operation on the image
    ///
    /// # Errors
    /// Any error the operation encounters, operations should not leave
    /// the image in a partially modified state they report as success
    fn execute_impl(&self, image: &mut Image) -> Result<(), GlitchErrors>;

    /// Run the operation, validating the image on both sides
    ///
    /// # Errors
    /// - The image was inconsistent before running
    /// - The operation failed
    /// - The operation left the image inconsistent
    fn execute(&self, image: &mut Image) -> Result<(), GlitchErrors> {
        image.validate()?;
        self.execute_impl(image)?;
        image.validate()
    }
}
