/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Running external commands with a deadline
use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use lofi_core::errors::GlitchErrors;
use log::{debug, trace};

/// How often a running child is polled for completion
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Most stderr bytes quoted back in an error
const MAX_STDERR: usize = 512;

/// An external program invocation, described as a program and an
/// argument vector, never passed through a shell
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args:    Vec<OsString>
}

impl Invocation {
    pub fn new<P: Into<PathBuf>>(program: P) -> Invocation {
        Invocation {
            program: program.into(),
            args:    vec![]
        }
    }

    #[must_use]
    pub fn arg<S: Into<OsString>>(mut self, arg: S) -> Invocation {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Human readable command line, for logs and errors
    pub fn command_line(&self) -> String {
        let mut line = self.program.to_string_lossy().to_string();

        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    fn failure(&self, reason: String) -> GlitchErrors {
        GlitchErrors::ExternalCodecFailure {
            command: self.command_line(),
            reason
        }
    }

    /// Run to completion, waiting at most `timeout`
    ///
    /// The child's stdin and stdout are closed, stderr is captured and
    /// quoted in the error on failure. A child outliving the timeout is
    /// killed, a timeout too large to represent as a deadline waits
    /// without one.
    ///
    /// # Errors
    /// [`GlitchErrors::ExternalCodecFailure`] if the program cannot be
    /// spawned, exits unsuccessfully or times out
    pub fn run(&self, timeout: Duration) -> Result<(), GlitchErrors> {
        debug!("Running `{}`", self.command_line());
        let start = Instant::now();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| self.failure(format!("could not start: {err}")))?;

        // drain stderr on its own thread so a chatty child never blocks
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });

        let waited = wait_with_deadline(&mut child, start.checked_add(timeout));

        // the child is gone either way, so the reader sees end of file
        let stderr = stderr
            .and_then(|handle| handle.join().ok())
            .map(|buf| {
                let text = String::from_utf8_lossy(&buf).trim().to_string();
                text.chars().take(MAX_STDERR).collect::<String>()
            })
            .unwrap_or_default();

        let status =
            waited.map_err(|err| self.failure(format!("could not wait on child: {err}")))?;

        trace!(
            "`{}` finished in {} ms",
            self.command_line(),
            start.elapsed().as_millis()
        );

        match status {
            None => Err(self.failure(format!(
                "timed out after {} ms and was killed",
                timeout.as_millis()
            ))),
            Some(status) if status.success() => Ok(()),
            Some(status) => Err(self.failure(format!("{status}, stderr: {stderr}")))
        }
    }
}

/// The parts of a child process the deadline loop drives
trait Reap {
    fn try_wait(&mut self) -> std::io::Result<Option<ExitStatus>>;

    fn kill(&mut self) -> std::io::Result<()>;

    fn wait(&mut self) -> std::io::Result<ExitStatus>;
}

impl Reap for Child {
    fn try_wait(&mut self) -> std::io::Result<Option<ExitStatus>> {
        Child::try_wait(self)
    }

    fn kill(&mut self) -> std::io::Result<()> {
        Child::kill(self)
    }

    fn wait(&mut self) -> std::io::Result<ExitStatus> {
        Child::wait(self)
    }
}

/// Wait until the child exits or `deadline` passes, `None` waits forever
///
/// Returns `None` if the deadline passed. The child is killed and reaped
/// in that case, and also when polling it fails.
fn wait_with_deadline<C: Reap>(
    child: &mut C, deadline: Option<Instant>
) -> std::io::Result<Option<ExitStatus>> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => (),
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(err);
            }
        }
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}
