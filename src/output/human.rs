#![forbid(unsafe_code)]

//! Stderr diagnostics with colorization support
//!
//! On the happy path the shim prints nothing; launched programs inherit its
//! stdio and speak for themselves. The shim only has a voice when an
//! invocation could not happen at all, which the batch ancestor left to
//! cmd.exe's own "not recognized" message. Colors follow terminal detection
//! so redirected stderr stays plain.

use crate::errors::ShimError;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prints a shim error to stderr, colorized when stderr is a terminal
pub fn report_error(error: &ShimError) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);

    // A write failure to stderr leaves us nothing better to do
    let _ = write_error(&mut stderr, error);
}

fn write_error(stream: &mut impl WriteColor, error: &ShimError) -> std::io::Result<()> {
    stream.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(stream, "error")?;
    stream.reset()?;
    writeln!(stream, ": {error}")
}
