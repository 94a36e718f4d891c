//! Output plumbing shared by the binary
//!
//! The report is written to any `io::Write`. On a terminal that writer is a
//! `minus` pager, reached through [`PagerWriter`].

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Disables paging when set, whatever stdout is.
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// `io::Write` adapter over a `minus` pager.
///
/// Bytes that end in the middle of a UTF-8 sequence are held back until the
/// rest of the sequence arrives.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
    #[new(default)]
    pending: Vec<u8>,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let valid = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(err) if err.error_len().is_none() => err.valid_up_to(),
            Err(err) => {
                self.pending.clear();
                return Err(io::Error::new(io::ErrorKind::InvalidData, err));
            }
        };

        let text = String::from_utf8_lossy(&self.pending[..valid]).into_owned();
        self.pager.push_str(text).map_err(io::Error::other)?;
        self.pending.drain(..valid);

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Where the report goes: a pager when stdout is an interactive terminal and
/// paging was not switched off, stdout otherwise.
pub enum ReportOutput {
    Paged(Pager),
    Stdout,
}

impl ReportOutput {
    pub fn detect() -> Self {
        if std::io::stdout().is_terminal() && std::env::var_os(NO_PAGER_ENV).is_none() {
            ReportOutput::Paged(Pager::new())
        } else {
            ReportOutput::Stdout
        }
    }

    pub fn is_paged(&self) -> bool {
        matches!(self, ReportOutput::Paged(_))
    }

    pub fn writer(&self) -> Box<dyn Write> {
        match self {
            ReportOutput::Paged(pager) => Box::new(PagerWriter::new(pager.clone())),
            ReportOutput::Stdout => Box::new(std::io::stdout()),
        }
    }

    /// Hands the collected output to the pager. A no-op for stdout.
    pub fn finish(self) -> anyhow::Result<()> {
        if let ReportOutput::Paged(pager) = self {
            minus::page_all(pager)?;
        }

        Ok(())
    }
}
