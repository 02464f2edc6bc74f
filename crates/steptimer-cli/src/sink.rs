//! Terminal notification sink: a message line plus the terminal bell.

use std::io::{IsTerminal, Write};

use steptimer_core::{NotificationSink, NotifyError, Step};

pub struct TerminalSink {
    sound: bool,
    to_stderr: bool,
}

impl TerminalSink {
    pub fn new(sound: bool) -> Self {
        Self {
            sound,
            to_stderr: false,
        }
    }

    /// Announce on stderr so stdout carries only JSON events.
    pub fn on_stderr(mut self) -> Self {
        self.to_stderr = true;
        self
    }
}

impl NotificationSink for TerminalSink {
    fn announce(&mut self, step: &Step) -> Result<(), NotifyError> {
        if self.to_stderr {
            let mut err = std::io::stderr().lock();
            let bell = self.sound && err.is_terminal();
            announce_to(&mut err, step, bell)
        } else {
            let mut out = std::io::stdout().lock();
            let bell = self.sound && out.is_terminal();
            announce_to(&mut out, step, bell)
        }
    }
}

/// Write the message line, then the bell when `bell` is set. Only a failed
/// bell is an error; the bell is skipped, not failed, off a terminal.
fn announce_to<W: Write>(out: &mut W, step: &Step, bell: bool) -> Result<(), NotifyError> {
    if let Err(e) = writeln!(out, "\n>>> {}: {}", step.category, step.description) {
        tracing::warn!("cannot write notification: {e}");
    }
    if !bell {
        return Ok(());
    }
    out.write_all(b"\x07")
        .and_then(|()| out.flush())
        .map_err(|e| NotifyError::AudioUnavailable {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_without_bell() {
        let mut buf = Vec::new();
        let step = Step::new(10.0, "Gravy", "Stir");
        announce_to(&mut buf, &step, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\n>>> Gravy: Stir\n");
    }

    #[test]
    fn bell_follows_message() {
        let mut buf = Vec::new();
        let step = Step::new(0.0, "Chicken", "Carve");
        announce_to(&mut buf, &step, true).unwrap();
        assert!(buf.ends_with(b"Carve\n\x07"));
    }
}
