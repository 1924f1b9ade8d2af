/*============================================================
  Synavera Project: Syn-Seek
  Module: synseek::prompt
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Read the operator's selection line, treating Ctrl-C and
    end-of-input as a silent cancel.

  Security / Safety Notes:
    Reads stdin only; the line is returned untouched apart
    from its line terminator.

  Dependencies:
    tokio for the blocking reader and signal handling.

  Operational Scope:
    Called once per search session after the banner.

  Revision History:
    2025-11-12 COD  Authored interruptible prompt.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Interrupts handled without stack traces
============================================================*/

use std::io::{self, BufRead, Write};

use crate::error::{Result, SynseekError};

/// Print `prompt` and wait for one line.
///
/// Returns `None` on Ctrl-C or end of input.
pub async fn read_selection_line(prompt: &str) -> Result<Option<String>> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let reader = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok::<_, io::Error>((read, line))
    });

    tokio::select! {
        joined = reader => {
            let (read, line) = joined
                .map_err(|err| SynseekError::Runtime(format!("Selection reader failed: {err}")))??;
            if read == 0 {
                return Ok(None);
            }
            Ok(Some(strip_line_ending(&line).to_string()))
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            // Leave the terminal on a fresh line after ^C.
            println!();
            Ok(None)
        }
    }
}

/// Where the selection line comes from.
pub trait SelectionInput {
    /// One line, or `None` when the operator cancelled.
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// The controlling terminal's stdin.
pub struct TerminalInput;

impl SelectionInput for TerminalInput {
    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        read_selection_line(prompt).await
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_endings_are_removed() {
        assert_eq!(strip_line_ending("1 2-3\n"), "1 2-3");
        assert_eq!(strip_line_ending("q\r\n"), "q");
        assert_eq!(strip_line_ending(" 4 "), " 4 ");
    }
}
