use crate::domain::ports::Notifier;
use crate::utils::error::Result;
use std::io::Write;
use std::sync::Mutex;

/// Writes messages to a sink instead of sending them (CLI `--dry-run`).
pub struct ConsoleNotifier<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleNotifier<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    async fn send(&self, text: &str) -> Result<()> {
        tracing::info!("📝 Dry run, message not sent");
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(out, "----- message -----\n{}\n-------------------", text)?;
        out.flush()?;
        Ok(())
    }
}
