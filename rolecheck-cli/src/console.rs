use std::io::Write;
use std::sync::{Mutex, MutexGuard};

use rolecheck::{ClassificationRecord, RunEvent, RunObserver, RunReport};

struct Console<W> {
    out: W,
    current: String,
}

/// Prints per-document token usage, each record, and the run totals.
pub struct ConsoleObserver<W> {
    inner: Mutex<Console<W>>,
}

impl ConsoleObserver<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> ConsoleObserver<W> {
    pub fn new(out: W) -> Self {
        Self {
            inner: Mutex::new(Console {
                out,
                current: String::new(),
            }),
        }
    }

    pub fn into_inner(self) -> W {
        match self.inner.into_inner() {
            Ok(console) => console.out,
            Err(poisoned) => poisoned.into_inner().out,
        }
    }

    fn console(&self) -> MutexGuard<'_, Console<W>> {
        match self.inner.lock() {
            Ok(console) => console,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write> Console<W> {
    fn print(&mut self, text: &str) {
        // Console output is best effort.
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write + Send> RunObserver for ConsoleObserver<W> {
    fn on_event(&self, event: &RunEvent) {
        let mut console = self.console();
        match event {
            RunEvent::Pending { document_id, .. } => console.current = document_id.clone(),
            RunEvent::Invoked { usage, .. } if !usage.is_zero() => {
                let line = format!(
                    "[tokens:{}] prompt={} completion={} total={}",
                    console.current,
                    usage.prompt_tokens,
                    usage.completion_tokens,
                    usage.total_tokens
                );
                console.print(&line);
            }
            _ => {}
        }
    }

    fn on_record(&self, record: &ClassificationRecord) {
        let body = serde_json::to_string_pretty(record)
            .unwrap_or_else(|err| format!("<unprintable record: {err}>"));
        self.console()
            .print(&format!("\n=== {} ===\n{body}", record.document_id));
    }

    fn on_run_complete(&self, report: &RunReport) {
        let totals = report.totals;
        self.console().print(&format!(
            "\nTOTAL TOKENS: prompt={} completion={} total={}\nOK: {}  ERROR: {}",
            totals.prompt_tokens,
            totals.completion_tokens,
            totals.total_tokens,
            totals.ok_count,
            totals.error_count
        ));
    }
}
