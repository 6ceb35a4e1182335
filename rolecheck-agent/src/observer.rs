use crate::{ClassificationRecord, RunEvent, RunReport};

pub trait RunObserver: Send + Sync {
    fn on_event(&self, _event: &RunEvent) {}
    fn on_record(&self, _record: &ClassificationRecord) {}
    fn on_run_complete(&self, _report: &RunReport) {}
}

pub struct NoopObserver;

impl RunObserver for NoopObserver {}
