use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use rolecheck_core::{ChatModel, Document, RolecheckError};
use rolecheck_prompt::RoleCheckPrompt;

use crate::{
    validate_response, ClassificationRecord, ClassifierConfig, ModelInvoker, NoopObserver,
    RecordBuilder, RunEvent, RunObserver, SchemaContract,
};

/// Token and outcome counts summed over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub ok_count: usize,
    pub error_count: usize,
}

impl RunTotals {
    pub fn add(&mut self, record: &ClassificationRecord) {
        self.prompt_tokens += u64::from(record.usage.prompt_tokens);
        self.completion_tokens += u64::from(record.usage.completion_tokens);
        self.total_tokens += u64::from(record.usage.total_tokens);
        if record.is_classified() {
            self.ok_count += 1;
        } else {
            self.error_count += 1;
        }
    }

    pub fn documents(&self) -> usize {
        self.ok_count + self.error_count
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub model: String,
    pub role: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records: Vec<ClassificationRecord>,
    pub totals: RunTotals,
}

/// Classifies documents one after another and collects the results.
pub struct RunAggregator<M> {
    config: ClassifierConfig,
    prompt: RoleCheckPrompt,
    invoker: ModelInvoker<M>,
    records: RecordBuilder,
}

impl<M: ChatModel> RunAggregator<M> {
    pub fn new(model: M, config: ClassifierConfig) -> Result<Self, RolecheckError> {
        config.validate()?;
        if !config.schema_matches_prompt() {
            warn!(
                role = %config.role,
                label_field = %config.schema.label_field(),
                "schema contract differs from the fields the prompt asks for"
            );
        }
        let prompt = RoleCheckPrompt::new(&config.role)?;
        let invoker = ModelInvoker::new(model, &config);
        let records = RecordBuilder::new(&config.schema);
        Ok(Self {
            config,
            prompt,
            invoker,
            records,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn schema(&self) -> &SchemaContract {
        &self.config.schema
    }

    pub async fn run<I>(&self, documents: I) -> RunReport
    where
        I: IntoIterator<Item = Document>,
    {
        self.run_with_observer(documents, &NoopObserver).await
    }

    pub async fn run_with_observer<I>(&self, documents: I, observer: &dyn RunObserver) -> RunReport
    where
        I: IntoIterator<Item = Document>,
    {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, model = %self.config.model, role = %self.config.role, "run started");

        let mut records = Vec::new();
        let mut totals = RunTotals::default();
        for (index, document) in documents.into_iter().enumerate() {
            let record = self.classify(index, &document, observer).await;
            totals.add(&record);
            observer.on_record(&record);
            records.push(record);
        }

        let report = RunReport {
            run_id,
            model: self.config.model.clone(),
            role: self.config.role.clone(),
            started_at,
            finished_at: Utc::now(),
            records,
            totals,
        };
        info!(
            %run_id,
            documents = totals.documents(),
            ok = totals.ok_count,
            errors = totals.error_count,
            total_tokens = totals.total_tokens,
            "run finished"
        );
        observer.on_run_complete(&report);
        report
    }

    /// Runs one document through prompt, model call, validation and record building.
    pub async fn classify(
        &self,
        index: usize,
        document: &Document,
        observer: &dyn RunObserver,
    ) -> ClassificationRecord {
        emit(
            observer,
            RunEvent::Pending {
                index,
                document_id: document.id.clone(),
            },
        );

        let response = self.invoker.invoke(self.prompt.build(document)).await;
        emit(
            observer,
            RunEvent::Invoked {
                index,
                attempts: response.attempts,
                usage: response.usage,
            },
        );

        let validation = validate_response(&response, &self.config.schema);
        match &validation {
            Ok(_) => emit(observer, RunEvent::Validated { index }),
            Err(error) => emit(
                observer,
                RunEvent::ValidationFailed {
                    index,
                    kind: error.kind(),
                },
            ),
        }

        let record = self.records.build(document, validation, response.usage);
        emit(
            observer,
            RunEvent::Recorded {
                index,
                status: record.status,
            },
        );
        record
    }
}

fn emit(observer: &dyn RunObserver, event: RunEvent) {
    debug!(index = event.index(), phase = event.phase(), "document transition");
    observer.on_event(&event);
}
