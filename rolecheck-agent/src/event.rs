use rolecheck_core::TokenUsage;

use crate::{FailureKind, RecordStatus};

/// A document's progress through the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunEvent {
    Pending {
        index: usize,
        document_id: String,
    },
    Invoked {
        index: usize,
        attempts: usize,
        usage: TokenUsage,
    },
    Validated {
        index: usize,
    },
    ValidationFailed {
        index: usize,
        kind: FailureKind,
    },
    Recorded {
        index: usize,
        status: RecordStatus,
    },
}

impl RunEvent {
    pub fn index(&self) -> usize {
        match self {
            RunEvent::Pending { index, .. }
            | RunEvent::Invoked { index, .. }
            | RunEvent::Validated { index }
            | RunEvent::ValidationFailed { index, .. }
            | RunEvent::Recorded { index, .. } => *index,
        }
    }

    pub fn phase(&self) -> &'static str {
        match self {
            RunEvent::Pending { .. } => "PENDING",
            RunEvent::Invoked { .. } => "INVOKED",
            RunEvent::Validated { .. } => "VALIDATED",
            RunEvent::ValidationFailed { .. } => "VALIDATION_FAILED",
            RunEvent::Recorded { .. } => "RECORDED",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            RunEvent::Pending { .. } => 0,
            RunEvent::Invoked { .. } => 1,
            RunEvent::Validated { .. } | RunEvent::ValidationFailed { .. } => 2,
            RunEvent::Recorded { .. } => 3,
        }
    }
}

/// Checks that every document walks PENDING, INVOKED, a validation outcome and
/// RECORDED in that order, and that documents do not interleave.
pub fn validate_phase_order(events: &[RunEvent]) -> Result<(), String> {
    let mut current: Option<(usize, u8)> = None;

    for (position, event) in events.iter().enumerate() {
        let index = event.index();
        let rank = event.rank();
        match current {
            None | Some((_, 3)) => {
                if rank != 0 {
                    return Err(format!(
                        "{} for document {index} at position {position} before PENDING",
                        event.phase()
                    ));
                }
                if let Some((previous, _)) = current {
                    if index != previous + 1 {
                        return Err(format!(
                            "document {index} started at position {position} after document {previous}"
                        ));
                    }
                } else if index != 0 {
                    return Err(format!("first document has index {index}"));
                }
            }
            Some((active, last_rank)) => {
                if index != active {
                    return Err(format!(
                        "document {index} event at position {position} while document {active} is unfinished"
                    ));
                }
                if rank != last_rank + 1 {
                    return Err(format!(
                        "{} for document {index} at position {position} out of order",
                        event.phase()
                    ));
                }
            }
        }
        current = Some((index, rank));
    }

    match current {
        Some((index, rank)) if rank != 3 => {
            Err(format!("document {index} was never recorded"))
        }
        _ => Ok(()),
    }
}

pub fn validate_recorded_once(events: &[RunEvent], documents: usize) -> Result<(), String> {
    let mut recorded = vec![0usize; documents];
    for event in events {
        if let RunEvent::Recorded { index, .. } = event {
            match recorded.get_mut(*index) {
                Some(count) => *count += 1,
                None => return Err(format!("recorded unknown document {index}")),
            }
        }
    }
    match recorded.iter().position(|count| *count != 1) {
        Some(index) => Err(format!(
            "document {index} recorded {} time(s)",
            recorded[index]
        )),
        None => Ok(()),
    }
}
