use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{GlobeError, GlobeResult};

/// Sink for "toggle selection" requests issued on country click.
///
/// The host applies the toggle to its own selection state and later
/// delivers a refreshed query result through `GlobeEngine::paint`.
pub trait SelectionHost {
    fn toggle_selection(&mut self, field: &str, value: &str) -> GlobeResult<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Default)]
struct RecordingInner {
    requests: Vec<SelectionRequest>,
    reject_reason: Option<String>,
}

/// Records every request; can be switched to reject them.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSelectionHost {
    inner: Rc<RefCell<RecordingInner>>,
}

impl RecordingSelectionHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent requests fail with `reason`; `None` accepts again.
    pub fn set_reject_reason(&self, reason: Option<&str>) {
        self.inner.borrow_mut().reject_reason = reason.map(str::to_owned);
    }

    #[must_use]
    pub fn requests(&self) -> Vec<SelectionRequest> {
        self.inner.borrow().requests.clone()
    }
}

impl SelectionHost for RecordingSelectionHost {
    fn toggle_selection(&mut self, field: &str, value: &str) -> GlobeResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.requests.push(SelectionRequest {
            field: field.to_owned(),
            value: value.to_owned(),
        });
        match &inner.reject_reason {
            Some(reason) => Err(GlobeError::SelectionRejected {
                country: value.to_owned(),
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}
