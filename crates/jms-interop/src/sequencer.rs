//! Per-subtype accounting for the receiving side.
//!
//! Messages arrive as a flat stream. The sequencer assigns each one to the
//! subtype whose quota is still open, collects the decoded values into the
//! current batch and commits the batch under its subtype once the quota is
//! met.

use indexmap::IndexMap;
use serde_json::Value;

use crate::test_matrix::TestNumberMap;

/// Decoded values per subtype, in commit order.
pub type ReceivedValueMap = IndexMap<String, Vec<Value>>;

/// Progress through the subtype list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub sub_type_index: usize,
    pub received_count: usize,
}

#[derive(Debug, Clone)]
pub struct SubtypeSequencer {
    numbers: TestNumberMap,
    cursor: Cursor,
    batch: Vec<Value>,
    received: ReceivedValueMap,
}

impl SubtypeSequencer {
    pub fn new(numbers: TestNumberMap) -> Self {
        Self {
            numbers,
            cursor: Cursor::default(),
            batch: Vec::new(),
            received: ReceivedValueMap::new(),
        }
    }

    pub fn numbers(&self) -> &TestNumberMap {
        &self.numbers
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn batch(&self) -> &[Value] {
        &self.batch
    }

    pub fn received(&self) -> &ReceivedValueMap {
        &self.received
    }

    pub fn into_received(self) -> ReceivedValueMap {
        self.received
    }

    /// Subtype the cursor points at, if any remain.
    pub fn current(&self) -> Option<&str> {
        self.numbers.sub_types().get(self.cursor.sub_type_index)
    }

    pub fn is_subtype_complete(batch_len: usize, quota: usize) -> bool {
        batch_len >= quota
    }

    /// Subtype the next message belongs to.
    ///
    /// Subtypes with a zero quota are committed as empty sequences and
    /// stepped over first.
    pub fn begin_message(&mut self) -> Option<&str> {
        self.skip_empty_quotas();
        self.current()
    }

    pub fn push(&mut self, values: impl IntoIterator<Item = Value>) {
        self.batch.extend(values);
    }

    /// Commits the batch and moves to the next subtype when the current
    /// quota is met. Returns whether the cursor moved.
    pub fn advance(&mut self) -> bool {
        let Some(subtype) = self.current() else {
            return false;
        };
        let quota = self.numbers.count(subtype);
        if !Self::is_subtype_complete(self.batch.len(), quota) {
            return false;
        }
        self.commit();
        true
    }

    /// Records one processed message.
    pub fn record_message(&mut self) {
        self.cursor.received_count += 1;
    }

    pub fn is_run_complete(&self) -> bool {
        self.cursor.received_count >= self.numbers.expected_total()
    }

    /// Commits any trailing zero-quota subtypes once the run is complete.
    pub fn finish(&mut self) {
        self.skip_empty_quotas();
    }

    fn skip_empty_quotas(&mut self) {
        while let Some(subtype) = self.current() {
            if self.numbers.count(subtype) > 0 {
                break;
            }
            self.commit();
        }
    }

    fn commit(&mut self) {
        if let Some(subtype) = self.current() {
            let subtype = subtype.to_owned();
            let batch = std::mem::take(&mut self.batch);
            self.received.insert(subtype, batch);
        }
        self.cursor.sub_type_index += 1;
    }
}
