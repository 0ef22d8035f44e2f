//! Waiting lists.
//!
//! [`AdmissionQueue`] is a plain FIFO of patients waiting for a bed. [`TriageQueue`] is the OPD
//! variant: an emergency lane and a normal lane, where the emergency lane is always served
//! first. There is no aging, so a steady stream of emergencies starves the normal lane.
//!
//! Neither queue deduplicates: the same patient may be waiting more than once, and removal by
//! id removes only the first match.

use crate::constants::REORDER_WARNING_DISMISS_SECS;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use ward_types::PatientId;

/// Anything that can wait in a queue on behalf of a patient.
pub trait QueueEntry {
    fn patient_id(&self) -> &PatientId;
}

impl QueueEntry for PatientId {
    fn patient_id(&self) -> &PatientId {
        self
    }
}

/// Direction of a manual reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderDirection {
    /// Towards the head of the queue.
    Up,
    /// Towards the tail of the queue.
    Down,
}

impl FromStr for ReorderDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(format!("unknown direction '{}' (expected up or down)", other)),
        }
    }
}

/// Raised whenever a manual reorder actually moved someone.
///
/// Reordering overrides arrival order and can silently change clinical priority, so callers
/// are expected to surface this to the user for [`ReorderWarning::dismiss_after`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderWarning {
    pub patient: PatientId,
    pub from: usize,
    pub to: usize,
    pub dismiss_after: Duration,
}

impl ReorderWarning {
    fn new(patient: PatientId, from: usize, to: usize) -> Self {
        Self {
            patient,
            from,
            to,
            dismiss_after: Duration::from_secs(REORDER_WARNING_DISMISS_SECS),
        }
    }
}

impl fmt::Display for ReorderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient {} moved from position {} to {}; the queue no longer follows arrival order",
            self.patient,
            self.from + 1,
            self.to + 1
        )
    }
}

/// FIFO waiting list.
#[derive(Debug, Clone)]
pub struct AdmissionQueue<T = PatientId> {
    entries: VecDeque<T>,
}

impl<T> Default for AdmissionQueue<T> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<T: QueueEntry> AdmissionQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the tail.
    pub fn enqueue(&mut self, entry: T) {
        self.entries.push_back(entry);
    }

    /// Puts an entry back at the head, ahead of everyone else.
    pub fn requeue_front(&mut self, entry: T) {
        self.entries.push_front(entry);
    }

    /// Pops the head.
    pub fn dequeue_next(&mut self) -> Option<T> {
        self.entries.pop_front()
    }

    pub fn peek_next(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Index of the first entry for `patient`.
    pub fn position(&self, patient: &PatientId) -> Option<usize> {
        self.entries.iter().position(|e| e.patient_id() == patient)
    }

    /// Swaps the entry at `index` with its neighbour in `direction`.
    ///
    /// Moving the head up, the tail down, or an index past the end is a no-op and returns
    /// `None`.
    pub fn reorder(&mut self, index: usize, direction: ReorderDirection) -> Option<ReorderWarning> {
        let target = match direction {
            ReorderDirection::Up => index.checked_sub(1)?,
            ReorderDirection::Down => index.checked_add(1)?,
        };
        if index >= self.entries.len() || target >= self.entries.len() {
            return None;
        }
        self.entries.swap(index, target);

        let warning = ReorderWarning::new(self.entries[target].patient_id().clone(), index, target);
        tracing::warn!(
            patient = %warning.patient,
            from = index,
            to = target,
            "queue manually reordered"
        );
        Some(warning)
    }

    /// Removes the first entry for `patient`.
    pub fn remove_patient(&mut self, patient: &PatientId) -> Option<T> {
        let index = self.position(patient)?;
        self.entries.remove(index)
    }

    /// Removes the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.entries.remove(index)
    }
}

/// Urgency of an OPD registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    #[default]
    Normal,
    Emergency,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Normal => "Normal",
            Priority::Emergency => "Emergency",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "emergency" => Ok(Self::Emergency),
            other => Err(format!(
                "unknown priority '{}' (expected Normal or Emergency)",
                other
            )),
        }
    }
}

/// Two-lane waiting list with strict emergency priority.
#[derive(Debug, Clone)]
pub struct TriageQueue<T = PatientId> {
    emergency: AdmissionQueue<T>,
    normal: AdmissionQueue<T>,
}

impl<T> Default for TriageQueue<T> {
    fn default() -> Self {
        Self {
            emergency: AdmissionQueue::default(),
            normal: AdmissionQueue::default(),
        }
    }
}

impl<T: QueueEntry> TriageQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, entry: T, priority: Priority) {
        self.lane_mut(priority).enqueue(entry);
    }

    pub fn requeue_front(&mut self, entry: T, priority: Priority) {
        self.lane_mut(priority).requeue_front(entry);
    }

    /// Serves the emergency lane if it has anyone, otherwise the normal lane.
    pub fn dequeue_next(&mut self) -> Option<(T, Priority)> {
        if let Some(entry) = self.emergency.dequeue_next() {
            return Some((entry, Priority::Emergency));
        }
        self.normal
            .dequeue_next()
            .map(|entry| (entry, Priority::Normal))
    }

    pub fn lane(&self, priority: Priority) -> &AdmissionQueue<T> {
        match priority {
            Priority::Emergency => &self.emergency,
            Priority::Normal => &self.normal,
        }
    }

    fn lane_mut(&mut self, priority: Priority) -> &mut AdmissionQueue<T> {
        match priority {
            Priority::Emergency => &mut self.emergency,
            Priority::Normal => &mut self.normal,
        }
    }

    /// Reorders within one lane; entries never cross lanes.
    pub fn reorder(
        &mut self,
        priority: Priority,
        index: usize,
        direction: ReorderDirection,
    ) -> Option<ReorderWarning> {
        self.lane_mut(priority).reorder(index, direction)
    }

    /// Removes the first entry for `patient`, looking in the emergency lane first.
    pub fn remove_patient(&mut self, patient: &PatientId) -> Option<(T, Priority)> {
        if let Some(entry) = self.emergency.remove_patient(patient) {
            return Some((entry, Priority::Emergency));
        }
        self.normal
            .remove_patient(patient)
            .map(|entry| (entry, Priority::Normal))
    }

    pub fn len(&self) -> usize {
        self.emergency.len() + self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emergency.is_empty() && self.normal.is_empty()
    }
}
