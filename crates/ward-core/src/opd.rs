//! Outpatient department desk.
//!
//! Walk-in patients are registered with a short generated code and wait in one of two lanes
//! for a specialist. Emergencies are always called before normal registrations.

use crate::error::{AllocationError, AllocationResult};
use crate::queue::{
    AdmissionQueue, Priority, QueueEntry, ReorderDirection, ReorderWarning, TriageQueue,
};
use ward_types::PatientId;
use ward_uuid::RecordUuid;

/// Details captured at OPD registration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewOutpatient {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact_number: String,
    pub priority: Priority,
    pub symptoms: String,
}

/// A registered outpatient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpdPatient {
    pub id: PatientId,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact_number: String,
    pub priority: Priority,
    pub symptoms: String,
}

impl QueueEntry for OpdPatient {
    fn patient_id(&self) -> &PatientId {
        &self.id
    }
}

/// Waiting-list sizes shown on the OPD dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpdCounts {
    pub normal: usize,
    pub emergency: usize,
}

impl OpdCounts {
    pub fn total(&self) -> usize {
        self.normal + self.emergency
    }
}

#[derive(Debug, Clone, Default)]
pub struct OpdDesk {
    queue: TriageQueue<OpdPatient>,
}

impl OpdDesk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an outpatient under a fresh code and queues them by priority.
    pub fn register(&mut self, details: NewOutpatient) -> OpdPatient {
        let patient = OpdPatient {
            id: self.fresh_id(),
            name: details.name,
            age: details.age,
            gender: details.gender,
            contact_number: details.contact_number,
            priority: details.priority,
            symptoms: details.symptoms,
        };
        tracing::info!(
            patient = %patient.id,
            priority = %patient.priority,
            "outpatient registered"
        );
        self.queue.enqueue(patient.clone(), patient.priority);
        patient
    }

    fn fresh_id(&self) -> PatientId {
        loop {
            if let Ok(id) = PatientId::new(RecordUuid::short_code()) {
                if self.find(&id).is_none() {
                    return id;
                }
            }
        }
    }

    /// Looks up a waiting outpatient by code.
    pub fn find(&self, id: &PatientId) -> Option<&OpdPatient> {
        [Priority::Emergency, Priority::Normal]
            .into_iter()
            .flat_map(|priority| self.queue.lane(priority).iter())
            .find(|patient| &patient.id == id)
    }

    /// Calls the next outpatient, emergencies first.
    pub fn call_next(&mut self) -> AllocationResult<OpdPatient> {
        let (patient, priority) = self
            .queue
            .dequeue_next()
            .ok_or(AllocationError::NoWaitingPatient)?;
        tracing::info!(patient = %patient.id, priority = %priority, "outpatient called");
        Ok(patient)
    }

    /// Removes a waiting outpatient, e.g. one who left without being seen.
    pub fn remove(&mut self, id: &PatientId) -> Option<OpdPatient> {
        let (patient, _) = self.queue.remove_patient(id)?;
        tracing::info!(patient = %patient.id, "outpatient removed from queue");
        Some(patient)
    }

    pub fn reorder(
        &mut self,
        priority: Priority,
        index: usize,
        direction: ReorderDirection,
    ) -> Option<ReorderWarning> {
        self.queue.reorder(priority, index, direction)
    }

    pub fn lane(&self, priority: Priority) -> &AdmissionQueue<OpdPatient> {
        self.queue.lane(priority)
    }

    pub fn counts(&self) -> OpdCounts {
        OpdCounts {
            normal: self.queue.lane(Priority::Normal).len(),
            emergency: self.queue.lane(Priority::Emergency).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outpatient(name: &str, priority: Priority) -> NewOutpatient {
        NewOutpatient {
            name: name.into(),
            age: 40,
            gender: "F".into(),
            contact_number: "5550100".into(),
            priority,
            symptoms: "headache".into(),
        }
    }

    #[test]
    fn register_assigns_codes_and_counts_lanes() {
        let mut desk = OpdDesk::new();
        let a = desk.register(outpatient("Asha", Priority::Normal));
        let b = desk.register(outpatient("Ben", Priority::Emergency));

        assert_ne!(a.id, b.id);
        assert_eq!(a.id.as_str().len(), ward_uuid::SHORT_CODE_LEN);
        assert_eq!(
            desk.counts(),
            OpdCounts {
                normal: 1,
                emergency: 1
            }
        );
        assert_eq!(desk.counts().total(), 2);
        assert_eq!(desk.find(&b.id).map(|p| p.name.as_str()), Some("Ben"));
    }

    #[test]
    fn call_next_serves_emergency_lane_first() {
        let mut desk = OpdDesk::new();
        desk.register(outpatient("Asha", Priority::Normal));
        desk.register(outpatient("Ben", Priority::Emergency));

        assert_eq!(desk.call_next().unwrap().name, "Ben");
        assert_eq!(desk.call_next().unwrap().name, "Asha");
        assert_eq!(desk.call_next().unwrap_err(), AllocationError::NoWaitingPatient);
    }

    #[test]
    fn remove_takes_patient_out_of_their_lane() {
        let mut desk = OpdDesk::new();
        let a = desk.register(outpatient("Asha", Priority::Normal));
        assert_eq!(desk.remove(&a.id).map(|p| p.name), Some("Asha".to_string()));
        assert!(desk.remove(&a.id).is_none());
        assert_eq!(desk.counts().total(), 0);
    }

    #[test]
    fn reorder_within_lane_warns() {
        let mut desk = OpdDesk::new();
        desk.register(outpatient("Asha", Priority::Normal));
        let b = desk.register(outpatient("Ben", Priority::Normal));

        let warning = desk
            .reorder(Priority::Normal, 1, ReorderDirection::Up)
            .expect("should warn");
        assert_eq!(warning.patient, b.id);
        assert_eq!(desk.lane(Priority::Normal).peek_next().map(|p| p.name.as_str()), Some("Ben"));
    }
}
