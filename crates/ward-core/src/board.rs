//! The bed board: a ward registry together with the queue of patients waiting for a bed.
//!
//! Booking a bed takes the next waiting patient and allocates them to the chosen bed as one
//! step. If the allocation fails the patient goes back to the head of the queue, so nobody is
//! dropped by a failed booking.

use crate::error::{AllocationError, AllocationResult};
use crate::plan::WardPlan;
use crate::queue::AdmissionQueue;
use crate::registry::{Bed, BedId, WardRegistry};
use ward_types::PatientId;

/// Owned allocation state for one hospital.
#[derive(Debug, Clone, Default)]
pub struct BedBoard {
    registry: WardRegistry,
    queue: AdmissionQueue,
}

impl BedBoard {
    pub fn new(registry: WardRegistry) -> Self {
        Self {
            registry,
            queue: AdmissionQueue::new(),
        }
    }

    pub fn from_plan(plan: &WardPlan) -> Self {
        Self::new(WardRegistry::from_plan(plan))
    }

    pub fn registry(&self) -> &WardRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WardRegistry {
        &mut self.registry
    }

    pub fn queue(&self) -> &AdmissionQueue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut AdmissionQueue {
        &mut self.queue
    }

    /// Adds a patient to the waiting list.
    pub fn enqueue(&mut self, patient: PatientId) {
        tracing::info!(patient = %patient, waiting = self.queue.len() + 1, "patient queued");
        self.queue.enqueue(patient);
    }

    /// Allocates the next waiting patient to `bed`.
    ///
    /// # Errors
    ///
    /// - [`AllocationError::NoWaitingPatient`] if nobody is waiting; nothing changes.
    /// - Any error from [`WardRegistry::allocate`]; the patient is put back at the head of
    ///   the queue first.
    pub fn book(&mut self, bed: BedId) -> AllocationResult<Bed> {
        let patient = self
            .queue
            .dequeue_next()
            .ok_or(AllocationError::NoWaitingPatient)?;

        match self.registry.allocate(bed, patient.clone()) {
            Ok(booked) => Ok(booked),
            Err(err) => {
                tracing::warn!(
                    bed = %bed,
                    patient = %patient,
                    error = %err,
                    "booking failed, patient requeued"
                );
                self.queue.requeue_front(patient);
                Err(err)
            }
        }
    }
}
