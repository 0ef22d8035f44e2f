//! Ward registry: the beds of a hospital and their occupancy.
//!
//! Beds are kept in registry order, which is also the order in which a transfer looks for a
//! free destination bed. Ids are assigned sequentially from 1 and beds are never removed, so a
//! bed's id is its position in the registry plus one.
//!
//! Every mutating operation validates first and mutates last. A call that returns an error
//! leaves the registry untouched.

use crate::error::{AllocationError, AllocationResult};
use crate::plan::WardPlan;
use std::fmt;
use std::num::NonZeroU32;
use ward_types::{PatientId, WardType};

/// Identifier of a bed; a positive integer stable for the lifetime of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BedId(NonZeroU32);

impl BedId {
    /// Returns `None` for zero.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Display for BedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single allocatable bed.
///
/// Occupancy is stored as the occupant itself, so "occupied" and "has a patient" cannot
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bed {
    id: BedId,
    ward: WardType,
    occupant: Option<PatientId>,
}

impl Bed {
    pub fn id(&self) -> BedId {
        self.id
    }

    pub fn ward(&self) -> &WardType {
        &self.ward
    }

    pub fn occupant(&self) -> Option<&PatientId> {
        self.occupant.as_ref()
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Availability counts for one ward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WardCount {
    pub available: usize,
    pub occupied: usize,
}

impl WardCount {
    pub fn total(&self) -> usize {
        self.available + self.occupied
    }
}

/// Result of a successful transfer: both beds as they are after the move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub from: Bed,
    pub to: Bed,
}

impl Transfer {
    pub fn patient(&self) -> Option<&PatientId> {
        self.to.occupant()
    }
}

/// Id of the bed that would follow `len` existing beds.
fn next_bed_id(len: usize) -> AllocationResult<BedId> {
    u32::try_from(len)
        .ok()
        .and_then(|n| n.checked_add(1))
        .and_then(BedId::new)
        .ok_or(AllocationError::CapacityExhausted)
}

/// The set of beds of a hospital, grouped by ward.
#[derive(Debug, Clone, Default)]
pub struct WardRegistry {
    beds: Vec<Bed>,
    wards: Vec<WardType>,
}

impl WardRegistry {
    /// Creates an empty registry with no wards declared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a registry from a ward plan. Bed ids follow the order of the plan.
    pub fn from_plan(plan: &WardPlan) -> Self {
        let mut registry = Self::new();
        'seeding: for seed in plan.wards() {
            registry.wards.push(seed.ward.clone());
            for _ in 0..seed.beds {
                // WardPlan::new keeps the total within the id space.
                let Ok(id) = next_bed_id(registry.beds.len()) else {
                    break 'seeding;
                };
                registry.push_bed(id, seed.ward.clone());
            }
        }
        tracing::debug!(
            beds = registry.beds.len(),
            wards = registry.wards.len(),
            "seeded ward registry"
        );
        registry
    }

    /// Declares a new ward with `beds` unoccupied beds.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::DuplicateWard`] if the ward is already declared, or
    /// [`AllocationError::CapacityExhausted`] if the new beds would run out of bed ids.
    pub fn add_ward(&mut self, ward: WardType, beds: u32) -> AllocationResult<WardCount> {
        if self.wards.contains(&ward) {
            return Err(AllocationError::DuplicateWard(ward));
        }
        if beds > 0 {
            next_bed_id(self.beds.len() + beds as usize - 1)?;
        }
        self.wards.push(ward.clone());
        for _ in 0..beds {
            let id = next_bed_id(self.beds.len())?;
            self.push_bed(id, ward.clone());
        }
        tracing::info!(ward = %ward, beds, "ward added");
        Ok(self.count_by_ward(&ward))
    }

    /// Appends an unoccupied bed to `ward`, declaring the ward if it is new.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::CapacityExhausted`] once every bed id is taken.
    pub fn add_bed(&mut self, ward: WardType) -> AllocationResult<Bed> {
        let id = next_bed_id(self.beds.len())?;
        if !self.wards.contains(&ward) {
            self.wards.push(ward.clone());
        }
        let bed = self.push_bed(id, ward).clone();
        tracing::info!(bed = %bed.id, ward = %bed.ward, "bed added");
        Ok(bed)
    }

    fn push_bed(&mut self, id: BedId, ward: WardType) -> &Bed {
        self.beds.push(Bed {
            id,
            ward,
            occupant: None,
        });
        &self.beds[self.beds.len() - 1]
    }

    /// Looks up a bed by id.
    pub fn bed(&self, id: BedId) -> AllocationResult<&Bed> {
        self.index_of(id).map(|i| &self.beds[i])
    }

    /// All beds in registry order.
    pub fn beds(&self) -> &[Bed] {
        &self.beds
    }

    /// Beds of one ward in registry order.
    pub fn beds_in<'a>(&'a self, ward: &'a WardType) -> impl Iterator<Item = &'a Bed> + 'a {
        self.beds.iter().filter(move |bed| &bed.ward == ward)
    }

    /// Declared wards in declaration order.
    pub fn wards(&self) -> &[WardType] {
        &self.wards
    }

    /// Occupies an empty bed.
    ///
    /// Does not consult any queue; callers dequeue first.
    pub fn allocate(&mut self, id: BedId, patient: PatientId) -> AllocationResult<Bed> {
        let index = self.index_of(id)?;
        let bed = &mut self.beds[index];
        if bed.occupant.is_some() {
            return Err(AllocationError::AlreadyOccupied(id));
        }
        tracing::info!(bed = %id, ward = %bed.ward, patient = %patient, "bed allocated");
        bed.occupant = Some(patient);
        Ok(bed.clone())
    }

    /// Empties an occupied bed and returns the patient that was in it.
    pub fn deallocate(&mut self, id: BedId) -> AllocationResult<PatientId> {
        let patient = self.release(id)?;
        tracing::info!(bed = %id, patient = %patient, intent = "deallocate", "bed released");
        Ok(patient)
    }

    /// Same transition as [`WardRegistry::deallocate`], recorded as a discharge.
    pub fn discharge(&mut self, id: BedId) -> AllocationResult<PatientId> {
        let patient = self.release(id)?;
        tracing::info!(bed = %id, patient = %patient, intent = "discharge", "bed released");
        Ok(patient)
    }

    fn release(&mut self, id: BedId) -> AllocationResult<PatientId> {
        let index = self.index_of(id)?;
        self.beds[index]
            .occupant
            .take()
            .ok_or(AllocationError::NotOccupied(id))
    }

    /// Moves the patient in `id` to the first unoccupied bed of `target`.
    ///
    /// Either both beds change or neither does.
    pub fn transfer(&mut self, id: BedId, target: &WardType) -> AllocationResult<Transfer> {
        let source = self.index_of(id)?;
        let source_bed = &self.beds[source];
        if source_bed.occupant.is_none() {
            return Err(AllocationError::SourceNotOccupied(id));
        }
        if &source_bed.ward == target {
            return Err(AllocationError::SameWard {
                bed: id,
                ward: target.clone(),
            });
        }
        let destination = self
            .beds
            .iter()
            .position(|bed| &bed.ward == target && bed.occupant.is_none())
            .ok_or_else(|| AllocationError::NoBedAvailable(target.clone()))?;

        let patient = self.beds[source].occupant.take();
        self.beds[destination].occupant = patient;

        let transfer = Transfer {
            from: self.beds[source].clone(),
            to: self.beds[destination].clone(),
        };
        tracing::info!(
            from = %transfer.from.id,
            to = %transfer.to.id,
            ward = %target,
            "patient transferred"
        );
        Ok(transfer)
    }

    /// Available and occupied counts for one ward. Unknown wards count as empty.
    pub fn count_by_ward(&self, ward: &WardType) -> WardCount {
        self.beds_in(ward).fold(WardCount::default(), |mut count, bed| {
            if bed.is_occupied() {
                count.occupied += 1;
            } else {
                count.available += 1;
            }
            count
        })
    }

    /// Counts for every declared ward, in declaration order.
    pub fn summary(&self) -> Vec<(WardType, WardCount)> {
        self.wards
            .iter()
            .map(|ward| (ward.clone(), self.count_by_ward(ward)))
            .collect()
    }

    fn index_of(&self, id: BedId) -> AllocationResult<usize> {
        let index = id.index();
        match self.beds.get(index) {
            Some(bed) if bed.id == id => Ok(index),
            _ => Err(AllocationError::BedNotFound(id)),
        }
    }
}
