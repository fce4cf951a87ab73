use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::{
        Canteen, Classroom, ClassroomStatus, Faculty, FacultyStatus, MeetingRequest,
        MeetingStatus,
    },
    search::{CanteenFilter, ClassroomFilter, FacultyFilter},
    seed,
};

/// Time slot assigned to a room reserved through the API.
pub const DEFAULT_RESERVATION_SLOT: &str = "12:00 PM - 01:30 PM";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CampusError {
    #[error("{0} not found")]
    NotFound(String),

    /// The record exists but its current state does not allow the action.
    #[error("{0}")]
    Conflict(String),
}

/// CampusRepository
///
/// Contract of the campus catalogue: classrooms, faculty and canteens, plus the
/// state-toggling actions users may perform on them.
#[async_trait]
pub trait CampusRepository: Send + Sync {
    async fn classrooms(&self, filter: &ClassroomFilter) -> Vec<Classroom>;
    /// available -> occupied.
    async fn reserve_classroom(&self, id: &str) -> Result<Classroom, CampusError>;
    /// occupied -> available.
    async fn release_classroom(&self, id: &str) -> Result<Classroom, CampusError>;
    /// Admin override, no transition rules.
    async fn set_classroom_status(
        &self,
        id: &str,
        status: ClassroomStatus,
        time_slot: Option<String>,
    ) -> Result<Classroom, CampusError>;

    async fn faculty(&self, filter: &FacultyFilter) -> Vec<Faculty>;
    /// Unique departments in catalogue order.
    async fn departments(&self) -> Vec<String>;
    async fn request_meeting(
        &self,
        faculty_id: &str,
        requester_id: Uuid,
    ) -> Result<MeetingRequest, CampusError>;
    /// Newest first.
    async fn meetings_for(&self, requester_id: Uuid) -> Vec<MeetingRequest>;

    async fn canteens(&self, filter: &CanteenFilter) -> Vec<Canteen>;
}

pub type CampusState = Arc<dyn CampusRepository>;

#[derive(Debug, Default)]
struct Catalogue {
    classrooms: Vec<Classroom>,
    faculty: Vec<Faculty>,
    canteens: Vec<Canteen>,
    meetings: Vec<MeetingRequest>,
}

/// InMemoryCampus
///
/// `CampusRepository` over process memory. All mutations take the write lock, so concurrent
/// reservations of the same room resolve to exactly one winner.
pub struct InMemoryCampus {
    inner: RwLock<Catalogue>,
}

impl InMemoryCampus {
    pub fn new(classrooms: Vec<Classroom>, faculty: Vec<Faculty>, canteens: Vec<Canteen>) -> Self {
        Self {
            inner: RwLock::new(Catalogue {
                classrooms,
                faculty,
                canteens,
                meetings: Vec::new(),
            }),
        }
    }

    /// Store preloaded with the demo campus.
    pub fn seeded() -> Self {
        Self::new(seed::classrooms(), seed::faculty(), seed::canteens())
    }
}

fn find_room<'a>(rooms: &'a mut [Classroom], id: &str) -> Result<&'a mut Classroom, CampusError> {
    rooms
        .iter_mut()
        .find(|room| room.id == id)
        .ok_or_else(|| CampusError::NotFound(format!("classroom {id}")))
}

#[async_trait]
impl CampusRepository for InMemoryCampus {
    async fn classrooms(&self, filter: &ClassroomFilter) -> Vec<Classroom> {
        let catalogue = self.inner.read().await;
        catalogue
            .classrooms
            .iter()
            .filter(|room| filter.matches(room))
            .cloned()
            .collect()
    }

    async fn reserve_classroom(&self, id: &str) -> Result<Classroom, CampusError> {
        let mut catalogue = self.inner.write().await;
        let room = find_room(&mut catalogue.classrooms, id)?;
        match room.status {
            ClassroomStatus::Available => {
                room.status = ClassroomStatus::Occupied;
                room.time_slot = Some(DEFAULT_RESERVATION_SLOT.to_string());
                tracing::info!(classroom = %room.name, "classroom reserved");
                Ok(room.clone())
            }
            ClassroomStatus::Occupied => Err(CampusError::Conflict(format!(
                "{} is already occupied",
                room.name
            ))),
            ClassroomStatus::Maintenance => Err(CampusError::Conflict(format!(
                "{} is under maintenance",
                room.name
            ))),
        }
    }

    async fn release_classroom(&self, id: &str) -> Result<Classroom, CampusError> {
        let mut catalogue = self.inner.write().await;
        let room = find_room(&mut catalogue.classrooms, id)?;
        if room.status != ClassroomStatus::Occupied {
            return Err(CampusError::Conflict(format!(
                "{} is not currently occupied",
                room.name
            )));
        }
        room.status = ClassroomStatus::Available;
        room.time_slot = None;
        tracing::info!(classroom = %room.name, "classroom released");
        Ok(room.clone())
    }

    async fn set_classroom_status(
        &self,
        id: &str,
        status: ClassroomStatus,
        time_slot: Option<String>,
    ) -> Result<Classroom, CampusError> {
        let mut catalogue = self.inner.write().await;
        let room = find_room(&mut catalogue.classrooms, id)?;
        room.time_slot = match status {
            ClassroomStatus::Occupied => {
                Some(time_slot.unwrap_or_else(|| DEFAULT_RESERVATION_SLOT.to_string()))
            }
            _ => None,
        };
        room.status = status;
        tracing::info!(classroom = %room.name, ?status, "classroom status overridden");
        Ok(room.clone())
    }

    async fn faculty(&self, filter: &FacultyFilter) -> Vec<Faculty> {
        let catalogue = self.inner.read().await;
        catalogue
            .faculty
            .iter()
            .filter(|person| filter.matches(person))
            .cloned()
            .collect()
    }

    async fn departments(&self) -> Vec<String> {
        let catalogue = self.inner.read().await;
        let mut departments: Vec<String> = Vec::new();
        for person in &catalogue.faculty {
            if !departments.contains(&person.department) {
                departments.push(person.department.clone());
            }
        }
        departments
    }

    async fn request_meeting(
        &self,
        faculty_id: &str,
        requester_id: Uuid,
    ) -> Result<MeetingRequest, CampusError> {
        let mut catalogue = self.inner.write().await;
        let person = catalogue
            .faculty
            .iter()
            .find(|person| person.id == faculty_id)
            .ok_or_else(|| CampusError::NotFound(format!("faculty member {faculty_id}")))?;

        // Busy faculty still take requests; only offline ones are unreachable.
        if person.status == FacultyStatus::Offline {
            return Err(CampusError::Conflict(format!("{} is offline", person.name)));
        }

        let request = MeetingRequest {
            id: Uuid::new_v4(),
            faculty_id: person.id.clone(),
            faculty_name: person.name.clone(),
            requester_id,
            status: MeetingStatus::Pending,
            requested_at: Utc::now(),
        };
        catalogue.meetings.push(request.clone());
        tracing::info!(faculty = %request.faculty_name, %requester_id, "meeting requested");
        Ok(request)
    }

    async fn meetings_for(&self, requester_id: Uuid) -> Vec<MeetingRequest> {
        let catalogue = self.inner.read().await;
        catalogue
            .meetings
            .iter()
            .rev()
            .filter(|meeting| meeting.requester_id == requester_id)
            .cloned()
            .collect()
    }

    async fn canteens(&self, filter: &CanteenFilter) -> Vec<Canteen> {
        let catalogue = self.inner.read().await;
        catalogue
            .canteens
            .iter()
            .filter(|canteen| filter.matches(canteen))
            .cloned()
            .collect()
    }
}
