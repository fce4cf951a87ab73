use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Identity ---

/// Role
///
/// The three kinds of campus users. Serialized lowercase on the wire and in `profiles.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Role {
    #[default]
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// User
///
/// A row of the `profiles` table: the local mirror of an identity provider account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct User {
    // Same id as the identity provider's user.
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// LoginRequest
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// RegisterUserRequest
///
/// The password is passed through to the identity provider and never stored or logged here.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// SessionResponse
///
/// The client-side view of an authenticated session. Tokens are absent after a
/// registration that still awaits email confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct SessionResponse {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

// --- Classrooms ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ClassroomStatus {
    Available,
    Occupied,
    Maintenance,
}

impl FromStr for ClassroomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Ok(ClassroomStatus::Available),
            "occupied" => Ok(ClassroomStatus::Occupied),
            "maintenance" => Ok(ClassroomStatus::Maintenance),
            other => Err(format!("unknown classroom status '{other}'")),
        }
    }
}

/// Classroom
///
/// `time_slot` is only present while the room is occupied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Classroom {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub location: String,
    pub status: ClassroomStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
}

/// UpdateClassroomStatusRequest
///
/// Admin override payload (PUT /admin/classrooms/{id}/status).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UpdateClassroomStatusRequest {
    pub status: ClassroomStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
}

// --- Faculty ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FacultyStatus {
    Available,
    Busy,
    Offline,
}

impl FromStr for FacultyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Ok(FacultyStatus::Available),
            "busy" => Ok(FacultyStatus::Busy),
            "offline" => Ok(FacultyStatus::Offline),
            other => Err(format!("unknown faculty status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Faculty {
    pub id: String,
    pub name: String,
    pub department: String,
    pub email: String,
    pub phone: String,
    pub status: FacultyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_hours: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MeetingStatus {
    Pending,
}

/// MeetingRequest
///
/// Recorded when a user asks an available faculty member for a meeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MeetingRequest {
    pub id: Uuid,
    pub faculty_id: String,
    pub faculty_name: String,
    pub requester_id: Uuid,
    pub status: MeetingStatus,
    #[ts(type = "string")]
    pub requested_at: DateTime<Utc>,
}

// --- Canteens ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Canteen {
    pub id: String,
    pub name: String,
    pub location: String,
    pub opening_hours: String,
    pub menu: Vec<MenuItem>,
}

/// MealCategory
///
/// Canteen tabs. A canteen belongs to a category when its menu carries one of the
/// category's signature items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum MealCategory {
    #[default]
    All,
    Breakfast,
    Lunch,
    Snacks,
}

impl FromStr for MealCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(MealCategory::All),
            "breakfast" => Ok(MealCategory::Breakfast),
            "lunch" => Ok(MealCategory::Lunch),
            "snacks" => Ok(MealCategory::Snacks),
            other => Err(format!("unknown meal category '{other}'")),
        }
    }
}

// --- Landing page ---

/// Feature
///
/// One of the service tiles shown on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Feature {
    pub title: String,
    pub description: String,
    pub link: String,
}

/// ErrorBody
///
/// JSON shape of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}
