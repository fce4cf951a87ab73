//! Listing filters for the campus catalogue.
//!
//! Text search is a case-insensitive substring test; an empty query matches everything.
//! Every constraint left as `None` (or `all`) is ignored.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    errors::ApiError,
    models::{Canteen, Classroom, ClassroomStatus, Faculty, FacultyStatus, MealCategory},
};

/// Signature menu items per canteen tab.
pub const BREAKFAST_ITEMS: &[&str] = &["Coffee", "Tea", "Muffin"];
pub const LUNCH_ITEMS: &[&str] = &["Vegetable Sandwich", "Chicken Burger", "Pasta"];
pub const SNACK_ITEMS: &[&str] = &["Chips", "Cookies", "French Fries"];

/// contains_ignore_case
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// The query is matched as typed, surrounding whitespace included.
fn matches_any(fields: &[&str], query: Option<&str>) -> bool {
    match query {
        None | Some("") => true,
        Some(q) => fields.iter().any(|field| contains_ignore_case(field, q)),
    }
}

/// `all` and blank select nothing; anything else must parse.
fn parse_choice<T: std::str::FromStr<Err = String>>(
    raw: Option<&str>,
) -> Result<Option<T>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(ApiError::BadRequest),
    }
}

// --- Classrooms ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassroomFilter {
    pub search: Option<String>,
    pub status: Option<ClassroomStatus>,
    pub min_capacity: Option<u32>,
}

impl ClassroomFilter {
    pub fn matches(&self, room: &Classroom) -> bool {
        matches_any(&[room.name.as_str(), room.location.as_str()], self.search.as_deref())
            && self.status.is_none_or(|status| room.status == status)
            && self.min_capacity.is_none_or(|min| room.capacity >= min)
    }
}

/// ClassroomQuery
///
/// Query string of GET /classrooms.
#[derive(Debug, Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct ClassroomQuery {
    /// Matched against room name and location.
    pub search: Option<String>,
    /// `available`, `occupied`, `maintenance` or `all`.
    pub status: Option<String>,
    /// Smallest acceptable capacity; a non-number is a 400.
    pub min_capacity: Option<String>,
}

fn parse_capacity(raw: Option<&str>) -> Result<Option<u32>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<u32>().map(Some).map_err(|_| {
            ApiError::BadRequest(format!("min_capacity must be a whole number, got '{value}'"))
        }),
    }
}

impl TryFrom<ClassroomQuery> for ClassroomFilter {
    type Error = ApiError;

    fn try_from(query: ClassroomQuery) -> Result<Self, Self::Error> {
        Ok(ClassroomFilter {
            status: parse_choice(query.status.as_deref())?,
            search: query.search,
            min_capacity: parse_capacity(query.min_capacity.as_deref())?,
        })
    }
}

// --- Faculty ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacultyFilter {
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<FacultyStatus>,
}

impl FacultyFilter {
    pub fn matches(&self, person: &Faculty) -> bool {
        matches_any(
            &[
                person.name.as_str(),
                person.department.as_str(),
                person.email.as_str(),
            ],
            self.search.as_deref(),
        ) && self
            .department
            .as_deref()
            .is_none_or(|department| person.department == department)
            && self.status.is_none_or(|status| person.status == status)
    }
}

/// FacultyQuery
///
/// Query string of GET /faculty.
#[derive(Debug, Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct FacultyQuery {
    /// Matched against name, department and email.
    pub search: Option<String>,
    /// Exact department name, or `all`.
    pub department: Option<String>,
    /// `available`, `busy`, `offline` or `all`.
    pub status: Option<String>,
}

impl TryFrom<FacultyQuery> for FacultyFilter {
    type Error = ApiError;

    fn try_from(query: FacultyQuery) -> Result<Self, Self::Error> {
        let department = query
            .department
            .filter(|d| !d.trim().is_empty() && !d.eq_ignore_ascii_case("all"));
        Ok(FacultyFilter {
            status: parse_choice(query.status.as_deref())?,
            search: query.search,
            department,
        })
    }
}

// --- Canteens ---

impl MealCategory {
    /// Items whose presence puts a canteen in this category. Empty for `All`.
    pub fn signature_items(&self) -> &'static [&'static str] {
        match self {
            MealCategory::All => &[],
            MealCategory::Breakfast => BREAKFAST_ITEMS,
            MealCategory::Lunch => LUNCH_ITEMS,
            MealCategory::Snacks => SNACK_ITEMS,
        }
    }

    pub fn includes(&self, canteen: &Canteen) -> bool {
        match self {
            MealCategory::All => true,
            category => {
                let items = category.signature_items();
                canteen.menu.iter().any(|item| items.contains(&item.name.as_str()))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanteenFilter {
    pub search: Option<String>,
    pub category: MealCategory,
}

impl CanteenFilter {
    pub fn matches(&self, canteen: &Canteen) -> bool {
        let query = self.search.as_deref();
        let text_match = matches_any(&[canteen.name.as_str(), canteen.location.as_str()], query)
            || canteen
                .menu
                .iter()
                .any(|item| matches_any(&[item.name.as_str()], query));
        text_match && self.category.includes(canteen)
    }
}

/// CanteenQuery
///
/// Query string of GET /canteens.
#[derive(Debug, Deserialize, IntoParams, Default)]
#[into_params(parameter_in = Query)]
pub struct CanteenQuery {
    /// Matched against canteen name, location and menu item names.
    pub search: Option<String>,
    /// `all`, `breakfast`, `lunch` or `snacks`.
    pub category: Option<String>,
}

impl TryFrom<CanteenQuery> for CanteenFilter {
    type Error = ApiError;

    fn try_from(query: CanteenQuery) -> Result<Self, Self::Error> {
        Ok(CanteenFilter {
            category: parse_choice(query.category.as_deref())?.unwrap_or_default(),
            search: query.search,
        })
    }
}
