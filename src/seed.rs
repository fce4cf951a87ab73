//! Demo catalogue the in-memory campus store starts from.

use crate::models::{
    Canteen, Classroom, ClassroomStatus, Faculty, FacultyStatus, Feature, MenuItem,
};

fn classroom(
    id: &str,
    name: &str,
    capacity: u32,
    location: &str,
    status: ClassroomStatus,
    time_slot: Option<&str>,
) -> Classroom {
    Classroom {
        id: id.to_string(),
        name: name.to_string(),
        capacity,
        location: location.to_string(),
        status,
        time_slot: time_slot.map(str::to_string),
    }
}

pub fn classrooms() -> Vec<Classroom> {
    use ClassroomStatus::*;
    vec![
        classroom("1", "AB2 201", 40, "Academic Block 2, Second Floor", Available, None),
        classroom(
            "2",
            "AB1 102",
            60,
            "Academic Block 1, First Floor",
            Occupied,
            Some("10:00 AM - 11:30 AM"),
        ),
        classroom("3", "LH 302", 120, "Lecture Hall, Third Floor", Available, None),
        classroom("4", "MB 101", 30, "Main Building, First Floor", Maintenance, None),
        classroom(
            "5",
            "CS Lab 204",
            45,
            "Computer Science Block, Second Floor",
            Available,
            None,
        ),
        classroom(
            "6",
            "EC Lab 305",
            35,
            "Electronics Block, Third Floor",
            Occupied,
            Some("09:00 AM - 12:00 PM"),
        ),
    ]
}

fn faculty_member(
    id: &str,
    name: &str,
    department: &str,
    handle: &str,
    phone_suffix: u32,
    status: FacultyStatus,
    hours: &str,
) -> Faculty {
    Faculty {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        email: format!("{handle}@example.edu"),
        phone: format!("(123) 456-{phone_suffix:04}"),
        status,
        available_hours: Some(hours.to_string()),
    }
}

pub fn faculty() -> Vec<Faculty> {
    use FacultyStatus::*;
    vec![
        faculty_member("1", "Dr. Sarah Johnson", "Computer Science", "sarah.johnson", 7890, Available, "Mon-Fri, 10:00 AM - 12:00 PM"),
        faculty_member("2", "Prof. Michael Lee", "Electrical Engineering", "michael.lee", 7891, Busy, "Tue-Thu, 2:00 PM - 4:00 PM"),
        faculty_member("3", "Dr. Emily Chen", "Mathematics", "emily.chen", 7892, Available, "Mon-Wed, 9:00 AM - 11:00 AM"),
        faculty_member("4", "Prof. David Wilson", "Physics", "david.wilson", 7893, Offline, "Fri, 1:00 PM - 5:00 PM"),
        faculty_member("5", "Dr. Rachel Kim", "Biology", "rachel.kim", 7894, Available, "Mon-Fri, 11:00 AM - 1:00 PM"),
        faculty_member("6", "Prof. James Garcia", "Chemistry", "james.garcia", 7895, Busy, "Tue-Thu, 3:00 PM - 5:00 PM"),
    ]
}

fn menu(canteen_id: &str, items: &[(&str, f64, bool)]) -> Vec<MenuItem> {
    items
        .iter()
        .enumerate()
        .map(|(i, (name, price, available))| MenuItem {
            id: format!("{canteen_id}-{}", i + 1),
            name: name.to_string(),
            price: *price,
            available: *available,
        })
        .collect()
}

pub fn canteens() -> Vec<Canteen> {
    vec![
        Canteen {
            id: "1".to_string(),
            name: "Main Cafeteria".to_string(),
            location: "Student Center, Ground Floor".to_string(),
            opening_hours: "8:00 AM - 8:00 PM".to_string(),
            menu: menu(
                "1",
                &[
                    ("Vegetable Sandwich", 3.50, true),
                    ("Chicken Burger", 4.99, true),
                    ("French Fries", 2.50, true),
                    ("Chocolate Brownie", 2.25, false),
                ],
            ),
        },
        Canteen {
            id: "2".to_string(),
            name: "Engineering Block Café".to_string(),
            location: "Engineering Block, First Floor".to_string(),
            opening_hours: "9:00 AM - 5:00 PM".to_string(),
            menu: menu(
                "2",
                &[
                    ("Coffee", 1.99, true),
                    ("Tea", 1.50, true),
                    ("Muffin", 2.00, true),
                    ("Pasta", 5.50, false),
                ],
            ),
        },
        Canteen {
            id: "3".to_string(),
            name: "Library Snack Corner".to_string(),
            location: "Central Library, Second Floor".to_string(),
            opening_hours: "10:00 AM - 6:00 PM".to_string(),
            menu: menu(
                "3",
                &[
                    ("Chips", 1.25, true),
                    ("Cookies", 1.99, true),
                    ("Cold Coffee", 2.50, false),
                    ("Fruit Salad", 3.99, true),
                ],
            ),
        },
    ]
}

pub fn features() -> Vec<Feature> {
    [
        (
            "Classroom Availability",
            "Real-time updates on classroom availability across campus.",
            "/classrooms",
        ),
        (
            "Canteen Services",
            "Browse menus and check food availability from campus canteens.",
            "/canteen",
        ),
        (
            "Faculty Availability",
            "Find faculty members and check their availability for meetings.",
            "/faculty",
        ),
    ]
    .into_iter()
    .map(|(title, description, link)| Feature {
        title: title.to_string(),
        description: description.to_string(),
        link: link.to_string(),
    })
    .collect()
}
