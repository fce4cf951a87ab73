use campus_radar::{
    ApiError,
    models::{ClassroomStatus, FacultyStatus, MealCategory},
    search::{
        CanteenFilter, CanteenQuery, ClassroomFilter, ClassroomQuery, FacultyFilter, FacultyQuery,
        contains_ignore_case,
    },
    seed,
};

fn ids<T>(items: &[T], id: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|item| id(item).to_string()).collect()
}

#[test]
fn test_contains_ignore_case() {
    assert!(contains_ignore_case("Main Cafeteria", "cafe"));
    assert!(contains_ignore_case("Main Cafeteria", ""));
    assert!(!contains_ignore_case("Main Cafeteria", "library"));
}

// --- Classrooms ---

#[test]
fn test_classroom_search_covers_name_and_location() {
    let rooms = seed::classrooms();
    let by_name = ClassroomFilter {
        search: Some("lab".to_string()),
        ..Default::default()
    };
    let matched: Vec<_> = rooms.iter().filter(|r| by_name.matches(r)).cloned().collect();
    assert_eq!(ids(&matched, |r| r.id.as_str()), vec!["5", "6"]);

    let by_location = ClassroomFilter {
        search: Some("ACADEMIC block".to_string()),
        ..Default::default()
    };
    let matched: Vec<_> = rooms.iter().filter(|r| by_location.matches(r)).cloned().collect();
    assert_eq!(ids(&matched, |r| r.id.as_str()), vec!["1", "2"]);
}

#[test]
fn test_classroom_status_and_capacity_combine_with_search() {
    let rooms = seed::classrooms();
    let filter = ClassroomFilter {
        search: None,
        status: Some(ClassroomStatus::Available),
        min_capacity: Some(45),
    };
    let matched: Vec<_> = rooms.iter().filter(|r| filter.matches(r)).cloned().collect();
    // LH 302 (120) and CS Lab 204 (exactly 45).
    assert_eq!(ids(&matched, |r| r.id.as_str()), vec!["3", "5"]);
}

#[test]
fn test_classroom_query_parsing() {
    let all = ClassroomFilter::try_from(ClassroomQuery {
        status: Some("all".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(all.status, None);

    let maintenance = ClassroomFilter::try_from(ClassroomQuery {
        status: Some("Maintenance".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(maintenance.status, Some(ClassroomStatus::Maintenance));

    let bad = ClassroomFilter::try_from(ClassroomQuery {
        status: Some("haunted".to_string()),
        ..Default::default()
    });
    assert!(matches!(bad, Err(ApiError::BadRequest(_))));
}

#[test]
fn test_classroom_query_min_capacity() {
    let sized = ClassroomFilter::try_from(ClassroomQuery {
        min_capacity: Some("60".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(sized.min_capacity, Some(60));

    let blank = ClassroomFilter::try_from(ClassroomQuery {
        min_capacity: Some("".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(blank.min_capacity, None);

    for bad in ["abc", "-5", "4.5"] {
        let result = ClassroomFilter::try_from(ClassroomQuery {
            min_capacity: Some(bad.to_string()),
            ..Default::default()
        });
        assert!(matches!(result, Err(ApiError::BadRequest(_))), "value {bad:?}");
    }
}

// --- Faculty ---

#[test]
fn test_faculty_search_covers_name_department_and_email() {
    let people = seed::faculty();
    let check = |query: &str, expected: Vec<&str>| {
        let filter = FacultyFilter {
            search: Some(query.to_string()),
            ..Default::default()
        };
        let matched: Vec<_> = people.iter().filter(|p| filter.matches(p)).cloned().collect();
        assert_eq!(ids(&matched, |p| p.id.as_str()), expected, "query {query:?}");
    };

    check("chen", vec!["3"]);
    check("physics", vec!["4"]);
    check("james.garcia@", vec!["6"]);
    check("engineering", vec!["2"]);
}

#[test]
fn test_faculty_department_is_exact_and_status_filters() {
    let people = seed::faculty();
    let filter = FacultyFilter {
        search: None,
        department: Some("Computer Science".to_string()),
        status: Some(FacultyStatus::Available),
    };
    let matched: Vec<_> = people.iter().filter(|p| filter.matches(p)).cloned().collect();
    assert_eq!(ids(&matched, |p| p.id.as_str()), vec!["1"]);

    // A partial department name is not a department.
    let partial = FacultyFilter {
        department: Some("Computer".to_string()),
        ..Default::default()
    };
    assert!(!people.iter().any(|p| partial.matches(p)));

    let busy = FacultyFilter {
        status: Some(FacultyStatus::Busy),
        ..Default::default()
    };
    let matched: Vec<_> = people.iter().filter(|p| busy.matches(p)).cloned().collect();
    assert_eq!(ids(&matched, |p| p.id.as_str()), vec!["2", "6"]);
}

#[test]
fn test_faculty_query_treats_all_department_as_any() {
    let filter = FacultyFilter::try_from(FacultyQuery {
        department: Some("all".to_string()),
        status: Some("offline".to_string()),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(filter.department, None);
    assert_eq!(filter.status, Some(FacultyStatus::Offline));
}

// --- Canteens ---

#[test]
fn test_canteen_search_coffee_matches_menu_items() {
    let canteens = seed::canteens();
    let filter = CanteenFilter {
        search: Some("coffee".to_string()),
        category: MealCategory::All,
    };
    let matched: Vec<_> = canteens.iter().filter(|c| filter.matches(c)).cloned().collect();
    // "Coffee" at the café and "Cold Coffee" at the library; the cafeteria has neither.
    assert_eq!(ids(&matched, |c| c.id.as_str()), vec!["2", "3"]);
}

#[test]
fn test_search_text_is_not_trimmed() {
    let canteens = seed::canteens();
    let padded = CanteenFilter {
        search: Some("coffee ".to_string()),
        category: MealCategory::All,
    };
    assert!(!canteens.iter().any(|c| padded.matches(c)));

    // "Cold Coffee" carries the inner space.
    let inner = CanteenFilter {
        search: Some("d c".to_string()),
        category: MealCategory::All,
    };
    let matched: Vec<_> = canteens.iter().filter(|c| inner.matches(c)).cloned().collect();
    assert_eq!(ids(&matched, |c| c.id.as_str()), vec!["3"]);
}

#[test]
fn test_canteen_search_matches_name_and_location() {
    let canteens = seed::canteens();
    let filter = CanteenFilter {
        search: Some("LIBRARY".to_string()),
        category: MealCategory::All,
    };
    let matched: Vec<_> = canteens.iter().filter(|c| filter.matches(c)).cloned().collect();
    assert_eq!(ids(&matched, |c| c.id.as_str()), vec!["3"]);
}

#[test]
fn test_canteen_categories_use_signature_items() {
    let canteens = seed::canteens();
    let in_category = |category: MealCategory| {
        let filter = CanteenFilter {
            search: None,
            category,
        };
        let matched: Vec<_> = canteens.iter().filter(|c| filter.matches(c)).cloned().collect();
        ids(&matched, |c| c.id.as_str())
    };

    assert_eq!(in_category(MealCategory::All), vec!["1", "2", "3"]);
    assert_eq!(in_category(MealCategory::Breakfast), vec!["2"]);
    // Pasta is sold out at the café but still puts it in the lunch tab.
    assert_eq!(in_category(MealCategory::Lunch), vec!["1", "2"]);
    assert_eq!(in_category(MealCategory::Snacks), vec!["1", "3"]);
}

#[test]
fn test_canteen_search_and_category_must_both_hold() {
    let canteens = seed::canteens();
    let filter = CanteenFilter {
        search: Some("coffee".to_string()),
        category: MealCategory::Snacks,
    };
    let matched: Vec<_> = canteens.iter().filter(|c| filter.matches(c)).cloned().collect();
    assert_eq!(ids(&matched, |c| c.id.as_str()), vec!["3"]);
}

#[test]
fn test_canteen_query_parsing() {
    let filter = CanteenFilter::try_from(CanteenQuery {
        search: None,
        category: Some("Lunch".to_string()),
    })
    .unwrap();
    assert_eq!(filter.category, MealCategory::Lunch);

    let bad = CanteenFilter::try_from(CanteenQuery {
        search: None,
        category: Some("dinner".to_string()),
    });
    assert!(matches!(bad, Err(ApiError::BadRequest(_))));
}
