use campus_radar::{
    InMemoryCampus,
    campus::{CampusError, CampusRepository, DEFAULT_RESERVATION_SLOT},
    models::{ClassroomStatus, MeetingStatus},
    search::{ClassroomFilter, FacultyFilter},
};
use std::sync::Arc;
use uuid::Uuid;

const REQUESTER: Uuid = Uuid::from_u128(42);

async fn room(store: &InMemoryCampus, id: &str) -> campus_radar::models::Classroom {
    store
        .classrooms(&ClassroomFilter::default())
        .await
        .into_iter()
        .find(|room| room.id == id)
        .expect("seeded room")
}

// --- Classrooms ---

#[tokio::test]
async fn test_reserve_available_room() {
    let store = InMemoryCampus::seeded();

    let reserved = store.reserve_classroom("1").await.unwrap();

    assert_eq!(reserved.status, ClassroomStatus::Occupied);
    assert_eq!(reserved.time_slot.as_deref(), Some(DEFAULT_RESERVATION_SLOT));
    assert_eq!(room(&store, "1").await, reserved);
}

#[tokio::test]
async fn test_reserve_rejects_occupied_and_maintenance() {
    let store = InMemoryCampus::seeded();

    assert!(matches!(
        store.reserve_classroom("2").await,
        Err(CampusError::Conflict(_))
    ));
    assert!(matches!(
        store.reserve_classroom("4").await,
        Err(CampusError::Conflict(_))
    ));
    // The occupied room keeps its original slot.
    assert_eq!(
        room(&store, "2").await.time_slot.as_deref(),
        Some("10:00 AM - 11:30 AM")
    );
}

#[tokio::test]
async fn test_release_clears_time_slot() {
    let store = InMemoryCampus::seeded();

    let released = store.release_classroom("6").await.unwrap();

    assert_eq!(released.status, ClassroomStatus::Available);
    assert_eq!(released.time_slot, None);
}

#[tokio::test]
async fn test_release_requires_occupied_room() {
    let store = InMemoryCampus::seeded();
    assert!(matches!(
        store.release_classroom("1").await,
        Err(CampusError::Conflict(_))
    ));
    assert!(matches!(
        store.release_classroom("4").await,
        Err(CampusError::Conflict(_))
    ));
}

#[tokio::test]
async fn test_unknown_room_is_not_found() {
    let store = InMemoryCampus::seeded();
    assert_eq!(
        store.reserve_classroom("99").await,
        Err(CampusError::NotFound("classroom 99".to_string()))
    );
    assert!(matches!(
        store.release_classroom("99").await,
        Err(CampusError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_reserve_release_round_trip_keeps_other_rooms() {
    let store = InMemoryCampus::seeded();
    let before = store.classrooms(&ClassroomFilter::default()).await;

    store.reserve_classroom("3").await.unwrap();
    store.release_classroom("3").await.unwrap();

    assert_eq!(store.classrooms(&ClassroomFilter::default()).await, before);
}

#[tokio::test]
async fn test_concurrent_reservations_have_one_winner() {
    let store = Arc::new(InMemoryCampus::seeded());

    let attempts = (0..8).map(|_| {
        let store = store.clone();
        tokio::spawn(async move { store.reserve_classroom("5").await })
    });
    let mut wins = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        if attempt.await.unwrap().is_ok() {
            wins += 1;
        }
    }

    assert_eq!(wins, 1);
}

#[tokio::test]
async fn test_admin_status_override() {
    let store = InMemoryCampus::seeded();

    let down = store
        .set_classroom_status("2", ClassroomStatus::Maintenance, None)
        .await
        .unwrap();
    assert_eq!(down.status, ClassroomStatus::Maintenance);
    assert_eq!(down.time_slot, None);

    let booked = store
        .set_classroom_status("4", ClassroomStatus::Occupied, Some("02:00 PM - 03:00 PM".into()))
        .await
        .unwrap();
    assert_eq!(booked.time_slot.as_deref(), Some("02:00 PM - 03:00 PM"));

    let defaulted = store
        .set_classroom_status("1", ClassroomStatus::Occupied, None)
        .await
        .unwrap();
    assert_eq!(defaulted.time_slot.as_deref(), Some(DEFAULT_RESERVATION_SLOT));
}

// --- Faculty ---

#[tokio::test]
async fn test_departments_unique_in_catalogue_order() {
    let store = InMemoryCampus::seeded();
    assert_eq!(
        store.departments().await,
        vec![
            "Computer Science",
            "Electrical Engineering",
            "Mathematics",
            "Physics",
            "Biology",
            "Chemistry"
        ]
    );
}

#[tokio::test]
async fn test_meeting_with_available_faculty() {
    let store = InMemoryCampus::seeded();

    let request = store.request_meeting("3", REQUESTER).await.unwrap();

    assert_eq!(request.faculty_id, "3");
    assert_eq!(request.faculty_name, "Dr. Emily Chen");
    assert_eq!(request.requester_id, REQUESTER);
    assert_eq!(request.status, MeetingStatus::Pending);
    assert_eq!(store.meetings_for(REQUESTER).await, vec![request]);
}

#[tokio::test]
async fn test_meeting_with_busy_faculty_is_accepted() {
    let store = InMemoryCampus::seeded();

    let request = store.request_meeting("2", REQUESTER).await.unwrap();

    assert_eq!(request.faculty_name, "Prof. Michael Lee");
    assert_eq!(request.status, MeetingStatus::Pending);
    assert_eq!(store.meetings_for(REQUESTER).await, vec![request]);
}

#[tokio::test]
async fn test_meeting_rejected_when_offline() {
    let store = InMemoryCampus::seeded();

    assert_eq!(
        store.request_meeting("4", REQUESTER).await,
        Err(CampusError::Conflict("Prof. David Wilson is offline".to_string()))
    );
    assert!(matches!(
        store.request_meeting("nope", REQUESTER).await,
        Err(CampusError::NotFound(_))
    ));
    assert!(store.meetings_for(REQUESTER).await.is_empty());
}

#[tokio::test]
async fn test_meetings_are_per_requester_newest_first() {
    let store = InMemoryCampus::seeded();
    let other = Uuid::from_u128(7);

    let first = store.request_meeting("1", REQUESTER).await.unwrap();
    store.request_meeting("3", other).await.unwrap();
    let second = store.request_meeting("5", REQUESTER).await.unwrap();

    let mine = store.meetings_for(REQUESTER).await;
    assert_eq!(mine, vec![second, first]);
}

#[tokio::test]
async fn test_faculty_listing_uses_filter() {
    let store = InMemoryCampus::seeded();
    let filter = FacultyFilter {
        search: Some("dr.".to_string()),
        ..Default::default()
    };
    let names: Vec<_> = store
        .faculty(&filter)
        .await
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(
        names,
        vec!["Dr. Sarah Johnson", "Dr. Emily Chen", "Dr. Rachel Kim"]
    );
}
