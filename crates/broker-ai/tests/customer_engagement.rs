use std::sync::Arc;
use std::thread;

use broker_ai::crm::{
    score_increment, ActivityType, CustomerId, EngagementService, InMemoryEngagementStore,
};

#[test]
fn activity_points_accumulate_per_customer() {
    let service = EngagementService::new(Arc::new(InMemoryEngagementStore::default()));
    let kim = CustomerId("kim".to_string());
    let lee = CustomerId("lee".to_string());

    for activity in ["view", "favorite", "appointment"] {
        service.record_activity(&kim, activity).expect("store available");
    }
    service.record_activity(&lee, "contract_view").expect("store available");

    assert_eq!(service.score(&kim).expect("score"), 45);
    assert_eq!(service.score(&lee).expect("score"), 40);
    assert_eq!(
        service.score(&CustomerId("nobody".to_string())).expect("score"),
        0
    );
}

#[test]
fn unknown_activity_leaves_score_untouched() {
    let service = EngagementService::new(Arc::new(InMemoryEngagementStore::default()));
    let customer = CustomerId("park".to_string());
    service.record_activity(&customer, "inquiry").expect("store available");

    let outcome = service
        .record_activity(&customer, "newsletter_open")
        .expect("store available");

    assert!(!outcome.recognized);
    assert_eq!(outcome.increment, 0);
    assert_eq!(outcome.total, 20);
    assert_eq!(score_increment("newsletter_open"), 0);
}

#[test]
fn point_table_matches_activity_types() {
    let total: u32 = ActivityType::ordered()
        .iter()
        .map(|activity| score_increment(activity.label()))
        .sum();
    assert_eq!(total, 5 + 10 + 20 + 30 + 40);
}

#[test]
fn concurrent_recording_never_loses_points() {
    let service = Arc::new(EngagementService::new(Arc::new(
        InMemoryEngagementStore::default(),
    )));
    let customer = CustomerId("choi".to_string());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            let customer = customer.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    service.record_activity(&customer, "view").expect("store available");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker finished");
    }

    assert_eq!(service.score(&customer).expect("score"), 8 * 50 * 5);
}
