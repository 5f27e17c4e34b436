use std::time::Duration;

use rstest::rstest;
use tokio::time::Instant;

use crate::{
    assert_elapsed,
    types::{
        TIME_UNIT, assert_consistent, assert_no_double_booking, bank, customers,
        peak_concurrency, replay,
    },
};

fn starts(served: &[bank_services::Customer]) -> Vec<u64> {
    served.iter().map(|c| c.start_time().unwrap()).collect()
}

fn servers(served: &[bank_services::Customer]) -> Vec<usize> {
    served
        .iter()
        .map(|c| c.assigned_server().unwrap().get())
        .collect()
}

/// Given a bank with one server
/// When a second customer arrives while the first is being served
/// Then the second waits until the first leaves
#[tokio::test(start_paused = true)]
async fn second_customer_waits_for_the_first() {
    let bank = bank("second_customer_waits_for_the_first", 1);

    let served = replay(&bank, customers(&[(1, 0, 3), (2, 1, 3)])).await;

    assert_eq!(served[0].start_time(), Some(0));
    assert_eq!(served[0].end_time(), Some(3));
    assert_eq!(served[1].start_time(), served[0].end_time());
    assert_eq!(served[1].end_time(), Some(6));
    assert_eq!(served[1].wait_time(), Some(2));

    bank.close().await.unwrap();
}

/// Given a bank with three servers
/// When three customers arrive together
/// Then they are all served straight away at different counters
#[tokio::test(start_paused = true)]
async fn simultaneous_arrivals_with_enough_servers() {
    let bank = bank("simultaneous_arrivals_with_enough_servers", 3);

    let served = replay(&bank, customers(&[(1, 0, 1), (2, 0, 2), (3, 0, 3)])).await;

    assert_eq!(starts(&served), vec![0, 0, 0]);
    let mut assigned = servers(&served);
    assigned.sort();
    assert_eq!(assigned, vec![0, 1, 2]);

    let ends: Vec<_> = served.iter().map(|c| c.end_time().unwrap()).collect();
    assert_eq!(ends, vec![1, 2, 3]);

    bank.close().await.unwrap();
}

/// Given a bank with one server
/// When three customers arrive together
/// Then they are served one after another
#[tokio::test(start_paused = true)]
async fn simultaneous_arrivals_with_one_server() {
    let bank = bank("simultaneous_arrivals_with_one_server", 1);

    let now = Instant::now();
    let served = replay(&bank, customers(&[(1, 0, 1), (2, 0, 1), (3, 0, 1)])).await;
    assert_elapsed!(now, TIME_UNIT * 3, Duration::from_millis(5));

    assert_eq!(peak_concurrency(&served), 1);
    assert_eq!(servers(&served), vec![0, 0, 0]);

    let total_service: u64 = served
        .iter()
        .map(|c| c.end_time().unwrap() - c.start_time().unwrap())
        .sum();
    assert_eq!(total_service, 3);

    bank.close().await.unwrap();
}

/// Given customers have to queue
/// When attendants become free
/// Then customers are admitted in the order they arrived
#[tokio::test(start_paused = true)]
async fn queue_is_served_in_arrival_order() {
    let bank = bank("queue_is_served_in_arrival_order", 2);

    let served = replay(
        &bank,
        customers(&[(1, 0, 2), (2, 0, 2), (3, 0, 2), (4, 0, 2), (5, 1, 2)]),
    )
    .await;

    assert_eq!(starts(&served), vec![0, 0, 2, 2, 4]);

    bank.close().await.unwrap();
}

/// A customer needing no service still gets a counter, briefly.
#[tokio::test(start_paused = true)]
async fn zero_duration_service() {
    let bank = bank("zero_duration_service", 1);

    let served = replay(&bank, customers(&[(1, 0, 0), (2, 0, 2)])).await;

    assert_eq!(served[0].start_time(), Some(0));
    assert_eq!(served[0].end_time(), Some(0));
    assert_eq!(served[1].start_time(), Some(0));
    assert_eq!(served[1].end_time(), Some(2));

    bank.close().await.unwrap();
}

#[tokio::test]
#[rstest]
#[timeout(Duration::from_secs(5))]
async fn every_customer_is_served_consistently(#[values(1, 2, 3, 5)] server_count: usize) {
    tokio::time::pause();

    let bank = bank("every_customer_is_served_consistently", server_count);

    let rows: Vec<_> = (1..=30u64).map(|id| (id, id / 3, id % 4 + 1)).collect();
    let served = replay(&bank, customers(&rows)).await;

    assert_eq!(served.len(), rows.len(), "everyone should be served");
    for customer in &served {
        assert_consistent(customer);
        assert!(customer.assigned_server().unwrap().get() < server_count);
    }
    assert!(peak_concurrency(&served) <= server_count);
    assert_no_double_booking(&served);

    bank.close().await.unwrap();
}
