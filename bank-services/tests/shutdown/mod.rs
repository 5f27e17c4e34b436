use std::time::Duration;

use bank_services::Customer;
use tokio::time::Instant;

use crate::{
    assert_elapsed,
    types::{TIME_UNIT, bank},
};

/// Given nobody has arrived
/// When the bank closes
/// Then it closes straight away
#[tokio::test(start_paused = true)]
async fn close_empty_bank() {
    let bank = bank("close_empty_bank", 2);

    let now = Instant::now();
    bank.close().await.unwrap();
    assert_elapsed!(now, Duration::ZERO, Duration::from_millis(1));
}

/// Given customers are waiting and in service
/// When the bank closes
/// Then everyone is served before it finishes closing
#[tokio::test(start_paused = true)]
async fn close_waits_for_everyone() {
    let bank = bank("close_waits_for_everyone", 1);

    let now = Instant::now();
    let d1 = bank.arrive(Customer::new(1, 0, 2));
    let d2 = bank.arrive(Customer::new(2, 0, 3));

    bank.close().await.unwrap();
    assert_elapsed!(now, TIME_UNIT * 5, Duration::from_millis(5));

    let c1 = d1.wait().await.unwrap();
    let c2 = d2.wait().await.unwrap();
    assert_eq!(c1.end_time(), Some(2));
    assert_eq!(c2.start_time(), Some(2));
    assert_eq!(c2.end_time(), Some(5));
}

/// Given nobody is waiting on a customer's departure
/// When they finish being served
/// Then the bank carries on regardless
#[tokio::test(start_paused = true)]
async fn abandoned_departure() {
    let bank = bank("abandoned_departure", 1);

    drop(bank.arrive(Customer::new(1, 0, 1)));
    let departure = bank.arrive(Customer::new(2, 0, 1));

    let served = departure.wait().await.unwrap();
    assert_eq!(served.start_time(), Some(1));

    bank.close().await.unwrap();
}

/// Given the bank is dropped without closing
/// When customers are still being served
/// Then their departures report the bank went away
#[tokio::test(start_paused = true)]
async fn drop_without_closing() {
    let bank = bank("drop_without_closing", 1);

    let d1 = bank.arrive(Customer::new(1, 0, 10));
    let d2 = bank.arrive(Customer::new(2, 0, 10));
    tokio::time::sleep(TIME_UNIT).await;

    drop(bank);

    assert!(d1.wait().await.is_err());
    assert!(d2.wait().await.is_err());
}

/// Given a customer is being served
/// When their departure is polled before service ends
/// Then it stays pending until they leave
#[tokio::test(start_paused = true)]
async fn departure_pending_until_served() {
    let bank = bank("departure_pending_until_served", 1);

    let mut departure = tokio_test::task::spawn(bank.arrive(Customer::new(1, 0, 2)).wait());
    tokio_test::assert_pending!(departure.poll());

    tokio::time::sleep(TIME_UNIT).await;
    tokio_test::assert_pending!(departure.poll());
    assert_eq!(bank.occupied_servers(), 1);

    let served = departure.await.unwrap();
    assert_eq!(served.end_time(), Some(2));

    bank.close().await.unwrap();
}
