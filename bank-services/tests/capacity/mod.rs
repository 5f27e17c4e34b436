use std::{
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
    time::Duration,
};

use bank_services::{Bank, BankConfig, Customer};
use rstest::rstest;

use crate::types::{
    TIME_UNIT, assert_consistent, assert_no_double_booking, bank, customers, peak_concurrency,
    replay, staffed_bank,
};

/// Watch the bank until `done` is set, recording the most counters and attendants ever busy.
async fn watch(
    bank: &Bank,
    done: &AtomicBool,
    peak_servers: &AtomicUsize,
    peak_admitted: &AtomicUsize,
) {
    let attendants = bank.config().attendants();
    while !done.load(Ordering::Acquire) {
        let occupancy = bank.server_occupancy();
        let occupied = occupancy.iter().filter(|slot| slot.is_some()).count();
        assert_eq!(occupied, bank.occupied_servers());
        assert!(occupied <= bank.config().servers());

        let admitted = attendants - bank.available_attendants();
        assert!(admitted <= attendants);

        peak_servers.fetch_max(occupied, Ordering::Relaxed);
        peak_admitted.fetch_max(admitted, Ordering::Relaxed);

        tokio::time::sleep(TIME_UNIT / 4).await;
    }
}

/// Given more customers than servers
/// When they all arrive around the same time
/// Then the number in service never exceeds the number of servers
#[tokio::test(start_paused = true)]
async fn never_more_in_service_than_servers() {
    let bank = bank("never_more_in_service_than_servers", 3);

    let rows: Vec<_> = (1..=20u64).map(|id| (id, id / 5, 3)).collect();

    let done = AtomicBool::new(false);
    let peak_servers = AtomicUsize::new(0);
    let peak_admitted = AtomicUsize::new(0);

    let (served, ()) = tokio::join!(
        async {
            let served = replay(&bank, customers(&rows)).await;
            done.store(true, Ordering::Release);
            served
        },
        watch(&bank, &done, &peak_servers, &peak_admitted),
    );

    assert_eq!(peak_servers.load(Ordering::Relaxed), 3, "all servers should be used");
    assert_eq!(peak_admitted.load(Ordering::Relaxed), 3);
    assert_eq!(peak_concurrency(&served), 3);
    assert_no_double_booking(&served);

    bank.close().await.unwrap();
}

/// Given fewer attendants than servers
/// When customers arrive together
/// Then only as many as there are attendants are served at once, at the lowest counters
#[tokio::test(start_paused = true)]
async fn attendants_limit_concurrency() {
    let bank = staffed_bank("attendants_limit_concurrency", 3, 1);

    let served = replay(&bank, customers(&[(1, 0, 2), (2, 0, 2), (3, 0, 2)])).await;

    let starts: Vec<_> = served.iter().map(|c| c.start_time().unwrap()).collect();
    assert_eq!(starts, vec![0, 2, 4]);
    assert_eq!(peak_concurrency(&served), 1);
    for customer in &served {
        assert_eq!(customer.assigned_server().unwrap().get(), 0);
    }

    bank.close().await.unwrap();
}

/// Given a freed counter
/// When the next customer is admitted
/// Then they take the lowest-numbered free counter
#[tokio::test(start_paused = true)]
async fn freed_counters_are_reused() {
    let bank = bank("freed_counters_are_reused", 2);

    let served = replay(&bank, customers(&[(1, 0, 1), (2, 0, 5), (3, 2, 1)])).await;

    let servers: Vec<_> = served
        .iter()
        .map(|c| c.assigned_server().unwrap().get())
        .collect();
    assert_eq!(servers, vec![0, 1, 0]);
    assert_eq!(served[2].start_time(), Some(2));

    bank.close().await.unwrap();
}

/// Run for real on several threads, with a short time unit.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[rstest]
#[timeout(Duration::from_secs(10))]
async fn parallel_runtime(#[values(1, 4)] server_count: usize) {
    let bank = Bank::builder()
        .name("parallel_runtime")
        .config(
            BankConfig::builder()
                .servers(server_count)
                .time_unit(Duration::from_millis(2))
                .build()
                .unwrap(),
        )
        .build();

    let arrivals: Vec<Customer> = (1..=40u64)
        .map(|id| Customer::new(id, id / 4, id % 3 + 1))
        .collect();
    let served = replay(&bank, arrivals).await;

    assert_eq!(served.len(), 40);
    for customer in &served {
        assert_consistent(customer);
    }
    assert!(peak_concurrency(&served) <= server_count);
    assert_no_double_booking(&served);
    assert_eq!(bank.occupied_servers(), 0);
    assert_eq!(bank.available_attendants(), server_count);

    bank.close().await.unwrap();
}
