//! Summary statistics over served customers

use std::collections::BTreeMap;

use bank_services::{Customer, ServerId, Tick};

/// Aggregate view of a finished simulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceSummary {
    /// Customers who were served and left
    pub served: usize,
    /// Mean ticks spent waiting in line
    pub mean_wait: f64,
    /// Longest wait in line
    pub max_wait: Tick,
    /// Tick at which the last customer left
    pub makespan: Tick,
    /// Most customers in service at the same tick
    pub peak_in_service: usize,
    /// How many customers each server handled
    pub served_per_server: BTreeMap<ServerId, usize>,
}

impl ServiceSummary {
    /// Summarise the served customers. Customers who weren't served are ignored.
    pub fn from_customers(customers: &[Customer]) -> Self {
        let served: Vec<&Customer> = customers.iter().filter(|c| c.is_served()).collect();
        if served.is_empty() {
            return Self::default();
        }

        let waits: Vec<Tick> = served.iter().filter_map(|c| c.wait_time()).collect();
        let mean_wait = waits.iter().sum::<Tick>() as f64 / waits.len() as f64;
        let max_wait = waits.iter().copied().max().unwrap_or(0);

        let makespan = served
            .iter()
            .filter_map(|c| c.end_time())
            .max()
            .unwrap_or(0);

        let mut served_per_server = BTreeMap::new();
        for server in served.iter().filter_map(|c| c.assigned_server()) {
            *served_per_server.entry(server).or_insert(0) += 1;
        }

        Self {
            served: served.len(),
            mean_wait,
            max_wait,
            makespan,
            peak_in_service: peak_in_service(&served),
            served_per_server,
        }
    }
}

/// Sweep over service intervals. Departures at a tick count before admissions at that tick.
fn peak_in_service(served: &[&Customer]) -> usize {
    let mut changes: Vec<(Tick, i64)> = served
        .iter()
        .filter_map(|c| Some((c.start_time()?, c.end_time()?)))
        .filter(|(start, end)| start < end)
        .flat_map(|(start, end)| [(start, 1), (end, -1)])
        .collect();
    changes.sort_unstable();

    let mut current: i64 = 0;
    let mut peak: i64 = 0;
    for (_, change) in changes {
        current += change;
        peak = peak.max(current);
    }
    peak as usize
}
