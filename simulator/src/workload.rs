//! Synthetic customer workloads

use bank_services::Customer;
use bon::bon;
use thiserror::Error;
use tracing::debug;

use crate::{arrival::PoissonArrivals, service::ServiceProfile};

/// Invalid workload generator parameters
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum WorkloadError {
    /// Arrival rate must be positive and finite
    #[error("arrival rate must be a positive number, got {0}")]
    ArrivalRate(f64),
    /// Service needs at least one task
    #[error("service must consist of at least one task")]
    ServiceTasks,
    /// Task rate must be positive and finite
    #[error("service task rate must be a positive number, got {0}")]
    ServiceRate(f64),
}

/// A stream of customers with Poisson arrivals and Erlang service durations
pub struct Workload {
    count: usize,
    arrivals: PoissonArrivals,
    service: ServiceProfile,
}

#[bon]
impl Workload {
    /// Create a new workload generator
    ///
    /// With a seed, the same parameters always produce the same customers.
    #[builder]
    pub fn new(
        /// Number of customers to generate
        count: usize,
        /// Mean arrivals per tick
        #[builder(default = 0.5)]
        arrival_rate: f64,
        /// Number of Erlang tasks per visit
        #[builder(default = 2)]
        service_tasks: u64,
        /// Tasks completed per tick
        #[builder(default = 1.0)]
        service_rate: f64,
        /// Seed for reproducibility
        seed: Option<u64>,
    ) -> Result<Self, WorkloadError> {
        // Offset the service seed so arrivals and service durations aren't correlated.
        let service_seed = seed.map(|s| s.wrapping_add(1));

        Ok(Self {
            count,
            arrivals: PoissonArrivals::new(arrival_rate, seed)?,
            service: ServiceProfile::new(service_tasks, service_rate, service_seed)?,
        })
    }

    /// Generate the customers, with IDs `1..=count`, sorted by arrival
    pub fn generate(mut self) -> Vec<Customer> {
        debug!(
            count = self.count,
            arrival_rate = self.arrivals.rate(),
            mean_service = self.service.mean(),
            "Generating customers"
        );

        (1..=self.count as u64)
            .map(|id| {
                let arrival = self.arrivals.next_arrival();
                let duration = self.service.sample();
                Customer::new(id, arrival, duration)
            })
            .collect()
    }
}
