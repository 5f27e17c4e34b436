//! Scenario runner for replaying customers against a bank

use bank_services::{Bank, BankConfig, BankError, Customer};
use thiserror::Error;
use tracing::info;

/// Configuration for a simulation scenario
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Scenario name for identification
    pub name: String,

    /// How the bank is staffed
    pub bank: BankConfig,

    /// Who visits, in any order
    pub customers: Vec<Customer>,
}

/// Error types for scenario execution
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScenarioError {
    /// The bank failed to serve a customer
    #[error("Bank error: {0}")]
    Bank(#[from] BankError),
}

/// Orchestrates a simulation scenario
pub struct ScenarioRunner {
    config: ScenarioConfig,
}

impl ScenarioRunner {
    /// Create a new scenario runner
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// Run the scenario and return the served customers, in arrival order
    ///
    /// Each customer is handed to the bank at their arrival tick. Once the last customer has
    /// arrived, waits for every customer to depart and for the bank to close.
    pub async fn run(self) -> Result<Vec<Customer>, ScenarioError> {
        let ScenarioConfig {
            name,
            bank: bank_config,
            mut customers,
        } = self.config;

        customers.sort_by(Customer::compare_by_arrival);

        let bank = Bank::builder().name(&name).config(bank_config).build();
        let clock = bank.clock();

        let mut departures = Vec::with_capacity(customers.len());
        for customer in customers {
            // Sleep until an absolute instant so pacing errors don't accumulate.
            tokio::time::sleep_until(clock.instant_of(customer.arrival_time())).await;
            departures.push(bank.arrive(customer));
        }

        let mut served = Vec::with_capacity(departures.len());
        for departure in departures {
            served.push(departure.wait().await?);
        }

        bank.close().await?;

        info!(
            "Scenario '{}' finished: {} customers served by tick {}",
            name,
            served.len(),
            clock.now()
        );

        Ok(served)
    }
}
