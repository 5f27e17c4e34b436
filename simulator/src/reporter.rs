//! Reporting of simulation inputs and results

use std::fmt::{self, Display};

use bank_services::{BankConfig, Customer};

use crate::summary::ServiceSummary;

const RULE: &str =
    "==========================================================================================";

/// How a customer was scheduled, before the run
pub struct RosterLine<'a>(pub &'a Customer);

/// How a customer was served, after the run
pub struct ReportLine<'a>(pub &'a Customer);

impl Display for RosterLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let customer = self.0;
        write!(
            f,
            "{}, Arrive Time: {}, Service Time: {}",
            customer,
            customer.arrival_time(),
            customer.service_duration()
        )
    }
}

impl Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let customer = self.0;
        write!(
            f,
            "{}, Arrive Time: {}, Start Time: {}, Leave Time: {}, Server ID: {}",
            customer,
            customer.arrival_time(),
            Unset(customer.start_time()),
            Unset(customer.end_time()),
            Unset(customer.assigned_server()),
        )
    }
}

/// Renders a missing value as `-`.
struct Unset<T>(Option<T>);

impl<T: Display> Display for Unset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("-"),
        }
    }
}

/// Reporter for printing the roster, per-customer results and summary statistics
pub struct SimulationReporter<'a> {
    name: &'a str,
    config: &'a BankConfig,
}

impl<'a> SimulationReporter<'a> {
    /// Create a new simulation reporter
    pub fn new(name: &'a str, config: &'a BankConfig) -> Self {
        Self { name, config }
    }

    /// Print who is due to arrive, and when
    pub fn print_roster(&self, customers: &[Customer]) {
        println!("\n=== Scenario Configuration ===");
        println!("Name:                     {}", self.name);
        println!("Bank:                     {}", self.config);
        println!("Customers:                {}", customers.len());
        println!();

        for customer in customers {
            println!("{}", RosterLine(customer));
        }
        println!("{RULE}");
        println!();
    }

    /// Print how each customer was served
    pub fn print_results(&self, customers: &[Customer]) {
        println!();
        println!("{RULE}");
        for customer in customers {
            println!("{}", ReportLine(customer));
        }
    }

    /// Print summary statistics to stdout
    pub fn print_summary(&self, customers: &[Customer]) {
        let summary = ServiceSummary::from_customers(customers);

        println!("\n=== Simulation Results ===");
        println!("Customers served:   {}", summary.served);
        println!("Finished at tick:   {}", summary.makespan);
        println!("Mean wait:          {:.2} ticks", summary.mean_wait);
        println!("Max wait:           {} ticks", summary.max_wait);
        println!(
            "Peak in service:    {} of {} servers",
            summary.peak_in_service,
            self.config.servers()
        );

        println!("\nServed per server:");
        for (server, count) in &summary.served_per_server {
            println!("  Server {server}: {count}");
        }
    }

    /// Print results and summary
    pub fn report(&self, customers: &[Customer]) {
        self.print_results(customers);
        self.print_summary(customers);
    }
}
