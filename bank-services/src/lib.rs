//! Simulate a bank: customers queue, get admitted by attendants, are served at counters, and
//! leave.
//!
//! A [`Bank`] has a fixed number of service counters ("servers") and attendants. Customers
//! arrive at scheduled times and join a single first-in-first-out line. Whenever an attendant is
//! free, the customer at the head of the line is admitted, seated at the lowest-numbered free
//! counter, and served for their service duration. Then they leave, freeing the counter and the
//! attendant for the next customer.
//!
//! Time is measured in abstract ticks. Each tick lasts [`BankConfig::time_unit`] of real time,
//! so the simulation can be sped up or slowed down without changing its results.
//!
//! ```no_run
//! use bank_services::{Bank, BankConfig, Customer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let bank = Bank::builder()
//!     .name("high street")
//!     .config(BankConfig::builder().servers(2).build()?)
//!     .build();
//!
//! let departure = bank.arrive(Customer::new(1, 0, 3));
//! let served = departure.wait().await?;
//! assert_eq!(served.end_time(), Some(3));
//!
//! bank.close().await?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod bank;
mod clock;
mod config;
mod customer;
pub mod error;
mod queue;
mod server_pool;
mod service;

pub use bank::{Bank, Departure};
pub use clock::Clock;
pub use config::{BankConfig, DEFAULT_SERVERS, DEFAULT_TIME_UNIT};
pub use customer::{Customer, CustomerId, Tick};
pub use error::{BankError, BankResult};
pub use server_pool::ServerId;
