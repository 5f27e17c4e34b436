use std::{
    cmp::Ordering,
    fmt::{self, Display},
};

use crate::server_pool::ServerId;

/// Simulation time, in abstract ticks.
///
/// One tick lasts [`BankConfig::time_unit`](crate::BankConfig::time_unit) of real time.
pub type Tick = u64;

/// Identifies a customer within one input file.
pub type CustomerId = u64;

/// One customer visiting the bank.
///
/// The arrival time and service duration are fixed when the customer is created. The server,
/// start time and end time are filled in by the [`Bank`](crate::Bank) as the customer is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    arrival_time: Tick,
    service_duration: Tick,

    assigned_server: Option<ServerId>,
    start_time: Option<Tick>,
    end_time: Option<Tick>,
}

impl Customer {
    /// Create a customer who has not been served yet.
    pub fn new(id: CustomerId, arrival_time: Tick, service_duration: Tick) -> Self {
        Self {
            id,
            arrival_time,
            service_duration,
            assigned_server: None,
            start_time: None,
            end_time: None,
        }
    }

    #[allow(missing_docs)]
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// When the customer is scheduled to walk in.
    pub fn arrival_time(&self) -> Tick {
        self.arrival_time
    }

    /// How long the customer needs at a counter.
    pub fn service_duration(&self) -> Tick {
        self.service_duration
    }

    /// The server that handled this customer, once assigned.
    pub fn assigned_server(&self) -> Option<ServerId> {
        self.assigned_server
    }

    /// When service began, once assigned.
    pub fn start_time(&self) -> Option<Tick> {
        self.start_time
    }

    /// When service finished, once departed.
    pub fn end_time(&self) -> Option<Tick> {
        self.end_time
    }

    /// Ticks spent in the waiting queue, once service has started.
    ///
    /// Zero if the arrival was paced late and service started "before" the scheduled arrival.
    pub fn wait_time(&self) -> Option<Tick> {
        self.start_time
            .map(|start| start.saturating_sub(self.arrival_time))
    }

    /// Whether the customer has been served and left.
    pub fn is_served(&self) -> bool {
        self.end_time.is_some()
    }

    /// Orders customers by scheduled arrival, earliest first.
    ///
    /// Use with a stable sort so customers arriving at the same tick keep their input order.
    pub fn compare_by_arrival(&self, other: &Customer) -> Ordering {
        self.arrival_time.cmp(&other.arrival_time)
    }

    /// Record the server and start tick. Happens once, when the customer is admitted.
    pub(crate) fn begin_service(&mut self, server: ServerId, start_time: Tick) {
        debug_assert!(
            self.assigned_server.is_none() && self.start_time.is_none(),
            "a customer should only be assigned a server once"
        );
        self.assigned_server = Some(server);
        self.start_time = Some(start_time);
    }

    /// Record the end tick. Always `start_time + service_duration`.
    pub(crate) fn finish_service(&mut self) -> Tick {
        debug_assert!(self.end_time.is_none(), "a customer should only depart once");
        let end_time = self
            .start_time
            .unwrap_or(self.arrival_time)
            .saturating_add(self.service_duration);
        self.end_time = Some(end_time);
        end_time
    }
}

impl Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer with ID {}", self.id)
    }
}
