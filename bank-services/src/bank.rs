use std::sync::{Arc, Mutex, PoisonError};

use bon::bon;
use tokio::{
    sync::{Semaphore, oneshot},
    task::{JoinError, JoinSet},
};
use tracing::{Level, debug, error, field, info, span};

use crate::{
    clock::Clock,
    config::BankConfig,
    customer::{Customer, CustomerId},
    error::{BankError, BankResult},
    queue::{Waiting, WaitingQueue},
    server_pool::ServerPool,
    service,
};

/// A bank with a fixed number of service counters.
///
/// Customers arrive one at a time through [`Bank::arrive`]. Each waits in line for a free
/// attendant, is seated at the lowest-numbered free counter, is served for their service
/// duration, and then leaves. Many customers can be waiting and in service at once.
///
/// ## Drop
///
/// Dropping a `Bank` aborts every customer still waiting or in service. Their [`Departure`]s
/// resolve to [`BankError::Rx`].
///
/// To let everyone finish, call [`Bank::close()`].
#[derive(Debug)]
pub struct Bank {
    state: Arc<BankState>,
    tasks: Mutex<ServiceTasks>,
}

/// One admission-and-service task per customer who has arrived and not yet been reaped.
#[derive(Debug, Default)]
struct ServiceTasks {
    running: JoinSet<BankResult<()>>,
    /// The first failure among reaped tasks.
    failure: Option<BankError>,
}

/// State shared between the bank and its service tasks.
///
/// The queue and the server pool are locked independently. Neither lock is held while taking
/// the other, or across an `.await`.
#[derive(Debug)]
pub(crate) struct BankState {
    pub name: String,
    pub config: BankConfig,
    pub clock: Clock,
    pub queue: WaitingQueue,
    pub servers: Arc<ServerPool>,
    /// One permit per attendant.
    pub attendants: Arc<Semaphore>,
}

/// Resolves once a customer has been served and has left the bank.
#[derive(Debug)]
#[must_use = "dropping a Departure does not stop the customer being served, but loses the result"]
pub struct Departure {
    customer_id: CustomerId,
    rx: oneshot::Receiver<BankResult<Customer>>,
}

#[bon]
impl Bank {
    /// Open a new bank. The clock starts now.
    ///
    /// Must be called from within a Tokio runtime.
    #[builder]
    pub fn new(
        name: impl Into<String>,
        #[builder(default)] config: BankConfig,
    ) -> Self {
        let name = name.into();

        let state = BankState {
            name,
            config,
            clock: Clock::start(config.time_unit),
            queue: WaitingQueue::default(),
            servers: Arc::new(ServerPool::new(config.servers)),
            attendants: Arc::new(Semaphore::new(config.attendants)),
        };

        info!("Bank '{}' opened with {}", &state.name, config);

        Self {
            state: Arc::new(state),
            tasks: Mutex::new(ServiceTasks::default()),
        }
    }

    /// A customer walks in.
    ///
    /// The customer joins the back of the line and this returns immediately. Service happens in
    /// the background; await the returned [`Departure`] to get the customer back with their
    /// server, start time and end time filled in.
    pub fn arrive(&self, customer: Customer) -> Departure {
        let customer_id = customer.id();
        let time = self.state.clock.now();

        let span = span!(
            Level::INFO,
            "serve customer",
            bank = %self.state.name,
            customer.id = customer_id,
            server.id = field::Empty
        );
        span.in_scope(|| {
            info!(
                customer.id = customer_id,
                time, "{} arrives at time {}", customer, time
            );
        });

        let (tx, rx) = oneshot::channel();
        let queue_len = self.state.queue.push(Waiting { customer, tx, span });
        debug!(bank = %self.state.name, queue_len, "Customer {} joined the line", customer_id);

        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.reap_finished(&self.state.name);
        tasks
            .running
            .spawn(service::admit_and_serve(Arc::clone(&self.state)));
        drop(tasks);

        Departure { customer_id, rx }
    }

    /// Wait for every customer who has arrived so far to be served, then close the doors.
    ///
    /// Returns the first failure seen by any service task. Every task is waited for even after
    /// a failure.
    pub async fn close(self) -> BankResult<()> {
        let Bank { state, tasks } = self;
        let mut tasks = tasks.into_inner().unwrap_or_else(PoisonError::into_inner);

        while let Some(joined) = tasks.running.join_next().await {
            tasks.record(&state.name, joined);
        }

        info!("Bank '{}' closed", &state.name);
        tasks.failure.map_or(Ok(()), Err)
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &str {
        &self.state.name
    }

    #[allow(missing_docs)]
    pub fn config(&self) -> BankConfig {
        self.state.config
    }

    /// The bank's clock. Tick zero is when the bank opened.
    pub fn clock(&self) -> Clock {
        self.state.clock
    }

    /// The number of customers waiting to be admitted.
    pub fn waiting(&self) -> usize {
        self.state.queue.len()
    }

    /// The number of counters currently serving someone.
    pub fn occupied_servers(&self) -> usize {
        self.state.servers.occupied()
    }

    /// Who is at each counter right now, indexed by server ID.
    pub fn server_occupancy(&self) -> Vec<Option<CustomerId>> {
        self.state.servers.snapshot()
    }

    /// The number of attendants free to admit another customer.
    pub fn available_attendants(&self) -> usize {
        self.state.attendants.available_permits()
    }
}

impl ServiceTasks {
    /// Collect tasks that have already finished, without waiting.
    fn reap_finished(&mut self, bank: &str) {
        while let Some(joined) = self.running.try_join_next() {
            self.record(bank, joined);
        }
    }

    fn record(&mut self, bank: &str, joined: Result<BankResult<()>, JoinError>) {
        let result = match joined {
            Ok(result) => result,
            Err(err) if err.is_panic() => Err(BankError::Panic),
            Err(_) => Err(BankError::Cancelled),
        };

        if let Err(err) = result {
            error!(bank, "Service task failed: {}", err);
            self.failure.get_or_insert(err);
        }
    }
}

impl Departure {
    /// The customer this departure is for.
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Wait for the customer to be served.
    pub async fn wait(self) -> BankResult<Customer> {
        self.rx.await?
    }
}
