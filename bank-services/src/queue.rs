use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tokio::sync::oneshot;
use tracing::Span;

use crate::{customer::Customer, error::BankResult};

/// A customer standing in line, with the means to tell them they're done.
#[derive(Debug)]
pub(crate) struct Waiting {
    pub customer: Customer,
    /// Used to send the served customer back.
    pub tx: SendDeparture,
    /// The customer's pipeline runs in this span.
    pub span: Span,
}

pub(crate) type SendDeparture = oneshot::Sender<BankResult<Customer>>;

/// Customers who have arrived but have not been assigned a server, first in first out.
#[derive(Debug, Default)]
pub(crate) struct WaitingQueue {
    entries: Mutex<VecDeque<Waiting>>,
}

impl WaitingQueue {
    /// No operation panics while holding the lock, so the queue is consistent even if poisoned.
    fn entries(&self) -> MutexGuard<'_, VecDeque<Waiting>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Join the back of the line. Returns the new length.
    pub fn push(&self, waiting: Waiting) -> usize {
        let mut entries = self.entries();
        entries.push_back(waiting);
        entries.len()
    }

    /// Take whoever is at the front of the line.
    pub fn pop(&self) -> Option<Waiting> {
        self.entries().pop_front()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }
}
