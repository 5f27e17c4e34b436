use std::{
    fmt::{self, Display},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::customer::CustomerId;

/// Identifies one service counter. Counters are numbered from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerId(usize);

impl ServerId {
    #[allow(missing_docs)]
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    #[allow(missing_docs)]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed set of server slots, each either free or occupied by one customer.
#[derive(Debug)]
pub(crate) struct ServerPool {
    slots: Mutex<Vec<Option<CustomerId>>>,
}

/// Ownership of one server slot. The slot is freed when this is dropped.
#[derive(Debug)]
pub(crate) struct ServerLease {
    pool: Arc<ServerPool>,
    server: ServerId,
}

impl ServerPool {
    pub fn new(servers: usize) -> Self {
        Self {
            slots: Mutex::new(vec![None; servers]),
        }
    }

    /// No operation panics while holding the lock, so the slots are consistent even if poisoned.
    fn slots(&self) -> MutexGuard<'_, Vec<Option<CustomerId>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Occupy the lowest-numbered free slot on behalf of `customer`.
    ///
    /// Returns `None` if every slot is occupied.
    pub fn occupy(self: &Arc<Self>, customer: CustomerId) -> Option<ServerLease> {
        let mut slots = self.slots();

        let (index, slot) = slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| slot.is_none())?;
        *slot = Some(customer);

        Some(ServerLease {
            pool: Arc::clone(self),
            server: ServerId(index),
        })
    }

    fn release(&self, server: ServerId) {
        let mut slots = self.slots();
        let previous = slots.get_mut(server.0).and_then(Option::take);
        debug_assert!(previous.is_some(), "a released server should have been occupied");
    }

    /// The number of slots currently occupied.
    pub fn occupied(&self) -> usize {
        self.slots().iter().filter(|slot| slot.is_some()).count()
    }

    /// Who is at each counter right now.
    pub fn snapshot(&self) -> Vec<Option<CustomerId>> {
        self.slots().clone()
    }
}

impl ServerLease {
    pub fn server(&self) -> ServerId {
        self.server
    }
}

impl Drop for ServerLease {
    fn drop(&mut self) {
        self.pool.release(self.server);
    }
}
