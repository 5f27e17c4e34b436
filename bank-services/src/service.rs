use std::sync::Arc;

use tokio::sync::OwnedSemaphorePermit;
use tracing::{Instrument, Span, debug, error, info};

use crate::{
    bank::BankState,
    customer::Customer,
    error::{BankResult, InvariantViolation},
    queue::{SendDeparture, Waiting},
};

/// Admit the next customer in line and serve them.
///
/// One of these runs for every arrival. Whoever is at the head of the line when an attendant
/// becomes free is served, which is not necessarily the customer whose arrival spawned this task.
/// Every arrival pushes exactly one customer before spawning exactly one task, so the line is
/// never empty here.
pub(crate) async fn admit_and_serve(bank: Arc<BankState>) -> BankResult<()> {
    let permit = Arc::clone(&bank.attendants).acquire_owned().await?;

    let Some(Waiting { customer, tx, span }) = bank.queue.pop() else {
        let violation = InvariantViolation::EmptyQueue;
        error!(bank = %bank.name, "{}", violation);
        return Err(violation.into());
    };

    match serve(&bank, customer, permit).instrument(span).await {
        Ok(customer) => {
            send_departure(&bank, tx, Ok(customer));
            Ok(())
        }
        Err(err) => {
            send_departure(&bank, tx, Err(err.clone()));
            Err(err)
        }
    }
}

/// Seat an admitted customer at a free counter and serve them.
///
/// The counter is freed before the attendant is released, so an attendant never admits someone
/// while the counter it will need is still occupied.
async fn serve(
    bank: &BankState,
    mut customer: Customer,
    permit: OwnedSemaphorePermit,
) -> BankResult<Customer> {
    let Some(lease) = bank.servers.occupy(customer.id()) else {
        let violation = InvariantViolation::NoFreeServer {
            occupied: bank.servers.occupied(),
            servers: bank.config.servers,
        };
        error!(bank = %bank.name, "Unable to seat {}: {}", customer, violation);
        return Err(violation.into());
    };

    let server = lease.server();
    let start_time = bank.clock.now();
    customer.begin_service(server, start_time);
    Span::current().record("server.id", server.get());

    info!(
        customer.id = customer.id(),
        server.id = server.get(),
        start_time,
        service_duration = customer.service_duration(),
        "{} starts at time {}. Being served at ServerID {} for {} time",
        customer,
        start_time,
        server,
        customer.service_duration()
    );

    tokio::time::sleep(bank.clock.duration_of(customer.service_duration())).await;

    let end_time = customer.finish_service();
    info!(
        customer.id = customer.id(),
        server.id = server.get(),
        end_time,
        "End serving {} at time {}",
        customer,
        end_time
    );

    drop(lease);
    drop(permit);

    Ok(customer)
}

fn send_departure(bank: &BankState, tx: SendDeparture, result: BankResult<Customer>) {
    if tx.send(result).is_err() {
        // Whoever was waiting for this customer has gone away. There's not much else we can do.
        debug!(
            "Unable to send departure over oneshot channel. Receiver deallocated. Bank: {}",
            bank.name
        );
    }
}
