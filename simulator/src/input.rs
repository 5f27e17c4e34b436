//! Reading and writing customer files
//!
//! One customer per line: `customerId arrivalTime serviceDuration`, separated by whitespace.
//! Blank lines are ignored.

use std::{
    collections::HashMap,
    fs::File,
    io::{self, BufRead, BufReader, Write},
    num::ParseIntError,
    path::Path,
};

use bank_services::{Customer, CustomerId};
use thiserror::Error;

/// A customer file could not be read
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InputError {
    /// The file could not be opened or read
    #[error("Unable to read customer file: {0}")]
    Io(#[from] io::Error),

    /// A line did not have exactly three fields
    #[error("line {line}: expected 3 fields (id, arrival time, service duration), found {found}")]
    FieldCount {
        /// 1-based line number
        line: usize,
        /// Number of fields found
        found: usize,
    },

    /// A field was not a non-negative integer
    #[error("line {line}: invalid {field} {value:?}")]
    InvalidNumber {
        /// 1-based line number
        line: usize,
        /// Which field was invalid
        field: &'static str,
        /// The offending text
        value: String,
        /// Why it couldn't be parsed
        #[source]
        source: ParseIntError,
    },

    /// The same customer ID appeared twice
    #[error("line {line}: customer {id} already appeared on line {first_line}")]
    DuplicateId {
        /// 1-based line number of the repeat
        line: usize,
        /// The repeated ID
        id: CustomerId,
        /// 1-based line number where it first appeared
        first_line: usize,
    },
}

/// Load customers from a file, sorted by arrival
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Customer>, InputError> {
    let file = File::open(path)?;
    parse_customers(BufReader::new(file))
}

/// Parse customers, sorted by arrival
///
/// Customers arriving at the same tick keep the order they appear in.
pub fn parse_customers(reader: impl BufRead) -> Result<Vec<Customer>, InputError> {
    let mut customers = Vec::new();
    let mut first_lines = HashMap::new();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let customer = parse_line(line_number, &line)?;
        if let Some(&first_line) = first_lines.get(&customer.id()) {
            return Err(InputError::DuplicateId {
                line: line_number,
                id: customer.id(),
                first_line,
            });
        }
        first_lines.insert(customer.id(), line_number);
        customers.push(customer);
    }

    customers.sort_by(Customer::compare_by_arrival);
    Ok(customers)
}

fn parse_line(line_number: usize, line: &str) -> Result<Customer, InputError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [id, arrival, duration] = fields[..] else {
        return Err(InputError::FieldCount {
            line: line_number,
            found: fields.len(),
        });
    };

    let number = |field: &'static str, value: &str| {
        value
            .parse::<u64>()
            .map_err(|source| InputError::InvalidNumber {
                line: line_number,
                field,
                value: value.to_string(),
                source,
            })
    };

    Ok(Customer::new(
        number("customer ID", id)?,
        number("arrival time", arrival)?,
        number("service duration", duration)?,
    ))
}

/// Write customers in the same format [`parse_customers`] reads
pub fn write_customers(mut writer: impl Write, customers: &[Customer]) -> io::Result<()> {
    for customer in customers {
        writeln!(
            writer,
            "{} {} {}",
            customer.id(),
            customer.arrival_time(),
            customer.service_duration()
        )?;
    }
    writer.flush()
}
