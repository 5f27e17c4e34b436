use std::{
    fmt::{self, Display},
    time::Duration,
};

use bon::bon;

use crate::error::ConfigError;

/// Counters open when nothing else is configured.
pub const DEFAULT_SERVERS: usize = 2;

/// Real duration of one tick when nothing else is configured.
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_millis(200);

/// How the bank is staffed, and how fast the simulation runs.
///
/// `attendants` is the number of customers that may be admitted for service at once. It can
/// never exceed `servers`, so an admitted customer always finds a free counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct BankConfig {
    pub(crate) servers: usize,
    pub(crate) attendants: usize,
    pub(crate) time_unit: Duration,
}

#[bon]
impl BankConfig {
    #[allow(missing_docs)]
    #[builder]
    pub fn new(
        /// Number of service counters.
        #[builder(default = DEFAULT_SERVERS)]
        servers: usize,
        /// Number of customers that may be served concurrently. Defaults to `servers`.
        attendants: Option<usize>,
        /// Real duration of one tick. Only affects how fast the simulation runs.
        #[builder(default = DEFAULT_TIME_UNIT)]
        time_unit: Duration,
    ) -> Result<Self, ConfigError> {
        let attendants = attendants.unwrap_or(servers);

        if servers == 0 {
            return Err(ConfigError::NoServers);
        }
        if attendants == 0 {
            return Err(ConfigError::NoAttendants);
        }
        if attendants > servers {
            return Err(ConfigError::TooManyAttendants {
                attendants,
                servers,
            });
        }
        if time_unit.is_zero() {
            return Err(ConfigError::ZeroTimeUnit);
        }

        Ok(Self {
            servers,
            attendants,
            time_unit,
        })
    }

    /// Number of service counters.
    pub fn servers(&self) -> usize {
        self.servers
    }

    /// Number of customers that may be served concurrently.
    pub fn attendants(&self) -> usize {
        self.attendants
    }

    /// Real duration of one tick.
    pub fn time_unit(&self) -> Duration {
        self.time_unit
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            servers: DEFAULT_SERVERS,
            attendants: DEFAULT_SERVERS,
            time_unit: DEFAULT_TIME_UNIT,
        }
    }
}

impl Display for BankConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "servers: {}, attendants: {}, time_unit: {:?}",
            self.servers, self.attendants, self.time_unit
        )
    }
}
