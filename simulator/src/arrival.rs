//! Arrival pattern implementations (Poisson, etc.)

use bank_services::Tick;
use rand::SeedableRng;
use rand_distr::{Distribution, Exp};

use crate::workload::WorkloadError;

/// Poisson arrival pattern generator
///
/// Generates inter-arrival gaps following an exponential distribution, which results in
/// Poisson-distributed arrivals. Gaps are measured in ticks; arrival times are rounded down to
/// whole ticks, so several customers can arrive at the same tick.
pub struct PoissonArrivals {
    /// Mean arrival rate (customers per tick)
    rate: f64,
    /// Exponential distribution for inter-arrival gaps
    exp_dist: Exp<f64>,
    /// RNG for reproducibility
    rng: rand::rngs::StdRng,
    /// Unrounded time of the latest arrival
    precise_time: f64,
}

impl PoissonArrivals {
    /// Create a new Poisson arrival pattern
    ///
    /// # Arguments
    /// * `rate` - Mean arrival rate in customers per tick
    /// * `seed` - Optional seed for reproducibility
    pub fn new(rate: f64, seed: Option<u64>) -> Result<Self, WorkloadError> {
        if !(rate.is_finite() && rate > 0.0) {
            return Err(WorkloadError::ArrivalRate(rate));
        }
        let exp_dist = Exp::new(rate).map_err(|_| WorkloadError::ArrivalRate(rate))?;
        let rng = match seed {
            Some(s) => rand::rngs::StdRng::seed_from_u64(s),
            None => rand::rngs::StdRng::from_os_rng(),
        };

        Ok(Self {
            rate,
            exp_dist,
            rng,
            precise_time: 0.0,
        })
    }

    /// Get the mean arrival rate
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Sample the next inter-arrival gap, in fractional ticks
    pub fn next_inter_arrival_gap(&mut self) -> f64 {
        self.exp_dist.sample(&mut self.rng)
    }

    /// Advance to the next arrival and return its tick
    pub fn next_arrival(&mut self) -> Tick {
        self.precise_time += self.next_inter_arrival_gap();
        self.precise_time.floor() as Tick
    }
}
