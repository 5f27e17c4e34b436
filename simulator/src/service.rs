//! Service duration modelling using Gamma/Erlang distribution

use bank_services::Tick;
use rand::SeedableRng;
use rand_distr::{Distribution, Gamma};

use crate::workload::WorkloadError;

/// Service time profile configured by number of tasks and task completion rate.
///
/// Uses Erlang distribution to model a visit as the sum of multiple independent
/// exponentially-distributed tasks (e.g. identify, fill in forms, count cash). Durations are
/// rounded up to whole ticks, and every visit takes at least one tick.
#[derive(Debug, Clone)]
pub struct ServiceProfile {
    tasks: u64,
    task_rate: f64,

    distribution: Gamma<f64>,
    /// RNG for reproducibility
    rng: rand::rngs::StdRng,
}

impl ServiceProfile {
    /// Create a new service profile
    ///
    /// # Arguments
    /// * `tasks` - Number of sequential tasks per visit
    /// * `task_rate` - Tasks completed per tick
    /// * `seed` - Optional seed for reproducibility
    pub fn new(tasks: u64, task_rate: f64, seed: Option<u64>) -> Result<Self, WorkloadError> {
        if tasks == 0 {
            return Err(WorkloadError::ServiceTasks);
        }
        if !(task_rate.is_finite() && task_rate > 0.0) {
            return Err(WorkloadError::ServiceRate(task_rate));
        }

        // Erlang(k, λ) is equivalent to Gamma(k, 1/λ)
        // Gamma uses shape parameter k and scale parameter θ = 1/λ
        let shape = tasks as f64;
        let scale = 1.0 / task_rate;
        let distribution =
            Gamma::new(shape, scale).map_err(|_| WorkloadError::ServiceRate(task_rate))?;

        let rng = match seed {
            Some(s) => rand::rngs::StdRng::seed_from_u64(s),
            None => rand::rngs::StdRng::from_os_rng(),
        };

        Ok(Self {
            tasks,
            task_rate,
            distribution,
            rng,
        })
    }

    /// Sample a service duration from this profile
    pub fn sample(&mut self) -> Tick {
        let ticks = self.distribution.sample(&mut self.rng).ceil();
        (ticks as Tick).max(1)
    }

    /// Mean service duration, before rounding
    pub fn mean(&self) -> f64 {
        (self.tasks as f64) / self.task_rate
    }
}
