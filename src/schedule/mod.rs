//! Hook scheduling for single-rate, multi-rate and minimization force evaluation.

pub mod adapter;
pub mod integrator;
pub mod level;

pub use adapter::ScheduleAdapter;
pub use integrator::{IntegrationStyle, Integrate, LevelBuffer, Minimizer, Respa, Verlet};
pub use level::Schedule;
