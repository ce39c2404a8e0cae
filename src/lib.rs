//! Single-allocation hub-location solver.
//!
//! Searches for a low-cost allocation of spoke nodes to a small fixed
//! number of hub nodes over a flow-weighted network. Every unit of
//! flow travels spoke → hub → hub → spoke; the inter-hub leg is
//! discounted by `alpha`, modeling economies of scale on trunk
//! routes. Three metaheuristic engines share one candidate
//! representation, one cost model, and one set of neighbor operators:
//!
//! - **Genetic** ([`ga`]): population-based search with
//!   fitness-proportional selection and single-point hub crossover.
//! - **Simulated Annealing** ([`sa`]): single trajectory with
//!   Metropolis acceptance over an exponential cooling schedule,
//!   generic over the [`sa::AnnealState`] trait.
//! - **Tabu Search** ([`tabu`]): sampled steepest descent guided by
//!   a fixed-capacity recency memory with an aspiration escape.
//!
//! # Architecture
//!
//! [`model::CostModel`] holds the read-only problem data and the
//! O(n²) cost evaluation that dominates the runtime; it is shared by
//! reference across any number of concurrent trajectories.
//! [`neighborhood`] builds random initial candidates and the three
//! neighbor operators, all of which return structurally valid
//! candidates. [`portfolio`] fans independent trajectories out over
//! rayon and picks the lowest-cost winner; [`loader`] reads instance
//! matrices from delimited text.
//!
//! # Example
//!
//! ```
//! use hubloc::model::{CostModel, SquareMatrix};
//! use hubloc::tabu::{TabuConfig, TabuRunner};
//!
//! let distance = SquareMatrix::from_rows(vec![
//!     vec![0.0, 1.0, 2.0],
//!     vec![1.0, 0.0, 1.0],
//!     vec![2.0, 1.0, 0.0],
//! ])?;
//! let flow = SquareMatrix::filled(3, 1.0);
//! let model = CostModel::new(distance, flow, 0.5)?;
//!
//! let config = TabuConfig::default()
//!     .with_hub_count(1)
//!     .with_branching(10)
//!     .with_max_iterations(50)
//!     .with_seed(42);
//! let result = TabuRunner::run(&model, &config)?;
//! assert_eq!(result.best.hubs, vec![1]);
//! # Ok::<(), hubloc::Error>(())
//! ```

pub mod error;
pub mod ga;
pub mod loader;
pub mod model;
pub mod neighborhood;
pub mod portfolio;
pub mod sa;
pub mod tabu;

pub use error::{Error, Result};
pub use model::{Candidate, CostModel, SquareMatrix};
pub use neighborhood::Neighborhood;
