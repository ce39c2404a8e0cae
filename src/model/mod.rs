//! Problem data and the shared candidate representation.
//!
//! - [`SquareMatrix`]: contiguous row-major matrix storage
//! - [`CostModel`]: immutable distance/flow data plus the cost
//!   evaluation that dominates the runtime of every engine
//! - [`Candidate`]: one allocation of spokes to hubs with cached cost

mod candidate;
mod cost;
mod matrix;

pub use candidate::Candidate;
pub use cost::CostModel;
pub use matrix::SquareMatrix;
