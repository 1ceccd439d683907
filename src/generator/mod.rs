mod orchestrator;
mod tour;

pub use orchestrator::{Collaborators, Generator};
pub use tour::nearest_neighbor_order;
