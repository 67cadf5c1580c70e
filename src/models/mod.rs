pub mod crop;
pub mod environment;
pub mod management;
pub mod recommendation;
pub mod simulation;
pub mod soil;
pub mod suitability;

pub use crop::*;
pub use environment::*;
pub use management::*;
pub use recommendation::*;
pub use simulation::*;
pub use soil::*;
pub use suitability::*;
