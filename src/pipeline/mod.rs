pub mod coords;
pub mod entities;
pub mod grids;
pub mod memory;
pub mod motion;
pub mod params;
pub mod predictor;
pub mod radial;
pub mod session;

pub use session::{Session, TickOutput};
