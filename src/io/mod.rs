//! Everything that touches the outside world: frame codec, socket,
//! idle watchdog and the raw frame archive.

pub mod dump;
pub mod liveness;
pub mod protocol;
pub mod transport;

pub use dump::{DirectorySink, FrameSink, NullSink};
pub use liveness::{Liveness, LivenessEvent};
pub use protocol::{InboundFrame, OutboundFrame, PlayerState, RobotState, Timing};
pub use transport::{Transport, UdpTransport};
