pub mod probe;
pub mod roster;
pub mod snapshot;
pub mod status;

pub use probe::{Probe, ProbeError, Reading, REQUEST_TIMEOUT};
pub use roster::{default_roster, ServiceEntry};
pub use snapshot::{assemble, ServiceRecord, Snapshot};
pub use status::{normalize, Status};
