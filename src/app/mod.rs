pub mod progress;
pub mod report;
pub mod session;

pub use progress::{InstantProgress, TickingProgress};
pub use report::ReportWriter;
pub use session::{SessionOutcome, SessionRunner};
