pub mod audit_log;
pub mod club;
pub mod event;
pub mod ranking;
pub mod semester;

pub use audit_log::{AuditAction, AuditLog};
pub use club::Club;
pub use event::{Event, MetricScores};
pub use ranking::{Ranking, Tier};
pub use semester::Semester;
