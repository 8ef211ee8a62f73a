pub mod audit;
pub mod change_detector;
pub mod export;
pub mod performance;
pub mod rank_assigner;
pub mod recalculation;

pub use audit::Actor;
