pub mod audit_log;
pub mod club;
pub mod event;
pub mod ranking;
pub mod semester;
