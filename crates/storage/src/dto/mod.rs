pub mod audit;
pub mod club;
pub mod common;
pub mod event;
pub mod ranking;
pub mod semester;
