pub mod audit;
pub mod clubs;
pub mod events;
pub mod rankings;
pub mod semesters;
