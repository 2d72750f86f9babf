//! Background maintenance for the Soloroom service.

pub mod sweeper;

pub use sweeper::Sweeper;
