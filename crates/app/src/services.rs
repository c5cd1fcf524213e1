//! Application services — server-side use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod control_service;
pub mod device_service;
pub mod reading_service;

#[cfg(test)]
pub(crate) mod testing;
