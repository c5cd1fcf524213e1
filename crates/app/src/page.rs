//! Page use-cases — behaviour attached to a server-rendered dashboard page.
//!
//! These run once per page load (the [`bootstrap::Bootstrapper`]) or in
//! response to page events. They only talk to the page through the browser
//! ports, so every flow is testable with in-memory fakes.

pub mod bootstrap;
pub mod control;
pub mod notification;
pub mod polling;
pub mod validation;

#[cfg(test)]
pub(crate) mod fakes;
