//! # farmwatch-domain
//!
//! Pure domain model for the farmwatch device-monitoring system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Devices** (sensors and actuators reachable through a message topic)
//! - Define **Commands** (`on` / `off`) and the control request/response contract
//! - Define **Farms**, **sensor readings**, and the **action log** record
//! - Define **Alerts** (transient notifications with a severity)
//! - Define **widget descriptors** (maps, charts) read from page attributes
//! - Define the **page contract**: markers, ids, and classes shared by the
//!   server-rendered pages and the browser adapter
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod action;
pub mod alert;
pub mod command;
pub mod control;
pub mod device;
pub mod farm;
pub mod page;
pub mod reading;
pub mod widget;
