//! # farmwatch-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement:
//!   - `DeviceRepository`, `ActionLog`, `ReadingRepository` — persistence
//!   - `CommandPublisher` — hands control messages to the device broker
//!   - `Page`, `Element`, `AlertSurface`, `EventLoop`, `ControlTransport`,
//!     `WidgetHost` — the browser page the dashboard script runs in
//! - Server use-cases (`services`): device inventory, device control,
//!   sensor reading ingestion
//! - Page use-cases (`page`): bootstrapping, the device control flow,
//!   notifications, status polling, form validation
//!
//! ## Dependency rule
//! Depends on `farmwatch-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.
//!
//! The page use-cases run on the browser's single-threaded event loop, so
//! their ports carry no `Send` bounds and share state through `Rc`.

pub mod page;
pub mod ports;
pub mod services;
