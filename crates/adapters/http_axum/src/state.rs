//! Shared application state for axum handlers.

use std::sync::Arc;

use farmwatch_app::ports::{ActionLog, CommandPublisher, DeviceRepository, ReadingRepository};
use farmwatch_app::services::control_service::ControlService;
use farmwatch_app::services::device_service::DeviceService;
use farmwatch_app::services::reading_service::ReadingService;
use farmwatch_domain::farm::Farm;

/// Application state shared across all axum handlers.
///
/// Generic over the device repository, command publisher, action log, and
/// reading repository to avoid dynamic dispatch. The device repository is
/// shared by every service through an `Arc`. `Clone` is implemented manually
/// so the underlying types themselves do not need to be `Clone`.
pub struct AppState<DR, P, AL, RR> {
    /// Device inventory service.
    pub device_service: Arc<DeviceService<Arc<DR>>>,
    /// Device control service.
    pub control_service: Arc<ControlService<Arc<DR>, P, AL>>,
    /// Sensor reading service.
    pub reading_service: Arc<ReadingService<Arc<DR>, RR>>,
    /// Farms shown on the overview page.
    pub farms: Arc<[Farm]>,
}

impl<DR, P, AL, RR> Clone for AppState<DR, P, AL, RR> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            control_service: Arc::clone(&self.control_service),
            reading_service: Arc::clone(&self.reading_service),
            farms: Arc::clone(&self.farms),
        }
    }
}

impl<DR, P, AL, RR> AppState<DR, P, AL, RR>
where
    DR: DeviceRepository + Send + Sync + 'static,
    P: CommandPublisher + Send + Sync + 'static,
    AL: ActionLog + Send + Sync + 'static,
    RR: ReadingRepository + Send + Sync + 'static,
{
    /// Wire the services over the given adapters.
    pub fn new(devices: DR, publisher: P, actions: AL, readings: RR, farms: Vec<Farm>) -> Self {
        let devices = Arc::new(devices);
        Self {
            device_service: Arc::new(DeviceService::new(Arc::clone(&devices))),
            control_service: Arc::new(ControlService::new(
                Arc::clone(&devices),
                publisher,
                actions,
            )),
            reading_service: Arc::new(ReadingService::new(devices, readings)),
            farms: farms.into(),
        }
    }
}
