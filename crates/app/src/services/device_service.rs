//! Device service — use-cases for managing the device inventory.

use farmwatch_domain::device::Device;
use farmwatch_domain::error::{FarmwatchError, NotFoundError};
use farmwatch_domain::id::DeviceId;

use crate::ports::DeviceRepository;

/// Application service for device CRUD operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new device after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FarmwatchError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_id = %device.id))]
    pub async fn create_device(&self, device: Device) -> Result<Device, FarmwatchError> {
        device.validate()?;
        self.repo.create(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`FarmwatchError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: &DeviceId) -> Result<Device, FarmwatchError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, FarmwatchError> {
        self.repo.get_all().await
    }

    /// Update an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`FarmwatchError::Validation`] if invariants fail, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, device), fields(device_id = %device.id))]
    pub async fn update_device(&self, device: Device) -> Result<Device, FarmwatchError> {
        device.validate()?;
        self.repo.update(device).await
    }

    /// Create or update a device by id.
    ///
    /// An existing device keeps its current status; everything else is
    /// replaced. Used to seed the inventory from configuration on every start.
    ///
    /// # Errors
    ///
    /// Returns [`FarmwatchError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_id = %device.id))]
    pub async fn upsert_device(&self, device: Device) -> Result<Device, FarmwatchError> {
        if let Some(existing) = self.repo.get_by_id(&device.id).await? {
            let updated = Device {
                status: existing.status,
                ..device
            };
            return self.update_device(updated).await;
        }
        self.create_device(device).await
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: &DeviceId) -> Result<(), FarmwatchError> {
        self.repo.delete(id).await
    }
}
