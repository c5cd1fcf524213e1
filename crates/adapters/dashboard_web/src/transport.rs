//! Control requests over `fetch`.

use farmwatch_app::ports::{ControlTransport, TransportError};
use farmwatch_domain::command::Command;
use farmwatch_domain::control::{ControlResponse, control_path};
use farmwatch_domain::id::DeviceId;
use gloo_net::http::Request;

pub struct FetchTransport;

impl ControlTransport for FetchTransport {
    async fn control(
        &self,
        device_id: &DeviceId,
        command: Command,
    ) -> Result<ControlResponse, TransportError> {
        let response = Request::get(&control_path(device_id, command))
            .send()
            .await
            .map_err(|err| TransportError::Network(err.to_string()))?;
        response
            .json::<ControlResponse>()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))
    }
}
