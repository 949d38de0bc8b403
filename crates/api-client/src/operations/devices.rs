//! Device operations
//!
//! Listing, inspection, control, claiming, and firmware upload for the
//! devices owned by the authenticated account. All operations use Bearer
//! authentication.

use http::Method;

use crate::auth::AuthScheme;
use crate::client::{BodyFormat, ParticleClient};
use crate::error::{ApiResult, ParticleError};
use crate::params::{FilePart, FirmwareSource, Params};
use crate::request::RequestMessage;

/// Device API interface
#[derive(Clone)]
pub struct DevicesApi {
    client: ParticleClient,
}

impl DevicesApi {
    /// Create a new devices API interface
    pub(crate) fn new(client: ParticleClient) -> Self {
        Self { client }
    }

    /// List devices the authenticated user has access to.
    ///
    /// GET /v1/devices
    pub fn list(&self) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "listDevices",
            Method::GET,
            &["devices"],
            Params::new(),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Get basic information about a device, including the variables and
    /// functions it exposes.
    ///
    /// GET /v1/devices/{id}
    pub fn get(&self, device_id: &str) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "getDevice",
            Method::GET,
            &["devices", device_id],
            Params::new(),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Rename a device.
    ///
    /// PUT /v1/devices/{id}
    pub fn rename(&self, device_id: &str, name: &str) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "renameDevice",
            Method::PUT,
            &["devices", device_id],
            Params::new().with("name", name),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Run a function on a device. `args` is the single argument string
    /// the firmware receives; `raw` requests just the return value.
    ///
    /// POST /v1/devices/{id}/{function}
    pub fn call_function(
        &self,
        device_id: &str,
        function: &str,
        args: &str,
        raw: bool,
    ) -> ApiResult<RequestMessage> {
        let mut params = Params::new().with("args", args);
        if raw {
            params.insert("format", "raw");
        }

        self.client.build_request(
            "callFunction",
            Method::POST,
            &["devices", device_id, function],
            params,
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Read the value of a device variable. `raw` strips the device
    /// details from the response.
    ///
    /// GET /v1/devices/{id}/{variable}[?format=raw]
    pub fn get_variable(
        &self,
        device_id: &str,
        variable: &str,
        raw: bool,
    ) -> ApiResult<RequestMessage> {
        let mut params = Params::new();
        if raw {
            params.insert("format", "raw");
        }

        self.client.build_request(
            "getVariable",
            Method::GET,
            &["devices", device_id, variable],
            params,
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Generate a device claim code from a SIM ICCID or an IMEI. The ICCID
    /// wins when both are supplied; at least one is required.
    ///
    /// POST /v1/device_claims
    pub fn claim_code(
        &self,
        iccid: Option<&str>,
        imei: Option<&str>,
    ) -> ApiResult<RequestMessage> {
        let params = match (iccid, imei) {
            (Some(iccid), _) => Params::new().with("iccid", iccid),
            (None, Some(imei)) => Params::new().with("imei", imei),
            (None, None) => {
                return Err(ParticleError::invalid_argument(
                    "neither ICCID nor IMEI were supplied; at least one is needed",
                ));
            }
        };

        self.client.build_request(
            "claimCode",
            Method::POST,
            &["device_claims"],
            params,
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Claim a device to the authenticated account. `request_transfer`
    /// asks for an already-claimed device to be transferred.
    ///
    /// POST /v1/devices
    pub fn claim(&self, device_id: &str, request_transfer: bool) -> ApiResult<RequestMessage> {
        let mut params = Params::new().with("id", device_id);
        if request_transfer {
            params.insert("request_transfer", "true");
        }

        self.client.build_request(
            "claimDevice",
            Method::POST,
            &["devices"],
            params,
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Remove a device from the account.
    ///
    /// DELETE /v1/devices/{id}
    pub fn remove(&self, device_id: &str) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "removeDevice",
            Method::DELETE,
            &["devices", device_id],
            Params::new(),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Upload firmware to a device as `multipart/form-data`.
    ///
    /// A binary firmware is the complete pre-compiled system and
    /// application; source firmware is compiled in the cloud first. Only a
    /// binary upload carries the `file_type=binary` field — it is omitted
    /// entirely for source uploads.
    ///
    /// PUT /v1/devices/{id}
    pub fn upload_firmware(
        &self,
        device_id: &str,
        filename: &str,
        source: impl Into<FirmwareSource>,
        is_binary: bool,
    ) -> ApiResult<RequestMessage> {
        let contents = source.into().into_bytes()?;

        let file = FilePart::new(contents, filename)
            .with_header("Content-Type", "application/octet-stream");

        let mut params = Params::new().with("file", file);
        if is_binary {
            params.insert("file_type", "binary");
        }

        self.client.build_request(
            "uploadFirmware",
            Method::PUT,
            &["devices", device_id],
            params,
            AuthScheme::Bearer,
            BodyFormat::Multipart,
        )
    }

    /// Set the device signal mode: `true` makes the RGB LED flash a
    /// rainbow, `false` returns it to normal.
    ///
    /// PUT /v1/devices/{id}
    pub fn signal(&self, device_id: &str, enable: bool) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "signalDevice",
            Method::PUT,
            &["devices", device_id],
            Params::new().with("signal", i64::from(enable)),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }
}
