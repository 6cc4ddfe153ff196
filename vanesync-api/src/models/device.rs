use serde::{Deserialize, Serialize};

/// Identity of one physical covering device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Radio address of the device
    pub device_id: String,
    /// Display name
    pub name: String,
    /// Descriptive type label, stamped once by the device profile
    #[serde(default)]
    pub type_label: String,
}

impl DeviceInfo {
    pub fn new(device_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            name: name.into(),
            type_label: String::new(),
        }
    }
}
