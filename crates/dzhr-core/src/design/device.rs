//! Fixed catalog of device viewports.

use serde::Serialize;

use crate::error::{DzhrError, DzhrResult};

/// A named viewport every generation and refinement call is sized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

/// The five supported devices. Never created or mutated at runtime.
pub static DEVICES: [DeviceProfile; 5] = [
    DeviceProfile { id: "phone", name: "Phone", width: 375, height: 812 },
    DeviceProfile { id: "tablet", name: "Tablet", width: 768, height: 1024 },
    DeviceProfile { id: "desktop", name: "Desktop", width: 1440, height: 900 },
    DeviceProfile { id: "watch", name: "Apple Watch", width: 368, height: 448 },
    DeviceProfile { id: "vr", name: "VR/AR", width: 1920, height: 1080 },
];

impl DeviceProfile {
    /// Look up a device by id.
    pub fn find(id: &str) -> Option<&'static DeviceProfile> {
        DEVICES.iter().find(|d| d.id == id)
    }

    /// Look up a device by id, failing with `InvalidDevice` when unknown.
    pub fn resolve(id: &str) -> DzhrResult<&'static DeviceProfile> {
        Self::find(id).ok_or_else(|| DzhrError::InvalidDevice(id.to_string()))
    }

    /// Resolve every id up front so an unknown device rejects the whole batch.
    pub fn resolve_all<S: AsRef<str>>(ids: &[S]) -> DzhrResult<Vec<&'static DeviceProfile>> {
        ids.iter().map(|id| Self::resolve(id.as_ref())).collect()
    }

    /// e.g. `375x812px`
    pub fn dimensions(&self) -> String {
        format!("{}x{}px", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let phone = DeviceProfile::resolve("phone").unwrap();
        assert_eq!(phone.width, 375);
        assert_eq!(phone.height, 812);
        assert_eq!(phone.dimensions(), "375x812px");
        assert_eq!(DeviceProfile::find("vr").unwrap().name, "VR/AR");
    }

    #[test]
    fn test_unknown_device_rejected() {
        let err = DeviceProfile::resolve_all(&["phone", "not-a-real-device"]).unwrap_err();
        assert!(matches!(err, DzhrError::InvalidDevice(ref id) if id == "not-a-real-device"));
    }
}
