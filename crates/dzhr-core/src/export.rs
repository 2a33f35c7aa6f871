//! Frame export of generated designs for import into a design tool.

use serde::Serialize;

use crate::design::{DeviceProfile, GeneratedArtifact};

pub const EXPORT_VERSION: &str = "1.0.0";

const FALLBACK_SIZE: (u32, u32) = (375, 812);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFrame {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub html: String,
    pub css: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignExport {
    pub name: String,
    pub version: &'static str,
    pub frames: Vec<ExportFrame>,
}

impl DesignExport {
    /// Suggested download file name.
    pub fn file_name(&self) -> String {
        let safe: String = self
            .name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' { c } else { '_' })
            .collect();
        format!("{}.fig", safe.trim())
    }
}

/// One frame per design, sized by its device. Unknown devices get phone size.
pub fn export_designs(project_name: &str, designs: &[GeneratedArtifact]) -> DesignExport {
    let frames = designs
        .iter()
        .map(|design| {
            let (width, height) = DeviceProfile::find(&design.device)
                .map(|d| (d.width, d.height))
                .unwrap_or(FALLBACK_SIZE);
            ExportFrame {
                name: design.device.clone(),
                width,
                height,
                html: design.html.clone(),
                css: design.css.clone(),
            }
        })
        .collect();

    DesignExport {
        name: project_name.to_string(),
        version: EXPORT_VERSION,
        frames,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_take_device_size() {
        let designs = vec![
            GeneratedArtifact { device: "desktop".into(), html: "<main></main>".into(), css: String::new() },
            GeneratedArtifact { device: "toaster".into(), html: "<main></main>".into(), css: String::new() },
        ];
        let export = export_designs("Pricing", &designs);
        assert_eq!((export.frames[0].width, export.frames[0].height), (1440, 900));
        assert_eq!((export.frames[1].width, export.frames[1].height), (375, 812));
        assert_eq!(export.version, "1.0.0");
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let export = export_designs("Q3/launch \"final\"", &[]);
        assert_eq!(export.file_name(), "Q3_launch _final_.fig");
    }
}
