//! Placeholder artifact substituted when generation returns no markup.

use crate::design::{DeviceProfile, GeneratedArtifact};

const FALLBACK_CSS: &str = ".dzhr-fallback { display: flex; align-items: center; justify-content: center; \
min-height: 100vh; padding: 24px; font-family: system-ui, sans-serif; line-height: 1.5; \
color: #1f2933; background-color: #f5f7fa; }\n\
.dzhr-fallback blockquote { margin: 16px 0 0; padding: 16px; border-left: 4px solid #3e4c59; \
background-color: #ffffff; }";

/// Escape text for inclusion in HTML element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A minimal, clearly labeled artifact that shows the original brief.
pub fn fallback_artifact(brief: &str, device: &DeviceProfile) -> GeneratedArtifact {
    let html = format!(
        "<main class=\"dzhr-fallback\">\n  <section>\n    <h1>Design unavailable</h1>\n    \
         <p>No markup was generated for the {} layout. Requested design:</p>\n    \
         <blockquote>{}</blockquote>\n  </section>\n</main>",
        escape_html(device.name),
        escape_html(brief)
    );
    GeneratedArtifact {
        device: device.id.to_string(),
        html,
        css: FALLBACK_CSS.to_string(),
    }
}
