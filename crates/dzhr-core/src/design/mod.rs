//! Design vocabulary shared by composition, generation and scraping:
//! device profiles, style tokens, component references and artifacts.

pub mod device;
pub mod model;

pub use device::{DEVICES, DeviceProfile};
pub use model::{ComponentReference, ConstraintBundle, GeneratedArtifact, StyleTokenSet};
