//! Domain model: what a scene is made of and how it is configured.

pub mod attachment;
pub mod category;
pub mod content;
pub mod object;
pub mod scene;
pub mod settings;

pub use attachment::{AttachmentPoint, PointRole};
pub use category::{Layer, LayerMask, SnapCategory, SurfaceTag};
pub use content::{ObjectSpec, PointSpec, Prefab, PrefabRegistry, SceneBundle};
pub use object::SceneObject;
pub use scene::Scene;
pub use settings::SnapSettings;
