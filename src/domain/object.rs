use crate::core::{ObjectId, PointId, Pose, Vec3};

/// Something placed in the scene: a brick, a plate, a baseplate, or a sub-part
/// of one of those.
#[derive(Clone, Debug)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    /// `None` for a root object
    pub parent: Option<ObjectId>,
    /// Pose relative to `parent` (world pose for roots)
    pub local_pose: Pose,
    /// Local position of the visual model. Lets the renderer shift the mesh
    /// without moving the simulated body.
    pub model_offset: Vec3,
    /// Receiver points in declaration order
    pub receivers: Vec<PointId>,
    pub targets: Vec<PointId>,
    /// Currently held by a manipulator
    pub held: bool,
}

impl SceneObject {
    pub fn new(id: ObjectId, name: String, parent: Option<ObjectId>, local_pose: Pose) -> Self {
        Self {
            id,
            name,
            parent,
            local_pose,
            model_offset: Vec3::ZERO,
            receivers: Vec::new(),
            targets: Vec::new(),
            held: false,
        }
    }
}
