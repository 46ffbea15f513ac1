//! Object tree.
//!
//! A `Scene` owns every node of one tree in an arena. Behaviour is supplied
//! through the `Object` trait; hooks reach the scene and the active renderer
//! through `Ctx`.

mod ctx;
mod error;
mod handle;
mod object;
mod tree;

pub use ctx::Ctx;
pub use error::SceneError;
pub use handle::Handle;
pub use object::{AsAny, Group, Object};
pub use tree::Scene;

slotmap::new_key_type! {
    /// Stable id of a scene node.
    pub struct ObjectId;
}
