/// Scene lifecycle misuse.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneError {
    #[error("scene is already loaded")]
    AlreadyLoaded,

    #[error("scene is not loaded")]
    NotLoaded,
}
