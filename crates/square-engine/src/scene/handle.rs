use std::fmt;
use std::marker::PhantomData;

use super::ObjectId;

/// Non-owning typed reference to a scene node.
///
/// Lookups through a handle fail softly (`None`) once the node is gone or if
/// it holds a different type.
pub struct Handle<U> {
    id: ObjectId,
    _marker: PhantomData<fn() -> U>,
}

impl<U> Handle<U> {
    pub fn new(id: ObjectId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }
}

impl<U> Clone for Handle<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U> Copy for Handle<U> {}

impl<U> PartialEq for Handle<U> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<U> Eq for Handle<U> {}

impl<U> fmt::Debug for Handle<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.id).finish()
    }
}

impl<U> From<Handle<U>> for ObjectId {
    fn from(h: Handle<U>) -> Self {
        h.id
    }
}
