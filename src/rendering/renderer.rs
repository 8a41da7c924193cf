//! The write-only contract between the game session and whatever draws it.

use crate::game::{Cell, EntityKind};

/// Draws snake and food entities. The session never reads anything back;
/// it only keeps the handles it was given.
pub trait Renderer {
    type Handle: Copy;

    fn create_entity(&mut self, kind: EntityKind, cell: Cell) -> Self::Handle;

    fn update_color(&mut self, handle: Self::Handle, kind: EntityKind);

    fn remove_entity(&mut self, handle: Self::Handle);
}
