//! Square engine crate.
//!
//! Object tree, entity/system composition, render-resource abstraction and
//! the renderer/app loop. `backend::headless` implements the backend traits
//! in memory.

pub mod backend;
pub mod components;
pub mod entity;
pub mod gfx;
pub mod input;
pub mod renderer;
pub mod scene;
pub mod time;

pub mod logging;
