//! In-memory backend.
//!
//! Implements every backend trait without a window or GPU. Commands are
//! recorded in a shared `HeadlessLog`; input is scripted through an
//! `EventQueue`. Used by the test suite and the demo binary.

mod command_log;
mod reflect;
mod resources;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use anyhow::{bail, Result};
use glam::Vec4;

use crate::gfx::{
    Buffer, BufferAccess, BufferFormat, CursorMode, DrawMethod, IndexType, RenderApi, Shader,
    ShaderSource, Texture, VertexInputAssembly, VertexInputs,
};
use crate::input::Event;
use crate::renderer::{Backend, BackendEvent, RendererProperties};

pub use command_log::{Command, HeadlessLog, ResourceKind, UniformValue};
pub use reflect::{reflect_program, Reflection};
pub use resources::{HeadlessBuffer, HeadlessShader, HeadlessTexture, HeadlessVertexInputAssembly};

/// Scripted input shared between a test and the backend it drives.
#[derive(Debug, Clone, Default)]
pub struct EventQueue(Rc<RefCell<VecDeque<BackendEvent>>>);

impl EventQueue {
    pub fn push(&self, event: BackendEvent) {
        self.0.borrow_mut().push_back(event);
    }

    pub fn push_input(&self, event: impl Into<Event>) {
        self.push(BackendEvent::Input(event.into()));
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    fn drain(&self) -> Vec<BackendEvent> {
        self.0.borrow_mut().drain(..).collect()
    }
}

/// Windowless `Backend`.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    log: HeadlessLog,
    events: EventQueue,
    context: bool,
    frames: u64,
    close_after: Option<u64>,
    fail_context: bool,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests close on the first poll after `frames` presented frames.
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Makes `create_context` fail.
    pub fn failing_context(mut self) -> Self {
        self.fail_context = true;
        self
    }

    pub fn log(&self) -> HeadlessLog {
        self.log.clone()
    }

    pub fn events(&self) -> EventQueue {
        self.events.clone()
    }

    /// Queues an event for the next poll.
    pub fn push_event(&self, event: BackendEvent) {
        self.events.push(event);
    }

    pub fn has_context(&self) -> bool {
        self.context
    }

    /// Frames presented since the context was created.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderApi for HeadlessBackend {
    fn clear_color_buffer(&mut self, color: Vec4) {
        self.log.record(Command::ClearColor(color));
    }

    fn clear_depth_buffer(&mut self) {
        self.log.record(Command::ClearDepth);
    }

    fn wireframe_mode(&mut self, enable: bool) {
        self.log.record(Command::Wireframe(enable));
    }

    fn enable_face_culling(&mut self, enable: bool) {
        self.log.record(Command::FaceCulling(enable));
    }

    fn enable_depth_testing(&mut self, enable: bool) {
        self.log.record(Command::DepthTest(enable));
    }

    fn enable_blending(&mut self, enable: bool) {
        self.log.record(Command::Blending(enable));
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.log.record(Command::Viewport { x, y, width, height });
    }

    fn set_cursor(&mut self, mode: CursorMode) {
        self.log.record(Command::Cursor(mode));
    }

    fn gen_shader(&mut self, name: &str, sources: &[ShaderSource]) -> Result<Box<dyn Shader>> {
        let reflection = reflect_program(name, sources)?;
        Ok(Box::new(HeadlessShader::new(&self.log, name, reflection)))
    }

    fn gen_buffer(&mut self, data: &[u8], format: &BufferFormat, access: BufferAccess) -> Result<Box<dyn Buffer>> {
        Ok(Box::new(HeadlessBuffer::new(&self.log, data, format, access)))
    }

    fn gen_texture(&mut self, path: &Path) -> Result<Box<dyn Texture>> {
        Ok(Box::new(HeadlessTexture::load(&self.log, path)?))
    }

    fn gen_vertex_input_assembly(&mut self, index_type: IndexType) -> Result<Box<dyn VertexInputAssembly>> {
        Ok(Box::new(HeadlessVertexInputAssembly::new(
            &self.log,
            VertexInputs::new(index_type),
        )))
    }

    fn draw(&mut self, via: &mut dyn VertexInputAssembly, method: DrawMethod, instances: u32) {
        if method == DrawMethod::None || instances == 0 {
            return;
        }
        via.activate();
        self.log.record(Command::Draw {
            via: via.id(),
            method,
            elements: via.element_count(),
            instances,
        });
    }
}

impl Backend for HeadlessBackend {
    fn create_context(&mut self, properties: &RendererProperties) -> Result<()> {
        if self.fail_context {
            bail!("headless context creation disabled");
        }
        self.context = true;
        self.frames = 0;
        self.log.record(Command::CreateContext {
            title: properties.title.clone(),
            width: properties.width,
            height: properties.height,
        });
        Ok(())
    }

    fn destroy_context(&mut self) {
        self.context = false;
        self.log.record(Command::DestroyContext);
    }

    fn activate_context(&mut self) {
        self.log.record(Command::ActivateContext);
    }

    fn poll_events(&mut self) -> Vec<BackendEvent> {
        self.log.record(Command::PollEvents);

        let mut events = self.events.drain();
        if self.close_after.is_some_and(|n| self.frames >= n) {
            events.push(BackendEvent::CloseRequested);
        }
        events
    }

    fn swap_buffers(&mut self) {
        self.frames += 1;
        self.log.record(Command::SwapBuffers);
    }
}
