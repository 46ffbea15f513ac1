use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec4};

use crate::gfx::{AttributeBinding, CursorMode, DrawMethod};

/// Value recorded for a uniform upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Vec4(Vec4),
    F32(f32),
    /// Texture id bound to a texture unit.
    Texture { id: u32, unit: u32 },
    /// Buffer id bound to a storage binding.
    Storage { id: u32, binding: u32 },
}

/// Kind of backend resource.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResourceKind {
    Buffer,
    Shader,
    Texture,
    VertexInputAssembly,
}

/// Everything the headless backend was asked to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateContext { title: String, width: u32, height: u32 },
    DestroyContext,
    ActivateContext,
    PollEvents,
    SwapBuffers,
    ClearColor(Vec4),
    ClearDepth,
    Wireframe(bool),
    FaceCulling(bool),
    DepthTest(bool),
    Blending(bool),
    Viewport { x: u32, y: u32, width: u32, height: u32 },
    Cursor(CursorMode),
    Create { kind: ResourceKind, id: u32 },
    Release { kind: ResourceKind, id: u32 },
    ActivateShader(u32),
    Uniform { shader: u32, name: String, value: UniformValue },
    BindShader { via: u32, shader: u32, bindings: Vec<AttributeBinding> },
    ActivateVia(u32),
    Draw { via: u32, method: DrawMethod, elements: usize, instances: u32 },
}

#[derive(Debug, Default)]
struct LogState {
    commands: Vec<Command>,
    next_id: u32,
    live: usize,
}

/// Shared command log of one headless backend.
///
/// Clones observe the same log, so a test can keep one after the backend
/// moved into a renderer.
#[derive(Debug, Clone, Default)]
pub struct HeadlessLog(Rc<RefCell<LogState>>);

impl HeadlessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, command: Command) {
        self.0.borrow_mut().commands.push(command);
    }

    pub fn commands(&self) -> Vec<Command> {
        self.0.borrow().commands.clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().commands.clear();
    }

    /// Commands matching `pred`, in order.
    pub fn filter(&self, pred: impl Fn(&Command) -> bool) -> Vec<Command> {
        self.0.borrow().commands.iter().filter(|c| pred(c)).cloned().collect()
    }

    pub fn count(&self, pred: impl Fn(&Command) -> bool) -> usize {
        self.0.borrow().commands.iter().filter(|c| pred(c)).count()
    }

    pub fn draw_calls(&self) -> usize {
        self.count(|c| matches!(c, Command::Draw { .. }))
    }

    /// Last value uploaded to uniform `name` on any shader.
    pub fn last_uniform(&self, name: &str) -> Option<UniformValue> {
        self.0.borrow().commands.iter().rev().find_map(|c| match c {
            Command::Uniform { name: n, value, .. } if n == name => Some(value.clone()),
            _ => None,
        })
    }

    /// Resources created and not yet released.
    pub fn live_resources(&self) -> usize {
        self.0.borrow().live
    }

    pub(crate) fn acquire(&self, kind: ResourceKind) -> u32 {
        let mut state = self.0.borrow_mut();
        state.next_id += 1;
        state.live += 1;
        let id = state.next_id;
        state.commands.push(Command::Create { kind, id });
        id
    }

    pub(crate) fn release(&self, kind: ResourceKind, id: u32) {
        let mut state = self.0.borrow_mut();
        state.live = state.live.saturating_sub(1);
        state.commands.push(Command::Release { kind, id });
    }
}
