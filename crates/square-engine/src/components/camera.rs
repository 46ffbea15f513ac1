use std::f32::consts::FRAC_PI_4;

use glam::Mat4;

use super::transform::{Transform, Transformable};
use crate::entity::{ControlsSystem, Entity};
use crate::input::WindowResizeEvent;
use crate::scene::{Ctx, Object};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ProjectionKind {
    #[default]
    Perspective,
    Orthographic,
}

/// A placed view with a projection.
pub trait Projectable: Transformable {
    fn projection_matrix(&self) -> Mat4;
    fn set_aspect(&mut self, aspect: f32);
    /// Rebuilds the projection from the current parameters.
    fn recalculate_projection(&mut self);
}

/// View into a scene.
///
/// Setters only store parameters; call `recalculate_projection` afterwards.
/// `fovy` is the vertical field of view in radians. `ortho_scale` is the
/// half-height of the orthographic view volume. Perspective clip planes must
/// be positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    transform: Transform,
    projection: Mat4,
    kind: ProjectionKind,
    fovy: f32,
    ortho_scale: f32,
    aspect: f32,
    ortho_near: f32,
    ortho_far: f32,
    persp_near: f32,
    persp_far: f32,
}

impl Camera {
    pub fn new(kind: ProjectionKind, aspect: f32) -> Self {
        let mut camera = Self {
            transform: Transform::new(),
            projection: Mat4::IDENTITY,
            kind,
            fovy: FRAC_PI_4,
            ortho_scale: 1.0,
            aspect,
            ortho_near: -1.0,
            ortho_far: 1.0,
            persp_near: 0.1,
            persp_far: 10.0,
        };
        camera.recalculate_projection();
        camera
    }

    /// Camera entity that follows window resizes.
    pub fn entity(kind: ProjectionKind, aspect: f32) -> Entity<Camera> {
        Entity::new(Self::new(kind, aspect)).with_controls_system(CameraResizeController)
    }

    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: ProjectionKind) {
        self.kind = kind;
    }

    pub fn fovy(&self) -> f32 {
        self.fovy
    }

    pub fn set_fovy(&mut self, fovy: f32) {
        self.fovy = fovy;
    }

    pub fn ortho_scale(&self) -> f32 {
        self.ortho_scale
    }

    pub fn set_ortho_scale(&mut self, scale: f32) {
        self.ortho_scale = scale;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn ortho_clip_planes(&self) -> (f32, f32) {
        (self.ortho_near, self.ortho_far)
    }

    pub fn set_ortho_clip_planes(&mut self, near: f32, far: f32) {
        self.ortho_near = near;
        self.ortho_far = far;
    }

    pub fn perspective_clip_planes(&self) -> (f32, f32) {
        (self.persp_near, self.persp_far)
    }

    pub fn set_perspective_clip_planes(&mut self, near: f32, far: f32) {
        self.persp_near = near;
        self.persp_far = far;
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.transform.view_matrix()
    }
}

impl Transformable for Camera {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

impl Projectable for Camera {
    fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    fn recalculate_projection(&mut self) {
        self.projection = match self.kind {
            ProjectionKind::Perspective => {
                Mat4::perspective_rh_gl(self.fovy, self.aspect, self.persp_near, self.persp_far)
            }
            ProjectionKind::Orthographic => {
                let h = self.ortho_scale;
                let w = h * self.aspect;
                Mat4::orthographic_rh_gl(-w, w, -h, h, self.ortho_near, self.ortho_far)
            }
        };
    }
}

impl Object for Camera {}

/// Keeps the viewport and the camera aspect in step with the window.
///
/// Consumes the resize event.
#[derive(Debug, Copy, Clone, Default)]
pub struct CameraResizeController;

impl<T: Projectable> ControlsSystem<T> for CameraResizeController {
    fn on_resize(&self, event: &WindowResizeEvent, camera: &mut T, ctx: &mut Ctx<'_>) -> bool {
        ctx.api().set_viewport(0, 0, event.width, event.height);
        if event.height > 0 {
            camera.set_aspect(event.width as f32 / event.height as f32);
            camera.recalculate_projection();
        }
        true
    }
}
