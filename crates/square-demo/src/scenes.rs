use glam::{Vec3, Vec4};
use square_engine::components::{color, Camera, Material, MeshData, ProjectionKind, Transformable};
use square_engine::entity::{ControlsSystem, Entity, RenderSystem};
use square_engine::gfx::{AttributeType, BufferAttribute, BufferFormat, DrawMethod, ShaderSource, ShaderStage};
use square_engine::input::{Key, KeyEvent};
use square_engine::scene::{Ctx, Object, Scene};

/// Root of every demo scene: a background color the keyboard can change.
pub struct Backdrop {
    pub color: Vec4,
}

impl Object for Backdrop {}

struct ClearBackground;

impl RenderSystem<Backdrop> for ClearBackground {
    fn render(&self, _dt: f32, backdrop: &mut Backdrop, ctx: &mut Ctx<'_>) {
        let api = ctx.api();
        api.clear_color_buffer(backdrop.color);
        api.clear_depth_buffer();
    }
}

/// Escape closes the window; Up/Down step the red channel.
struct BackdropControls;

impl ControlsSystem<Backdrop> for BackdropControls {
    fn on_key(&self, event: &KeyEvent, backdrop: &mut Backdrop, ctx: &mut Ctx<'_>) -> bool {
        if event.is_pressed() {
            return false;
        }
        match event.key {
            Key::Escape => {
                ctx.request_exit();
                true
            }
            Key::Up => {
                backdrop.color.x = (backdrop.color.x + 0.1).min(1.0);
                log::info!("background red {:.1}", backdrop.color.x);
                false
            }
            Key::Down => {
                backdrop.color.x = (backdrop.color.x - 0.1).max(0.0);
                log::info!("background red {:.1}", backdrop.color.x);
                false
            }
            _ => false,
        }
    }
}

fn backdrop(hex: &str) -> anyhow::Result<Entity<Backdrop>> {
    let color = color::parse_hexcode(hex)?;
    Ok(Entity::new(Backdrop { color })
        .with_render_system(ClearBackground)
        .with_controls_system(BackdropControls))
}

/// A flat background and nothing else.
pub fn solid_color(hex: &str) -> anyhow::Result<Scene> {
    Ok(Scene::new(backdrop(hex)?))
}

const FLAT_VERT: &str = r#"
#version 450
layout(location = 0) in vec3 position;
uniform mat4 projection;
uniform mat4 view;
uniform mat4 model;
void main() { gl_Position = projection * view * model * vec4(position, 1.0); }
"#;

const FLAT_FRAG: &str = r#"
#version 450
uniform vec4 u_color;
out vec4 color;
void main() { color = u_color; }
"#;

/// One colored triangle seen through a perspective camera.
pub fn triangle(hex: &str, aspect: f32) -> anyhow::Result<Scene> {
    let mut scene = Scene::new(backdrop(hex)?);
    let root = scene.root();

    let mut camera = Camera::entity(ProjectionKind::Perspective, aspect);
    camera.transform_mut().set_position(Vec3::new(0.0, 0.0, 2.0));
    let camera = scene.generate_retained(root, camera);

    let format = BufferFormat::new([BufferAttribute::new(AttributeType::Position3d, "position")]);
    let vertices: [[f32; 3]; 3] = [[0.0, 0.5, 0.0], [-0.5, -0.5, 0.0], [0.5, -0.5, 0.0]];
    let material = Material::new(
        "flat",
        vec![
            ShaderSource::new(ShaderStage::Vertex, FLAT_VERT),
            ShaderSource::new(ShaderStage::Fragment, FLAT_FRAG),
        ],
    )
    .with_camera(camera)
    .with_color(Vec4::new(0.2, 0.6, 1.0, 1.0))
    .with_mesh(MeshData::new(format, &vertices, DrawMethod::Triangles));

    scene.attach(root, material.entity());
    Ok(scene)
}
