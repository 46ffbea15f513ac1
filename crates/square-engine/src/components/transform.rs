use glam::{Mat3, Mat4, Vec3};

/// TRS model matrix: scale first, then rotation, then translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self { matrix: Mat4::IDENTITY }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::from_matrix(Mat4::from_translation(position))
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
    }

    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    /// Lengths of the basis columns.
    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            self.matrix.x_axis.truncate().length(),
            self.matrix.y_axis.truncate().length(),
            self.matrix.z_axis.truncate().length(),
        )
    }

    pub fn translation_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position())
    }

    /// Basis columns with scale divided out. Zero-scale axes are left as identity.
    pub fn rotation_matrix(&self) -> Mat4 {
        let scale = self.scale();
        let mut rotation = Mat4::IDENTITY;
        if scale.x != 0.0 {
            rotation.x_axis = (self.matrix.x_axis.truncate() / scale.x).extend(0.0);
        }
        if scale.y != 0.0 {
            rotation.y_axis = (self.matrix.y_axis.truncate() / scale.y).extend(0.0);
        }
        if scale.z != 0.0 {
            rotation.z_axis = (self.matrix.z_axis.truncate() / scale.z).extend(0.0);
        }
        rotation
    }

    pub fn scale_matrix(&self) -> Mat4 {
        Mat4::from_scale(self.scale())
    }

    /// Inverse transpose of the upper 3x3, for transforming normals.
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.matrix).inverse().transpose()
    }

    /// World-to-local matrix; a camera's view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        self.matrix.inverse()
    }

    /// Rotates in place so that the forward vector points at `point`. Scale is kept.
    pub fn face_towards(&mut self, point: Vec3, up: Vec3) {
        let view = Mat4::look_at_rh(self.position(), point, up);
        self.matrix = view.inverse() * self.scale_matrix();
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.matrix.w_axis += offset.extend(0.0);
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.matrix.w_axis = position.extend(1.0);
    }

    /// Applies a rotation of `angle` radians about `axis` on top of the current one.
    pub fn rotate(&mut self, axis: Vec3, angle: f32) {
        let rotation = Mat4::from_axis_angle(axis.normalize(), angle) * self.rotation_matrix();
        self.set_rotation_matrix(rotation);
    }

    pub fn set_rotation(&mut self, axis: Vec3, angle: f32) {
        self.set_rotation_matrix(Mat4::from_axis_angle(axis.normalize(), angle));
    }

    pub fn set_rotation_matrix(&mut self, rotation: Mat4) {
        self.matrix = self.translation_matrix() * rotation * self.scale_matrix();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.matrix = self.translation_matrix() * self.rotation_matrix() * Mat4::from_scale(scale);
    }

    /// Local -Z.
    pub fn forward(&self) -> Vec3 {
        -self.rotation_matrix().z_axis.truncate()
    }

    pub fn right(&self) -> Vec3 {
        self.rotation_matrix().x_axis.truncate()
    }

    pub fn up(&self) -> Vec3 {
        self.rotation_matrix().y_axis.truncate()
    }
}

/// Anything placed in space by a `Transform`.
///
/// Systems that move things around are bounded by this trait.
pub trait Transformable {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;
}

impl Transformable for Transform {
    fn transform(&self) -> &Transform {
        self
    }

    fn transform_mut(&mut self) -> &mut Transform {
        self
    }
}
