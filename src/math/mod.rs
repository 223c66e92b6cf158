pub mod angles;
pub mod coordinates;
mod mat4;
mod vector;

pub use mat4::Mat4;
pub use vector::Vector;

pub const PI: f64 = std::f64::consts::PI;
pub const TAU: f64 = std::f64::consts::TAU;

/// Screen-space orthographic projection used by the GPU presenter.
pub fn ortho(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Mat4 {
    let w = right - left;
    let h = top - bottom;
    let d = far - near;

    let result = Mat4::new([
        [2.0 / w, 0.0, 0.0, -(right + left) / w],
        [0.0, 2.0 / h, 0.0, -(top + bottom) / h],
        [0.0, 0.0, -2.0 / d, -(far + near) / d],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    log::debug!(
        "Ortho matrix: left={}, right={}, bottom={}, top={}, near={}, far={}",
        left, right, bottom, top, near, far
    );

    result
}
