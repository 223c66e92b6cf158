use crate::math::ortho;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    transform: [[f32; 4]; 4],
}

impl Uniforms {
    pub fn new(window_size: (f32, f32)) -> Self {
        let mut uniforms = Self {
            transform: [[0.0; 4]; 4],
        };
        uniforms.update_transform(window_size);
        uniforms
    }

    /// Maps pixel coordinates (origin top-left, y down) to clip space.
    pub fn update_transform(&mut self, window_size: (f32, f32)) {
        let proj = ortho(
            0.0,
            window_size.0 as f64,
            window_size.1 as f64,
            0.0,
            -1.0,
            1.0,
        );
        self.transform = proj.to_gpu();
    }

    #[cfg(test)]
    pub fn transform(&self) -> [[f32; 4]; 4] {
        self.transform
    }
}
