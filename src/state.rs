use wgpu::{BindGroup, Buffer, Device, Queue, RenderPipeline, Surface, SurfaceConfiguration};

use crate::canvas::Uniforms;

pub struct GpuContext {
    pub surface: Surface<'static>,
    pub device: Device,
    pub queue: Queue,
    pub config: SurfaceConfiguration,
    pub render_pipeline: RenderPipeline,
}

pub struct Canvas {
    pub uniform: Uniforms,
    pub uniform_buffer: Buffer,
    pub uniform_bind_group: BindGroup,
    pub background: wgpu::Color,
}

pub struct GeometryBuffers {
    pub vertex: Option<Buffer>,
    pub index: Option<Buffer>,
    pub count: u32,
}
