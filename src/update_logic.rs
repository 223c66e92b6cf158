use crate::animation::FrameOutcome;
use crate::app_state::State;
use crate::clock::Clock;
use wgpu::util::DeviceExt;

impl State {
    /// Advances the animation if a new tick is due and uploads its geometry.
    pub fn update(&mut self) {
        let now = self.clock.now_millis();
        match self.driver.on_frame(now, &mut self.batch) {
            Ok(FrameOutcome::Rendered { .. }) => self.update_buffers(),
            Ok(FrameOutcome::Skipped { .. }) => {}
            Err(e) => log::warn!("Dropped frame at {now:.0}ms: {e}"),
        }
    }

    fn update_buffers(&mut self) {
        let mesh = self.batch.tessellate();

        if mesh.indices.is_empty() {
            self.geometry.vertex = None;
            self.geometry.index = None;
            self.geometry.count = 0;
            return;
        }

        self.geometry.vertex = Some(self.gpu.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));

        self.geometry.index = Some(self.gpu.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));

        self.geometry.count = mesh.indices.len() as u32;
    }
}
