use crate::animation::AnimationDriver;
use crate::canvas::Uniforms;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::drawing::{Rect, StrokeBatch};
use crate::noise::NoiseField;
use crate::state::{Canvas, GeometryBuffers, GpuContext};
use crate::vertex::Vertex;
use anyhow::Context;
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub struct State {
    pub window: Arc<Window>,
    pub size: PhysicalSize<u32>,

    pub gpu: GpuContext,
    pub canvas: Canvas,
    pub geometry: GeometryBuffers,

    pub driver: AnimationDriver,
    pub batch: StrokeBatch,
    pub clock: SystemClock,
}

impl State {
    pub async fn new(window: Arc<Window>, config: Config) -> anyhow::Result<State> {
        let mut size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            size = PhysicalSize::new(config.width, config.height);
        }

        let seed = config.seed.unwrap_or_else(rand::random::<f64>);
        let noise = NoiseField::seeded(seed)?;
        let mut driver = AnimationDriver::new(config, noise)?;
        driver.resize(size.width as f64, size.height as f64)?;
        log::info!("Seeded noise field with {seed}, viewport {}x{}", size.width, size.height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                label: None,
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("requesting GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let uniforms = Uniforms::new((size.width as f32, size.height as f32));

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("uniform_bind_group_layout"),
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../data/shaders/draw_shader.wgsl").into(),
            ),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // segment quads wind either way depending on direction
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let [r, g, b, a] = driver.config().background_color()?;
        let canvas = Canvas {
            uniform: uniforms,
            uniform_buffer,
            uniform_bind_group,
            background: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            },
        };

        let gpu = GpuContext {
            surface,
            device,
            queue,
            config,
            render_pipeline,
        };

        let geometry = GeometryBuffers {
            vertex: None,
            index: None,
            count: 0,
        };

        Ok(Self {
            window,
            size,
            gpu,
            canvas,
            geometry,
            driver,
            batch: StrokeBatch::clipped(surface_rect(size)),
            clock: SystemClock::new(),
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.size = new_size;
        self.gpu.config.width = new_size.width;
        self.gpu.config.height = new_size.height;
        self.gpu.surface.configure(&self.gpu.device, &self.gpu.config);

        if let Err(e) = self
            .driver
            .resize(new_size.width as f64, new_size.height as f64)
        {
            log::warn!("Ignoring resize to {}x{}: {e}", new_size.width, new_size.height);
        }

        self.batch.set_clip(surface_rect(new_size));
        self.canvas
            .uniform
            .update_transform((new_size.width as f32, new_size.height as f32));
        self.gpu.queue.write_buffer(
            &self.canvas.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.canvas.uniform]),
        );
    }
}

fn surface_rect(size: PhysicalSize<u32>) -> Rect {
    Rect::new(0.0, 0.0, size.width as f32, size.height as f32)
}
