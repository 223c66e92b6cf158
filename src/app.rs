use crate::app_state::State;
use crate::config::Config;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

struct App {
    config: Config,
    state: Option<State>,
}

impl App {
    fn create_window(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Arc<Window>> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = event_loop.create_window(window_attributes)?;

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowExtWebSys;

            let canvas = window
                .canvas()
                .ok_or_else(|| anyhow::anyhow!("window has no canvas"))?;
            let element = web_sys::Element::from(canvas);
            let attached = web_sys::window()
                .and_then(|win| win.document())
                .and_then(|doc| {
                    let dst = doc.get_element_by_id("wasm-example")?;
                    dst.append_child(&element).ok()?;
                    Some(())
                });
            if attached.is_none() {
                anyhow::bail!("couldn't append canvas to document body");
            }
            if let Ok(canvas) = element.dyn_into::<web_sys::HtmlCanvasElement>() {
                canvas.set_width(self.config.width);
                canvas.set_height(self.config.height);
            }
        }

        Ok(Arc::new(window))
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let window = match self.create_window(event_loop) {
            Ok(window) => window,
            Err(e) => {
                log::error!("Failed to create window: {e:#}");
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(State::new(window, self.config.clone())) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Failed to initialise renderer: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };
        if window_id != state.window().id() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                log::info!("WindowEvent::Resized: {}x{}", physical_size.width, physical_size.height);
                state.resize(physical_size);
            }
            WindowEvent::RedrawRequested => {
                state.update();
                match state.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::warn!("Surface lost, reconfiguring");
                        state.resize(state.size);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of GPU memory");
                        event_loop.exit();
                    }
                    Err(e) => log::warn!("Skipped presentation: {e:?}"),
                }
            }
            _ => {}
        }
    }

    // Continuous self-scheduling: the driver throttles to its own tick rate.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window().request_redraw();
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            console_log::init_with_level(log::Level::Info)?;
        } else {
            env_logger::init();
        }
    }

    let config = Config::load()?;
    config.validate()?;

    let event_loop = EventLoop::new()?;
    let mut app = App {
        config,
        state: None,
    };

    event_loop.run_app(&mut app)?;
    Ok(())
}
