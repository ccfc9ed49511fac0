// src/main.rs

pub mod app;
pub mod config;
pub mod demo_scene;
pub mod ui;

use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopWindowTarget, EventLoop},
    window::WindowBuilder,
};
use app::PolygonApp;
use config::AppConfig;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub async fn run() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            console_log::init_with_level(log::Level::Warn).expect("Couldn't initialize logger");
        } else {
            env_logger::init();
        }
    }

    let app_config = AppConfig::from_env();
    let event_loop = EventLoop::new().expect("Couldn't create event loop");
    let window = std::sync::Arc::new(
        WindowBuilder::new()
            .with_title(app_config.window_title.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(app_config.window_width, app_config.window_height))
            .build(&event_loop)
            .expect("Couldn't create window"),
    );

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::WindowExtWebSys;
        web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| {
                let dst = doc.get_element_by_id("wasm-viewport")?;
                let canvas = web_sys::Element::from(window.canvas()?);
                dst.append_child(&canvas).ok()?;
                Some(())
            })
            .expect("Couldn't append canvas to document body.");
    }

    let mut app_state = match PolygonApp::new(window.clone(), &app_config).await {
        Ok(app_state) => app_state,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };
    let mut last_time = std::time::Instant::now();

    let result = event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                if !app_state.handle_window_event(event, &window) {
                    match event {
                        WindowEvent::CloseRequested => {
                            target.exit();
                        }
                        WindowEvent::Resized(physical_size) => {
                            app_state.resize(*physical_size);
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                let now = std::time::Instant::now();
                let dt = (now - last_time).as_secs_f32();
                last_time = now;

                app_state.update(dt);
                match app_state.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        app_state.resize(app_state.get_size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("WGPU out of memory, exiting");
                        target.exit();
                    }
                    Err(e) => log::warn!("Surface error: {:?}", e),
                }

                if !target.exiting() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    });
    if let Err(e) = result {
        log::error!("event loop stopped with an error: {}", e);
    }
}

#[tokio::main]
async fn main() {
    run().await;
}
