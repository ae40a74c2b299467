use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use winit::{
    event::*,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use pbr_viewer::{
    ibl::EnvironmentSource,
    scene::MaterialGrid,
    State, ViewerOptions,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Equirectangular HDR environment to light the scene with
    #[arg(long)]
    hdr: Option<PathBuf>,

    /// Skip image-based lighting and use the single-light direct rig
    #[arg(long)]
    direct: bool,

    /// PNG/JPEG albedo texture for the grid spheres
    #[arg(long)]
    albedo: Option<PathBuf>,

    /// Sphere grid rows (metallic sweep)
    #[arg(long, default_value_t = 7)]
    rows: u32,

    /// Sphere grid columns (roughness sweep)
    #[arg(long, default_value_t = 7)]
    cols: u32,

    /// World-space spacing between grid spheres
    #[arg(long, default_value_t = 2.5)]
    spacing: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let environment = if args.direct {
        if args.hdr.is_some() {
            log::warn!("--direct given, ignoring --hdr");
        }
        None
    } else {
        Some(match args.hdr {
            Some(path) => EnvironmentSource::HdrPath(path),
            None => EnvironmentSource::Synthetic,
        })
    };

    let options = ViewerOptions {
        environment,
        albedo_map: args.albedo,
        grid: MaterialGrid::new(args.rows, args.cols, args.spacing),
    };

    let event_loop = winit::event_loop::EventLoop::new()?;

    let window = WindowBuilder::new()
        .with_title("PBR Viewer")
        .with_visible(true)
        .build(&event_loop)?;

    let mut state = State::new(window, options)?;
    let mut mouse_captured = false;

    event_loop.run(move |event, window_target| {
        match event {
            Event::WindowEvent { window_id, event } if window_id == state.window().id() => {
                match event {
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key_code),
                                state: key_state,
                                ..
                            },
                        ..
                    } => {
                        let pressed = key_state == ElementState::Pressed;
                        match key_code {
                            KeyCode::Escape => {
                                if pressed {
                                    mouse_captured = false;
                                    let _ = state
                                        .window()
                                        .set_cursor_grab(winit::window::CursorGrabMode::None);
                                    state.window().set_cursor_visible(true);
                                }
                            }
                            _ => state.scene.process_keyboard(key_code, pressed),
                        }
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => {
                        mouse_captured = true;
                        let _ = state
                            .window()
                            .set_cursor_grab(winit::window::CursorGrabMode::Confined)
                            .or_else(|_e| {
                                state
                                    .window()
                                    .set_cursor_grab(winit::window::CursorGrabMode::Locked)
                            });
                        state.window().set_cursor_visible(false);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        let lines = match delta {
                            MouseScrollDelta::LineDelta(_, y) => y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
                        };
                        state.scene.process_scroll(lines);
                    }
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(new_size);
                    }
                    WindowEvent::RedrawRequested => match state.render() {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            let size = state.window().inner_size();
                            state.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("out of memory, exiting");
                            window_target.exit();
                        }
                        Err(e) => log::warn!("frame error: {e:?}"),
                    },
                    _ => {}
                }
            }
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } if mouse_captured => {
                state.scene.process_mouse(delta.0 as f32, delta.1 as f32);
            }
            Event::AboutToWait => {
                state.scene.update();
                state.window().request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
