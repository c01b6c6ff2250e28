#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

#[macro_use]
mod math;
use crate::math::*;

mod gl;
use crate::gl::types::*;
use crate::gl::{GlError, GlslError};

mod grid;
use crate::grid::Grid;

mod torus;
use crate::torus::{make_torus_mesh, ElementIndex, TorusMesh};

mod animation;
use crate::animation::{Animation, AnimationSettings, FixedTimestep, LightKind, Lights, EXPONENT_MAX};

mod lighting;
use crate::lighting::{Attenuation, LightParams, LightRig};

mod input;

mod config;
use crate::config::{Config, ConfigError};

mod error;
use crate::error::AppError;

mod render;
use crate::render::{Camera, Render, BACKGROUND_COLOR, CAMERA_BINDING_INDEX};

mod line_render;
use crate::line_render::{LineBatch, LineRender, AXIS_LENGTH, NORMAL_LENGTH};

use clap::Parser;
use glutin::*;

use std::{
    mem,
    process,
    ptr,
    slice,
    time::{Duration, Instant},
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(error) = run(Config::parse()) {
        error!("{}", error);
        process::exit(1);
    }
}

fn run(config: Config) -> Result<(), AppError> {
    config.validate()?;
    debug!("{:?}", config);

    let mut events_loop = EventsLoop::new();
    let window = WindowBuilder::new()
        .with_title("torus")
        .with_dimensions(dpi::LogicalSize::new(config.width as _, config.height as _));
    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, (3, 3)))
        .with_gl_profile(GlProfile::Core)
        .with_multisampling(config.samples)
        .with_vsync(true)
        .build_windowed(window, &events_loop)?;

    let context = unsafe { context.make_current() }.map_err(|(_, error)| error)?;
    gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);
    info!("OpenGL {}", gl::version());

    let mesh = make_torus_mesh();
    let mut render      = Render::init(&mesh)?;
    let mut line_render = LineRender::init()?;
    let mut lines       = LineBatch::new();

    let mut camera = Camera::default();
    camera.set_aspect(config.width as Real / config.height as Real);
    render.update_camera(&camera);

    unsafe {
        gl::Enable(gl::DEPTH_TEST);
        gl::Enable(gl::MULTISAMPLE);
        gl::ClearColor(BACKGROUND_COLOR.x, BACKGROUND_COLOR.y, BACKGROUND_COLOR.z, BACKGROUND_COLOR.w);
    }
    gl::get_error()?;

    let mut animation = Animation::new(config.animation_settings());
    let mut gate      = FixedTimestep::from_rate(config.step_rate);
    input::log_key_help();

    let start          = Instant::now();
    let mut last_frame = start;
    let mut running    = true;
    while running {
        events_loop.poll_events(|event| {
            if let Event::WindowEvent { event, .. } = event {
                match event {
                    WindowEvent::CloseRequested => running = false,
                    WindowEvent::Resized(logical) => {
                        let physical = logical.to_physical(context.window().get_hidpi_factor());
                        context.resize(physical);
                        unsafe { gl::Viewport(0, 0, physical.width as _, physical.height as _); }
                        if physical.height > 0.0 {
                            camera.set_aspect((physical.width / physical.height) as Real);
                        }
                    },
                    WindowEvent::KeyboardInput {
                        input: KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                        ..
                    } => {
                        if let Some(action) = input::action_for_key(key) {
                            running &= input::apply(action, &mut animation);
                        }
                    },
                    _ => (),
                }
            }
        });

        let now = Instant::now();
        animation.tick(&mut gate, now - last_frame);
        last_frame = now;
        animation.update_shininess(start.elapsed().as_secs_f64());

        let rig = LightRig::derive(&animation);
        render.update_camera(&camera);
        render.update_lights(&rig, animation.shininess());

        lines.clear();
        lines.push_axes(AXIS_LENGTH);
        for light in rig.lit() {
            lines.push_light_gizmo(light);
        }
        if animation.shows_normals() {
            lines.push_normals(&mesh, NORMAL_LENGTH);
        }

        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT); }
        line_render.draw(&lines);
        render.render_torus();

        context.swap_buffers()?;

        if let Err(error) = gl::get_error() {
            warn!("{}", error);
        }
    }

    info!("quit after {} animation steps", animation.frame());
    Ok(())
}
