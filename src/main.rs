use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{anyhow, Context};
use cgmath::{Matrix4, Rad};
use glutin::context::{ContextApi, ContextAttributesBuilder, Version};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::prelude::*;
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;

use glow::HasContext;

use glshader::{ProgramCache, ProgramNames, ShaderProgram, Vertex};

const TRIANGLE: [Vertex; 3] = [
    Vertex::new([-0.6, -0.5, 0.0], [1.0, 0.0, 0.0, 1.0]),
    Vertex::new([0.6, -0.5, 0.0], [0.0, 1.0, 0.0, 1.0]),
    Vertex::new([0.0, 0.7, 0.0], [0.0, 0.0, 1.0, 1.0]),
];

struct Args {
    sources: Option<(String, String)>,
    names: ProgramNames,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (sources, names) = match args.as_slice() {
        [] => (None, None),
        [names] => (None, Some(names)),
        [vert, frag] => (Some((vert, frag)), None),
        [vert, frag, names] => (Some((vert, frag)), Some(names)),
        _ => return Err(anyhow!("usage: glshader-demo [VERTEX FRAGMENT] [NAMES.yml]")),
    };

    let sources = match sources {
        Some((vert, frag)) => Some((
            std::fs::read_to_string(vert).with_context(|| format!("reading {}", vert))?,
            std::fs::read_to_string(frag).with_context(|| format!("reading {}", frag))?,
        )),
        None => None,
    };
    let names = match names {
        Some(path) => ProgramNames::load(path)?,
        None => ProgramNames::default(),
    };
    Ok(Args { sources, names })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let event_loop = EventLoop::new();
    let window_builder = winit::window::WindowBuilder::new()
        .with_title("glshader")
        .with_inner_size(winit::dpi::LogicalSize::new(800.0, 600.0));

    let cfg_builder = glutin::config::ConfigTemplateBuilder::new()
        .with_alpha_size(8);

    let (window, gl_cfg) = DisplayBuilder::new()
        .with_window_builder(Some(window_builder))
        .build(&event_loop, cfg_builder, |mut t| {
            let cfg = t.next();
            log::debug!("{:?}", cfg);
            cfg.expect("no contexts available - driver issue?")
        })
        .map_err(|e| anyhow!("cannot create window: {}", e))?;

    let window = window.context("no window was created")?;

    let gl_display = gl_cfg.display();

    let ctx_attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(window.raw_window_handle()));
    let gl_ctx = unsafe { gl_display.create_context(&gl_cfg, &ctx_attrs)? };

    let attrs = window.build_surface_attributes(<_>::default());
    let gl_surface = unsafe {
        gl_cfg.display().create_window_surface(&gl_cfg, &attrs)?
    };

    let gl_ctx = gl_ctx.make_current(&gl_surface)?;

    let gl = Rc::new(unsafe { glow::Context::from_loader_function_cstr(|s| gl_display.get_proc_address(s) as *const _) });

    let (vao, vbo) = unsafe {
        let vao = gl.create_vertex_array().map_err(|e| anyhow!(e))?;
        gl.bind_vertex_array(Some(vao));
        let vbo = gl.create_buffer().map_err(|e| anyhow!(e))?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(&TRIANGLE), glow::STATIC_DRAW);
        (vao, vbo)
    };

    let mut cache = ProgramCache::new();
    let mut program = ShaderProgram::with_names(Rc::clone(&gl), args.names);
    match &args.sources {
        Some((vert, frag)) => program.compile(vert, frag)?,
        None => program.compile_default_shader(&mut cache)?,
    }
    log::info!("using program {:?}", program.id());

    let start = Instant::now();
    event_loop.run(move |event, _, control_flow| {
        control_flow.set_poll();

        match event {
            Event::LoopDestroyed => unsafe {
                gl.delete_buffer(vbo);
                gl.delete_vertex_array(vao);
            },
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                control_flow.set_exit();
            },
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => {
                if let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                    gl_surface.resize(&gl_ctx, w, h);
                    unsafe { gl.viewport(0, 0, size.width as i32, size.height as i32); }
                }
            },
            Event::MainEventsCleared => {
                window.request_redraw();
            },
            Event::RedrawRequested(_) => {
                unsafe {
                    gl.clear_color(0.1, 0.1, 0.1, 1.0);
                    gl.clear(glow::COLOR_BUFFER_BIT);
                }

                program.setup_matrices(&Matrix4::from_angle_z(Rad(start.elapsed().as_secs_f32())));
                unsafe {
                    gl.bind_vertex_array(Some(vao));
                    gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
                }
                program.setup_attributes();
                unsafe { gl.draw_arrays(glow::TRIANGLES, 0, TRIANGLE.len() as i32); }

                if let Err(e) = gl_surface.swap_buffers(&gl_ctx) {
                    log::error!("swap_buffers: {}", e);
                    control_flow.set_exit();
                }
            },
            _ => ()
        }
    });
}
