//! WebGPU render pipeline setup
//!
//! One alpha-blended triangle-list pipeline. The 800×450 game area is
//! letterboxed into whatever size the canvas has.

use thiserror::Error;

use super::scene::Frame;
use super::vertex::Vertex;
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not create a surface for the canvas: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("could not open the GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

/// Vertices the buffer can hold before its first reallocation
const INITIAL_VERTEX_CAPACITY: usize = 16 * 1024;

/// Largest 16:9 rectangle centered in a `width`×`height` target.
///
/// Returns `(x, y, w, h)` in pixels.
pub fn letterbox(width: u32, height: u32) -> (f32, f32, f32, f32) {
    let (w, h) = (width as f32, height as f32);
    let aspect = GAME_WIDTH / GAME_HEIGHT;
    if w / h > aspect {
        let vw = h * aspect;
        ((w - vw) / 2.0, 0.0, vw, h)
    } else {
        let vh = w / aspect;
        (0.0, (h - vh) / 2.0, w, vh)
    }
}

/// Screen space (origin top-left, y down) to clip space
pub fn game_to_ndc(x: f32, y: f32) -> [f32; 2] {
    [x / GAME_WIDTH * 2.0 - 1.0, 1.0 - y / GAME_HEIGHT * 2.0]
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Capacity of `vertex_buffer` in vertices
    vertex_capacity: usize,
    /// Clip-space copy of the last frame, reused between frames
    scratch: Vec<Vertex>,
    /// Canvas size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("magic-dash-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        log::info!("Surface config: {}x{} {:?}", width, height, surface_format);
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // Vertex colors are authored in sRGB; an sRGB target re-encodes on write
        let fs_entry = if surface_format.is_srgb() {
            "fs_srgb_target"
        } else {
            "fs_main"
        };

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(fs_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            scratch: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
            size: (width, height),
        })
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vertex_buffer"),
            size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload a composed frame and draw it letterboxed
    pub fn render(&mut self, frame: &Frame) -> Result<(), wgpu::SurfaceError> {
        self.scratch.clear();
        self.scratch.extend(frame.vertices.iter().map(|v| Vertex {
            position: game_to_ndc(v.position[0], v.position[1]),
            color: v.color,
        }));

        if self.scratch.len() > self.vertex_capacity {
            self.vertex_capacity = self.scratch.len().next_power_of_two();
            self.vertex_buffer = Self::create_vertex_buffer(&self.device, self.vertex_capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.vertex_capacity);
        }
        if !self.scratch.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.scratch));
        }
        let vertex_count = self.scratch.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let (x, y, w, h) = letterbox(self.config.width, self.config.height);
            render_pass.set_viewport(x, y, w, h, 0.0, 1.0);
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..vertex_count, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_exact_fit() {
        assert_eq!(letterbox(1600, 900), (0.0, 0.0, 1600.0, 900.0));
    }

    #[test]
    fn test_letterbox_wide_canvas_pillarboxes() {
        let (x, y, w, h) = letterbox(2000, 900);
        assert_eq!((y, w, h), (0.0, 1600.0, 900.0));
        assert_eq!(x, 200.0);
    }

    #[test]
    fn test_letterbox_tall_canvas_bars_top_and_bottom() {
        let (x, y, w, h) = letterbox(800, 800);
        assert_eq!((x, w), (0.0, 800.0));
        assert_eq!(h, 450.0);
        assert_eq!(y, 175.0);
    }

    #[test]
    fn test_ndc_corners() {
        assert_eq!(game_to_ndc(0.0, 0.0), [-1.0, 1.0]);
        assert_eq!(game_to_ndc(GAME_WIDTH, GAME_HEIGHT), [1.0, -1.0]);
        assert_eq!(game_to_ndc(400.0, 225.0), [0.0, 0.0]);
    }
}
