//! WebGPU pipeline for the tessellated frame
//!
//! One pipeline and one vertex buffer. The buffer is rewritten every frame and
//! only reallocated when a frame outgrows it.

use super::vertex::Vertex;
use super::vertex::colors::BACKGROUND;
use crate::error::RenderError;

/// Vertex capacity before the first growth (grid + a handful of boxes fits)
const INITIAL_CAPACITY: usize = 4096;

pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    /// Vertices `vertex_buffer` can hold
    capacity: usize,
    /// Current frame in NDC, reused between frames
    scratch: Vec<Vertex>,
    /// Viewport size in pixels
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
                label: Some("iso-runner-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await?;

        let config = surface
            .get_default_config(adapter, width.max(1), height.max(1))
            .ok_or(RenderError::UnsupportedSurface)?;
        surface.configure(&device, &config);
        log::info!(
            "Surface {:?} at {}x{}",
            config.format,
            config.width,
            config.height
        );

        let pipeline = create_pipeline(&device, config.format);
        let vertex_buffer = create_vertex_buffer(&device, INITIAL_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            capacity: INITIAL_CAPACITY,
            scratch: Vec::with_capacity(INITIAL_CAPACITY),
            size: (width, height),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload one frame of pixel-space triangles and present it
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        let size = self.size;
        self.scratch.clear();
        self.scratch.extend(vertices.iter().map(|v| {
            let (x, y) = pixel_to_ndc(v.position[0], v.position[1], size);
            Vertex::new(x, y, v.color)
        }));

        if self.scratch.len() > self.capacity {
            self.capacity = grown_capacity(self.capacity, self.scratch.len());
            self.vertex_buffer = create_vertex_buffer(&self.device, self.capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.capacity);
        }
        if !self.scratch.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.scratch));
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&Default::default());
        let mut encoder = self.device.create_command_encoder(&Default::default());

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            if !self.scratch.is_empty() {
                let bytes = (self.scratch.len() * std::mem::size_of::<Vertex>()) as u64;
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..bytes));
                pass.draw(0..self.scratch.len() as u32, 0..1);
            }
        }

        self.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }
}

fn create_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::include_wgsl!("shader.wgsl"));
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("flat-triangles"),
        layout: None,
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Triangle list, no culling: fans and stroke quads have mixed winding
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("frame-vertices"),
        size: (capacity * std::mem::size_of::<Vertex>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn clear_color() -> wgpu::Color {
    let [r, g, b, a] = BACKGROUND.map(f64::from);
    wgpu::Color { r, g, b, a }
}

/// Next buffer capacity: at least double, and a power of two covering `needed`
fn grown_capacity(current: usize, needed: usize) -> usize {
    needed.next_power_of_two().max(current * 2)
}

/// Pixel space (origin top-left, y down) to NDC (-1..1, y up)
pub fn pixel_to_ndc(x: f32, y: f32, size: (u32, u32)) -> (f32, f32) {
    let (w, h) = (size.0.max(1) as f32, size.1.max(1) as f32);
    (x / w * 2.0 - 1.0, 1.0 - y / h * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_ndc_corners() {
        assert_eq!(pixel_to_ndc(0.0, 0.0, (800, 600)), (-1.0, 1.0));
        assert_eq!(pixel_to_ndc(800.0, 600.0, (800, 600)), (1.0, -1.0));
        assert_eq!(pixel_to_ndc(400.0, 300.0, (800, 600)), (0.0, 0.0));
        // Zero-sized viewport must not divide by zero
        assert!(pixel_to_ndc(1.0, 1.0, (0, 0)).0.is_finite());
    }

    #[test]
    fn test_buffer_growth() {
        assert_eq!(grown_capacity(4096, 4097), 8192);
        assert_eq!(grown_capacity(4096, 20_000), 32_768);
        assert!(grown_capacity(INITIAL_CAPACITY, 5000) >= 5000);
    }

    #[test]
    fn test_clear_color_matches_background() {
        let c = clear_color();
        assert_eq!(c.a, 1.0);
        assert!((c.b - 0.18).abs() < 1e-6);
    }
}
