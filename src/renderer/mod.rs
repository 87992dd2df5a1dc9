pub mod font;
pub mod pipeline;
pub mod texture;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use pipeline::{SpritePipeline, SpriteVertex, create_sprite_pipeline, orthographic_projection, quad};
use texture::GpuTexture;

use crate::canvas::{Canvas, Color, SpriteSheet, TextureId, TextureLoader};
use crate::geometry::Rect;

/// Consecutive quads sampling the same texture, drawn with one call.
struct Batch {
    texture: TextureId,
    vertices: Vec<SpriteVertex>,
}

/// GPU-backed [`Canvas`]. Draw calls are batched in submission order and
/// submitted in one render pass on [`Canvas::present`].
pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: SpritePipeline,
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
    textures: Vec<GpuTexture>,
    /// 1×1 white texel used for lines.
    white: TextureId,
    font: TextureId,
    draw_color: Color,
    clear_color: Color,
    batches: Vec<Batch>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("creating window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .context("no suitable GPU adapter found")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .context("failed to create device")?;

        let caps = surface.get_capabilities(&adapter);
        let format = *caps.formats.first().context("surface reports no formats")?;
        let alpha_mode = *caps.alpha_modes.first().context("surface reports no alpha modes")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = create_sprite_pipeline(&device, format);

        let proj = orthographic_projection(config.width as f32, config.height as f32);
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection_buffer"),
            contents: bytemuck::cast_slice(&proj),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection_bg"),
            layout: &pipeline.projection_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let white = GpuTexture::from_rgba(
            &device,
            &queue,
            &pipeline.texture_bind_group_layout,
            "white",
            1,
            1,
            &[255, 255, 255, 255],
        );
        let (fw, fh, font_pixels) = font::rasterize_atlas();
        let font_texture = GpuTexture::from_rgba(
            &device,
            &queue,
            &pipeline.texture_bind_group_layout,
            "font",
            fw,
            fh,
            &font_pixels,
        );

        log::info!("renderer ready: {}x{} {:?}", config.width, config.height, format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            projection_buffer,
            projection_bind_group,
            textures: vec![white, font_texture],
            white: TextureId(0),
            font: TextureId(1),
            draw_color: Color::BLACK,
            clear_color: Color::BLACK,
            batches: Vec::new(),
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        let proj = orthographic_projection(new_size.width as f32, new_size.height as f32);
        self.queue
            .write_buffer(&self.projection_buffer, 0, bytemuck::cast_slice(&proj));
    }

    fn register(&mut self, texture: GpuTexture) -> SpriteSheet {
        let sheet = SpriteSheet {
            texture: TextureId(self.textures.len() as u32),
            width: texture.width,
            height: texture.height,
        };
        self.textures.push(texture);
        sheet
    }

    fn push_quad(&mut self, texture: TextureId, src: Rect, dst: Rect, color: Color) {
        let Some(tex) = self.textures.get(texture.0 as usize) else {
            log::warn!("draw with unknown texture {texture:?}");
            return;
        };
        let (tw, th) = (tex.width as f32, tex.height as f32);
        let uv_min = [src.x / tw, src.y / th];
        let uv_max = [src.right() / tw, src.bottom() / th];
        let verts = quad([dst.x, dst.y, dst.w, dst.h], uv_min, uv_max, color.0);

        match self.batches.last_mut() {
            Some(batch) if batch.texture == texture => batch.vertices.extend_from_slice(&verts),
            _ => self.batches.push(Batch { texture, vertices: verts.to_vec() }),
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let buffers: Vec<(TextureId, wgpu::Buffer, u32)> = self
            .batches
            .iter()
            .filter(|b| !b.vertices.is_empty())
            .map(|b| {
                let buf = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("sprite_vertex_buffer"),
                    contents: bytemuck::cast_slice(&b.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                (b.texture, buf, b.vertices.len() as u32)
            })
            .collect();

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let [r, g, b, a] = self.clear_color.0;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: None,
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            pass.set_pipeline(&self.pipeline.render_pipeline);
            pass.set_bind_group(0, &self.projection_bind_group, &[]);
            for (texture, buf, count) in &buffers {
                let Some(tex) = self.textures.get(texture.0 as usize) else { continue };
                pass.set_bind_group(1, &tex.bind_group, &[]);
                pass.set_vertex_buffer(0, buf.slice(..));
                pass.draw(0..*count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl Canvas for Renderer {
    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        self.batches.clear();
        self.clear_color = self.draw_color;
    }

    fn copy(&mut self, texture: TextureId, src: Rect, dst: Rect) {
        self.push_quad(texture, src, dst, Color::WHITE);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        // One pixel wide quad along the segment.
        let d = to - from;
        let len = d.length();
        if len == 0.0 {
            return;
        }
        let n = Vec2::new(-d.y, d.x) / len * 0.5;
        let corners = [from + n, to + n, from - n, to + n, to - n, from - n];
        let verts = corners.map(|p| SpriteVertex { position: p.to_array(), uv: [0.5, 0.5], color: color.0 });

        let white = self.white;
        match self.batches.last_mut() {
            Some(batch) if batch.texture == white => batch.vertices.extend_from_slice(&verts),
            _ => self.batches.push(Batch { texture: white, vertices: verts.to_vec() }),
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, size: f32, color: Color) {
        let font = self.font;
        for (src, dst) in font::layout(text, pos.x, pos.y, size) {
            self.push_quad(font, src, dst, color);
        }
    }

    fn present(&mut self) {
        match self.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.window.inner_size();
                self.resize(size);
            }
            Err(e) => log::warn!("dropped frame: {e}"),
        }
    }
}

impl TextureLoader for Renderer {
    fn load_texture(&mut self, path: &Path) -> anyhow::Result<SpriteSheet> {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let label = path.display().to_string();
        self.load_texture_bytes(&label, &bytes)
    }

    fn load_texture_bytes(&mut self, label: &str, bytes: &[u8]) -> anyhow::Result<SpriteSheet> {
        let texture = GpuTexture::from_image_bytes(
            &self.device,
            &self.queue,
            &self.pipeline.texture_bind_group_layout,
            label,
            bytes,
        )?;
        let sheet = self.register(texture);
        log::debug!("loaded texture '{label}' {}x{} as {:?}", sheet.width, sheet.height, sheet.texture);
        Ok(sheet)
    }
}
