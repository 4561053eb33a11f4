use crate::core::{
    Camera, FrameVisuals, Rgb, ScenePopulation, AMBIENT_LIGHT_COLOR, FOG_DENSITY,
    KEY_LIGHT_COLOR, KEY_LIGHT_POSITION, POINT_LIGHT_DISTANCE, POINT_LIGHT_INTENSITY,
    POINT_LIGHT_POSITION, RIM_LIGHT_COLOR, RIM_LIGHT_POSITION,
};
use glam::Vec3;
use web_sys as web;

mod helpers;
mod mesh;
mod targets;
use helpers::{make_scene_pipeline, PipelineDesc};
use mesh::{build_instances, vertex_layouts, InstanceData, InstanceLayout, SceneMeshes};
use targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    fog: [f32; 4],
    ambient: [f32; 4],
    key_dir: [f32; 4],
    key_color: [f32; 4],
    rim_dir: [f32; 4],
    rim_color: [f32; 4],
    point_pos: [f32; 4],
    point_color: [f32; 4],
}

fn rgb4(c: [f32; 3], w: f32) -> [f32; 4] {
    [c[0], c[1], c[2], w]
}

fn dir4(v: Vec3) -> [f32; 4] {
    v.normalize_or_zero().extend(0.0).to_array()
}

impl SceneUniforms {
    fn new(camera: &Camera, fog_color: Rgb) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            // Fog tracks the background so distant objects melt into it
            fog: rgb4(fog_color.to_linear(), FOG_DENSITY),
            ambient: rgb4(Rgb::from_bytes(AMBIENT_LIGHT_COLOR).to_linear(), 1.0),
            key_dir: dir4(KEY_LIGHT_POSITION),
            key_color: rgb4(Rgb::from_bytes(KEY_LIGHT_COLOR).to_linear(), 1.0),
            rim_dir: dir4(RIM_LIGHT_POSITION),
            rim_color: rgb4(Rgb::from_bytes(RIM_LIGHT_COLOR).to_linear(), 1.0),
            point_pos: POINT_LIGHT_POSITION.extend(POINT_LIGHT_DISTANCE).to_array(),
            point_color: [1.0, 1.0, 1.0, POINT_LIGHT_INTENSITY],
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    opaque_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,

    meshes: SceneMeshes,
    layout: InstanceLayout,
    instance_buffer: wgpu::Buffer,
    instances: Vec<InstanceData>,

    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        population: &ScenePopulation,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        let targets = RenderTargets::new(&device, format, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_layout"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let buffers = vertex_layouts();
        let opaque_pipeline = make_scene_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            &buffers,
            format,
            PipelineDesc {
                label: "opaque_pipeline",
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                blend: None,
                depth_write: true,
            },
        );
        let line_pipeline = make_scene_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            &buffers,
            format,
            PipelineDesc {
                label: "line_pipeline",
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
            },
        );

        let meshes = SceneMeshes::new(&device, population);
        let layout = InstanceLayout::new(population);
        let instances: Vec<InstanceData> = Vec::with_capacity(layout.total() as usize);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances"),
            size: (std::mem::size_of::<InstanceData>() * layout.total() as usize) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            uniform_buffer,
            uniform_bind_group,
            opaque_pipeline,
            line_pipeline,
            meshes,
            layout,
            instance_buffer,
            instances,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets
                .recreate(&self.device, self.config.format, width, height);
        }
    }

    /// Re-apply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(
        &mut self,
        camera: &Camera,
        visuals: &FrameVisuals,
        population: &ScenePopulation,
    ) -> Result<(), wgpu::SurfaceError> {
        let uniforms = SceneUniforms::new(camera, visuals.background);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        build_instances(population, visuals, &mut self.instances);
        self.queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&self.instances),
        );

        let [r, g, b] = visuals.background.to_linear();
        let clear = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.msaa_view,
                    resolve_target: Some(&view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Discard,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.uniform_bind_group, &[]);
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            rpass.set_pipeline(&self.opaque_pipeline);
            self.meshes.cube.draw(&mut rpass, self.layout.cubes.clone());
            self.meshes.solid.draw(&mut rpass, self.layout.solid.clone());
            self.meshes
                .marker
                .draw(&mut rpass, self.layout.markers.clone());

            // Translucent lines last, depth-tested against the solids
            rpass.set_pipeline(&self.line_pipeline);
            self.meshes.lines.draw(&mut rpass, self.layout.lines.clone());
            self.meshes
                .frame_edges
                .draw(&mut rpass, self.layout.frame.clone());
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
