use crate::core::geometry::{self, Vertex};
use crate::core::{
    FrameVisuals, Rgb, ScenePopulation, CUBE_SHININESS, CUBE_SIZE, LINE_OPACITY, MARKER_RADIUS,
    MARKER_SEGMENTS, SOLID_COLOR, SOLID_SHININESS, SOLID_SPECULAR,
};
use glam::{Mat4, Quat, Vec3};
use std::ops::Range;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl From<Vertex> for MeshVertex {
    fn from(v: Vertex) -> Self {
        Self {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceData {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    // x: lit, y: shininess, z: specular strength
    material: [f32; 4],
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const INSTANCE_ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
    2 => Float32x4,
    3 => Float32x4,
    4 => Float32x4,
    5 => Float32x4,
    6 => Float32x4,
    7 => Float32x4,
];

pub(crate) fn vertex_layouts() -> [wgpu::VertexBufferLayout<'static>; 2] {
    [
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        },
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        },
    ]
}

pub(crate) struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) vertex_count: u32,
}

impl Mesh {
    fn new(device: &wgpu::Device, label: &str, vertices: Vec<Vertex>) -> Self {
        let data: Vec<MeshVertex> = vertices.into_iter().map(MeshVertex::from).collect();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            vertex_count: data.len() as u32,
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, instances: Range<u32>) {
        if self.vertex_count == 0 || instances.is_empty() {
            return;
        }
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..self.vertex_count, instances);
    }
}

/// Static vertex data for every object kind in the scene.
pub(crate) struct SceneMeshes {
    pub(crate) cube: Mesh,
    pub(crate) solid: Mesh,
    pub(crate) marker: Mesh,
    pub(crate) frame_edges: Mesh,
    pub(crate) lines: Mesh,
}

impl SceneMeshes {
    pub(crate) fn new(device: &wgpu::Device, population: &ScenePopulation) -> Self {
        let line_vertices = population
            .lines
            .iter()
            .flat_map(|l| [l.start, l.end])
            .map(|position| Vertex {
                position,
                normal: Vec3::ZERO,
            })
            .collect();
        Self {
            cube: Mesh::new(device, "cube_vb", geometry::cube_triangles(CUBE_SIZE)),
            solid: Mesh::new(device, "solid_vb", population.solid.flat_triangles()),
            marker: Mesh::new(
                device,
                "marker_vb",
                geometry::uv_sphere(MARKER_RADIUS, MARKER_SEGMENTS, MARKER_SEGMENTS),
            ),
            frame_edges: Mesh::new(device, "frame_vb", population.frame.edge_lines()),
            lines: Mesh::new(device, "lines_vb", line_vertices),
        }
    }
}

/// Where each object kind lives in the shared instance buffer.
#[derive(Clone, Debug)]
pub(crate) struct InstanceLayout {
    pub(crate) solid: Range<u32>,
    pub(crate) frame: Range<u32>,
    pub(crate) lines: Range<u32>,
    pub(crate) cubes: Range<u32>,
    pub(crate) markers: Range<u32>,
}

impl InstanceLayout {
    pub(crate) fn new(population: &ScenePopulation) -> Self {
        let cubes_start = 3;
        let cubes_end = cubes_start + population.cubes.len() as u32;
        let markers_end = cubes_end + population.markers.len() as u32;
        Self {
            solid: 0..1,
            frame: 1..2,
            lines: 2..3,
            cubes: cubes_start..cubes_end,
            markers: cubes_end..markers_end,
        }
    }

    pub(crate) fn total(&self) -> u32 {
        self.markers.end
    }
}

const UNLIT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

fn opaque(rgb: [f32; 3]) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], 1.0]
}

/// Fill `out` with per-object transforms and materials, in [`InstanceLayout`] order.
pub(crate) fn build_instances(
    population: &ScenePopulation,
    visuals: &FrameVisuals,
    out: &mut Vec<InstanceData>,
) {
    out.clear();
    let white = [1.0, 1.0, 1.0];
    let solid_lit = [1.0, SOLID_SHININESS, SOLID_SPECULAR, 0.0];
    let rotation = Quat::from_rotation_x(visuals.rotation_x.rem_euclid(std::f64::consts::TAU) as f32);
    let uniform = Vec3::splat(visuals.solid_scale);
    let centered = Mat4::from_scale_rotation_translation(uniform, rotation, Vec3::ZERO);

    out.push(InstanceData {
        model: centered.to_cols_array_2d(),
        color: opaque(Rgb::from_bytes(SOLID_COLOR).to_linear()),
        material: solid_lit,
    });
    out.push(InstanceData {
        model: centered.to_cols_array_2d(),
        color: [1.0, 1.0, 1.0, visuals.frame_opacity.clamp(0.0, 1.0)],
        material: solid_lit,
    });
    out.push(InstanceData {
        model: Mat4::IDENTITY.to_cols_array_2d(),
        color: [1.0, 1.0, 1.0, LINE_OPACITY],
        material: UNLIT,
    });
    for cube in &population.cubes {
        let model = Mat4::from_scale_rotation_translation(
            visuals.cube_scale,
            Quat::IDENTITY,
            cube.position,
        );
        out.push(InstanceData {
            model: model.to_cols_array_2d(),
            color: opaque(Rgb::from_bytes(population.cube_color(cube)).to_linear()),
            material: [1.0, CUBE_SHININESS, 1.0, 0.0],
        });
    }
    for &position in &population.markers {
        let model = Mat4::from_scale_rotation_translation(uniform, rotation, position);
        out.push(InstanceData {
            model: model.to_cols_array_2d(),
            color: opaque(white),
            material: UNLIT,
        });
    }
}
