use bytemuck::{Pod, Zeroable};

pub const POSITION_COMPONENTS: usize = 3;
pub const COLOR_COMPONENTS: usize = 4;

pub const POSITION_OFFSET: usize = 0;
pub const COLOR_OFFSET: usize = POSITION_COMPONENTS * std::mem::size_of::<f32>();

/// One interleaved record of the buffer `setup_attributes` describes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; POSITION_COMPONENTS],
    pub color: [f32; COLOR_COMPONENTS],
}

impl Vertex {
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}
