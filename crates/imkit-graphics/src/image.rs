//! Opaque texture handles

use bytemuck::{Pod, Zeroable};

/// Host-defined texture or resource identifier. The toolkit never interprets it.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handle(pub u64);

impl Handle {
    pub const NONE: Handle = Handle(0);
}

/// Sub-region of a texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Image {
    pub handle: Handle,
    pub w: u16,
    pub h: u16,
    /// `[x, y, w, h]` of the used region inside the texture.
    pub region: [u16; 4],
}

impl Image {
    /// Whole-texture image; a zero region means "use everything".
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            w: 0,
            h: 0,
            region: [0; 4],
        }
    }

    pub fn sub_image(handle: Handle, w: u16, h: u16, region: [u16; 4]) -> Self {
        Self {
            handle,
            w,
            h,
            region,
        }
    }

    pub fn is_subimage(&self) -> bool {
        !(self.w == 0 && self.h == 0)
    }

    /// UV rectangle `[u0, v0, u1, v1]` covered by the image region.
    pub fn uv(&self) -> [f32; 4] {
        if !self.is_subimage() {
            return [0.0, 0.0, 1.0, 1.0];
        }
        let w = self.w.max(1) as f32;
        let h = self.h.max(1) as f32;
        let [x, y, rw, rh] = self.region.map(f32::from);
        [x / w, y / h, (x + rw) / w, (y + rh) / h]
    }
}
