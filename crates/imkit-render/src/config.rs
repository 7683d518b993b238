use imkit_graphics::{Handle, Vec2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AntiAliasing {
    Off,
    #[default]
    On,
}

impl From<bool> for AntiAliasing {
    fn from(on: bool) -> Self {
        if on {
            AntiAliasing::On
        } else {
            AntiAliasing::Off
        }
    }
}

/// Texture and texel used for untextured shapes. Hosts usually point this at
/// a white pixel of their font atlas so that one texture covers everything.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NullTexture {
    pub texture: Handle,
    pub uv: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertConfig {
    /// Multiplied into every vertex alpha.
    pub global_alpha: f32,
    pub line_aa: AntiAliasing,
    pub shape_aa: AntiAliasing,
    pub circle_segment_count: u32,
    pub arc_segment_count: u32,
    pub curve_segment_count: u32,
    pub null: NullTexture,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            global_alpha: 1.0,
            line_aa: AntiAliasing::On,
            shape_aa: AntiAliasing::On,
            circle_segment_count: 22,
            arc_segment_count: 22,
            curve_segment_count: 22,
            null: NullTexture::default(),
        }
    }
}

impl ConvertConfig {
    /// Default configuration with both line and shape anti-aliasing set to `aa`.
    pub fn with_anti_aliasing(aa: impl Into<AntiAliasing>) -> Self {
        let aa = aa.into();
        Self {
            line_aa: aa,
            shape_aa: aa,
            ..Self::default()
        }
    }
}
