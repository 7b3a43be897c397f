// Capabilities the filter needs from the application hosting it

use std::path::{Path, PathBuf};

use crate::color::Vec4;
use crate::error::HostError;

/// Pixel format requested when the host renders the filter's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectRender {
    /// Let the host skip the intermediate copy when its layout already matches.
    Allow,
}

/// Access to the host's graphics subsystem.
///
/// `enter_graphics` and `leave_graphics` must be strictly paired; use
/// [`crate::GraphicsGuard`] rather than calling them directly.
pub trait GraphicsHost {
    type Effect;
    type Param: Copy;

    fn enter_graphics(&self);
    fn leave_graphics(&self);

    fn create_effect(&self, path: &Path) -> Result<Self::Effect, HostError>;
    fn effect_param(&self, effect: &Self::Effect, name: &str) -> Option<Self::Param>;
    fn destroy_effect(&self, effect: Self::Effect);
}

/// Per-frame filter processing on top of the graphics subsystem.
pub trait FilterHost: GraphicsHost {
    type Source;

    /// Full path of a file shipped in the plugin's data directory.
    fn module_file(&self, name: &str) -> Option<PathBuf>;

    /// Returns `false` when the host declines to process this frame.
    fn begin_filter(&self, source: &Self::Source, format: ColorFormat, direct: DirectRender) -> bool;

    /// Pass the frame through without processing.
    fn skip_filter(&self, source: &Self::Source);

    /// Current size of the filter's target, `(0, 0)` if there is none.
    fn target_size(&self, source: &Self::Source) -> (u32, u32);

    fn set_float(&self, param: Self::Param, value: f32);
    fn set_vec4(&self, param: Self::Param, value: &Vec4);

    /// Draw the begun pass through `effect`. Zero width and height keep the
    /// target's natural size.
    fn end_filter(&self, source: &Self::Source, effect: &Self::Effect, width: u32, height: u32);
}
