pub mod color;
pub mod config;
pub mod error;
pub mod filter;
pub mod graphics;
pub mod host;
pub mod properties;
pub mod settings;

pub use color::{ChannelOrder, PackedColor, Vec4};
pub use config::FilterSettings;
pub use error::HostError;
pub use filter::{EffectParams, SubsamplingDetector};
pub use graphics::GraphicsGuard;
pub use host::{ColorFormat, DirectRender, FilterHost, GraphicsHost};
pub use properties::{PropertyDescriptor, PropertyKind, PropertyList, TextLookup};
pub use settings::{MemorySettings, Settings};
