//! A retained-mode widget tree for immediate-mode renderers.
//!
//! The tree holds components with absolute positions, runs hover and click state machines on
//! them once per frame and hands one draw call per visible component to a [`RenderBackend`].
//! Textures for images and text are shared and reference-counted through the [`Context`] every
//! component is built from.
//!
//! ```text
//! let ctx = Context::new(theme, Box::new(my_textures), Box::new(FontdueBackend::from_bytes(ttf, 0)?));
//! let mut ribbon = Ribbon::new(&ctx);
//! ribbon.add_option("File", &["New", "Open"])?;
//!
//! let mut host = Host::new(ribbon);
//! // every frame:
//! host.poll();
//! host.draw(&mut my_renderer, target)?;
//! ```

pub mod backend;
pub mod color;
mod component;
pub mod config;
mod container;
mod context;
mod dropdown;
mod error;
pub mod events;
pub mod font;
mod host;
mod image;
mod rect;
mod ribbon;
pub mod text;
mod texture;

#[cfg(test)]
mod testing;

pub use backend::{
    DescriptorHandle, DrawCall, FontBackend, PipelineStyle, PushConstants, PushFlags,
    RenderBackend, RenderTarget, TextureBackend, TextureInfo,
};
pub use color::Color;
pub use component::{propagate_pos, Component, ComponentBase, ComponentId};
pub use config::Theme;
pub use container::Container;
pub use context::Context;
pub use dropdown::{dropdown_of, Dropdown, DropdownButtons};
pub use error::Error;
pub use font::FontdueBackend;
pub use host::{Host, PointerEvent};
pub use image::Image;
pub use rect::{Coord, Extent, Rect, TexelExtent};
pub use ribbon::Ribbon;
pub use text::Text;
pub use texture::TextureTracker;
