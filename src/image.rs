use crate::backend::{DrawCall, PushFlags, TextureInfo};
use crate::component::ComponentBase;
use crate::context::Context;
use crate::impl_component;
use crate::rect::Coord;
use crate::texture::TextureTracker;
use cgmath::{Point2, Vector2, Zero};
use std::sync::Arc;

/// A component that shows a backend texture.
///
/// Images referencing the same texture share it: the texture is destroyed when the last of them
/// is dropped or switches to another texture.
#[derive(Debug)]
pub struct Image {
    pub(crate) base: ComponentBase,
    tex: TextureInfo,
    textures: Arc<TextureTracker>,
}

impl Image {
    /// A zero-sized image with no texture.
    pub fn new(ctx: &Context) -> Image {
        Image::at(ctx, Point2::new(0., 0.))
    }

    pub fn at(ctx: &Context, pos: Coord) -> Image {
        Image::with_texture(ctx, pos, ctx.no_texture())
    }

    /// An image showing an already loaded texture, sized to its texel extent.
    pub fn with_texture(ctx: &Context, pos: Coord, tex: TextureInfo) -> Image {
        ctx.textures().retain(&tex);
        let ext = if tex.is_null() {
            Vector2::zero()
        } else {
            tex.extent.to_extent()
        };
        Image {
            base: ComponentBase::with_rect(ctx, pos, ext),
            tex,
            textures: Arc::clone(ctx.textures()),
        }
    }

    pub fn tex(&self) -> &TextureInfo {
        &self.tex
    }

    /// Switches to another texture.
    ///
    /// If the handle changes, the old texture loses a user and is destroyed if that was the last
    /// one. Does not touch the extent.
    pub fn set_tex(&mut self, tex: TextureInfo) {
        if tex.image != self.tex.image {
            self.textures.retain(&tex);
            self.textures.release(&self.tex);
        }
        self.tex = tex;
    }
}

impl Clone for Image {
    fn clone(&self) -> Self {
        self.textures.retain(&self.tex);
        Image {
            base: self.base.clone(),
            tex: self.tex,
            textures: Arc::clone(&self.textures),
        }
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        self.textures.release(&self.tex);
    }
}

impl_component! {
    Image => base;

    fn draw_call(&self) -> DrawCall<'_> {
        let mut call = self.base.draw_call();
        if !self.tex.is_null() {
            call.push.flags.set(PushFlags::TEXTURE);
            call.texture = Some(&self.tex);
        }
        call
    }
}
