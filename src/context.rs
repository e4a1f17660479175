use crate::backend::{DescriptorHandle, FontBackend, PipelineStyle, TextureBackend, TextureInfo};
use crate::config::Theme;
use crate::events::EventHandlers;
use crate::texture::TextureTracker;
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

/// Defaults and shared resources for building components.
///
/// Passed by reference into every constructor. Cheap to clone: clones share the texture tracker
/// and the font backend, so components built from clones of one context share texture counts.
/// Separate contexts are fully independent.
#[derive(Clone)]
pub struct Context {
    theme: Arc<Theme>,
    style: PipelineStyle,
    descriptor: DescriptorHandle,
    handlers: EventHandlers,
    textures: Arc<TextureTracker>,
    fonts: Arc<Mutex<Box<dyn FontBackend>>>,
}

impl Context {
    pub fn new(
        theme: Theme,
        textures: Box<dyn TextureBackend>,
        fonts: Box<dyn FontBackend>,
    ) -> Context {
        Context {
            handlers: EventHandlers::themed(theme.palette),
            theme: Arc::new(theme),
            style: PipelineStyle::default(),
            descriptor: DescriptorHandle::default(),
            textures: Arc::new(TextureTracker::new(textures)),
            fonts: Arc::new(Mutex::new(fonts)),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Style given to components built from now on.
    pub fn default_style(&self) -> PipelineStyle {
        self.style
    }

    pub fn set_default_style(&mut self, style: PipelineStyle) {
        self.style = style;
    }

    /// Descriptor given to components built from now on.
    pub fn default_descriptor(&self) -> DescriptorHandle {
        self.descriptor
    }

    pub fn set_default_descriptor(&mut self, descriptor: DescriptorHandle) {
        self.descriptor = descriptor;
    }

    /// Handlers installed in every slot of newly built components.
    pub fn default_handlers(&self) -> &EventHandlers {
        &self.handlers
    }

    pub fn set_default_handlers(&mut self, handlers: EventHandlers) {
        self.handlers = handlers;
    }

    /// The texture of images that show nothing. Never counted and never destroyed.
    pub fn no_texture(&self) -> TextureInfo {
        TextureInfo::default()
    }

    pub fn textures(&self) -> &Arc<TextureTracker> {
        &self.textures
    }

    pub fn fonts(&self) -> &Mutex<Box<dyn FontBackend>> {
        &self.fonts
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Context")
            .field("theme", &self.theme)
            .field("style", &self.style)
            .field("descriptor", &self.descriptor)
            .field("textures", &self.textures)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::testing;

    #[test]
    fn clones_share_resources() {
        let (ctx, textures) = testing::context_with_textures();
        let mut copy = ctx.clone();
        assert!(ctx.no_texture().is_null());
        assert_eq!(crate::Image::new(&copy).tex(), &ctx.no_texture());

        let tex = copy.textures().load(crate::TexelExtent::new(1, 1), &[9]).unwrap();
        ctx.textures().retain(&tex);
        copy.textures().release(&tex);
        assert_eq!(textures.destroyed(tex.image.unwrap()), 1);

        // defaults are per copy
        copy.set_default_descriptor(crate::DescriptorHandle(5));
        assert_eq!(ctx.default_descriptor(), crate::DescriptorHandle(0));
        assert_eq!(copy.default_descriptor(), crate::DescriptorHandle(5));
    }
}
