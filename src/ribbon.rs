use crate::component::{Component, ComponentBase};
use crate::context::Context;
use crate::dropdown::DropdownButtons;
use crate::error::Error;
use crate::events::DisplayFlags;
use crate::impl_component;
use cgmath::{Point2, Vector2};

/// A menu bar across the top of the screen.
///
/// Items are laid out left to right, each one separated from the previous one (or the left edge)
/// by the theme's ribbon padding and widened by the same amount.
#[derive(Debug, Clone)]
pub struct Ribbon {
    base: ComponentBase,
    items: Vec<DropdownButtons>,
    context: Context,
}

impl Ribbon {
    pub fn new(ctx: &Context) -> Ribbon {
        let theme = ctx.theme();
        let mut base = ComponentBase::with_rect(
            ctx,
            Point2::new(0., theme.screen.height - theme.ribbon.height),
            Vector2::new(theme.screen.width, theme.ribbon.height),
        );
        base.display.set(DisplayFlags::OVERFLOW);
        Ribbon {
            base,
            items: Vec::new(),
            context: ctx.clone(),
        }
    }

    /// Adds a menu with the given options. Returns its index.
    pub fn add_option(&mut self, title: &str, options: &[&str]) -> Result<usize, Error> {
        let item = DropdownButtons::with_options(&self.context, title, options)?;
        Ok(self.add_dropdown(item))
    }

    /// Adds a bare title. Returns its index.
    pub fn add_title(&mut self, title: &str) -> Result<usize, Error> {
        let item = DropdownButtons::new(&self.context, title)?;
        Ok(self.add_dropdown(item))
    }

    /// Places an item after the last one and takes ownership of it. Returns its index.
    pub fn add_dropdown(&mut self, mut item: DropdownButtons) -> usize {
        let padding = self.context.theme().ribbon.padding;
        let right = self
            .items
            .last()
            .map_or(0., |last| last.folded_rect().opposite().x);

        item.fold();
        item.set_pos(Point2::new(padding + right, self.base.pos.y));
        let ext = item.ext();
        item.set_ext(ext + Vector2::new(padding, 0.));
        item.set_style(self.base.style);
        log::debug!("ribbon item {} at {:?}", self.items.len(), item.rect());

        self.items.push(item);
        self.items.len() - 1
    }

    pub fn options(&self) -> &[DropdownButtons] {
        &self.items
    }

    pub fn option_mut(&mut self, index: usize) -> Option<&mut DropdownButtons> {
        self.items.get_mut(index)
    }
}

impl_component! {
    Ribbon => base;

    fn children(&self) -> Vec<&dyn Component> {
        self.items.iter().map(|i| i as &dyn Component).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Component> {
        self.items.iter_mut().map(|i| i as &mut dyn Component).collect()
    }
}
