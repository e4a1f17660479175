//! Dropdowns.
//!
//! A dropdown has two geometries: the folded one, covering just the control, and the unfolded one,
//! reaching down over the stacked options. Exactly one of them is active at a time; the other is
//! kept aside and the two swap on every fold or unfold.

use crate::component::{propagate_pos, Component, ComponentBase};
use crate::context::Context;
use crate::error::Error;
use crate::events::{DisplayFlags, EventHandler};
use crate::impl_component;
use crate::rect::{Coord, Extent, Rect};
use crate::text::Text;
use cgmath::{Point2, Vector2, Zero};
use core::mem;

/// A list of text options that shows below the component while unfolded.
#[derive(Debug, Clone)]
pub struct Dropdown {
    base: ComponentBase,
    unfolded: bool,
    options: Vec<Text>,
    other_pos: Coord,
    other_ext: Extent,
    context: Context,
}

impl Dropdown {
    pub fn new(ctx: &Context, options: &[&str]) -> Result<Dropdown, Error> {
        Dropdown::with_rect(ctx, options, Point2::new(0., 0.), Vector2::zero())
    }

    pub fn with_rect(
        ctx: &Context,
        options: &[&str],
        pos: Coord,
        ext: Extent,
    ) -> Result<Dropdown, Error> {
        let mut dropdown = Dropdown {
            base: ComponentBase::with_rect(ctx, pos, ext),
            unfolded: false,
            options: Vec::new(),
            other_pos: pos,
            other_ext: ext,
            context: ctx.clone(),
        };
        dropdown.base.display.set(DisplayFlags::OVERFLOW);
        dropdown.set_options(options)?;
        Ok(dropdown)
    }

    pub fn is_unfolded(&self) -> bool {
        self.unfolded
    }

    pub fn options(&self) -> &[Text] {
        &self.options
    }

    /// Replaces all options.
    ///
    /// Folds first. The first option hangs from the bottom edge of the dropdown and each next one
    /// hangs from the previous one. All of them start out hidden and take the dropdown's style.
    pub fn set_options(&mut self, options: &[&str]) -> Result<(), Error> {
        self.fold();

        let pos = self.base.pos;
        let ext = self.base.ext;
        let mut built = Vec::with_capacity(options.len());
        let mut bottom = pos.y;
        let mut width = ext.x;
        for option in options {
            let mut text = Text::new(&self.context, option)?;
            bottom -= text.ext().y;
            text.set_pos(Point2::new(pos.x, bottom));
            width = width.max(text.ext().x);
            text.hide();
            text.set_style(self.base.style);
            built.push(text);
        }
        self.options = built;

        if self.options.is_empty() {
            self.other_pos = pos;
            self.other_ext = ext;
        } else {
            self.other_pos = Point2::new(pos.x, bottom);
            self.other_ext = Vector2::new(width, pos.y + ext.y - bottom);
        }
        log::debug!("{} options, unfolded to {:?}", self.options.len(), self.unfolded_rect());
        Ok(())
    }

    /// Hides the options and switches to the folded geometry. Does nothing if already folded.
    pub fn fold(&mut self) {
        if self.unfolded {
            for option in &mut self.options {
                option.hide();
            }
            self.swap_geometry();
            log::debug!("folded {:?}", self.base.id());
        }
        self.unfolded = false;
    }

    /// Shows the options and switches to the unfolded geometry. Does nothing if already unfolded.
    pub fn unfold(&mut self) {
        if !self.unfolded {
            for option in &mut self.options {
                option.show();
            }
            self.swap_geometry();
            log::debug!("unfolded {:?}", self.base.id());
        }
        self.unfolded = true;
    }

    /// The rectangle covered while folded, whatever the current state.
    pub fn folded_rect(&self) -> Rect {
        if self.unfolded {
            Rect::new(self.other_pos, self.other_ext)
        } else {
            self.rect()
        }
    }

    /// The rectangle covered while unfolded, whatever the current state.
    pub fn unfolded_rect(&self) -> Rect {
        if self.unfolded {
            self.rect()
        } else {
            Rect::new(self.other_pos, self.other_ext)
        }
    }

    fn swap_geometry(&mut self) {
        mem::swap(&mut self.base.pos, &mut self.other_pos);
        mem::swap(&mut self.base.ext, &mut self.other_ext);
    }

    /// Resizes the active geometry. The inactive one grows by the same height and is at least as
    /// wide.
    fn resize(&mut self, ext: Extent) {
        self.other_ext.y += ext.y - self.base.ext.y;
        self.base.ext = ext;
        self.other_ext.x = self.other_ext.x.max(ext.x);
    }
}

impl_component! {
    Dropdown => base;

    fn children(&self) -> Vec<&dyn Component> {
        self.options.iter().map(|o| o as &dyn Component).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Component> {
        self.options.iter_mut().map(|o| o as &mut dyn Component).collect()
    }

    fn set_pos(&mut self, pos: Coord) {
        let delta = propagate_pos(self, pos);
        self.other_pos += delta;
    }

    fn set_ext(&mut self, ext: Extent) {
        self.resize(ext);
    }
}

/// A dropdown with an always visible title, as used in menu bars.
#[derive(Debug, Clone)]
pub struct DropdownButtons {
    dropdown: Dropdown,
    title: Text,
}

impl DropdownButtons {
    /// A title without options. It keeps the default handlers and never unfolds by itself.
    pub fn new(ctx: &Context, title: &str) -> Result<DropdownButtons, Error> {
        let mut buttons = DropdownButtons {
            dropdown: Dropdown::new(ctx, &[])?,
            title: Text::new(ctx, title)?,
        };
        let ext = buttons.title.ext();
        buttons.set_ext(ext);
        Ok(buttons)
    }

    /// A menu that unfolds when pressed and folds once the pointer leaves it.
    pub fn with_options(
        ctx: &Context,
        title: &str,
        options: &[&str],
    ) -> Result<DropdownButtons, Error> {
        let mut buttons = DropdownButtons {
            dropdown: Dropdown::new(ctx, options)?,
            title: Text::new(ctx, title)?,
        };
        let ext = buttons.title.ext();
        buttons.set_ext(ext);

        let background = ctx.theme().palette.background;
        buttons.set_on_click_begin(EventHandler::new(|node, _| {
            if let Some(dropdown) = dropdown_of(node) {
                dropdown.unfold();
            }
        }));
        buttons.set_on_hover_end(EventHandler::new(move |node, _| {
            if let Some(dropdown) = dropdown_of(node) {
                dropdown.fold();
            }
            node.set_color(background);
        }));
        Ok(buttons)
    }

    pub fn title(&self) -> &Text {
        &self.title
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn dropdown_mut(&mut self) -> &mut Dropdown {
        &mut self.dropdown
    }

    pub fn is_unfolded(&self) -> bool {
        self.dropdown.is_unfolded()
    }

    pub fn options(&self) -> &[Text] {
        self.dropdown.options()
    }

    pub fn set_options(&mut self, options: &[&str]) -> Result<(), Error> {
        self.dropdown.set_options(options)
    }

    pub fn fold(&mut self) {
        self.dropdown.fold();
    }

    pub fn unfold(&mut self) {
        self.dropdown.unfold();
    }

    pub fn folded_rect(&self) -> Rect {
        self.dropdown.folded_rect()
    }
}

impl_component! {
    DropdownButtons => dropdown.base;

    fn children(&self) -> Vec<&dyn Component> {
        let mut children = self.dropdown.children();
        children.insert(0, &self.title);
        children
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Component> {
        let mut children = self.dropdown.children_mut();
        children.insert(0, &mut self.title);
        children
    }

    fn set_pos(&mut self, pos: Coord) {
        let delta = propagate_pos(self, pos);
        self.dropdown.other_pos += delta;
    }

    fn set_ext(&mut self, ext: Extent) {
        self.dropdown.resize(ext);
    }
}

/// Finds the dropdown behind a component handed to an event handler.
pub fn dropdown_of(node: &mut dyn Component) -> Option<&mut Dropdown> {
    if node.as_any().is::<DropdownButtons>() {
        node.downcast_mut::<DropdownButtons>().map(|b| &mut b.dropdown)
    } else {
        node.downcast_mut::<Dropdown>()
    }
}
