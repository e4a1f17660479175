use crate::backend::{
    DescriptorHandle, DrawCall, PipelineStyle, PushConstants, PushFlags, RenderBackend,
    RenderError, RenderTarget,
};
use crate::color::Color;
use crate::context::Context;
use crate::error::Error;
use crate::events::{
    self, Click, ClickBegin, ClickEnd, DisplayFlags, EventFlags, EventHandler, EventHandlers,
    Hover, HoverBegin, HoverEnd,
};
use crate::rect::{Coord, Extent, Rect};
use cgmath::{Point2, Vector2, Zero};
use core::any::Any;
use core::fmt;
use uuid::Uuid;

/// Implements the `Component` trait for a given struct.
///
/// Generates the accessors every component needs; anything else (children, layout overrides)
/// goes after the semicolon using normal rust syntax.
///
/// Syntax:
///
/// ```text
/// impl_component! {
///     StructName => path.to.base;
///     (put overrides like children() here)
/// }
/// ```
#[macro_export]
macro_rules! impl_component {
    (
        $(#[$attr:meta])*
        $struct:ty => $($base:ident).+;
        $($extra:tt)*
    ) => {
        $(#[$attr])*
        impl $crate::Component for $struct {
            fn base(&self) -> &$crate::ComponentBase {
                &self.$($base).+
            }

            fn base_mut(&mut self) -> &mut $crate::ComponentBase {
                &mut self.$($base).+
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            fn as_component(&self) -> &dyn $crate::Component {
                self
            }

            fn as_component_mut(&mut self) -> &mut dyn $crate::Component {
                self
            }

            $($extra)*
        }
    };
}

/// Identifies a component for the render backend; copies get a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(Uuid);

impl ComponentId {
    pub fn new() -> ComponentId {
        ComponentId(Uuid::new_v4())
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        ComponentId::new()
    }
}

/// State shared by every component.
pub struct ComponentBase {
    id: ComponentId,
    pub(crate) pos: Coord,
    pub(crate) ext: Extent,
    pub(crate) color: Color,
    pub(crate) display: DisplayFlags,
    pub(crate) events: EventFlags,
    pub(crate) style: PipelineStyle,
    pub(crate) descriptor: DescriptorHandle,
    pub handlers: EventHandlers,
}

impl ComponentBase {
    /// A visible, zero-sized component at the origin using the context’s defaults.
    pub fn new(ctx: &Context) -> ComponentBase {
        ComponentBase::with_rect(ctx, Point2::new(0., 0.), Vector2::zero())
    }

    pub fn with_rect(ctx: &Context, pos: Coord, ext: Extent) -> ComponentBase {
        ComponentBase {
            id: ComponentId::new(),
            pos,
            ext,
            color: ctx.theme().palette.background,
            display: DisplayFlags::new(DisplayFlags::VISIBLE),
            events: EventFlags::NONE,
            style: ctx.default_style(),
            descriptor: ctx.default_descriptor(),
            handlers: ctx.default_handlers().clone(),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn display(&self) -> DisplayFlags {
        self.display
    }

    pub fn events(&self) -> EventFlags {
        self.events
    }

    /// An untextured draw of this component's rectangle.
    pub fn draw_call(&self) -> DrawCall<'_> {
        DrawCall {
            id: self.id,
            push: PushConstants {
                color: self.color,
                position: self.pos,
                extent: self.ext,
                flags: PushFlags::new(PushFlags::NONE),
            },
            style: &self.style,
            descriptor: self.descriptor,
            texture: None,
        }
    }
}

/// Copies get their own id and start out neither hovered nor pressed.
impl Clone for ComponentBase {
    fn clone(&self) -> Self {
        ComponentBase {
            id: ComponentId::new(),
            pos: self.pos,
            ext: self.ext,
            color: self.color,
            display: self.display,
            events: EventFlags::NONE,
            style: self.style,
            descriptor: self.descriptor,
            handlers: self.handlers.clone(),
        }
    }
}

impl fmt::Debug for ComponentBase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ComponentBase")
            .field("id", &self.id)
            .field("pos", &self.pos)
            .field("ext", &self.ext)
            .field("color", &self.color)
            .field("display", &self.display)
            .field("events", &self.events)
            .finish()
    }
}

/// A node in the UI tree.
///
/// Positions are absolute: moving a component moves its whole subtree by the same delta, so every
/// node always knows where it is on screen. Extents are local and never propagate.
///
/// This trait should be implemented using the [`impl_component`] macro.
pub trait Component: Any + fmt::Debug {
    fn base(&self) -> &ComponentBase;

    fn base_mut(&mut self) -> &mut ComponentBase;

    /// For downcasting.
    fn as_any(&self) -> &dyn Any;

    /// For downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn as_component(&self) -> &dyn Component;

    fn as_component_mut(&mut self) -> &mut dyn Component;

    /// Direct children, in drawing order.
    fn children(&self) -> Vec<&dyn Component> {
        Vec::new()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Component> {
        Vec::new()
    }

    /// Moves this component and its whole subtree.
    fn set_pos(&mut self, pos: Coord) {
        propagate_pos(self.as_component_mut(), pos);
    }

    /// Resizes this component only.
    fn set_ext(&mut self, ext: Extent) {
        self.base_mut().ext = ext;
    }

    fn set_descriptor(&mut self, descriptor: DescriptorHandle) -> Result<(), Error> {
        self.base_mut().descriptor = descriptor;
        Ok(())
    }

    /// What the render backend receives for this component.
    fn draw_call(&self) -> DrawCall<'_> {
        self.base().draw_call()
    }

    fn id(&self) -> ComponentId {
        self.base().id
    }

    fn pos(&self) -> Coord {
        self.base().pos
    }

    fn ext(&self) -> Extent {
        self.base().ext
    }

    fn rect(&self) -> Rect {
        Rect::new(self.base().pos, self.base().ext)
    }

    fn color(&self) -> Color {
        self.base().color
    }

    fn set_color(&mut self, color: Color) {
        self.base_mut().color = color;
    }

    fn style(&self) -> PipelineStyle {
        self.base().style
    }

    /// Sets the style of this component and its whole subtree, replacing any child overrides.
    fn set_style(&mut self, style: PipelineStyle) {
        self.base_mut().style = style;
        for child in self.children_mut() {
            child.set_style(style);
        }
    }

    fn descriptor(&self) -> DescriptorHandle {
        self.base().descriptor
    }

    fn is_visible(&self) -> bool {
        self.base().display.has(DisplayFlags::VISIBLE)
    }

    fn is_overflowing(&self) -> bool {
        self.base().display.has(DisplayFlags::OVERFLOW)
    }

    /// Lets children outside this component’s rectangle receive pointer events.
    fn set_overflow(&mut self, overflow: bool) {
        if overflow {
            self.base_mut().display.set(DisplayFlags::OVERFLOW);
        } else {
            self.base_mut().display.clear(DisplayFlags::OVERFLOW);
        }
    }

    fn is_hovering(&self) -> bool {
        self.base().events.has(EventFlags::HOVERING)
    }

    fn is_pressed(&self) -> bool {
        self.base().events.has(EventFlags::PRESSED)
    }

    /// Makes the component visible again. Pointer state is picked up on the next listen call.
    fn show(&mut self) {
        self.base_mut().display.set(DisplayFlags::VISIBLE);
    }

    /// Hides the component, firing hover-end and click-end if they were active.
    fn hide(&mut self) {
        events::hide(self.as_component_mut());
    }

    /// Draws this component, then its children in order. Hidden subtrees are skipped.
    fn draw(&self, backend: &mut dyn RenderBackend, target: RenderTarget) -> Result<(), RenderError> {
        if !self.is_visible() {
            return Ok(());
        }
        backend.draw(&self.draw_call(), target)?;
        for child in self.children() {
            child.draw(backend, target)?;
        }
        Ok(())
    }

    /// Feeds the absolute pointer position to this subtree.
    fn listen_mouse_pos(&mut self, pointer: Coord) {
        events::listen_mouse_pos(self.as_component_mut(), pointer);
    }

    /// Feeds the button state to this subtree.
    fn listen_mouse_click(&mut self, pressed: bool) {
        events::listen_mouse_click(self.as_component_mut(), pressed);
    }

    fn set_on_hover(&mut self, handler: EventHandler<Hover>) {
        self.base_mut().handlers.hover = handler;
    }

    fn set_on_hover_begin(&mut self, handler: EventHandler<HoverBegin>) {
        self.base_mut().handlers.hover_begin = handler;
    }

    fn set_on_hover_end(&mut self, handler: EventHandler<HoverEnd>) {
        self.base_mut().handlers.hover_end = handler;
    }

    fn set_on_click(&mut self, handler: EventHandler<Click>) {
        self.base_mut().handlers.click = handler;
    }

    fn set_on_click_begin(&mut self, handler: EventHandler<ClickBegin>) {
        self.base_mut().handlers.click_begin = handler;
    }

    fn set_on_click_end(&mut self, handler: EventHandler<ClickEnd>) {
        self.base_mut().handlers.click_end = handler;
    }
}

impl<'a> dyn Component + 'a {
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Moves a component to `pos` and its descendants by the same delta. Returns the delta.
///
/// This is what [`Component::set_pos`] does by default; overrides call it to keep that behavior.
pub fn propagate_pos(node: &mut dyn Component, pos: Coord) -> Extent {
    let delta = pos - node.base().pos;
    node.base_mut().pos = pos;
    for child in node.children_mut() {
        let child_pos = child.pos();
        child.set_pos(child_pos + delta);
    }
    delta
}
