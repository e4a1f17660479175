//! Events.
//!
//! Every component runs two small state machines, one for hover and one for click, fed once per
//! frame by [`Component::listen_mouse_pos`] and [`Component::listen_mouse_click`]. Transitions
//! fire the matching handler slot; each slot has its own payload type.
//!
//! Events are not captured: overlapping siblings all see the same pointer.

use crate::component::Component;
use crate::config::Palette;
use crate::rect::Coord;
use core::fmt;
use std::sync::Arc;

/// List of event types.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventTypeId {
    Hover = 0,
    HoverBegin = 1,
    HoverEnd = 2,
    Click = 3,
    ClickBegin = 4,
    ClickEnd = 5,
}

pub trait EventType: fmt::Debug + 'static {
    fn type_id() -> EventTypeId;
}

/// Why an active hover or click ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCause {
    /// The pointer left the component (or, for clicks, stopped hovering it while pressed).
    Left,
    /// The button was released.
    Released,
    /// The component was hidden.
    Hidden,
}

/// Fired on every frame the pointer is inside the component.
#[derive(Debug, Clone, Copy)]
pub struct Hover {
    pub location: Coord,
}

/// Fired when the pointer enters the component.
#[derive(Debug, Clone, Copy)]
pub struct HoverBegin {
    pub location: Coord,
}

/// Fired when the pointer leaves the component or the component is hidden.
#[derive(Debug, Clone, Copy)]
pub struct HoverEnd {
    pub cause: EndCause,
    /// Pointer location, if the pointer caused this.
    pub location: Option<Coord>,
}

/// Fired on every frame the component is hovered and the button is down.
#[derive(Debug, Clone, Copy)]
pub struct Click;

/// Fired when a press on the component begins.
#[derive(Debug, Clone, Copy)]
pub struct ClickBegin;

/// Fired when a press on the component ends.
#[derive(Debug, Clone, Copy)]
pub struct ClickEnd {
    pub cause: EndCause,
}

macro_rules! impl_event_type {
    ($($t:tt),+) => {
        $(
            impl EventType for $t {
                fn type_id() -> EventTypeId {
                    EventTypeId::$t
                }
            }
        )+
    }
}
impl_event_type!(Hover, HoverBegin, HoverEnd, Click, ClickBegin, ClickEnd);

/// An event callback. Receives the component the event happened on.
pub struct EventHandler<Type>(Arc<dyn Fn(&mut dyn Component, &Type) + Send + Sync>);

impl<T> Clone for EventHandler<T> {
    fn clone(&self) -> Self {
        EventHandler(Arc::clone(&self.0))
    }
}

impl<T: EventType> EventHandler<T> {
    pub fn new<F: 'static + Fn(&mut dyn Component, &T) + Send + Sync>(handler: F) -> Self {
        EventHandler(Arc::new(handler))
    }

    /// A handler that does nothing.
    pub fn noop() -> Self {
        EventHandler::new(|_, _| {})
    }

    pub fn call(&self, component: &mut dyn Component, event: &T) {
        (self.0)(component, event)
    }
}

impl<T: EventType> fmt::Debug for EventHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EventHandler<{:?}>", T::type_id())
    }
}

/// The six handler slots of a component.
#[derive(Debug, Clone)]
pub struct EventHandlers {
    pub hover: EventHandler<Hover>,
    pub hover_begin: EventHandler<HoverBegin>,
    pub hover_end: EventHandler<HoverEnd>,
    pub click: EventHandler<Click>,
    pub click_begin: EventHandler<ClickBegin>,
    pub click_end: EventHandler<ClickEnd>,
}

impl EventHandlers {
    /// Default handlers: tint the background while hovered or pressed.
    pub fn themed(palette: Palette) -> EventHandlers {
        EventHandlers {
            hover: EventHandler::noop(),
            hover_begin: EventHandler::new(move |c, _| c.set_color(palette.hover)),
            hover_end: EventHandler::new(move |c, _| c.set_color(palette.background)),
            click: EventHandler::noop(),
            click_begin: EventHandler::new(move |c, _| c.set_color(palette.click)),
            click_end: EventHandler::new(move |c, _| c.set_color(palette.background)),
        }
    }
}

impl Default for EventHandlers {
    fn default() -> Self {
        EventHandlers::themed(Palette::default())
    }
}

/// Display flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFlags(u8);

impl DisplayFlags {
    /// The component is drawn and receives events.
    pub const VISIBLE: u8 = 1 << 0;
    /// Children may lie outside the component’s rectangle and always receive pointer events.
    pub const OVERFLOW: u8 = 1 << 1;

    pub const fn new(bits: u8) -> Self {
        DisplayFlags(bits)
    }

    #[inline]
    pub const fn has(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    #[inline]
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    #[inline]
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }
}

/// Transient pointer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventFlags(u8);

impl EventFlags {
    pub const HOVERING: u8 = 1 << 0;
    pub const PRESSED: u8 = 1 << 1;

    pub const NONE: Self = EventFlags(0);

    #[inline]
    pub const fn has(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    #[inline]
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    #[inline]
    pub fn clear(&mut self, flag: u8) {
        self.0 &= !flag;
    }
}

/// Runs the hover machine on a component and, where needed, its descendants.
pub(crate) fn listen_mouse_pos(node: &mut dyn Component, pointer: Coord) {
    if !node.is_visible() {
        return;
    }

    let mut recurse = node.base().display.has(DisplayFlags::OVERFLOW);

    if node.rect().contains(pointer) {
        if !node.base().events.has(EventFlags::HOVERING) {
            node.base_mut().events.set(EventFlags::HOVERING);
            let handler = node.base().handlers.hover_begin.clone();
            handler.call(node, &HoverBegin { location: pointer });
        }
        let handler = node.base().handlers.hover.clone();
        handler.call(node, &Hover { location: pointer });
        recurse = true;
    } else if node.base().events.has(EventFlags::HOVERING) {
        node.base_mut().events.clear(EventFlags::HOVERING);
        let handler = node.base().handlers.hover_end.clone();
        handler.call(
            node,
            &HoverEnd {
                cause: EndCause::Left,
                location: Some(pointer),
            },
        );
        recurse = true;
    }

    if recurse {
        for child in node.children_mut() {
            listen_mouse_pos(child, pointer);
        }
    }
}

/// Runs the click machine on a component and, where needed, its descendants.
pub(crate) fn listen_mouse_click(node: &mut dyn Component, pressed: bool) {
    if !node.is_visible() {
        return;
    }

    let mut recurse = node.base().display.has(DisplayFlags::OVERFLOW);
    let events = node.base().events;

    if events.has(EventFlags::HOVERING) && pressed {
        if !events.has(EventFlags::PRESSED) {
            node.base_mut().events.set(EventFlags::PRESSED);
            let handler = node.base().handlers.click_begin.clone();
            handler.call(node, &ClickBegin);
        }
        let handler = node.base().handlers.click.clone();
        handler.call(node, &Click);
        recurse = true;
    } else if events.has(EventFlags::PRESSED) {
        node.base_mut().events.clear(EventFlags::PRESSED);
        let cause = if pressed {
            EndCause::Left
        } else {
            EndCause::Released
        };
        let handler = node.base().handlers.click_end.clone();
        handler.call(node, &ClickEnd { cause });
        recurse = true;
    }

    if recurse {
        for child in node.children_mut() {
            listen_mouse_click(child, pressed);
        }
    }
}

/// Hides a component, ending any active hover or click as if the pointer had left.
pub(crate) fn hide(node: &mut dyn Component) {
    node.base_mut().display.clear(DisplayFlags::VISIBLE);

    if node.base().events.has(EventFlags::HOVERING) {
        node.base_mut().events.clear(EventFlags::HOVERING);
        let handler = node.base().handlers.hover_end.clone();
        handler.call(
            node,
            &HoverEnd {
                cause: EndCause::Hidden,
                location: None,
            },
        );
    }
    if node.base().events.has(EventFlags::PRESSED) {
        node.base_mut().events.clear(EventFlags::PRESSED);
        let handler = node.base().handlers.click_end.clone();
        handler.call(
            node,
            &ClickEnd {
                cause: EndCause::Hidden,
            },
        );
    }
}
