use crate::backend::{RenderBackend, RenderError, RenderTarget};
use crate::component::Component;
use crate::rect::Coord;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};

/// Pointer input, as reported by the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved to an absolute position.
    Moved(Coord),
    /// The button is now down (`true`) or up (`false`).
    Button(bool),
}

/// Connects a component tree to whatever produces pointer events.
///
/// Events may be sent from any thread. Each call to [`Host::poll`] is one frame: it drains the
/// queue into the current pointer state, then feeds that state to the tree exactly once, so the
/// continuous hover and click handlers keep firing while the pointer rests.
pub struct Host<C: Component> {
    root: C,
    event_send: Sender<PointerEvent>,
    event_recv: Receiver<PointerEvent>,
    pointer: Option<Coord>,
    pressed: bool,
}

impl<C: Component> Host<C> {
    pub fn new(root: C) -> Host<C> {
        let (event_send, event_recv) = channel::unbounded();
        Host {
            root,
            event_send,
            event_recv,
            pointer: None,
            pressed: false,
        }
    }

    /// Returns a new sender for pointer events.
    pub fn sender(&self) -> Sender<PointerEvent> {
        self.event_send.clone()
    }

    pub fn root(&self) -> &C {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut C {
        &mut self.root
    }

    /// Last known pointer position, if the pointer has moved at all.
    pub fn pointer(&self) -> Option<Coord> {
        self.pointer
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Runs one frame. Returns how many events were queued since the last one.
    ///
    /// Until the first `Moved` event there is no pointer position, so only the button is fed.
    pub fn poll(&mut self) -> usize {
        let mut count = 0;
        loop {
            match self.event_recv.try_recv() {
                Ok(event) => {
                    self.recv_event(event);
                    count += 1;
                }
                Err(TryRecvError::Empty) => break,
                // the host holds a sender itself
                Err(TryRecvError::Disconnected) => unreachable!("event queue disconnected"),
            }
        }

        if let Some(pointer) = self.pointer {
            self.root.listen_mouse_pos(pointer);
        }
        self.root.listen_mouse_click(self.pressed);
        count
    }

    fn recv_event(&mut self, event: PointerEvent) {
        log::trace!("pointer event: {:?}", event);
        match event {
            PointerEvent::Moved(pointer) => self.pointer = Some(pointer),
            PointerEvent::Button(pressed) => self.pressed = pressed,
        }
    }

    /// Draws the tree into a target owned by the caller.
    pub fn draw(
        &self,
        backend: &mut dyn RenderBackend,
        target: RenderTarget,
    ) -> Result<(), RenderError> {
        self.root.draw(backend, target)
    }

    /// Consumes the host, returning the tree.
    pub fn into_root(self) -> C {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::Container;
    use crate::events::{ClickEnd, EndCause, EventHandler};
    use crate::testing::{self, RecordingRenderer};
    use cgmath::{Point2, Vector2};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn applies_the_latest_state_once_per_frame() {
        let ctx = testing::context();
        let root = Container::with_rect(&ctx, Point2::new(0., 0.), Vector2::new(10., 10.));
        let mut host = Host::new(root);

        let sender = host.sender();
        thread::spawn(move || {
            sender.send(PointerEvent::Moved(Point2::new(5., 5.))).unwrap();
            sender.send(PointerEvent::Button(true)).unwrap();
        })
        .join()
        .unwrap();

        assert_eq!(host.poll(), 2);
        assert!(host.root().is_hovering());
        assert!(host.root().is_pressed());
        assert_eq!(host.poll(), 0);
        assert!(host.root().is_pressed());

        // only the state at the end of the frame counts
        let sender = host.sender();
        sender.send(PointerEvent::Button(false)).unwrap();
        sender.send(PointerEvent::Moved(Point2::new(50., 5.))).unwrap();
        sender.send(PointerEvent::Button(true)).unwrap();
        assert_eq!(host.poll(), 3);
        assert!(!host.root().is_hovering());
        assert!(!host.root().is_pressed());
        assert_eq!(host.pointer(), Some(Point2::new(50., 5.)));
        assert!(host.is_pressed());
    }

    #[test]
    fn resting_pointer_keeps_hovering() {
        let ctx = testing::context();
        let mut root = Container::with_rect(&ctx, Point2::new(0., 0.), Vector2::new(10., 10.));
        let hovers = Arc::new(AtomicUsize::new(0));
        {
            let hovers = Arc::clone(&hovers);
            root.set_on_hover(EventHandler::new(move |_, _| {
                hovers.fetch_add(1, Ordering::SeqCst);
            }));
        }
        let mut host = Host::new(root);

        host.sender()
            .send(PointerEvent::Moved(Point2::new(5., 5.)))
            .unwrap();
        for _ in 0..4 {
            host.poll();
        }
        assert_eq!(hovers.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn releasing_off_the_root_ends_nothing() {
        let ctx = testing::context();
        let mut root = Container::with_rect(&ctx, Point2::new(0., 0.), Vector2::new(10., 10.));
        let causes = Arc::new(Mutex::new(Vec::new()));
        {
            let causes = Arc::clone(&causes);
            root.set_on_click_end(EventHandler::new(move |_, end: &ClickEnd| {
                causes.lock().push(end.cause);
            }));
        }
        let mut host = Host::new(root);
        let sender = host.sender();

        sender.send(PointerEvent::Moved(Point2::new(5., 5.))).unwrap();
        sender.send(PointerEvent::Button(true)).unwrap();
        host.poll();
        sender.send(PointerEvent::Moved(Point2::new(50., 5.))).unwrap();
        host.poll();
        sender.send(PointerEvent::Button(false)).unwrap();
        host.poll();
        host.poll();

        // the click ended when the pointer left, not on release
        assert_eq!(*causes.lock(), [EndCause::Left]);
    }

    #[test]
    fn draws_the_root() {
        let ctx = testing::context();
        let mut root = Container::new(&ctx);
        root.add_child(Container::new(&ctx));
        let host = Host::new(root);

        let mut renderer = RecordingRenderer::default();
        host.draw(&mut renderer, RenderTarget(3)).unwrap();
        assert_eq!(renderer.calls.len(), 2);
        assert!(renderer.calls.iter().all(|c| c.target == RenderTarget(3)));
    }
}
