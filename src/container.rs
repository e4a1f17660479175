use crate::component::{Component, ComponentBase};
use crate::context::Context;
use crate::impl_component;
use crate::rect::{Coord, Extent};

/// A component that owns children of any component type.
///
/// Children are dropped together with the container.
#[derive(Debug)]
pub struct Container {
    base: ComponentBase,
    children: Vec<Box<dyn Component>>,
}

impl Container {
    pub fn new(ctx: &Context) -> Container {
        Container {
            base: ComponentBase::new(ctx),
            children: Vec::new(),
        }
    }

    pub fn with_rect(ctx: &Context, pos: Coord, ext: Extent) -> Container {
        Container {
            base: ComponentBase::with_rect(ctx, pos, ext),
            children: Vec::new(),
        }
    }

    /// Takes ownership of a child and returns its index.
    pub fn add_child<T: Component>(&mut self, child: T) -> usize {
        self.children.push(Box::new(child));
        self.children.len() - 1
    }

    /// Takes ownership of an already boxed child and returns its index.
    pub fn add_boxed(&mut self, child: Box<dyn Component>) -> usize {
        self.children.push(child);
        self.children.len() - 1
    }

    /// Returns the child at `index` if it is a `T`.
    pub fn child<T: Component>(&self, index: usize) -> Option<&T> {
        self.children.get(index)?.as_any().downcast_ref::<T>()
    }

    pub fn child_mut<T: Component>(&mut self, index: usize) -> Option<&mut T> {
        self.children.get_mut(index)?.as_any_mut().downcast_mut::<T>()
    }

    /// Removes a child, handing ownership back. Later children shift down by one.
    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn Component>> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl_component! {
    Container => base;

    fn children(&self) -> Vec<&dyn Component> {
        self.children.iter().map(|c| &**c).collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn Component> {
        self.children.iter_mut().map(|c| &mut **c).collect()
    }
}
