//! Shared texture lifetimes.

use crate::backend::{ImageHandle, TextureBackend, TextureError, TextureInfo};
use crate::rect::TexelExtent;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;

struct Inner {
    backend: Box<dyn TextureBackend>,
    users: HashMap<ImageHandle, usize>,
}

/// Counts how many images use each backend texture and frees textures nobody uses anymore.
///
/// One tracker belongs to one [`Context`](crate::Context); trees built from different contexts
/// never share counts.
pub struct TextureTracker {
    inner: Mutex<Inner>,
}

impl TextureTracker {
    pub fn new(backend: Box<dyn TextureBackend>) -> TextureTracker {
        TextureTracker {
            inner: Mutex::new(Inner {
                backend,
                users: HashMap::new(),
            }),
        }
    }

    /// Uploads a coverage buffer. The returned texture has no users yet.
    pub fn load(&self, extent: TexelExtent, coverage: &[u8]) -> Result<TextureInfo, TextureError> {
        if coverage.len() != extent.area() {
            return Err(TextureError::BufferSize {
                expected: extent.area(),
                actual: coverage.len(),
            });
        }
        self.inner.lock().backend.load(extent, coverage)
    }

    /// Registers one more user of the texture.
    pub fn retain(&self, texture: &TextureInfo) {
        if let Some(image) = texture.image {
            let mut inner = self.inner.lock();
            let users = inner.users.entry(image).or_insert(0);
            *users += 1;
            log::trace!("{} users of {:?}", *users, image);
        }
    }

    /// Removes one user of the texture, destroying it if that was the last one.
    pub fn release(&self, texture: &TextureInfo) {
        let image = match texture.image {
            Some(image) => image,
            None => return,
        };

        let mut inner = self.inner.lock();
        let remaining = match inner.users.get_mut(&image) {
            Some(users) => {
                *users -= 1;
                *users
            }
            None => {
                log::warn!("released {:?}, which has no users", image);
                return;
            }
        };
        log::trace!("{} users of {:?}", remaining, image);

        if remaining == 0 {
            inner.users.remove(&image);
            inner.backend.destroy(texture);
        }
    }

    /// Returns the number of users of a texture.
    pub fn users(&self, image: ImageHandle) -> usize {
        self.inner.lock().users.get(&image).copied().unwrap_or(0)
    }
}

impl fmt::Debug for TextureTracker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TextureTracker")
            .field("users", &self.inner.lock().users)
            .finish()
    }
}
