//! # Synchronization primitives
//!
//! The wheel is driven from a single UI thread, but its state is reached from
//! several places at once: the click loop, the attribute watcher and any
//! external holder of a [`WheelWidget`](crate::wheel::WheelWidget) handle.
//! [`Shared`] is the cheap clonable cell that ties those together.
//!
//! - **[`Global`]**: a lazily created global value, such as the window and
//!   document objects.
//!
//! - **[`Shared`]**: on non-wasm32 targets this is `Arc<RwLock<T>>`. On wasm32
//!   it is `Rc<RefCell<T>>`, since wasm is single threaded.
//!
//! Guards returned by [`Shared::get`] and [`Shared::get_mut`] must not be held
//! across calls back into user code.
use std::ops::{Deref, DerefMut};

/// A global value.
pub struct Global<T> {
    #[cfg(target_arch = "wasm32")]
    data: std::mem::ManuallyDrop<std::cell::LazyCell<T>>,
    #[cfg(not(target_arch = "wasm32"))]
    data: std::sync::LazyLock<T>,
}

impl<T> Global<T> {
    /// Create a new global value.
    pub const fn new(create_fn: fn() -> T) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Global {
                data: std::mem::ManuallyDrop::new(std::cell::LazyCell::new(create_fn)),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Global {
                data: std::sync::LazyLock::new(create_fn),
            }
        }
    }
}

unsafe impl<T> Send for Global<T> {}
unsafe impl<T> Sync for Global<T> {}

impl<T> Deref for Global<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

/// A "shared" value.
///
/// Equivalent to `Arc<RwLock<T>>`.
#[derive(Default)]
pub struct Shared<T> {
    #[cfg(not(target_arch = "wasm32"))]
    inner: std::sync::Arc<std::sync::RwLock<T>>,
    #[cfg(target_arch = "wasm32")]
    inner: std::rc::Rc<std::cell::RefCell<T>>,
}

impl<T: PartialEq> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.get().eq(&other.get())
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Shared<T> {
    /// Create a new shared `T`.
    pub fn new(value: T) -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            inner: std::sync::Arc::new(std::sync::RwLock::new(value)),
            #[cfg(target_arch = "wasm32")]
            inner: std::rc::Rc::new(std::cell::RefCell::new(value)),
        }
    }

    /// Get a reference to the inner `T`.
    pub fn get(&self) -> impl Deref<Target = T> + '_ {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.inner.read().unwrap_or_else(|e| e.into_inner())
        }
        #[cfg(target_arch = "wasm32")]
        {
            self.inner.borrow()
        }
    }

    /// Get a mutable reference to the inner `T`.
    pub fn get_mut(&self) -> impl DerefMut<Target = T> + '_ {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.inner.write().unwrap_or_else(|e| e.into_inner())
        }
        #[cfg(target_arch = "wasm32")]
        {
            self.inner.borrow_mut()
        }
    }

    /// Set the inner `T`.
    ///
    /// Returns the previous value.
    pub fn set(&self, value: T) -> T {
        std::mem::replace(self.get_mut().deref_mut(), value)
    }

    /// Whether both cells point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        #[cfg(not(target_arch = "wasm32"))]
        {
            std::sync::Arc::ptr_eq(&self.inner, &other.inner)
        }
        #[cfg(target_arch = "wasm32")]
        {
            std::rc::Rc::ptr_eq(&self.inner, &other.inner)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clones_share_the_value() {
        let a = Shared::new(1u32);
        let b = a.clone();
        assert_eq!(1, b.set(2));
        assert_eq!(2, *a.get());
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Shared::new(2)));
        assert!(a == Shared::new(2));
    }
}
