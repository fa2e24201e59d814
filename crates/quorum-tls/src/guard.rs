//! Scoped release of cryptographic resources.
//!
//! The original bootstrap tied every key, certificate and helper object to
//! the enclosing host allocation scope so nothing leaked when a later step
//! aborted the operation. The Rust rendition is an explicit defer-list: each
//! allocation site attaches the resource (or a bare release action) to the
//! guard, and the guard runs every release exactly once when it goes out of
//! scope — on success, early return, or unwind.

/// Collects release actions for the duration of one bootstrap operation.
///
/// Releases run in reverse registration order, so resources built on top of
/// earlier ones are torn down first.
#[derive(Default)]
pub struct ResourceGuard {
    releases: Vec<Box<dyn FnOnce()>>,
}

impl ResourceGuard {
    /// Create an empty guard for a new bootstrap scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `resource` and run `release` on it at scope end.
    ///
    /// Passing [`drop`] as the release function is the common case: the
    /// resource stays alive until the guard unwinds and is then dropped
    /// (which for key material means zeroization).
    pub fn register<T, F>(&mut self, resource: T, release: F)
    where
        T: 'static,
        F: FnOnce(T) + 'static,
    {
        self.releases.push(Box::new(move || release(resource)));
    }

    /// Attach a bare release action to the scope.
    pub fn on_release<F>(&mut self, release: F)
    where
        F: FnOnce() + 'static,
    {
        self.releases.push(Box::new(release));
    }

    /// Number of registered releases still pending.
    #[must_use]
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

impl Drop for ResourceGuard {
    fn drop(&mut self) {
        while let Some(release) = self.releases.pop() {
            release();
        }
    }
}

impl std::fmt::Debug for ResourceGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceGuard")
            .field("pending", &self.releases.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::rc::Rc;

    #[test]
    fn releases_run_once_in_reverse_order() {
        let order = Rc::new(RefCell::new(Vec::new()));

        {
            let mut guard = ResourceGuard::new();
            for i in 0..3 {
                let order = Rc::clone(&order);
                guard.on_release(move || order.borrow_mut().push(i));
            }
            assert_eq!(guard.len(), 3);
        }

        assert_eq!(*order.borrow(), vec![2, 1, 0]);
    }

    #[test]
    fn registered_resource_is_released_with_its_release_fn() {
        let released = Rc::new(RefCell::new(None));

        {
            let mut guard = ResourceGuard::new();
            let released = Rc::clone(&released);
            guard.register("secret".to_string(), move |s| {
                *released.borrow_mut() = Some(s);
            });
        }

        assert_eq!(released.borrow().as_deref(), Some("secret"));
    }

    #[test]
    fn releases_run_on_unwind() {
        let released = Rc::new(RefCell::new(false));

        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut guard = ResourceGuard::new();
            let released = Rc::clone(&released);
            guard.on_release(move || *released.borrow_mut() = true);
            panic!("abort mid-bootstrap");
        }));

        assert!(result.is_err());
        assert!(*released.borrow());
    }

    #[test]
    fn empty_guard_is_a_no_op() {
        let guard = ResourceGuard::new();
        assert!(guard.is_empty());
        drop(guard);
    }
}
