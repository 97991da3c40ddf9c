//! Coalesce bursts of calls into one trailing call.
//!
//! Browser timeouts are not futures, so this doesn't pretend to be async
//! either: a pending call is a handle, and dropping the handle cancels it.

use std::cell::RefCell;
use std::convert::TryFrom;
use std::rc::Rc;
use std::time::Duration;
use tracing::error;
use wasm_bindgen::{closure::Closure, JsCast};

pub trait Timer {
    /// Cancels the scheduled callback when dropped, unless it already ran.
    type Pending;

    fn schedule(&self, wait: Duration, callback: Box<dyn FnOnce()>) -> Self::Pending;
}

/// `window.setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

pub struct Timeout {
    id: Option<i32>,
    // Keeps the callback alive until the browser is done with it.
    #[allow(dead_code)]
    callback: Closure<dyn FnMut()>,
}

impl Timer for BrowserTimer {
    type Pending = Timeout;

    fn schedule(&self, wait: Duration, callback: Box<dyn FnOnce()>) -> Timeout {
        let callback = Closure::once(callback);
        let window = web_sys::window().expect("must have JS window");
        let millis = i32::try_from(wait.as_millis()).unwrap_or(i32::MAX);
        let id = match window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(id) => Some(id),
            Err(error) => {
                error!(message = "scheduling timeout failed", ?error);
                None
            }
        };
        Timeout { id, callback }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        // Clearing an id that already fired is a no-op in the browser.
        if let (Some(id), Some(window)) = (self.id, web_sys::window()) {
            window.clear_timeout_with_handle(id);
        }
    }
}

/// Wrapper returned by [`debounce`].
///
/// Clones share the same pending call.
pub struct Debounced<A, T: Timer> {
    inner: Rc<Inner<A, T>>,
}

struct Inner<A, T: Timer> {
    timer: T,
    wait: Duration,
    func: Rc<dyn Fn(A)>,
    pending: RefCell<Option<T::Pending>>,
}

impl<A, T: Timer> Clone for Debounced<A, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

pub fn debounce<A, T, F>(timer: T, wait: Duration, func: F) -> Debounced<A, T>
where
    A: 'static,
    T: Timer,
    F: 'static + Fn(A),
{
    Debounced {
        inner: Rc::new(Inner {
            timer,
            wait,
            func: Rc::new(func),
            pending: RefCell::new(None),
        }),
    }
}

impl<A: 'static, T: Timer> Debounced<A, T> {
    /// Replaces any pending call with one carrying `args`.
    pub fn call(&self, args: A) {
        // Drop the old handle first so it is cancelled before the new one is armed.
        drop(self.inner.pending.borrow_mut().take());
        let func = self.inner.func.clone();
        let pending = self
            .inner
            .timer
            .schedule(self.inner.wait, Box::new(move || func(args)));
        *self.inner.pending.borrow_mut() = Some(pending);
    }
}
