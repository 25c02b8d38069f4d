//! DOM events as futures.
//!
//! An [`EventListener`] counts the occurrences of one event on one target.
//! [`EventListener::next`] remembers the count it was created at and resolves
//! with the first event after it.
use std::{
    cell::RefCell,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll, Waker},
};

use wasm_bindgen::{JsCast, prelude::Closure};

use crate::view::Str;

#[derive(Default)]
struct Occurrences {
    count: u64,
    latest: Option<web_sys::Event>,
    wakers: Vec<Waker>,
}

/// The DOM side of a listener. Unregisters itself on drop.
struct Registration {
    target: web_sys::EventTarget,
    event_name: Str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            &self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Listens for `event_name` on a DOM target for as long as any clone lives.
#[derive(Clone)]
pub struct EventListener {
    occurrences: Rc<RefCell<Occurrences>>,
    _registration: Rc<Registration>,
}

impl EventListener {
    pub fn new(target: impl AsRef<web_sys::EventTarget>, event_name: impl Into<Str>) -> Self {
        let occurrences: Rc<RefCell<Occurrences>> = Default::default();
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new({
            let occurrences = occurrences.clone();
            move |event: web_sys::Event| {
                let wakers = {
                    let mut occurrences = occurrences.borrow_mut();
                    occurrences.count += 1;
                    occurrences.latest = Some(event);
                    std::mem::take(&mut occurrences.wakers)
                };
                wakers.into_iter().for_each(Waker::wake);
            }
        });

        let event_name = event_name.into();
        let target = target.as_ref().clone();
        if let Err(e) =
            target.add_event_listener_with_callback(&event_name, callback.as_ref().unchecked_ref())
        {
            log::error!("could not listen for '{event_name}': {e:?}");
        }

        EventListener {
            occurrences,
            _registration: Rc::new(Registration {
                target,
                event_name,
                callback,
            }),
        }
    }

    /// Resolves with the next occurrence after this call.
    pub fn next(&self) -> NextEvent {
        NextEvent {
            seen: self.occurrences.borrow().count,
            occurrences: self.occurrences.clone(),
        }
    }
}

pub struct NextEvent {
    seen: u64,
    occurrences: Rc<RefCell<Occurrences>>,
}

impl Future for NextEvent {
    type Output = web_sys::Event;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut occurrences = self.occurrences.borrow_mut();
        if occurrences.count > self.seen {
            if let Some(event) = occurrences.latest.clone() {
                return Poll::Ready(event);
            }
        }
        occurrences.wakers.push(cx.waker().clone());
        Poll::Pending
    }
}
