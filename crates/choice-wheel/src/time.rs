//! Wait or sleep or delay future.
use std::{
    pin::Pin,
    task::{Context, Poll, Waker},
};

use crate::sync::Shared;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
/// Returns a timestamp representing the number of milliseconds (accurate
/// to within 5 microseconds if the device supports it) elapsed since an
/// arbitrary start time.
pub fn now() -> f64 {
    crate::web::window()
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
/// Returns a timestamp representing the number of milliseconds elapsed since
/// the first call to a function in this module.
pub fn now() -> f64 {
    static START: std::sync::LazyLock<std::time::Instant> =
        std::sync::LazyLock::new(std::time::Instant::now);
    START.elapsed().as_secs_f64() * 1000.0
}

#[derive(Default)]
struct Timer {
    fired: bool,
    waker: Option<Waker>,
}

fn fire(timer: &Shared<Timer>) {
    let waker = {
        let mut timer = timer.get_mut();
        timer.fired = true;
        timer.waker.take()
    };
    if let Some(waker) = waker {
        waker.wake();
    }
}

/// A fire-once timer future.
///
/// Dropping the future before it resolves cancels the underlying timeout.
pub struct WaitFuture {
    start: f64,
    millis: f64,
    timer: Shared<Timer>,
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    handle: Option<(i32, wasm_bindgen::closure::Closure<dyn FnMut()>)>,
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    sleeper_started: bool,
}

impl WaitFuture {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    fn schedule(&mut self) {
        use wasm_bindgen::JsCast;

        if self.handle.is_some() {
            return;
        }
        let timer = self.timer.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move || fire(&timer)) as Box<dyn FnMut()>
        );
        match crate::web::window().set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            self.millis.ceil() as i32,
        ) {
            Ok(id) => self.handle = Some((id, closure)),
            Err(e) => {
                log::error!("could not schedule timeout: {e:?}");
                fire(&self.timer);
            }
        }
    }

    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    fn schedule(&mut self) {
        if self.sleeper_started {
            return;
        }
        self.sleeper_started = true;
        let remaining = (self.millis - (now() - self.start)).max(0.0);
        let timer = self.timer.clone();
        let _ = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_secs_f64(remaining / 1000.0));
            fire(&timer);
        });
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl Drop for WaitFuture {
    fn drop(&mut self) {
        if let Some((id, _closure)) = self.handle.take() {
            if !self.timer.get().fired {
                crate::web::window().clear_timeout_with_handle(id);
            }
        }
    }
}

impl Future for WaitFuture {
    type Output = f64;

    fn poll(self: Pin<&mut Self>, ctx: &mut Context) -> Poll<Self::Output> {
        let future: &mut WaitFuture = self.get_mut();
        let elapsed = now() - future.start;
        {
            let mut timer = future.timer.get_mut();
            if timer.fired || elapsed >= future.millis {
                return Poll::Ready(elapsed);
            }
            timer.waker = Some(ctx.waker().clone());
        }
        future.schedule();
        Poll::Pending
    }
}

/// Wait approximately the given number of milliseconds.
///
/// Returns a [`Future`] that yields the actual number of milliseconds waited.
pub fn wait_millis(millis: f64) -> WaitFuture {
    WaitFuture {
        start: now(),
        millis: millis.max(0.0),
        timer: Default::default(),
        #[cfg(all(target_arch = "wasm32", feature = "web"))]
        handle: None,
        #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
        sleeper_started: false,
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod test {
    use super::*;

    #[test]
    fn waits_at_least_the_given_time() {
        let elapsed = futures_lite::future::block_on(wait_millis(20.0));
        assert!(elapsed >= 20.0, "{elapsed}");
    }

    #[test]
    fn zero_resolves_immediately() {
        let elapsed = futures_lite::future::block_on(wait_millis(0.0));
        assert!(elapsed < 1000.0);
    }
}
