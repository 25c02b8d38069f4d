//! # Choice wheel
//!
//! A spinning choice wheel: a circle of labelled segments that spins when
//! clicked, eases to a stop at a random angle and reports the segment under
//! its pointer.
//!
//! ## Views
//! The wheel is written against the small set of view traits in [`view`], so
//! the same logic runs in two domains:
//!
//! ### Javascript/Browser DOM
//! With the `web` feature, [`web::Web`] implements the traits for
//! [web_sys](https://crates.io/crates/web-sys) and
//! [`WheelWidget::attach`](wheel::WheelWidget) turns any element (usually a
//! `<spinning-choice-wheel>`) into a live wheel, configured from its
//! attributes.
//!
//! ### Server side / tests
//! With the `ssr` feature, [`ssr::Ssr`] keeps an in-memory tree that can be
//! inspected or rendered to a string.
//!
//! ## Configuration
//! Every property can be set programmatically or reflected from a
//! `kebab-case` attribute of the host element. See [`reflect`] and
//! [`wheel::wheel_attributes`].
//!
//! ```rust,ignore
//! let wheel = WheelWidget::<Web>::attach(host)?;
//! wheel.register_stopped_handler("announce", |value| {
//!     log::info!("landed on {value}");
//!     Ok(())
//! });
//! // <spinning-choice-wheel on-wheel-stopped="announce" ...>
//! ```
pub mod error;
pub mod geometry;
pub mod reflect;
pub mod render;
pub mod segment;
pub mod spin;
pub mod sync;
pub mod time;
pub mod view;
pub mod wheel;

pub use error::Error;

#[cfg(feature = "ssr")]
pub mod ssr;
#[cfg(feature = "web")]
pub mod web;

pub mod prelude {
    //! Re-exports for convenience
    pub use super::error::Error;
    pub use super::reflect::{AttributeDecl, Reflected, ReflectTarget};
    pub use super::segment::{Segment, WheelConfig};
    pub use super::view::*;
    pub use super::wheel::{SpinOutcome, TAG_NAME, WheelWidget};
}
