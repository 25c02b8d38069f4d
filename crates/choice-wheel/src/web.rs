//! # `web-sys` view implementation
//!
//! This module provides an implementation of [`View`] for [`web-sys`] types,
//! and the glue that turns a plain DOM element into a live wheel:
//!
//! - **[`AttributeObserver`]**: a `MutationObserver` restricted to the wheel's
//!   observed attributes.
//! - **[`WheelWidget::attach`]**: mounts the wheel inside the host element's
//!   shadow root and starts the click loop.
use std::ops::Deref;

use event::EventListener;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue, UnwrapThrowExt, prelude::Closure};

use crate::{
    error::{DomSnafu, Error},
    prelude::*,
    sync::Global,
};
pub mod event;

pub mod prelude {
    //! Re-export of the common prelude with browser specific extras.
    pub use super::{AttributeObserver, Web, event::*};
    pub use crate::prelude::*;
    pub extern crate wasm_bindgen;
    pub extern crate wasm_bindgen_futures;
    pub extern crate web_sys;
}

/// Sizing for the wheel inside its shadow root.
const CSS: &str = r#"
 div.root {
  width: 300px;
  height: 300px;
  box-sizing: border-box;
  display: block;
 }

 svg {
  width: 300px;
  height: 300px;
 }
"#;

macro_rules! node_impl {
    ($ty:ident) => {
        impl ViewEventTarget<Web> for web_sys::$ty {
            fn listen(&self, event_name: impl Into<Str>) -> EventListener {
                EventListener::new(self, event_name)
            }
        }

        impl ViewChild<Web> for web_sys::$ty {
            fn as_node(&self) -> web_sys::Node {
                let node: &web_sys::Node = self.as_ref();
                node.clone()
            }
        }

        impl ViewParent<Web> for web_sys::$ty {
            fn append_node(&self, node: &web_sys::Node) {
                web_sys::Node::append_child(self, node).unwrap_throw();
            }

            fn clear_children(&self) {
                while let Some(child) = self.first_child() {
                    let _ = web_sys::Node::remove_child(self, &child);
                }
            }
        }
    };
}

node_impl!(Node);
node_impl!(Element);

impl ViewChild<Web> for web_sys::Text {
    fn as_node(&self) -> web_sys::Node {
        let node: &web_sys::Node = self.as_ref();
        node.clone()
    }
}

fn inline_style(el: &web_sys::Element) -> Option<web_sys::CssStyleDeclaration> {
    if let Some(el) = el.dyn_ref::<web_sys::HtmlElement>() {
        Some(el.style())
    } else {
        el.dyn_ref::<web_sys::SvgElement>().map(|el| el.style())
    }
}

impl ViewProperties for web_sys::Element {
    fn set_property(&self, key: impl AsRef<str>, value: impl AsRef<str>) {
        let _ = self.set_attribute(key.as_ref(), value.as_ref());
    }

    fn has_property(&self, key: impl AsRef<str>) -> bool {
        self.has_attribute(key.as_ref())
    }

    fn get_property(&self, key: impl AsRef<str>) -> Option<Str> {
        self.get_attribute(key.as_ref()).map(|s| s.into())
    }

    fn set_style(&self, key: impl AsRef<str>, value: impl AsRef<str>) {
        if let Some(style) = inline_style(self) {
            let _ = style.set_property(key.as_ref(), value.as_ref());
        }
    }

    fn get_style(&self, key: impl AsRef<str>) -> Option<Str> {
        let value = inline_style(self)?.get_property_value(key.as_ref()).ok()?;
        (!value.is_empty()).then(|| value.into())
    }

    fn remove_style(&self, key: impl AsRef<str>) {
        if let Some(style) = inline_style(self) {
            let _ = style.remove_property(key.as_ref());
        }
    }
}

impl ViewText for web_sys::Text {
    fn new(text: impl AsRef<str>) -> Self {
        web_sys::Text::new_with_data(text.as_ref()).unwrap_throw()
    }

    fn get_text(&self) -> Str {
        self.data().into()
    }
}

impl ViewEventListener<Web> for EventListener {
    fn next(&self) -> impl Future<Output = web_sys::Event> {
        EventListener::next(self)
    }
}

impl ViewElement for web_sys::Element {
    type View = Web;

    fn new(name: impl AsRef<str>) -> Self {
        DOCUMENT.create_element(name.as_ref()).unwrap_throw()
    }

    fn new_namespace(name: impl AsRef<str>, ns: impl AsRef<str>) -> Self {
        DOCUMENT
            .create_element_ns(Some(ns.as_ref()), name.as_ref())
            .unwrap_throw()
    }
}

#[derive(Clone, Copy)]
pub struct Web;

impl View for Web {
    type Element = web_sys::Element;
    type Text = web_sys::Text;
    type Node = web_sys::Node;
    type EventListener = EventListener;
    type Event = web_sys::Event;
}

static WINDOW: Global<web_sys::Window> = Global::new(|| web_sys::window().unwrap_throw());
static DOCUMENT: Global<web_sys::Document> = Global::new(|| WINDOW.document().unwrap_throw());

/// Return the DOM [`web_sys::Window`].
/// #### Panics
/// Panics when the window cannot be returned.
pub fn window() -> &'static web_sys::Window {
    WINDOW.deref()
}

/// Returns the global document object [`web_sys::Document`]
///
/// #### Panics
/// Panics on non-wasm32 or when the document cannot be returned.
pub fn document() -> &'static web_sys::Document {
    DOCUMENT.deref()
}

fn dom_error(e: JsValue) -> Error {
    DomSnafu {
        message: format!("{e:?}"),
    }
    .build()
}

type MutationCallback = Closure<dyn FnMut(js_sys::Array, web_sys::MutationObserver)>;

/// Watches a fixed set of attributes on one element.
///
/// The observer is disconnected when this is dropped.
pub struct AttributeObserver {
    observer: web_sys::MutationObserver,
    _callback: MutationCallback,
}

impl Drop for AttributeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl AttributeObserver {
    /// Call `on_change` whenever one of `attributes` changes on `target`.
    pub fn new(
        target: &web_sys::Element,
        attributes: impl IntoIterator<Item = impl AsRef<str>>,
        mut on_change: impl FnMut() + 'static,
    ) -> Result<Self, Error> {
        let callback: MutationCallback = Closure::wrap(Box::new(
            move |records: js_sys::Array, _observer: web_sys::MutationObserver| {
                log::trace!("{} attribute mutation(s)", records.length());
                on_change();
            },
        )
            as Box<dyn FnMut(js_sys::Array, web_sys::MutationObserver)>);
        let observer =
            web_sys::MutationObserver::new(callback.as_ref().unchecked_ref()).map_err(dom_error)?;

        let filter = attributes
            .into_iter()
            .map(|name| JsValue::from_str(name.as_ref()))
            .collect::<js_sys::Array>();
        let init = web_sys::MutationObserverInit::new();
        init.set_attributes(true);
        init.set_attribute_filter(&filter);
        observer
            .observe_with_options(target, &init)
            .map_err(dom_error)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl<T: DeserializeOwned + Clone + 'static> WheelWidget<Web, T> {
    /// Turn `host` into a live wheel.
    ///
    /// The wheel is rendered into `host`'s open shadow root, configured from
    /// `host`'s attributes, and kept in sync with them. Clicks spin the wheel.
    ///
    /// The returned widget is a handle: dropping it does not stop the wheel.
    pub fn attach(host: web_sys::Element) -> Result<Self, Error> {
        Self::attach_with(host, |_| {})
    }

    /// Like [`attach`](Self::attach), calling `setup` before the host's
    /// attributes are first read.
    ///
    /// Register any handlers named by `on-wheel-*` attributes here.
    pub fn attach_with(host: web_sys::Element, setup: impl FnOnce(&Self)) -> Result<Self, Error> {
        let shadow = match host.shadow_root() {
            Some(shadow) => shadow,
            None => host
                .attach_shadow(&web_sys::ShadowRootInit::new(
                    web_sys::ShadowRootMode::Open,
                ))
                .map_err(dom_error)?,
        };
        let shadow_node: &web_sys::Node = shadow.as_ref();
        shadow_node.clear_children();

        let style = DOCUMENT.create_element("style").map_err(dom_error)?;
        style.set_text_content(Some(CSS));
        shadow.append_child(&style).map_err(dom_error)?;

        let container = DOCUMENT.create_element("div").map_err(dom_error)?;
        container.set_class_name("root");
        shadow.append_child(&container).map_err(dom_error)?;

        let widget = WheelWidget::<Web, T>::new_detached(host.clone());
        web_sys::Node::append_child(&container, &widget.root()).map_err(dom_error)?;
        setup(&widget);
        widget.attribute_changed();

        let observer = AttributeObserver::new(&host, widget.observed_attributes(), {
            let widget = widget.clone();
            move || widget.attribute_changed()
        })?;

        wasm_bindgen_futures::spawn_local({
            let widget = widget.clone();
            async move {
                // Keep the observer alive for as long as the click loop runs.
                let _observer = observer;
                widget.run().await;
            }
        });
        log::debug!("attached a choice wheel");
        Ok(widget)
    }
}
