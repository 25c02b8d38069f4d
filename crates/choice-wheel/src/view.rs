//! Traits for building cross-platform views.
//!
//! The wheel's logic is written once against these traits. Each platform
//! ("web" and "ssr") provides a [`View`] whose associated types implement them.
use std::{borrow::Cow, future::Future};

/// An alias for [`Cow<'static, str>`](std::borrow::Cow).
pub type Str = Cow<'static, str>;

/// The SVG namespace.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

pub trait ViewText {
    fn new(text: impl AsRef<str>) -> Self;
    fn get_text(&self) -> Str;
}

/// Anything that can be appended to a [`ViewParent`].
pub trait ViewChild<V: View> {
    fn as_node(&self) -> V::Node;
}

pub trait ViewParent<V: View> {
    fn append_node(&self, node: &V::Node);

    /// Remove every child node.
    fn clear_children(&self);

    fn append_child(&self, child: &impl ViewChild<V>) {
        self.append_node(&child.as_node());
    }
}

/// Attribute and inline style access.
pub trait ViewProperties {
    fn set_property(&self, key: impl AsRef<str>, value: impl AsRef<str>);
    fn has_property(&self, key: impl AsRef<str>) -> bool;
    fn get_property(&self, key: impl AsRef<str>) -> Option<Str>;

    /// Add a style property.
    fn set_style(&self, key: impl AsRef<str>, value: impl AsRef<str>);
    fn get_style(&self, key: impl AsRef<str>) -> Option<Str>;
    fn remove_style(&self, key: impl AsRef<str>);
}

pub trait ViewElement: Sized {
    type View: View<Element = Self>;

    fn new(name: impl AsRef<str>) -> Self;
    fn new_namespace(name: impl AsRef<str>, ns: impl AsRef<str>) -> Self;

    /// Create an element in the [`SVG_NAMESPACE`].
    fn new_svg(name: impl AsRef<str>) -> Self {
        Self::new_namespace(name, SVG_NAMESPACE)
    }
}

pub trait ViewEventListener<V: View> {
    /// Resolves at the next occurence of the event.
    fn next(&self) -> impl Future<Output = V::Event>;
}

pub trait ViewEventTarget<V: View> {
    fn listen(&self, event_name: impl Into<Str>) -> V::EventListener;
}

pub trait View: Clone + Sized + 'static {
    type Element: ViewElement<View = Self>
        + ViewParent<Self>
        + ViewChild<Self>
        + ViewProperties
        + ViewEventTarget<Self>
        + Clone
        + 'static;
    type Text: ViewText + ViewChild<Self> + Clone + 'static;
    type Node: Clone + 'static;
    type EventListener: ViewEventListener<Self> + Clone + 'static;
    type Event;
}
