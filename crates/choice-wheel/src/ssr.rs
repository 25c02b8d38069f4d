//! Server-side rendered views.
//!
//! [`Ssr`] keeps the node tree in memory. It renders to an HTML/SVG string
//! with [`SsrElement::html_string`], and events can be simulated with
//! [`SsrEventListener::fire`].
use crate::{sync::Shared, view::*};

pub mod prelude {
    pub use super::{Ssr, SsrElement, SsrEventListener, SsrNode, SsrText};
    pub use crate::prelude::*;
}

#[derive(Clone)]
pub struct SsrText {
    pub text: Shared<Str>,
}

impl PartialEq for SsrText {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl ViewText for SsrText {
    fn new(text: impl AsRef<str>) -> Self {
        SsrText {
            text: Shared::new(Str::from(text.as_ref().to_owned())),
        }
    }

    fn get_text(&self) -> Str {
        self.text.get().clone()
    }
}

impl ViewChild<Ssr> for SsrText {
    fn as_node(&self) -> SsrNode {
        SsrNode::Text(self.clone())
    }
}

#[derive(Clone)]
pub struct SsrElement {
    pub name: Str,
    pub attributes: Shared<Vec<(Str, Option<Str>)>>,
    pub styles: Shared<Vec<(Str, Str)>>,
    pub events: Shared<Vec<SsrEventListener>>,
    pub children: Shared<Vec<SsrNode>>,
}

impl PartialEq for SsrElement {
    fn eq(&self, other: &Self) -> bool {
        if self.children.ptr_eq(&other.children) {
            return true;
        }
        self.name == other.name
            && self.attributes == other.attributes
            && self.styles == other.styles
            && self.children == other.children
    }
}

impl ViewElement for SsrElement {
    type View = Ssr;

    fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().to_owned().into(),
            attributes: Default::default(),
            styles: Default::default(),
            events: Default::default(),
            children: Default::default(),
        }
    }

    fn new_namespace(name: impl AsRef<str>, ns: impl AsRef<str>) -> Self {
        let s = <SsrElement as ViewElement>::new(name);
        s.set_property("xmlns", ns);
        s
    }
}

impl ViewParent<Ssr> for SsrElement {
    fn append_node(&self, node: &SsrNode) {
        self.children.get_mut().push(node.clone());
    }

    fn clear_children(&self) {
        self.children.get_mut().clear();
    }
}

impl ViewChild<Ssr> for SsrElement {
    fn as_node(&self) -> SsrNode {
        SsrNode::Element(self.clone())
    }
}

impl ViewProperties for SsrElement {
    fn set_property(&self, key: impl AsRef<str>, value: impl AsRef<str>) {
        let mut attributes = self.attributes.get_mut();
        let value: Str = value.as_ref().to_owned().into();
        for (k_prev, v_prev) in attributes.iter_mut() {
            if k_prev == key.as_ref() {
                *v_prev = Some(value);
                return;
            }
        }
        attributes.push((key.as_ref().to_owned().into(), Some(value)));
    }

    fn has_property(&self, key: impl AsRef<str>) -> bool {
        self.attributes
            .get()
            .iter()
            .any(|(pkey, _)| pkey == key.as_ref())
    }

    fn get_property(&self, key: impl AsRef<str>) -> Option<Str> {
        self.attributes
            .get()
            .iter()
            .find(|(pkey, _)| pkey == key.as_ref())
            .and_then(|(_, pval)| pval.clone())
    }

    fn set_style(&self, key: impl AsRef<str>, value: impl AsRef<str>) {
        let mut styles = self.styles.get_mut();
        let value: Str = value.as_ref().to_owned().into();
        for (pkey, pval) in styles.iter_mut() {
            if pkey == key.as_ref() {
                *pval = value;
                return;
            }
        }
        styles.push((key.as_ref().to_owned().into(), value));
    }

    fn get_style(&self, key: impl AsRef<str>) -> Option<Str> {
        self.styles
            .get()
            .iter()
            .find(|(pkey, _)| pkey == key.as_ref())
            .map(|(_, pval)| pval.clone())
    }

    fn remove_style(&self, key: impl AsRef<str>) {
        self.styles.get_mut().retain(|p| p.0 != key.as_ref());
    }
}

impl ViewEventTarget<Ssr> for SsrElement {
    fn listen(&self, event_name: impl Into<Str>) -> SsrEventListener {
        let event_listener = SsrEventListener::new(
            SsrNode::Element(self.clone()),
            event_name,
        );
        self.events.get_mut().push(event_listener.clone());
        event_listener
    }
}

fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

impl SsrElement {
    /// Child elements, skipping text nodes.
    pub fn child_elements(&self) -> Vec<SsrElement> {
        self.children
            .get()
            .iter()
            .filter_map(|node| match node {
                SsrNode::Element(el) => Some(el.clone()),
                SsrNode::Text(_) => None,
            })
            .collect()
    }

    /// Every descendant element (depth first, document order) matching `pred`.
    pub fn find_all(&self, pred: impl Fn(&SsrElement) -> bool + Copy) -> Vec<SsrElement> {
        let mut found = vec![];
        for child in self.child_elements() {
            if pred(&child) {
                found.push(child.clone());
            }
            found.extend(child.find_all(pred));
        }
        found
    }

    /// The first descendant with the attribute `key` set to `value`.
    pub fn find_by_property(&self, key: &str, value: &str) -> Option<SsrElement> {
        self.find_all(|el| el.get_property(key).as_deref() == Some(value))
            .into_iter()
            .next()
    }

    /// The concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in self.children.get().iter() {
            match child {
                SsrNode::Element(el) => text.push_str(&el.text_content()),
                SsrNode::Text(t) => text.push_str(&t.get_text()),
            }
        }
        text
    }

    pub fn html_string(&self) -> String {
        // Only certain nodes can be "void" - which means written as <tag /> when
        // the node contains no children. Writing non-void nodes in void notation
        // does some spooky things to the DOM at parse-time.
        fn tag_is_voidable(tag: &str) -> bool {
            matches!(
                tag,
                "area"
                    | "base"
                    | "br"
                    | "col"
                    | "hr"
                    | "img"
                    | "input"
                    | "link"
                    | "meta"
                    | "param"
                    | "source"
            )
        }
        let name = &self.name;
        let styles = self.styles.get();
        let mut attributes = self.attributes.get().clone();
        let children = self.children.get();

        if !styles.is_empty() {
            let styles = styles
                .iter()
                .map(|(k, v)| format!("{}: {};", k, v))
                .collect::<Vec<_>>()
                .join(" ");

            match attributes.iter_mut().find(|(key, _)| key == "style") {
                Some((_, value)) => {
                    let spaced = match value.take() {
                        Some(prev_style) => format!("{prev_style} {styles}"),
                        None => styles,
                    };
                    *value = Some(spaced.into());
                }
                None => attributes.push(("style".into(), Some(styles.into()))),
            }
        }

        let atts = attributes
            .iter()
            .map(|(key, may_val)| {
                if let Some(val) = may_val {
                    format!(r#" {}="{}""#, key, escape(val))
                } else {
                    format!(" {}", key)
                }
            })
            .collect::<String>();

        if children.is_empty() {
            if tag_is_voidable(name) {
                format!("<{name}{atts} />")
            } else {
                format!("<{name}{atts}></{name}>")
            }
        } else {
            let kids = children
                .iter()
                .map(|kid| match kid {
                    SsrNode::Element(el) => el.html_string(),
                    SsrNode::Text(text) => escape(&text.text.get()),
                })
                .collect::<String>();
            format!("<{name}{atts}>{kids}</{name}>")
        }
    }
}

#[derive(Clone, PartialEq)]
pub enum SsrNode {
    Element(SsrElement),
    Text(SsrText),
}

type EventChannel = (async_channel::Sender<()>, async_channel::Receiver<()>);

#[derive(Clone)]
pub struct SsrEventListener {
    pub name: Str,
    pub target: SsrNode,
    channel: Shared<Option<EventChannel>>,
}

impl ViewEventListener<Ssr> for SsrEventListener {
    fn next(&self) -> impl Future<Output = ()> {
        let rx = self.channel().1;
        async move {
            // The sender lives as long as this listener does.
            let _ = rx.recv().await;
        }
    }
}

impl SsrEventListener {
    pub fn new(target: SsrNode, name: impl Into<Str>) -> Self {
        SsrEventListener {
            name: name.into(),
            channel: Default::default(),
            target,
        }
    }

    fn channel(&self) -> EventChannel {
        self.channel
            .get_mut()
            .get_or_insert_with(|| async_channel::bounded(1))
            .clone()
    }

    /// Fire an event occurence to any waiting listeners.
    pub async fn fire(&self) {
        let (tx, _rx) = self.channel();
        let _ = tx.send(()).await;
    }
}

#[derive(Clone, Copy)]
pub struct Ssr;

impl View for Ssr {
    type Element = SsrElement;
    type Text = SsrText;
    type Node = SsrNode;
    type EventListener = SsrEventListener;
    type Event = ();
}
