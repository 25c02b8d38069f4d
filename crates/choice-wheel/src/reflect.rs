//! Reflecting markup attributes onto typed properties.
//!
//! An [`AttributeReflector`] holds one mapping per declared property. Each
//! [`poll`](AttributeReflector::poll) reads the attributes from an
//! [`AttributeSource`], and for every attribute whose raw string changed since
//! the last poll, parses it and assigns the result through a
//! [`ReflectTarget`].
//!
//! Comparison is by raw string, so setting an attribute to the value it
//! already has is a no-op. A failure in one mapping is logged and skipped;
//! the remaining mappings are still processed.
use std::rc::Rc;

use snafu::ResultExt;

use crate::{
    error::{Error, JsonSnafu},
    view::{Str, ViewProperties},
};

/// A parsed attribute value, ready to be assigned to a property.
#[derive(Clone, Debug, PartialEq)]
pub enum Reflected {
    /// The raw attribute string.
    Text(String),
    /// A JSON literal.
    Json(serde_json::Value),
    /// The name of a handler registered on the target.
    Handler(String),
}

pub type ParseFn = Rc<dyn Fn(&str) -> Result<Reflected, Error>>;

/// How an attribute's string value becomes a [`Reflected`] value.
#[derive(Clone, Default)]
pub enum ParseMode {
    /// Pass the raw string through.
    #[default]
    Identity,
    /// Parse the string as a JSON literal.
    Structured,
    /// Treat the string as the name of a handler registered on the target.
    ///
    /// Attribute text is never evaluated as code.
    Callable,
    Custom(ParseFn),
}

impl std::fmt::Debug for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMode::Identity => f.write_str("Identity"),
            ParseMode::Structured => f.write_str("Structured"),
            ParseMode::Callable => f.write_str("Callable"),
            ParseMode::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl ParseMode {
    pub fn parse(&self, raw: &str) -> Result<Reflected, Error> {
        match self {
            ParseMode::Identity => Ok(Reflected::Text(raw.to_owned())),
            ParseMode::Structured => serde_json::from_str(raw)
                .map(Reflected::Json)
                .context(JsonSnafu),
            ParseMode::Callable => Ok(Reflected::Handler(raw.trim().to_owned())),
            ParseMode::Custom(f) => f(raw),
        }
    }
}

/// Declares one reflected property.
#[derive(Clone, Debug)]
pub struct AttributeDecl {
    pub property: Str,
    pub attribute: Option<Str>,
    pub parse: ParseMode,
}

impl AttributeDecl {
    /// Reflect `property` from its kebab-cased attribute, unparsed.
    pub fn new(property: impl Into<Str>) -> Self {
        AttributeDecl {
            property: property.into(),
            attribute: None,
            parse: ParseMode::Identity,
        }
    }

    /// Read from `attribute` instead of the derived name.
    pub fn attribute(mut self, attribute: impl Into<Str>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn structured(mut self) -> Self {
        self.parse = ParseMode::Structured;
        self
    }

    pub fn callable(mut self) -> Self {
        self.parse = ParseMode::Callable;
        self
    }

    pub fn custom(mut self, f: impl Fn(&str) -> Result<Reflected, Error> + 'static) -> Self {
        self.parse = ParseMode::Custom(Rc::new(f));
        self
    }

    /// The attribute this declaration reads.
    pub fn attribute_name(&self) -> String {
        to_kebab_case(self.attribute.as_deref().unwrap_or(&self.property))
    }
}

/// Something with string attributes.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
}

impl<T: ViewProperties> AttributeSource for T {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_property(name).map(|s| s.into_owned())
    }
}

/// Something with named, assignable properties.
pub trait ReflectTarget {
    fn assign(&self, property: &str, value: Reflected) -> Result<(), Error>;
}

struct AttributeMapping {
    attribute: String,
    property: Str,
    parse: ParseMode,
    last_observed: Option<String>,
}

impl AttributeMapping {
    /// Returns whether the property was assigned.
    fn check(&mut self, source: &impl AttributeSource, target: &impl ReflectTarget) -> bool {
        let current = match source.attribute(&self.attribute) {
            Some(value) if !value.is_empty() => value,
            _ => return false,
        };
        if self.last_observed.as_deref() == Some(current.as_str()) {
            return false;
        }
        let result = self
            .parse
            .parse(&current)
            .and_then(|value| target.assign(&self.property, value));
        self.last_observed = Some(current);
        match result {
            Ok(()) => {
                log::trace!("reflected {} => {}", self.attribute, self.property);
                true
            }
            Err(err) => {
                log::error!(
                    "Failed to parse {} => {}: {err}",
                    self.attribute,
                    self.property
                );
                false
            }
        }
    }
}

/// Keeps a set of properties in sync with their attributes.
#[derive(Default)]
pub struct AttributeReflector {
    mappings: Vec<AttributeMapping>,
}

impl AttributeReflector {
    pub fn new(decls: impl IntoIterator<Item = AttributeDecl>) -> Self {
        let mappings = decls
            .into_iter()
            .map(|decl| AttributeMapping {
                attribute: decl.attribute_name(),
                property: decl.property,
                parse: decl.parse,
                last_observed: None,
            })
            .collect();
        AttributeReflector { mappings }
    }

    /// Check every mapping once, returning how many properties were assigned.
    pub fn poll(&mut self, source: &impl AttributeSource, target: &impl ReflectTarget) -> usize {
        let mut assigned = 0;
        for mapping in self.mappings.iter_mut() {
            if mapping.check(source, target) {
                assigned += 1;
            }
        }
        assigned
    }

    /// The names of all attributes read by this reflector.
    pub fn observed_attributes(&self) -> Vec<String> {
        self.mappings.iter().map(|m| m.attribute.clone()).collect()
    }
}

/// `camelCase` to `kebab-case`.
///
/// A hyphen goes between a lowercase letter and a following uppercase
/// letter, runs of whitespace and underscores become one hyphen, and the
/// result is lowercased.
pub fn to_kebab_case(text: &str) -> String {
    let mut kebab = String::with_capacity(text.len() + 4);
    let mut prev: Option<char> = None;
    let mut in_separator = false;
    for c in text.chars() {
        if c.is_whitespace() || c == '_' {
            if !in_separator {
                kebab.push('-');
                in_separator = true;
            }
            prev = Some(c);
            continue;
        }
        in_separator = false;
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            kebab.push('-');
        }
        kebab.extend(c.to_lowercase());
        prev = Some(c);
    }
    kebab
}
