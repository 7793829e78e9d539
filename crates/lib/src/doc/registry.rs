//! Dispatch table from store type tags to proxy kinds.
//!
//! The store reports a type tag for every addressable location. The
//! registry decides what a tag means for the caller: hand out a mapping
//! proxy, hand out a sequence proxy, or decode the payload as a scalar.
//! Out of the box `"object"` dispatches to mappings and `"array"` to
//! sequences; additional tags can be registered for stores with richer
//! type vocabularies.

use std::collections::HashMap;

use serde_json::{Value as JsonValue, json};

/// What a document location resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyKind {
    /// Key-addressed container, surfaced as a [`Map`](super::Map) proxy.
    Mapping,
    /// Index-addressed container, surfaced as a [`List`](super::List) proxy.
    Sequence,
    /// Plain value, decoded and returned directly.
    Scalar,
}

impl ProxyKind {
    /// Lowercase name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ProxyKind::Mapping => "mapping",
            ProxyKind::Sequence => "sequence",
            ProxyKind::Scalar => "scalar",
        }
    }
}

/// Registry of type tags and the proxy kinds they dispatch to.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    kinds: HashMap<String, ProxyKind>,
    tags: HashMap<ProxyKind, String>,
}

impl TypeRegistry {
    /// Creates a registry with the standard JSON container tags wired up.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `tag` as dispatching to `kind`.
    ///
    /// The first tag registered for a container kind becomes its canonical
    /// tag, reported by [`tag_of`](Self::tag_of). Registering an already
    /// known tag re-routes it.
    pub fn register(&mut self, tag: impl Into<String>, kind: ProxyKind) {
        let tag = tag.into();
        if kind != ProxyKind::Scalar {
            self.tags.entry(kind).or_insert_with(|| tag.clone());
        }
        self.kinds.insert(tag, kind);
    }

    /// Resolves a store type tag to a proxy kind.
    ///
    /// Tags never registered dispatch as scalars; the payload decides
    /// whether the read ultimately succeeds.
    pub fn kind_of(&self, tag: &str) -> ProxyKind {
        self.kinds.get(tag).copied().unwrap_or(ProxyKind::Scalar)
    }

    /// The canonical tag for a container kind, if one is registered.
    pub fn tag_of(&self, kind: ProxyKind) -> Option<&str> {
        self.tags.get(&kind).map(String::as_str)
    }

    /// An empty container of the given kind, written to the store when a
    /// nested structure is initialized. Scalars have no shell.
    pub fn shell(&self, kind: ProxyKind) -> Option<JsonValue> {
        match kind {
            ProxyKind::Mapping => Some(json!({})),
            ProxyKind::Sequence => Some(json!([])),
            ProxyKind::Scalar => None,
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut registry = Self {
            kinds: HashMap::new(),
            tags: HashMap::new(),
        };
        registry.register("object", ProxyKind::Mapping);
        registry.register("array", ProxyKind::Sequence);
        registry
    }
}
