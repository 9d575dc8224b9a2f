use std::collections::BTreeMap;

use crate::channel::Channel;
use crate::histogram::{histogram, Histogram};

/// Name of the unmodified input variant.
pub const ORIGINAL: &str = "original";

/// A named result: an intensity channel and its histogram.
#[derive(Clone, Debug)]
pub struct Variant {
    pub channel: Channel,
    pub histogram: Histogram,
}

impl Variant {
    /// Wrap a channel, computing its histogram once.
    pub fn new(channel: Channel) -> Self {
        let histogram = histogram(&channel);
        Self { channel, histogram }
    }
}

/// Caller-owned map from variant name to (channel, histogram).
///
/// Insertion order is kept so comparisons list variants in the order they
/// were produced.
#[derive(Clone, Debug, Default)]
pub struct VariantStore {
    variants: BTreeMap<String, Variant>,
    order: Vec<String>,
}

impl VariantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the source channel under [`ORIGINAL`].
    pub fn with_original(channel: Channel) -> Self {
        let mut store = Self::new();
        store.insert(ORIGINAL, channel);
        store
    }

    /// Insert or replace a variant; returns the stored histogram.
    pub fn insert(&mut self, name: &str, channel: Channel) -> &Histogram {
        if !self.variants.contains_key(name) {
            self.order.push(name.to_string());
        }
        let variant = Variant::new(channel);
        self.variants.insert(name.to_string(), variant);
        &self.variants[name].histogram
    }

    pub fn get(&self, name: &str) -> Option<&Variant> {
        self.variants.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Variant> {
        self.order.retain(|n| n != name);
        self.variants.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Variant names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// `(name, variant)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variant)> {
        self.order
            .iter()
            .filter_map(|n| self.variants.get(n).map(|v| (n.as_str(), v)))
    }
}
