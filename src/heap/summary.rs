//! One-line object descriptions for reports.

use std::fmt;

use crate::heap::{HeapObject, Identity, ObjectGraph, ObjectKind, Payload};

/// Displayable one-line description of an object, e.g. `OBJECT: Foo (40 bytes)`.
///
/// Created by [`ObjectGraph::summarize`]. Class names of `OBJECT`s are looked up through
/// the resolved class object, and a shared string shows the contents of the string it
/// references, because its own payload is usually empty.
pub struct ObjectSummary<'a> {
    graph: &'a ObjectGraph,
    object: &'a HeapObject,
}

impl<'a> ObjectSummary<'a> {
    pub(crate) fn new(graph: &'a ObjectGraph, object: &'a HeapObject) -> Self {
        ObjectSummary { graph, object }
    }

    fn shared_value(&self) -> Option<&'a str> {
        let graph = self.graph;
        self.object
            .references()
            .iter()
            .map(|&id| &graph[id])
            .find(|target| target.kind() == ObjectKind::String)
            .and_then(|target| target.value())
            .map(|value| value.as_str())
    }

    fn class_name(&self) -> Option<&'a str> {
        let graph = self.graph;
        let class = self.object.class()?;
        graph[class].value().map(|name| name.as_str())
    }
}

impl fmt::Display for ObjectSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let object = self.object;
        match object.identity() {
            Identity::SuperRoot => return f.write_str("ROOT"),
            Identity::Root(name) => return write!(f, "ROOT ({name})"),
            Identity::Address(_) => {}
        }

        let kind = object.kind();
        match (kind, object.payload()) {
            (ObjectKind::String, _) if object.is_shared() => match self.shared_value() {
                Some(value) => write!(f, "{kind}: {value:?}")?,
                None => write!(f, "{kind}")?,
            },
            (ObjectKind::String, Payload::Text(value)) => {
                write!(f, "{kind}: {:?}", value.as_str())?
            }
            (_, Payload::Text(value)) => write!(f, "{kind}: {value}")?,
            (_, Payload::Length(length)) => write!(f, "{kind}: size {length}")?,
            (_, Payload::Class { .. }) => match self.class_name() {
                Some(name) => write!(f, "{kind}: {name}")?,
                None => write!(f, "{kind}")?,
            },
            (_, Payload::None) => write!(f, "{kind}")?,
        }
        write!(f, " ({} bytes)", object.memsize())
    }
}

impl fmt::Debug for ObjectSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Shortens `summary` to at most `width` characters, ending in `...` when cut.
///
/// # Examples
///
/// ```rust
/// use heapscope::heap::truncate_summary;
///
/// assert_eq!(truncate_summary("STRING: \"abcdefgh\"", 11), "STRING: ...");
/// assert_eq!(truncate_summary("ARRAY: size 3", 40), "ARRAY: size 3");
/// ```
#[must_use]
pub fn truncate_summary(summary: &str, width: usize) -> String {
    if summary.chars().count() <= width {
        return summary.to_string();
    }
    if width <= 3 {
        return ".".repeat(width);
    }

    let mut short: String = summary.chars().take(width - 3).collect();
    short.push_str("...");
    short
}
