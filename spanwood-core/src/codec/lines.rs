//! Full-line patterns for the structural and metadata lines.

use std::sync::OnceLock;

use regex::Regex;

use crate::graph::VertexId;

/// A `id("name")` line.
#[derive(Debug, PartialEq)]
pub(super) struct VertexLine<'a> {
    pub id: VertexId,
    pub name: &'a str,
}

/// A `v1 ---|weight| v2` line.
#[derive(Debug, PartialEq)]
pub(super) struct EdgeLine {
    pub left: VertexId,
    pub right: VertexId,
    pub weight: f64,
}

/// A `key: value` metadata line.
#[derive(Debug, PartialEq)]
pub(super) struct PropertyLine<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

struct Patterns {
    vertex: Regex,
    edge: Regex,
    property: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        vertex: Regex::new(r#"^(?P<id>\d+)\("(?P<name>.*)"\)$"#).expect("valid regex"),
        edge: Regex::new(r"^(?P<v1>\d+) ---\|(?P<weight>\d+\.?\d*)\| (?P<v2>\d+)$")
            .expect("valid regex"),
        property: Regex::new(r"^(?P<key>\w+): (?P<value>.+)$").expect("valid regex"),
    })
}

/// Returns `true` when the line has the vertex shape, even if its id does
/// not fit in a [`VertexId`].
pub(super) fn looks_like_vertex(line: &str) -> bool {
    patterns().vertex.is_match(line)
}

/// Returns `true` when the line has the edge shape.
pub(super) fn looks_like_edge(line: &str) -> bool {
    patterns().edge.is_match(line)
}

/// Matches a vertex line. Ids that overflow `u32` do not match.
pub(super) fn match_vertex(line: &str) -> Option<VertexLine<'_>> {
    let captures = patterns().vertex.captures(line)?;
    let id = captures.name("id")?.as_str().parse::<u32>().ok()?;
    let name = captures.name("name")?.as_str();
    Some(VertexLine {
        id: VertexId::new(id),
        name,
    })
}

/// Matches an edge line. Ids that overflow `u32` do not match.
pub(super) fn match_edge(line: &str) -> Option<EdgeLine> {
    let captures = patterns().edge.captures(line)?;
    let left = captures.name("v1")?.as_str().parse::<u32>().ok()?;
    let right = captures.name("v2")?.as_str().parse::<u32>().ok()?;
    let weight = captures.name("weight")?.as_str().parse::<f64>().ok()?;
    Some(EdgeLine {
        left: VertexId::new(left),
        right: VertexId::new(right),
        weight,
    })
}

/// Matches a metadata property line.
pub(super) fn match_property(line: &str) -> Option<PropertyLine<'_>> {
    let captures = patterns().property.captures(line)?;
    Some(PropertyLine {
        key: captures.name("key")?.as_str(),
        value: captures.name("value")?.as_str(),
    })
}
