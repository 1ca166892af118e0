//! Dotted path evaluation over JSON values.

use serde_json::Value;

/// One component of a dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Object key, or array index when numeric.
    Key(String),
    /// `#`: array length, or fan-out over elements when followed by more segments.
    Each,
}

/// Evaluate a dotted path, returning a copy of the matched value.
///
/// An empty path selects the whole document. Returns `None` when nothing
/// matches.
pub(crate) fn query_json(value: &Value, path: &str) -> Option<Value> {
    if path.is_empty() {
        return Some(value.clone());
    }
    select(value, &parse(path))
}

fn parse(path: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut escaped_segment = false;
    let mut chars = path.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    escaped_segment = true;
                }
            }
            '.' => {
                segments.push(segment(std::mem::take(&mut current), escaped_segment));
                escaped_segment = false;
            }
            other => current.push(other),
        }
    }
    segments.push(segment(current, escaped_segment));
    segments
}

fn segment(text: String, escaped: bool) -> Segment {
    if text == "#" && !escaped {
        Segment::Each
    } else {
        Segment::Key(text)
    }
}

fn select(value: &Value, segments: &[Segment]) -> Option<Value> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(value.clone());
    };
    match (head, value) {
        (Segment::Each, Value::Array(items)) if rest.is_empty() => Some(Value::from(items.len())),
        (Segment::Each, Value::Array(items)) => Some(Value::Array(
            items.iter().filter_map(|item| select(item, rest)).collect(),
        )),
        (Segment::Key(key), Value::Object(map)) => map.get(key).and_then(|next| select(next, rest)),
        (Segment::Key(key), Value::Array(items)) => key
            .parse::<usize>()
            .ok()
            .and_then(|index| items.get(index))
            .and_then(|next| select(next, rest)),
        _ => None,
    }
}
