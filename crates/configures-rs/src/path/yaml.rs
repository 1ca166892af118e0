//! `$`-rooted path evaluation over YAML values.

use serde_yaml::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Child(String),
    Index(usize),
    Wildcard,
    Descend(String),
}

/// Evaluate a YAML path, returning a copy of the matched value.
///
/// A path that does not parse matches nothing.
pub(crate) fn query_yaml(value: &Value, path: &str) -> Option<Value> {
    let steps = parse(path)?;
    select(value, &steps)
}

fn parse(path: &str) -> Option<Vec<Step>> {
    let chars: Vec<char> = path.trim().chars().collect();
    if chars.first() != Some(&'$') {
        return None;
    }
    let mut steps = Vec::new();
    let mut pos = 1;
    while pos < chars.len() {
        match chars[pos] {
            '.' if chars.get(pos + 1) == Some(&'.') => {
                let (key, next) = read_key(&chars, pos + 2)?;
                steps.push(Step::Descend(key));
                pos = next;
            }
            '.' => {
                let (key, next) = read_key(&chars, pos + 1)?;
                steps.push(Step::Child(key));
                pos = next;
            }
            '[' => {
                let close = chars[pos..].iter().position(|ch| *ch == ']')? + pos;
                let inner: String = chars[pos + 1..close].iter().collect();
                let inner = inner.trim();
                let step = if inner == "*" {
                    Step::Wildcard
                } else if let Some(key) = unquote(inner) {
                    Step::Child(key.to_string())
                } else {
                    Step::Index(inner.parse().ok()?)
                };
                steps.push(step);
                pos = close + 1;
            }
            _ => return None,
        }
    }
    Some(steps)
}

/// Read a plain or quoted key starting at `start`; returns the key and the next position.
fn read_key(chars: &[char], start: usize) -> Option<(String, usize)> {
    match chars.get(start)? {
        quote @ ('\'' | '"') => {
            let end = chars[start + 1..].iter().position(|ch| ch == quote)? + start + 1;
            Some((chars[start + 1..end].iter().collect(), end + 1))
        }
        _ => {
            let end = chars[start..]
                .iter()
                .position(|ch| matches!(ch, '.' | '['))
                .map_or(chars.len(), |offset| offset + start);
            if end == start {
                return None;
            }
            Some((chars[start..end].iter().collect(), end))
        }
    }
}

fn unquote(text: &str) -> Option<&str> {
    let quoted = (text.starts_with('\'') && text.ends_with('\''))
        || (text.starts_with('"') && text.ends_with('"'));
    (quoted && text.len() >= 2).then(|| &text[1..text.len() - 1])
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn select(value: &Value, steps: &[Step]) -> Option<Value> {
    let Some((head, rest)) = steps.split_first() else {
        return Some(value.clone());
    };
    let value = untag(value);
    match head {
        Step::Child(key) => value
            .as_mapping()?
            .get(key.as_str())
            .and_then(|next| select(next, rest)),
        Step::Index(index) => value
            .as_sequence()?
            .get(*index)
            .and_then(|next| select(next, rest)),
        Step::Wildcard => {
            let items: Vec<Value> = match value {
                Value::Sequence(items) => {
                    items.iter().filter_map(|item| select(item, rest)).collect()
                }
                Value::Mapping(map) => map.values().filter_map(|item| select(item, rest)).collect(),
                _ => return None,
            };
            Some(Value::Sequence(items))
        }
        Step::Descend(key) => descend(value, key, rest),
    }
}

/// Depth-first search for the first `key` whose subtree matches `rest`.
fn descend(value: &Value, key: &str, rest: &[Step]) -> Option<Value> {
    match untag(value) {
        Value::Mapping(map) => {
            if let Some(found) = map.get(key).and_then(|next| select(next, rest)) {
                return Some(found);
            }
            map.values().find_map(|child| descend(child, key, rest))
        }
        Value::Sequence(items) => items.iter().find_map(|child| descend(child, key, rest)),
        _ => None,
    }
}
