//! Nested parameter decoding for query strings and form bodies.
//!
//! Bracketed names nest the way Rack-style frameworks read them:
//!
//! ```text
//! post[author]=ada                  → {"post": {"author": "ada"}}
//! tags[]=a&tags[]=b                 → {"tags": ["a", "b"]}
//! items[][id]=1&items[][qty]=2      → {"items": [{"id": "1", "qty": "2"}]}
//! ```
//!
//! Every leaf is a JSON string. Percent-decoding and `+` handling come from
//! `url::form_urlencoded`. A name nesting deeper than [`MAX_DEPTH`] brackets
//! is dropped.

use serde_json::{Map, Value};
use tracing::debug;
use url::form_urlencoded;

/// Deepest bracket nesting a parameter name may use.
pub const MAX_DEPTH: usize = 100;

enum Segment {
    Key(String),
    Push,
}

/// Decodes `input` (without the leading `?`) into a JSON object.
pub fn parse_nested_query(input: &str) -> Map<String, Value> {
    let mut root = Value::Object(Map::new());

    for (name, value) in form_urlencoded::parse(input.as_bytes()) {
        if name.is_empty() {
            continue;
        }
        let Some(path) = segments(&name) else {
            debug!(name_len = name.len(), "parameter nested too deeply, dropping it");
            continue;
        };
        assign(&mut root, &path, Value::String(value.into_owned()));
    }

    match root {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// `a[b][]` → `[Key(a), Key(b), Push]`. Unbalanced brackets keep the whole
/// name as a single literal key. `None` past [`MAX_DEPTH`].
fn segments(name: &str) -> Option<Vec<Segment>> {
    let literal = || Some(vec![Segment::Key(name.to_owned())]);

    let Some(open) = name.find('[').filter(|&i| i > 0) else {
        return literal();
    };

    let mut out = vec![Segment::Key(name[..open].to_owned())];
    let mut rest = &name[open..];

    while let Some(inner) = rest.strip_prefix('[') {
        let Some(close) = inner.find(']') else {
            return literal();
        };
        if out.len() > MAX_DEPTH {
            return None;
        }
        out.push(match &inner[..close] {
            "" => Segment::Push,
            key => Segment::Key(key.to_owned()),
        });
        rest = &inner[close + 1..];
    }

    if !rest.is_empty() {
        return literal();
    }
    Some(out)
}

fn assign(slot: &mut Value, path: &[Segment], value: Value) {
    let Some((head, tail)) = path.split_first() else {
        *slot = value;
        return;
    };

    match head {
        Segment::Key(key) => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(map) = slot {
                let child = map.entry(key.clone()).or_insert(Value::Null);
                assign(child, tail, value);
            }
        }
        Segment::Push => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                // `a[][k]` fills the last object until `k` repeats.
                let merge_into_last = match (tail.first(), items.last()) {
                    (Some(Segment::Key(key)), Some(Value::Object(last))) => !last.contains_key(key),
                    _ => false,
                };
                if merge_into_last {
                    if let Some(last) = items.last_mut() {
                        assign(last, tail, value);
                    }
                } else {
                    let mut item = Value::Null;
                    assign(&mut item, tail, value);
                    items.push(item);
                }
            }
        }
    }
}
