//! Path traversal over `serde_json::Value`
//!
//! Descends segment by segment. A fan-out segment recurses once per
//! element, so one path can produce many located values, each reported
//! with its own concrete path.

use serde_json::Value;

use super::tokenizer::{tokenize, IndexKind, Segment};

/// Receives the outcome of a path resolution.
pub trait PathVisitor<'v> {
    /// Called once per located value with its concrete path.
    fn on_value(&mut self, value: &'v Value, path: &str);

    /// Called when a segment cannot be followed. `path` is the concrete
    /// path of the attempted instance, `segment` the part that failed.
    fn on_unresolved(&mut self, path: &str, segment: &str);
}

/// Resolves `path` against `data`, reporting to `visitor`.
///
/// An empty path or a null root is a no-op: neither callback fires.
pub fn resolve<'v, V>(data: &'v Value, path: &str, visitor: &mut V)
where
    V: PathVisitor<'v> + ?Sized,
{
    if path.is_empty() || data.is_null() {
        return;
    }

    let segments = match tokenize(path) {
        Ok(segments) => segments,
        Err(err) => {
            visitor.on_unresolved(path, err.segment());
            return;
        }
    };

    let mut concrete = Vec::with_capacity(segments.len());
    descend(&segments, data, &mut concrete, visitor);
}

fn descend<'v, V>(
    segments: &[Segment<'_>],
    current: &'v Value,
    concrete: &mut Vec<String>,
    visitor: &mut V,
) where
    V: PathVisitor<'v> + ?Sized,
{
    let Some((segment, rest)) = segments.split_first() else {
        visitor.on_value(current, &concrete.join("."));
        return;
    };

    let Some(child) = current.as_object().and_then(|obj| obj.get(segment.name())) else {
        report_unresolved(segments, concrete, segment.name(), visitor);
        return;
    };

    match segment.index() {
        IndexKind::None => {
            concrete.push(segment.raw().to_string());
            descend(rest, child, concrete, visitor);
            concrete.pop();
        }
        IndexKind::All => {
            let Some(items) = child.as_array() else {
                report_unresolved(segments, concrete, segment.name(), visitor);
                return;
            };
            for (position, item) in items.iter().enumerate() {
                concrete.push(segment.at(position));
                descend(rest, item, concrete, visitor);
                concrete.pop();
            }
        }
        IndexKind::Fixed(position) => {
            let Some(item) = child.as_array().and_then(|items| items.get(position)) else {
                report_unresolved(segments, concrete, segment.name(), visitor);
                return;
            };
            concrete.push(segment.raw().to_string());
            descend(rest, item, concrete, visitor);
            concrete.pop();
        }
    }
}

/// Joins the visited prefix with the untouched remainder of the path.
fn report_unresolved<'v, V>(
    remaining: &[Segment<'_>],
    concrete: &[String],
    failed: &str,
    visitor: &mut V,
) where
    V: PathVisitor<'v> + ?Sized,
{
    let path = concrete
        .iter()
        .map(String::as_str)
        .chain(remaining.iter().map(|s| s.raw()))
        .collect::<Vec<_>>()
        .join(".");
    visitor.on_unresolved(&path, failed);
}

/// Everything one path resolved to.
#[derive(Debug, Default, PartialEq)]
pub struct Resolution<'v> {
    /// Located values with their concrete paths, in traversal order
    pub values: Vec<(String, &'v Value)>,
    /// `(concrete path, failed segment)` pairs
    pub unresolved: Vec<(String, String)>,
}

impl<'v> PathVisitor<'v> for Resolution<'v> {
    fn on_value(&mut self, value: &'v Value, path: &str) {
        self.values.push((path.to_string(), value));
    }

    fn on_unresolved(&mut self, path: &str, segment: &str) {
        self.unresolved.push((path.to_string(), segment.to_string()));
    }
}

/// Collects a resolution instead of streaming it.
pub fn resolve_values<'v>(data: &'v Value, path: &str) -> Resolution<'v> {
    let mut resolution = Resolution::default();
    resolve(data, path, &mut resolution);
    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(resolution: &Resolution<'_>) -> Vec<String> {
        resolution.values.iter().map(|(p, _)| p.clone()).collect()
    }

    #[test]
    fn test_plain_nested_path() {
        let data = json!({ "address": { "line1": { "street": "Main" } } });
        let resolution = resolve_values(&data, "address.line1.street");

        assert_eq!(resolution.values, vec![("address.line1.street".to_string(), &json!("Main"))]);
        assert!(resolution.unresolved.is_empty());
    }

    #[test]
    fn test_null_leaf_is_still_a_value() {
        let data = json!({ "name": null });
        let resolution = resolve_values(&data, "name");
        assert_eq!(resolution.values.len(), 1);
        assert!(resolution.values[0].1.is_null());
    }

    #[test]
    fn test_missing_intermediate_segment() {
        let data = json!({ "address": { "line1": {} } });
        let resolution = resolve_values(&data, "address.line2.street");

        assert!(resolution.values.is_empty());
        assert_eq!(
            resolution.unresolved,
            vec![("address.line2.street".to_string(), "line2".to_string())]
        );
    }

    #[test]
    fn test_fan_out_rewrites_indices() {
        let data = json!({ "items": [{ "v": "" }, { "v": "x" }, { "v": null }] });
        let resolution = resolve_values(&data, "items[].v");
        assert_eq!(paths(&resolution), vec!["items[0].v", "items[1].v", "items[2].v"]);
    }

    #[test]
    fn test_star_marker_fans_out_like_empty_brackets() {
        let data = json!({ "items": ["a", "b"] });
        assert_eq!(paths(&resolve_values(&data, "items[*]")), vec!["items[0]", "items[1]"]);
    }

    #[test]
    fn test_nested_fan_out() {
        let data = json!({
            "groups": [
                { "members": [{ "id": 1 }, { "id": 2 }] },
                { "members": [] },
                { "members": [{ "id": 3 }] }
            ]
        });
        let resolution = resolve_values(&data, "groups[].members[].id");
        assert_eq!(
            paths(&resolution),
            vec![
                "groups[0].members[0].id",
                "groups[0].members[1].id",
                "groups[2].members[0].id"
            ]
        );
        assert!(resolution.unresolved.is_empty());
    }

    #[test]
    fn test_empty_array_produces_nothing() {
        let data = json!({ "items": [] });
        let resolution = resolve_values(&data, "items[].v");
        assert_eq!(resolution, Resolution::default());
    }

    #[test]
    fn test_fixed_index_keeps_literal() {
        let data = json!({ "addresses": ["Street 1", "Street 2"] });
        let resolution = resolve_values(&data, "addresses[1]");
        assert_eq!(resolution.values, vec![("addresses[1]".to_string(), &json!("Street 2"))]);
    }

    #[test]
    fn test_fixed_index_out_of_range() {
        let data = json!({ "addresses": ["Street 1"] });
        let resolution = resolve_values(&data, "addresses[1]");
        assert!(resolution.values.is_empty());
        assert_eq!(resolution.unresolved[0].1, "addresses");
    }

    #[test]
    fn test_index_on_non_array() {
        let data = json!({ "name": "John" });
        let resolution = resolve_values(&data, "name[0]");
        assert_eq!(resolution.unresolved, vec![("name[0]".to_string(), "name".to_string())]);

        let resolution = resolve_values(&data, "name[]");
        assert_eq!(resolution.unresolved.len(), 1);
    }

    #[test]
    fn test_unresolved_inside_fan_out_reports_concrete_path() {
        let data = json!({ "items": [{ "v": 1 }, { "w": 2 }] });
        let resolution = resolve_values(&data, "items[].v");
        assert_eq!(paths(&resolution), vec!["items[0].v"]);
        assert_eq!(resolution.unresolved, vec![("items[1].v".to_string(), "v".to_string())]);
    }

    #[test]
    fn test_empty_path_and_null_root_are_no_ops() {
        let data = json!({ "a": 1 });
        assert_eq!(resolve_values(&data, ""), Resolution::default());
        assert_eq!(resolve_values(&Value::Null, "a"), Resolution::default());
    }

    #[test]
    fn test_syntax_error_reported_as_unresolved() {
        let data = json!({ "items": [1] });
        let resolution = resolve_values(&data, "items[x]");
        assert_eq!(resolution.unresolved, vec![("items[x]".to_string(), "items[x]".to_string())]);
    }

    #[test]
    fn test_scalar_root_cannot_be_descended() {
        let data = json!("text");
        let resolution = resolve_values(&data, "len");
        assert_eq!(resolution.unresolved.len(), 1);
    }
}
