//! Namespace-tolerant element lookup.
//!
//! A CFDI body can sit under the 4.0 or the 3.3 namespace, and a payments
//! complement under 2.0 or 1.0, in any combination. Extractors therefore
//! never hard-code one schema generation: they resolve elements through
//! these helpers with an ordered candidate-namespace list, and the first
//! candidate that yields a non-empty result wins. "Not found" is an empty
//! result, never an error.

use std::str::FromStr;

use roxmltree::Node;
use rust_decimal::Decimal;

fn is_named(node: &Node, name: &str, ns: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(ns)
}

/// Resolve a relative element path below `scope`.
///
/// Every path segment binds to the same candidate namespace, mirroring how
/// real documents keep a subtree in one schema generation.
pub fn find_all<'a, 'input>(
    scope: Node<'a, 'input>,
    path: &[&str],
    namespaces: &[String],
) -> Vec<Node<'a, 'input>> {
    for ns in namespaces {
        let mut current = vec![scope];
        for segment in path {
            current = current
                .iter()
                .flat_map(|n| n.children())
                .filter(|n| is_named(n, segment, ns))
                .collect();
        }
        if !current.is_empty() {
            return current;
        }
    }
    Vec::new()
}

/// First element matching a relative path, if any.
pub fn find_first<'a, 'input>(
    scope: Node<'a, 'input>,
    path: &[&str],
    namespaces: &[String],
) -> Option<Node<'a, 'input>> {
    find_all(scope, path, namespaces).into_iter().next()
}

/// All descendants named `name` at any depth, same fallback discipline.
pub fn find_descendants<'a, 'input>(
    scope: Node<'a, 'input>,
    name: &str,
    namespaces: &[String],
) -> Vec<Node<'a, 'input>> {
    for ns in namespaces {
        let found: Vec<_> = scope
            .descendants()
            .filter(|n| is_named(n, name, ns))
            .collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

/// First descendant named `name` at any depth, if any.
pub fn find_descendant<'a, 'input>(
    scope: Node<'a, 'input>,
    name: &str,
    namespaces: &[String],
) -> Option<Node<'a, 'input>> {
    find_descendants(scope, name, namespaces).into_iter().next()
}

/// Owned attribute value, or `None` when absent.
pub fn attr_string(node: Node, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_owned)
}

/// Attribute value with an explicit default for a present element.
pub fn attr_or(node: Node, name: &str, default: &str) -> String {
    node.attribute(name).unwrap_or(default).to_owned()
}

/// Numeric attribute under the zero-substitution rule: a missing or
/// unparseable value becomes 0, never an error.
pub fn attr_decimal(node: Node, name: &str) -> Decimal {
    node.attribute(name)
        .and_then(|v| Decimal::from_str(v.trim()).ok())
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const DOC: &str = r#"<?xml version="1.0"?>
        <root xmlns:new="urn:gen2" xmlns:old="urn:gen1">
            <old:Items>
                <old:Item Amount="10.50" Code="A"/>
                <old:Item Code="B"/>
            </old:Items>
            <new:Extra><new:Leaf/></new:Extra>
        </root>"#;

    fn namespaces() -> Vec<String> {
        vec!["urn:gen2".to_owned(), "urn:gen1".to_owned()]
    }

    #[test]
    fn test_path_falls_back_to_legacy_namespace() {
        let doc = Document::parse(DOC).unwrap();
        let items = find_all(doc.root_element(), &["Items", "Item"], &namespaces());
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].attribute("Code"), Some("A"));
    }

    #[test]
    fn test_first_nonempty_candidate_wins() {
        let doc = Document::parse(DOC).unwrap();
        let leaf = find_descendant(doc.root_element(), "Leaf", &namespaces()).unwrap();
        assert_eq!(leaf.tag_name().namespace(), Some("urn:gen2"));
    }

    #[test]
    fn test_missing_element_yields_empty() {
        let doc = Document::parse(DOC).unwrap();
        assert!(find_first(doc.root_element(), &["Nothing"], &namespaces()).is_none());
        assert!(find_descendants(doc.root_element(), "Nothing", &namespaces()).is_empty());
    }

    #[test]
    fn test_attr_decimal_zero_substitution() {
        let doc = Document::parse(DOC).unwrap();
        let items = find_all(doc.root_element(), &["Items", "Item"], &namespaces());

        assert_eq!(attr_decimal(items[0], "Amount"), Decimal::new(1050, 2));
        // Absent attribute
        assert_eq!(attr_decimal(items[1], "Amount"), Decimal::ZERO);
        // Non-numeric attribute
        assert_eq!(attr_decimal(items[0], "Code"), Decimal::ZERO);
    }

    #[test]
    fn test_attr_or_default() {
        let doc = Document::parse(DOC).unwrap();
        let items = find_all(doc.root_element(), &["Items", "Item"], &namespaces());
        assert_eq!(attr_or(items[0], "Code", "none"), "A");
        assert_eq!(attr_or(items[0], "Other", "none"), "none");
    }
}
