//! Schema-generation detection.

use roxmltree::Node;

/// Determine the document's schema generation.
///
/// Priority: the root `Version` attribute (or its lowercase variant), then
/// a substring heuristic on the root namespace. The value is informational
/// for logging; structural tolerance across generations is handled by the
/// lookup fallback, not by this result.
pub fn detect_version(root: Node) -> String {
    if let Some(version) = root
        .attribute("Version")
        .or_else(|| root.attribute("version"))
    {
        return version.to_owned();
    }

    let ns = root.tag_name().namespace().unwrap_or("").to_lowercase();
    if ns.contains("cfd/4") {
        "4.0".to_owned()
    } else if ns.contains("cfd/3") {
        "3.3".to_owned()
    } else {
        "Desconocida".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_version_attribute_wins() {
        let doc = Document::parse(
            r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/3" Version="4.0"/>"#,
        )
        .unwrap();
        assert_eq!(detect_version(doc.root_element()), "4.0");
    }

    #[test]
    fn test_lowercase_attribute_accepted() {
        let doc = Document::parse(r#"<Comprobante version="3.3"/>"#).unwrap();
        assert_eq!(detect_version(doc.root_element()), "3.3");
    }

    #[test]
    fn test_namespace_heuristic() {
        let doc = Document::parse(
            r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/3"/>"#,
        )
        .unwrap();
        assert_eq!(detect_version(doc.root_element()), "3.3");
    }

    #[test]
    fn test_unknown_generation() {
        let doc = Document::parse(r#"<Other/>"#).unwrap();
        assert_eq!(detect_version(doc.root_element()), "Desconocida");
    }
}
