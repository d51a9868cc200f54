//! UI hierarchy snapshots and their flattening into element maps.
//!
//! A page source is parsed into an owned [`UiNode`] tree, walked once, and
//! dropped. Two flattenings are provided:
//!
//! - [`element_map`]: display name → XPath, last writer wins on name clashes.
//! - [`bounds_elements`]: one record per distinct `bounds` string, in
//!   document order.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::result::{AppError, AppResult};

/// Attribute names used by UiAutomator2 page sources
pub mod attr {
    /// Visible text
    pub const TEXT: &str = "text";
    /// Android resource id
    pub const RESOURCE_ID: &str = "resource-id";
    /// Accessibility description
    pub const CONTENT_DESC: &str = "content-desc";
    /// Widget class
    pub const CLASS: &str = "class";
    /// Screen rectangle, `[x1,y1][x2,y2]`
    pub const BOUNDS: &str = "bounds";
}

/// One node of a hierarchy snapshot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiNode {
    /// Element tag (the widget class on Android)
    pub tag: String,
    /// Raw attributes
    pub attributes: BTreeMap<String, String>,
    /// Child nodes in document order
    pub children: Vec<UiNode>,
}

impl UiNode {
    /// Create a node with no attributes
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Builder: set an attribute
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: append a child
    #[must_use]
    pub fn with_child(mut self, child: UiNode) -> Self {
        self.children.push(child);
        self
    }

    /// Parse a page-source XML document
    pub fn parse(xml: &str) -> AppResult<Self> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| AppError::MalformedHierarchy {
            message: e.to_string(),
        })?;
        Ok(Self::from_xml(doc.root_element()))
    }

    fn from_xml(node: roxmltree::Node<'_, '_>) -> Self {
        Self {
            tag: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            children: node
                .children()
                .filter(roxmltree::Node::is_element)
                .map(Self::from_xml)
                .collect(),
        }
    }

    /// Trimmed attribute value; blank counts as absent
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Display name: text, then content-desc, then resource-id, then `Unnamed_<tag>`
    #[must_use]
    pub fn display_name(&self) -> String {
        self.attr(attr::TEXT)
            .or_else(|| self.attr(attr::CONTENT_DESC))
            .or_else(|| self.attr(attr::RESOURCE_ID))
            .map_or_else(|| format!("Unnamed_{}", self.tag), str::to_string)
    }

    /// XPath by resource-id, then text, then content-desc, then class.
    ///
    /// `None` when the node carries none of them.
    #[must_use]
    pub fn xpath(&self) -> Option<String> {
        if let Some(id) = self.attr(attr::RESOURCE_ID) {
            Some(format!("//*[@resource-id={}]", xpath_literal(id)))
        } else if let Some(text) = self.attr(attr::TEXT) {
            Some(format!("//*[contains(@text,{})]", xpath_literal(text)))
        } else if let Some(desc) = self.attr(attr::CONTENT_DESC) {
            Some(format!("//*[@content-desc={}]", xpath_literal(desc)))
        } else {
            self.attr(attr::CLASS)
                .map(|class| format!("//*[contains(@class,{})]", xpath_literal(class)))
        }
    }

    /// Pre-order walk over this node and its descendants
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a UiNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// Quote `value` as an XPath 1.0 string literal.
///
/// Single quotes are used when possible. A value holding `'` but no `"` is
/// double-quoted; one holding both becomes a `concat()` call.
#[must_use]
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{value}'")
    } else if !value.contains('"') {
        format!("\"{value}\"")
    } else {
        let parts: Vec<String> = value.split('\'').map(|part| format!("'{part}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

/// Entry of a name → XPath map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpathEntry {
    /// Generated XPath
    pub xpath: String,
}

/// Flat name → XPath map
pub type ElementMap = BTreeMap<String, XpathEntry>;

/// Add every locatable node under `root` to `map`
pub fn collect_elements(root: &UiNode, map: &mut ElementMap) {
    root.walk(&mut |node| {
        if let Some(xpath) = node.xpath() {
            let _ = map.insert(node.display_name(), XpathEntry { xpath });
        }
    });
}

/// Name → XPath map of a snapshot
#[must_use]
pub fn element_map(root: &UiNode) -> ElementMap {
    let mut map = ElementMap::new();
    collect_elements(root, &mut map);
    map
}

/// Record of the bounds-aware flattening
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsElement {
    /// Text, then resource-id, then class
    pub element_name: String,
    /// Widget class
    pub class_name: String,
    /// Screen rectangle string
    pub bounds: String,
    /// `//<class>[@bounds='<bounds>']`
    pub xpath: String,
}

/// One record per distinct `bounds` under `root`, first occurrence kept
#[must_use]
pub fn bounds_elements(root: &UiNode) -> Vec<BoundsElement> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    root.walk(&mut |node| {
        let Some(bounds) = node.attr(attr::BOUNDS) else {
            return;
        };
        if !seen.insert(bounds.to_string()) {
            return;
        }
        let class_name = node.attr(attr::CLASS).unwrap_or(&node.tag).to_string();
        let element_name = node
            .attr(attr::TEXT)
            .or_else(|| node.attr(attr::RESOURCE_ID))
            .unwrap_or(&class_name)
            .to_string();
        out.push(BoundsElement {
            xpath: format!("//{class_name}[@bounds={}]", xpath_literal(bounds)),
            element_name,
            class_name,
            bounds: bounds.to_string(),
        });
    });
    out
}
