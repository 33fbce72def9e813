//! In-memory [`Surface`] backed by a node arena.
//!
//! Layout is not computed. Rendered sizes and page boxes are whatever the
//! caller sets, falling back to `px` values found in the element's style.

use std::cell::RefCell;
use std::collections::BTreeMap;

use serde::Serialize;

use super::Surface;
use crate::errors::{JxError, JxResult};
use crate::geometry::{NaturalSize, PageBox};

/// Element handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(usize);

/// Image handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ImageId(usize);

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Element(NodeId),
    Image(ImageId),
    Text(String),
}

#[derive(Debug, Clone, Default)]
struct ElementData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    children: Vec<Child>,
    rendered: Option<(f64, f64)>,
    page_box: Option<PageBox>,
}

#[derive(Debug, Clone)]
struct ImageData {
    src: String,
    alt: String,
    natural: NaturalSize,
}

#[derive(Debug, Default)]
struct Arena {
    elements: Vec<ElementData>,
    images: Vec<ImageData>,
    refused: Vec<String>,
}

/// Serializable view of a subtree, used for JSON previews
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeSnapshot {
    Element {
        tag: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        classes: Vec<String>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        styles: BTreeMap<String, String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<NodeSnapshot>,
    },
    Image {
        src: String,
        alt: String,
    },
    Text {
        text: String,
    },
}

/// A document that lives entirely in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    arena: RefCell<Arena>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the browser laid `node` out at this size
    pub fn set_rendered_size(&self, node: NodeId, width: f64, height: f64) {
        self.with_element_mut(node, |el| el.rendered = Some((width, height)));
    }

    /// Pretend `node` sits at this position on the page
    pub fn set_page_box(&self, node: NodeId, page_box: PageBox) {
        self.with_element_mut(node, |el| el.page_box = Some(page_box));
    }

    /// Pretend the image decoded at this size
    pub fn set_natural_size(&self, image: ImageId, width: f64, height: f64) {
        if let Some(data) = self.arena.borrow_mut().images.get_mut(image.0) {
            data.natural = NaturalSize::new(width, height);
        }
    }

    /// Make every later call to the named fallible operation fail, as a
    /// browser does on a detached or locked-down node
    pub fn refuse(&self, operation: &str) {
        self.arena.borrow_mut().refused.push(operation.to_string());
    }

    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.with_element(node, |el| el.tag.clone())
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.with_element(node, |el| el.classes.clone()).unwrap_or_default()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.with_element(node, |el| el.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.with_element(node, |el| el.attributes.get(name).cloned()).flatten()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.with_element(node, |el| el.styles.get(property).cloned()).flatten()
    }

    pub fn children(&self, node: NodeId) -> Vec<Child> {
        self.with_element(node, |el| el.children.clone()).unwrap_or_default()
    }

    /// Child elements only, in document order
    pub fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .into_iter()
            .filter_map(|child| match child {
                Child::Element(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn image_src(&self, image: ImageId) -> Option<String> {
        self.arena.borrow().images.get(image.0).map(|img| img.src.clone())
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            match child {
                Child::Element(id) => out.push_str(&self.text_content(id)),
                Child::Text(text) => out.push_str(&text),
                Child::Image(_) => {}
            }
        }
        out
    }

    /// First element in the subtree (including `root`) carrying `class`, depth first
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.find_all_by_class(root, class).into_iter().next()
    }

    /// All elements in the subtree (including `root`) carrying `class`, depth first
    pub fn find_all_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_by_class(root, class, &mut found);
        found
    }

    fn collect_by_class(&self, node: NodeId, class: &str, found: &mut Vec<NodeId>) {
        if self.has_class(node, class) {
            found.push(node);
        }
        for child in self.child_elements(node) {
            self.collect_by_class(child, class, found);
        }
    }

    /// Serializable copy of the subtree
    pub fn snapshot(&self, node: NodeId) -> NodeSnapshot {
        let arena = self.arena.borrow();
        Self::snapshot_in(&arena, node)
    }

    fn snapshot_in(arena: &Arena, node: NodeId) -> NodeSnapshot {
        let Some(el) = arena.elements.get(node.0) else {
            return NodeSnapshot::Text { text: String::new() };
        };
        let children = el
            .children
            .iter()
            .map(|child| match child {
                Child::Element(id) => Self::snapshot_in(arena, *id),
                Child::Image(id) => {
                    let (src, alt) = arena
                        .images
                        .get(id.0)
                        .map(|img| (img.src.clone(), img.alt.clone()))
                        .unwrap_or_default();
                    NodeSnapshot::Image { src, alt }
                }
                Child::Text(text) => NodeSnapshot::Text { text: text.clone() },
            })
            .collect();

        NodeSnapshot::Element {
            tag: el.tag.clone(),
            classes: el.classes.clone(),
            attributes: el.attributes.clone(),
            styles: el.styles.clone(),
            children,
        }
    }

    /// Serialize the subtree as indented HTML
    pub fn render_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        let arena = self.arena.borrow();
        Self::render_in(&arena, node, 0, &mut out);
        out
    }

    fn render_in(arena: &Arena, node: NodeId, depth: usize, out: &mut String) {
        let Some(el) = arena.elements.get(node.0) else {
            return;
        };
        let indent = "  ".repeat(depth);

        out.push_str(&indent);
        out.push('<');
        out.push_str(&el.tag);
        if !el.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&el.classes.join(" "))));
        }
        for (name, value) in &el.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        if !el.styles.is_empty() {
            let style: Vec<String> = el.styles.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
            out.push_str(&format!(" style=\"{}\"", escape(&style.join("; "))));
        }
        out.push_str(">\n");

        for child in &el.children {
            match child {
                Child::Element(id) => Self::render_in(arena, *id, depth + 1, out),
                Child::Image(id) => {
                    if let Some(img) = arena.images.get(id.0) {
                        out.push_str(&format!(
                            "{}  <img src=\"{}\" alt=\"{}\">\n",
                            indent,
                            escape(&img.src),
                            escape(&img.alt)
                        ));
                    }
                }
                Child::Text(text) => {
                    out.push_str(&format!("{}  {}\n", indent, escape(text)));
                }
            }
        }

        out.push_str(&format!("{}</{}>\n", indent, el.tag));
    }

    fn with_element<T>(&self, node: NodeId, f: impl FnOnce(&ElementData) -> T) -> Option<T> {
        self.arena.borrow().elements.get(node.0).map(f)
    }

    fn with_element_mut<T>(&self, node: NodeId, f: impl FnOnce(&mut ElementData) -> T) -> Option<T> {
        self.arena.borrow_mut().elements.get_mut(node.0).map(f)
    }

    fn element_mut<T>(&self, node: NodeId, operation: &str, f: impl FnOnce(&mut ElementData) -> T) -> JxResult<T> {
        if self.arena.borrow().refused.iter().any(|op| op == operation) {
            return Err(JxError::dom(operation, "refused"));
        }
        self.with_element_mut(node, f)
            .ok_or_else(|| JxError::dom(operation, format!("unknown node {}", node.0)))
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn parse_px(value: Option<&String>) -> f64 {
    value
        .and_then(|v| v.strip_suffix("px"))
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0.0)
}

impl Surface for MemorySurface {
    type Node = NodeId;
    type Image = ImageId;

    fn create_element(&self, tag: &str) -> JxResult<NodeId> {
        let mut arena = self.arena.borrow_mut();
        arena.elements.push(ElementData {
            tag: tag.to_string(),
            ..Default::default()
        });
        Ok(NodeId(arena.elements.len() - 1))
    }

    fn create_image(&self, src: &str, alt: &str) -> JxResult<ImageId> {
        let mut arena = self.arena.borrow_mut();
        arena.images.push(ImageData {
            src: src.to_string(),
            alt: alt.to_string(),
            natural: NaturalSize::new(0.0, 0.0),
        });
        Ok(ImageId(arena.images.len() - 1))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> JxResult<()> {
        let child = *child;
        self.element_mut(*parent, "append_child", |el| el.children.push(Child::Element(child)))
    }

    fn append_image(&self, parent: &NodeId, image: &ImageId) -> JxResult<()> {
        let image = *image;
        self.element_mut(*parent, "append_image", |el| el.children.push(Child::Image(image)))
    }

    fn append_text(&self, parent: &NodeId, text: &str) -> JxResult<()> {
        self.element_mut(*parent, "append_text", |el| el.children.push(Child::Text(text.to_string())))
    }

    fn remove_child(&self, parent: &NodeId, child: &NodeId) -> JxResult<()> {
        let target = Child::Element(*child);
        let removed = self.element_mut(*parent, "remove_child", |el| {
            let before = el.children.len();
            el.children.retain(|c| *c != target);
            before != el.children.len()
        })?;
        if removed {
            Ok(())
        } else {
            Err(JxError::dom("remove_child", "node is not a child of parent"))
        }
    }

    fn set_class_name(&self, node: &NodeId, classes: &str) {
        self.with_element_mut(*node, |el| {
            el.classes = classes.split_whitespace().map(str::to_string).collect();
        });
    }

    fn add_class(&self, node: &NodeId, class: &str) -> JxResult<()> {
        self.element_mut(*node, "add_class", |el| {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        })
    }

    fn remove_class(&self, node: &NodeId, class: &str) -> JxResult<()> {
        self.element_mut(*node, "remove_class", |el| el.classes.retain(|c| c != class))
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> JxResult<()> {
        self.element_mut(*node, "set_attribute", |el| {
            el.attributes.insert(name.to_string(), value.to_string());
        })
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.with_element_mut(*node, |el| el.children = vec![Child::Text(text.to_string())]);
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) -> JxResult<()> {
        self.element_mut(*node, "set_style", |el| {
            el.styles.insert(property.to_string(), value.to_string());
        })
    }

    fn rendered_size(&self, node: &NodeId) -> (f64, f64) {
        self.with_element(*node, |el| {
            el.rendered.unwrap_or_else(|| {
                (parse_px(el.styles.get("width")), parse_px(el.styles.get("height")))
            })
        })
        .unwrap_or((0.0, 0.0))
    }

    fn page_box(&self, node: &NodeId) -> PageBox {
        let explicit = self.with_element(*node, |el| el.page_box).flatten();
        explicit.unwrap_or_else(|| {
            let (width, height) = self.rendered_size(node);
            PageBox::new(0.0, 0.0, width, height)
        })
    }

    fn natural_size(&self, image: &ImageId) -> NaturalSize {
        self.arena
            .borrow()
            .images
            .get(image.0)
            .map(|img| img.natural)
            .unwrap_or_else(|| NaturalSize::new(0.0, 0.0))
    }
}
