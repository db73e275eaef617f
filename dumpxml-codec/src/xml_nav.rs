//! Element navigation helpers over parsed XML

use roxmltree::Node;

/// Element children of `node`, in document order
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// First element child named `name`
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    element_children(node).find(|child| child.tag_name().name() == name)
}

/// All element children named `name`
pub fn find_children<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Vec<Node<'a, 'input>> {
    element_children(node)
        .filter(|child| child.tag_name().name() == name)
        .collect()
}

/// Concatenated character data directly inside `node`
pub fn element_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}

/// True when `node` has neither element children nor non-whitespace text
pub fn is_blank(node: Node<'_, '_>) -> bool {
    element_children(node).next().is_none() && element_text(node).trim().is_empty()
}
