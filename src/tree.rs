//! Arena-backed tree data structure for MCTS
//!
//! Nodes live in a single `Vec` and refer to each other through [`NodeId`]
//! indices. Children are owned by the arena and listed by their parent in
//! creation order; the parent link is a plain index used only to walk upward.

/// Stable index of a node inside a [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId{
    /// Position of the node in the arena
    #[inline]
    pub fn index(self) -> usize{
        self.0
    }
}

/// A node in the tree structure
///
/// # Type Parameters
/// - `T`: The data type stored in the node
#[derive(Debug, Clone)]
pub struct Node<T>{
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: T
}

impl<T> Node<T>{
    /// Checks if this node is the root (has no parent)
    #[inline]
    pub fn is_root(&self) -> bool{
        self.parent.is_none()
    }

    /// Gets the parent index if it exists
    #[inline]
    pub fn parent(&self) -> Option<NodeId>{
        self.parent
    }

    /// Children in the order they were added
    #[inline]
    pub fn children(&self) -> &[NodeId]{
        &self.children
    }

    /// Gets a reference to the node's data
    #[inline]
    pub fn get(&self) -> &T{
        &self.data
    }

    /// Gets a mutable reference to the node's data
    #[inline]
    pub fn get_mut(&mut self) -> &mut T{
        &mut self.data
    }
}

/// Tree owning every node; node 0 is the root.
#[derive(Debug, Clone)]
pub struct Tree<T>{
    nodes: Vec<Node<T>>
}

impl<T> Tree<T>{
    /// Creates a tree holding a single root node with given data
    ///
    /// # Parameters
    /// - `data`: The data to store in the root node
    pub fn new(data: T) -> Self{
        Tree { nodes: vec![Node { parent: None, children: Vec::new(), data }] }
    }

    #[inline]
    pub fn root(&self) -> NodeId{
        NodeId(0)
    }

    /// Number of nodes in the tree
    #[inline]
    pub fn len(&self) -> usize{
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    #[inline]
    pub fn is_empty(&self) -> bool{
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node<T>{
        &self.nodes[id.0]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node<T>{
        &mut self.nodes[id.0]
    }

    /// Shortcut for `self.node(id).get()`
    #[inline]
    pub fn get(&self, id: NodeId) -> &T{
        self.node(id).get()
    }

    /// Shortcut for `self.node_mut(id).get_mut()`
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut T{
        self.node_mut(id).get_mut()
    }

    /// Appends a new child under `parent`
    ///
    /// # Parameters
    /// - `parent`: The parent node
    /// - `data`: The data for the new child
    ///
    /// # Returns
    /// Index of the newly created child node
    pub fn add_child(&mut self, parent: NodeId, data: T) -> NodeId{
        let id = NodeId(self.nodes.len());

        self.nodes.push(Node { parent: Some(parent), children: Vec::new(), data });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Every node index, in creation order
    pub fn ids(&self) -> impl Iterator<Item = NodeId>{
        (0..self.nodes.len()).map(NodeId)
    }

    /// Iterates from `id` up to the root, both included
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T>{
        Ancestors { tree: self, next: Some(id) }
    }

    /// Number of edges between `id` and the root
    pub fn depth(&self, id: NodeId) -> usize{
        self.ancestors(id).count() - 1
    }
}

/// Upward walk produced by [`Tree::ancestors`]
pub struct Ancestors<'a, T>{
    tree: &'a Tree<T>,
    next: Option<NodeId>
}

impl<'a, T> Iterator for Ancestors<'a, T>{
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId>{
        let current = self.next?;
        self.next = self.tree.node(current).parent();
        Some(current)
    }
}
