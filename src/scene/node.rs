use crate::scene::{ObjectId, Transform};
use crate::shape::{Collider, Mesh};

/// The index of a node in a [`Scene`](crate::scene::Scene).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct NodeId(pub(crate) u32);

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
/// Per-node flags controlling how splitting treats a node.
pub struct NodeFlags(u8);

bitflags::bitflags! {
    impl NodeFlags: u8 {
        /// The node must never be duplicated by a split.
        ///
        /// It stays on the original object untouched, with its whole subtree, and is
        /// removed from the copy. This is meant for fixed decorations.
        const NON_COPYABLE = 1;
    }
}

/// The payload of a scene node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Element {
    /// A renderable mesh.
    Visual(Mesh),
    /// A collision boundary.
    Physical(Collider),
    /// A renderable mesh with its own collision boundary.
    Both(Mesh, Collider),
    /// A node without geometry, e.g., a logic anchor. It is never cut.
    Marker,
}

impl Element {
    /// Rebuilds an element from its optional parts, or `Marker` if both are missing.
    pub fn from_parts(mesh: Option<Mesh>, collider: Option<Collider>) -> Self {
        match (mesh, collider) {
            (Some(mesh), Some(collider)) => Element::Both(mesh, collider),
            (Some(mesh), None) => Element::Visual(mesh),
            (None, Some(collider)) => Element::Physical(collider),
            (None, None) => Element::Marker,
        }
    }

    /// Does this element carry a mesh or a collider?
    pub fn has_geometry(&self) -> bool {
        !matches!(self, Element::Marker)
    }

    /// The mesh of this element, if any.
    pub fn mesh(&self) -> Option<&Mesh> {
        match self {
            Element::Visual(mesh) | Element::Both(mesh, _) => Some(mesh),
            Element::Physical(_) | Element::Marker => None,
        }
    }

    /// The collider of this element, if any.
    pub fn collider(&self) -> Option<&Collider> {
        match self {
            Element::Physical(collider) | Element::Both(_, collider) => Some(collider),
            Element::Visual(_) | Element::Marker => None,
        }
    }
}

/// A node of an object's hierarchy.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) transform: Transform,
    pub(crate) flags: NodeFlags,
    pub(crate) element: Element,
    pub(crate) object: ObjectId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// The name of this node, copied verbatim when the node is cloned.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pose of this node relative to its parent.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The flags of this node.
    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    /// The payload of this node.
    pub fn element(&self) -> &Element {
        &self.element
    }

    /// The object this node belongs to.
    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// The parent of this node, or `None` for the root of an object.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children of this node, in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The description of a node hierarchy, used to spawn objects.
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use cleave2d::bounding_volume::Aabb;
/// use cleave2d::math::{Point, Vector};
/// use cleave2d::scene::{NodeDesc, NodeFlags, Scene, Transform};
/// use cleave2d::shape::Mesh;
///
/// let crate_mesh = Mesh::from_aabb(&Aabb::new(Point::new(-0.5, -0.5), Point::new(0.5, 0.5)));
/// let desc = NodeDesc::new("crate")
///     .with_transform(Transform::from_translation(Vector::new(3.0, 1.0)))
///     .with_child(NodeDesc::visual("body", crate_mesh))
///     .with_child(NodeDesc::marker("pivot"))
///     .with_child(NodeDesc::marker("label").with_flags(NodeFlags::NON_COPYABLE));
///
/// let mut scene = Scene::new();
/// let object = scene.spawn(desc);
/// assert_eq!(scene.root_children(object).unwrap().len(), 3);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct NodeDesc {
    /// The name of the node.
    pub name: String,
    /// The pose of the node relative to its parent.
    pub transform: Transform,
    /// The node flags.
    pub flags: NodeFlags,
    /// The payload of the node.
    pub element: Element,
    /// The descriptions of the node's children.
    pub children: Vec<NodeDesc>,
}

impl NodeDesc {
    /// A marker node with an identity transform and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            flags: NodeFlags::empty(),
            element: Element::Marker,
            children: vec![],
        }
    }

    /// A node carrying a renderable mesh.
    pub fn visual(name: impl Into<String>, mesh: Mesh) -> Self {
        Self::new(name).with_element(Element::Visual(mesh))
    }

    /// A node carrying a collision boundary.
    pub fn physical(name: impl Into<String>, collider: Collider) -> Self {
        Self::new(name).with_element(Element::Physical(collider))
    }

    /// A node carrying both a mesh and a collision boundary.
    pub fn both(name: impl Into<String>, mesh: Mesh, collider: Collider) -> Self {
        Self::new(name).with_element(Element::Both(mesh, collider))
    }

    /// A node without geometry.
    pub fn marker(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    /// Sets the local pose of the node.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the flags of the node.
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the payload of the node.
    #[must_use]
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = element;
        self
    }

    /// Appends a child to the node.
    #[must_use]
    pub fn with_child(mut self, child: NodeDesc) -> Self {
        self.children.push(child);
        self
    }
}
