use core::ops::{Index, IndexMut};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Affine, Real};
use crate::scene::{AnimationState, Element, Node, NodeDesc, NodeId, RigidBody, Transform};
use slab::Slab;

/// The index of an object in a [`Scene`].
///
/// Indices of destroyed objects are recycled by the objects spawned afterward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ObjectId(pub(crate) u32);

/// Error indicating that a scene operation could not be performed.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CutError {
    /// The object does not exist, or has been destroyed.
    #[error("the object {0:?} does not exist.")]
    UnknownObject(ObjectId),
    /// The node does not exist, or has been destroyed.
    #[error("the node {0:?} does not exist.")]
    UnknownNode(NodeId),
    /// The world transform of the object has a zero scale component.
    #[error("the world transform of the object {0:?} is not invertible.")]
    SingularTransform(ObjectId),
    /// The direction of the cut line is (close to) zero.
    #[error("the direction of the cut line is degenerate.")]
    DegenerateDirection,
    /// The node cannot be attached to the requested parent.
    #[error("the node {node:?} cannot be attached to {parent:?}: it is either a root or an ancestor of the new parent.")]
    InvalidReparent {
        /// The node being moved.
        node: NodeId,
        /// The requested parent.
        parent: NodeId,
    },
}

/// A composite object that can be split: a root node and its hierarchy, plus the
/// object-wide state that splitting updates.
#[derive(Clone, Debug)]
pub struct Splittable {
    pub(crate) root: NodeId,
    pub(crate) is_split: bool,
    pub(crate) total_bounds: Option<Aabb>,
    /// The physical state of this object, if it is simulated.
    pub body: Option<RigidBody>,
    /// The animation playback state of this object, if it is animated.
    pub animation: Option<AnimationState>,
}

impl Splittable {
    /// The root node of this object. Its transform is the object's transform.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Has this object, or the object it was cut from, ever been split?
    ///
    /// This flag is never reset.
    pub fn is_split(&self) -> bool {
        self.is_split
    }
}

/// An arena of splittable objects and of the nodes of their hierarchies.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub(crate) nodes: Slab<Node>,
    pub(crate) objects: Slab<Splittable>,
}

impl Index<NodeId> for Scene {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index.0 as usize]
    }
}

impl IndexMut<NodeId> for Scene {
    fn index_mut(&mut self, index: NodeId) -> &mut Self::Output {
        &mut self.nodes[index.0 as usize]
    }
}

impl Index<ObjectId> for Scene {
    type Output = Splittable;

    fn index(&self, index: ObjectId) -> &Self::Output {
        &self.objects[index.0 as usize]
    }
}

impl IndexMut<ObjectId> for Scene {
    fn index_mut(&mut self, index: ObjectId) -> &mut Self::Output {
        &mut self.objects[index.0 as usize]
    }
}

impl Scene {
    /// An empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new object from the description of its hierarchy.
    ///
    /// The root of `desc` carries the object's transform. The object is created without
    /// a rigid-body nor animation state: set them with [`Scene::object_mut`].
    pub fn spawn(&mut self, desc: NodeDesc) -> ObjectId {
        let object = ObjectId(self.objects.vacant_key() as u32);
        let root = self.insert_desc(desc, object, None);
        let key = self.objects.insert(Splittable {
            root,
            is_split: false,
            total_bounds: None,
            body: None,
            animation: None,
        });
        debug_assert_eq!(key, object.0 as usize);
        object
    }

    /// Adds the hierarchy described by `desc` under `parent`.
    pub fn attach(&mut self, parent: NodeId, desc: NodeDesc) -> Result<NodeId, CutError> {
        let object = self.try_node(parent)?.object;
        let node = self.insert_desc(desc, object, Some(parent));
        self[parent].children.push(node);
        self.invalidate_bounds(object);
        Ok(node)
    }

    fn insert_desc(&mut self, desc: NodeDesc, object: ObjectId, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.insert(Node {
            name: desc.name,
            transform: desc.transform,
            flags: desc.flags,
            element: desc.element,
            object,
            parent,
            children: Vec::with_capacity(desc.children.len()),
        }) as u32);

        for child in desc.children {
            let child_id = self.insert_desc(child, object, Some(id));
            self[id].children.push(child_id);
        }

        id
    }

    /// The number of live objects.
    pub fn num_objects(&self) -> usize {
        self.objects.len()
    }

    /// Iterates through all the live objects.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Splittable)> {
        self.objects
            .iter()
            .map(|(key, object)| (ObjectId(key as u32), object))
    }

    /// Does `object` exist?
    pub fn contains_object(&self, object: ObjectId) -> bool {
        self.objects.contains(object.0 as usize)
    }

    /// The object with the given index, if it exists.
    pub fn object(&self, object: ObjectId) -> Option<&Splittable> {
        self.objects.get(object.0 as usize)
    }

    /// A mutable reference to the object with the given index, if it exists.
    pub fn object_mut(&mut self, object: ObjectId) -> Option<&mut Splittable> {
        self.objects.get_mut(object.0 as usize)
    }

    pub(crate) fn try_object(&self, object: ObjectId) -> Result<&Splittable, CutError> {
        self.object(object).ok_or(CutError::UnknownObject(object))
    }

    /// The node with the given index, if it exists.
    pub fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.0 as usize)
    }

    pub(crate) fn try_node(&self, node: NodeId) -> Result<&Node, CutError> {
        self.node(node).ok_or(CutError::UnknownNode(node))
    }

    /// The children of the root of `object`.
    pub fn root_children(&self, object: ObjectId) -> Result<&[NodeId], CutError> {
        let root = self.try_object(object)?.root;
        Ok(&self[root].children)
    }

    /// All the nodes of `object`, root included, in depth-first pre-order.
    pub fn descendants(&self, object: ObjectId) -> Result<Vec<NodeId>, CutError> {
        let root = self.try_object(object)?.root;
        let mut result = vec![];
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            result.push(node);
            stack.extend(self[node].children.iter().rev().copied());
        }

        Ok(result)
    }

    /// The first node of `object`, in depth-first pre-order, named `name`.
    pub fn find_node(&self, object: ObjectId, name: &str) -> Option<NodeId> {
        self.descendants(object)
            .ok()?
            .into_iter()
            .find(|node| self[*node].name == name)
    }

    /// Does any node of `object` carry a mesh or a collider?
    pub fn has_geometry(&self, object: ObjectId) -> Result<bool, CutError> {
        Ok(self
            .descendants(object)?
            .iter()
            .any(|node| self[*node].element.has_geometry()))
    }

    /// Replaces the local pose of `node`.
    pub fn set_transform(&mut self, node: NodeId, transform: Transform) -> Result<(), CutError> {
        let object = self.try_node(node)?.object;
        self[node].transform = transform;
        self.invalidate_bounds(object);
        Ok(())
    }

    /// Replaces the payload of `node`.
    pub fn set_element(&mut self, node: NodeId, element: Element) -> Result<(), CutError> {
        let object = self.try_node(node)?.object;
        self[node].element = element;
        self.invalidate_bounds(object);
        Ok(())
    }

    pub(crate) fn invalidate_bounds(&mut self, object: ObjectId) {
        if let Some(object) = self.objects.get_mut(object.0 as usize) {
            object.total_bounds = None;
        }
    }

    /// The map from the local space of `node` to world space.
    pub fn world_transform(&self, node: NodeId) -> Result<Affine, CutError> {
        let mut curr = self.try_node(node)?;
        let mut result = curr.transform.to_affine();

        while let Some(parent) = curr.parent {
            curr = &self[parent];
            result = curr.transform.to_affine() * result;
        }

        Ok(result)
    }

    /// The map from the local space of `object` (its root's space) to world space.
    pub fn object_transform(&self, object: ObjectId) -> Result<Affine, CutError> {
        let root = self.try_object(object)?.root;
        self.world_transform(root)
    }

    /// Calls `f` on every node of the subtree of `node` with its pose relative to the
    /// space `node_pose` maps into.
    pub(crate) fn visit_with_poses(
        &self,
        node: NodeId,
        node_pose: Affine,
        f: &mut impl FnMut(NodeId, &Node, &Affine),
    ) {
        let data = &self[node];
        f(node, data, &node_pose);

        for child in &data.children {
            let child_pose = node_pose * self[*child].transform.to_affine();
            self.visit_with_poses(*child, child_pose, f);
        }
    }

    /// The world-space AABB of all the meshes of `object`.
    ///
    /// Elements without mesh contribute their collider instead. The result is cached
    /// until the object's hierarchy changes. It is invalid (see [`Aabb::is_valid`]) if
    /// the object has no geometry at all.
    pub fn total_bounds(&mut self, object: ObjectId) -> Result<Aabb, CutError> {
        if let Some(bounds) = self.try_object(object)?.total_bounds {
            return Ok(bounds);
        }

        let root = self[object].root;
        let mut bounds = Aabb::new_invalid();
        self.visit_with_poses(root, self[root].transform.to_affine(), &mut |_, node, pose| {
            let local = match &node.element {
                Element::Visual(mesh) | Element::Both(mesh, _) => mesh.local_aabb(),
                Element::Physical(collider) => collider.local_aabb(),
                Element::Marker => return,
            };
            bounds.merge(&local.transform_by(pose));
        });

        self[object].total_bounds = Some(bounds);
        Ok(bounds)
    }

    /// The total area of the meshes of `object`, measured in its local space.
    ///
    /// Scaled children contribute their scaled area.
    pub fn object_area(&self, object: ObjectId) -> Result<Real, CutError> {
        let root = self.try_object(object)?.root;
        let mut area = 0.0;
        self.visit_with_poses(root, Affine::identity(), &mut |_, node, pose| {
            if let Some(mesh) = node.element.mesh() {
                area += mesh.area() * super::transform::linear_determinant(pose).abs();
            }
        });
        Ok(area)
    }

    /// All the objects whose total bounds intersect `region`.
    pub fn objects_in_region(&mut self, region: &Aabb) -> Vec<ObjectId> {
        let candidates: Vec<_> = self.objects().map(|(id, _)| id).collect();
        candidates
            .into_iter()
            .filter(|id| {
                self.total_bounds(*id)
                    .is_ok_and(|bounds| bounds.is_valid() && bounds.intersects(region))
            })
            .collect()
    }

    /// Creates a deep copy of `object` and of its whole hierarchy.
    ///
    /// The copy shares no node with the original. It starts with the same rigid-body,
    /// animation state and split flag.
    pub fn clone_object(&mut self, object: ObjectId) -> Result<ObjectId, CutError> {
        let src = self.try_object(object)?.clone();
        let copy = ObjectId(self.objects.vacant_key() as u32);
        let root = self.clone_subtree(src.root, copy, None);
        let key = self.objects.insert(Splittable { root, ..src });
        debug_assert_eq!(key, copy.0 as usize);
        Ok(copy)
    }

    fn clone_subtree(&mut self, node: NodeId, object: ObjectId, parent: Option<NodeId>) -> NodeId {
        let src = &self[node];
        let children = src.children.clone();
        let copy = Node {
            name: src.name.clone(),
            transform: src.transform,
            flags: src.flags,
            element: src.element.clone(),
            object,
            parent,
            children: Vec::with_capacity(children.len()),
        };
        let id = NodeId(self.nodes.insert(copy) as u32);

        for child in children {
            let child_copy = self.clone_subtree(child, object, Some(id));
            self[id].children.push(child_copy);
        }

        id
    }

    /// Removes `object` and all its nodes from the scene.
    pub fn destroy_object(&mut self, object: ObjectId) -> Result<(), CutError> {
        let removed = self
            .objects
            .try_remove(object.0 as usize)
            .ok_or(CutError::UnknownObject(object))?;
        self.remove_subtree(removed.root);
        Ok(())
    }

    /// Removes `node` and its descendants, after detaching it from its parent.
    pub(crate) fn detach_and_remove_subtree(&mut self, node: NodeId) {
        if let Some(parent) = self[node].parent {
            self[parent].children.retain(|child| *child != node);
        }
        self.remove_subtree(node);
    }

    fn remove_subtree(&mut self, node: NodeId) {
        let removed = self.nodes.remove(node.0 as usize);
        for child in removed.children {
            self.remove_subtree(child);
        }
    }

    /// Moves `node` under `new_parent`, possibly into another object, keeping its world
    /// pose.
    ///
    /// Object roots cannot be moved, and a node cannot be attached to its own subtree.
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) -> Result<(), CutError> {
        let old_object = self.try_node(node)?.object;
        let new_object = self.try_node(new_parent)?.object;
        let invalid = CutError::InvalidReparent {
            node,
            parent: new_parent,
        };

        let Some(old_parent) = self[node].parent else {
            return Err(invalid);
        };

        let mut ancestor = Some(new_parent);
        while let Some(curr) = ancestor {
            if curr == node {
                return Err(invalid);
            }
            ancestor = self[curr].parent;
        }

        let world = self.world_transform(node)?;
        let parent_world = self.world_transform(new_parent)?;
        let to_parent = parent_world
            .try_inverse()
            .ok_or(CutError::SingularTransform(new_object))?;

        self[old_parent].children.retain(|child| *child != node);
        self[new_parent].children.push(node);
        let moved = &mut self[node];
        moved.parent = Some(new_parent);
        moved.transform = Transform::from_affine(&(to_parent * world));

        if old_object != new_object {
            let mut stack = vec![node];
            while let Some(curr) = stack.pop() {
                let curr = &mut self[curr];
                curr.object = new_object;
                stack.extend_from_slice(&curr.children);
            }
        }

        self.invalidate_bounds(old_object);
        self.invalidate_bounds(new_object);
        Ok(())
    }
}
