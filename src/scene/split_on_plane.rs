use crate::bounding_volume::Aabb;
use crate::config::CutConfig;
use crate::mass_properties::MassSplit;
use crate::math::{Point, Real, Vector};
use crate::query::{split_collider, split_mesh, CutPlane, PlaneFrame, Side, SplitResult};
use crate::scene::transform::linear_determinant;
use crate::scene::{CutError, Element, NodeFlags, NodeId, ObjectId, Scene};
use crate::shape::{Collider, Mesh};

/// The objects resulting from [`Scene::split_on_plane`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SplitOutcome {
    /// The part of the object on the left of the cut. This is always the original
    /// object, if it survived.
    pub left: Option<ObjectId>,
    /// The part of the object on the right of the cut. This is always a new object, if
    /// it survived.
    pub right: Option<ObjectId>,
}

impl SplitOutcome {
    /// Was the object actually cut in two?
    pub fn was_split(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }
}

/// Nodes emptied by a split, in depth-first pre-order.
#[derive(Default)]
struct EmptiedNodes {
    left: Vec<NodeId>,
    right: Vec<NodeId>,
    /// Non-copyable subtrees to delete from the right object.
    right_subtrees: Vec<NodeId>,
}

impl Scene {
    /// The frame mapping the local space of `object` into the cut-plane frame of `plane`.
    ///
    /// If the object is mirrored, the direction is flipped so the left side in local
    /// space is still the left side in world space.
    pub fn object_plane_frame(
        &self,
        object: ObjectId,
        plane: &CutPlane,
    ) -> Result<PlaneFrame, CutError> {
        let to_world = self.object_transform(object)?;
        let Some(to_local) = to_world.try_inverse() else {
            log::warn!("Cannot cut the object {object:?}: its transform is not invertible.");
            return Err(CutError::SingularTransform(object));
        };

        let anchor = to_local * plane.anchor;
        let mut dir = to_local.transform_vector(&plane.dir);
        if linear_determinant(&to_world) < 0.0 {
            dir = -dir;
        }

        PlaneFrame::from_plane(&CutPlane::new(anchor, dir)).ok_or_else(|| {
            log::warn!("Cannot cut the object {object:?} along a zero-length direction.");
            CutError::DegenerateDirection
        })
    }

    /// Splits `object` along the world-space line through `anchor` directed by `dir`.
    ///
    /// The original object becomes the left half and a deep copy of it becomes the right
    /// half. Every element of the hierarchy gets its own verdict. Non-copyable nodes
    /// stay on the left half only, and marker nodes are left untouched on both halves.
    ///
    /// A half left without any mesh nor collider is destroyed. If both halves survive:
    /// - the mass of the rigid-body (if any) is shared in proportion to the mesh area of
    ///   each half while velocities are kept on both.
    /// - the animation state of both halves is cleared.
    /// - both halves are flagged as split.
    ///
    /// If only one half survives, nothing was actually cut: the survivor, which may be
    /// either the original or its copy, keeps its state unchanged.
    pub fn split_on_plane(
        &mut self,
        object: ObjectId,
        anchor: Point<Real>,
        dir: Vector<Real>,
        config: &CutConfig,
    ) -> Result<SplitOutcome, CutError> {
        let frame = self.object_plane_frame(object, &CutPlane::new(anchor, dir))?;
        let copy = self.clone_object(object)?;

        let mut emptied = EmptiedNodes::default();
        let (root_lhs, root_rhs) = (self[object].root, self[copy].root);
        self.split_subtree(root_lhs, root_rhs, &frame, config, &mut emptied);
        self.prune_emptied(object, copy, emptied);

        let left_alive = self.has_geometry(object)?;
        let right_alive = self.has_geometry(copy)?;

        match (left_alive, right_alive) {
            (true, true) => {
                self.finalize_split(object, copy)?;
                log::trace!("Split {object:?} into {object:?} and {copy:?}.");
                Ok(SplitOutcome {
                    left: Some(object),
                    right: Some(copy),
                })
            }
            (true, false) => {
                self.destroy_object(copy)?;
                log::trace!("{object:?} lies on the left of the cut.");
                Ok(SplitOutcome {
                    left: Some(object),
                    right: None,
                })
            }
            (false, true) => {
                self.destroy_object(object)?;
                log::trace!("{object:?} lies on the right of the cut, replaced by {copy:?}.");
                Ok(SplitOutcome {
                    left: None,
                    right: Some(copy),
                })
            }
            (false, false) => {
                log::debug!("Destroying {object:?}: it has no geometry to split.");
                self.destroy_object(copy)?;
                self.destroy_object(object)?;
                Ok(SplitOutcome {
                    left: None,
                    right: None,
                })
            }
        }
    }

    /// Walks the hierarchies of the original object and its copy in parallel.
    fn split_subtree(
        &mut self,
        lhs: NodeId,
        rhs: NodeId,
        frame: &PlaneFrame,
        config: &CutConfig,
        emptied: &mut EmptiedNodes,
    ) {
        if self[lhs].flags.contains(NodeFlags::NON_COPYABLE) {
            emptied.right_subtrees.push(rhs);
            return;
        }

        if self[lhs].element.has_geometry() {
            let element =
                core::mem::replace(&mut self[lhs].element, Element::Marker);
            let (element_lhs, element_rhs) = split_element(element, frame, config);
            log::trace!(
                "Node {:?} ({}): left {}, right {}.",
                lhs,
                self[lhs].name,
                element_lhs.has_geometry(),
                element_rhs.has_geometry()
            );

            if !element_lhs.has_geometry() {
                emptied.left.push(lhs);
            }
            if !element_rhs.has_geometry() {
                emptied.right.push(rhs);
            }

            self[lhs].element = element_lhs;
            self[rhs].element = element_rhs;
        }

        let children_lhs = self[lhs].children.clone();
        let children_rhs = self[rhs].children.clone();

        for (child_lhs, child_rhs) in children_lhs.into_iter().zip(children_rhs) {
            let child_frame = frame.prepend(&self[child_lhs].transform.to_affine());
            self.split_subtree(child_lhs, child_rhs, &child_frame, config, emptied);
        }
    }

    /// Deletes the nodes emptied by a split.
    ///
    /// Emptied nodes that still have children, and emptied roots, are kept as markers.
    fn prune_emptied(&mut self, lhs: ObjectId, rhs: ObjectId, emptied: EmptiedNodes) {
        let root_lhs = self[lhs].root;
        let root_rhs = self[rhs].root;

        for subtree in emptied.right_subtrees {
            if subtree == root_rhs {
                for child in self[subtree].children.clone() {
                    self.detach_and_remove_subtree(child);
                }
                self[subtree].element = Element::Marker;
            } else {
                self.detach_and_remove_subtree(subtree);
            }
        }

        let emptied_nodes = emptied
            .left
            .iter()
            .rev()
            .map(|node| (*node, root_lhs))
            .chain(emptied.right.iter().rev().map(|node| (*node, root_rhs)));

        for (node, root) in emptied_nodes {
            if node != root && self[node].children.is_empty() {
                self.detach_and_remove_subtree(node);
            }
        }

        self.invalidate_bounds(lhs);
        self.invalidate_bounds(rhs);
    }

    /// Shares the mass, clears the animations and sets the split flags of both halves.
    fn finalize_split(&mut self, lhs: ObjectId, rhs: ObjectId) -> Result<(), CutError> {
        let area_lhs = self.object_area(lhs)?;
        let area_rhs = self.object_area(rhs)?;

        if let Some(body) = self[lhs].body {
            let mass = MassSplit::from_areas(body.mass, area_lhs, area_rhs);
            log::trace!(
                "Sharing a mass of {} into {} and {}.",
                body.mass,
                mass.left,
                mass.right
            );

            if let Some(body) = &mut self[lhs].body {
                body.mass = mass.left;
            }
            if let Some(body) = &mut self[rhs].body {
                body.mass = mass.right;
            }
        }

        for half in [lhs, rhs] {
            let half = &mut self[half];
            half.animation = None;
            half.is_split = true;
        }

        Ok(())
    }
}

/// The cut of the mesh or the collider of an element.
struct PartCut<T> {
    result: SplitResult<T>,
    /// The side whose half was discarded, too thin or invalid.
    dropped: Option<Side>,
}

impl<T> PartCut<T> {
    fn kept(result: SplitResult<T>) -> Self {
        Self {
            result,
            dropped: None,
        }
    }

    fn dropping(side: Side) -> Self {
        Self {
            result: SplitResult::whole(side.opposite()),
            dropped: Some(side),
        }
    }

    /// Hands out the halves of `part` according to this cut.
    fn distribute(self, part: T) -> (Option<T>, Option<T>) {
        match self.result {
            SplitResult::Pair(lhs, rhs) => (Some(lhs), Some(rhs)),
            SplitResult::Left => (Some(part), None),
            SplitResult::Right => (None, Some(part)),
        }
    }
}

/// Splits the mesh and the collider of an element, returning its left and right parts.
///
/// The element gets a single verdict. If a half of its mesh or of its collider had to
/// be discarded, the whole element moves to the other side. Otherwise each part is
/// handed out on its own: a mesh lying on one side does not prevent its collider from
/// being split.
fn split_element(element: Element, frame: &PlaneFrame, config: &CutConfig) -> (Element, Element) {
    let (mesh, collider) = match element {
        Element::Visual(mesh) => (Some(mesh), None),
        Element::Physical(collider) => (None, Some(collider)),
        Element::Both(mesh, collider) => (Some(mesh), Some(collider)),
        Element::Marker => return (Element::Marker, Element::Marker),
    };

    let mesh_cut = mesh.as_ref().map(|mesh| cut_mesh_part(mesh, frame, config));
    let collider_cut = collider.as_ref().map(|collider| cut_collider_part(collider, frame));

    let dropped = |side| {
        mesh_cut.as_ref().and_then(|cut| cut.dropped) == Some(side)
            || collider_cut.as_ref().and_then(|cut| cut.dropped) == Some(side)
    };
    let whole_side = match (dropped(Side::Left), dropped(Side::Right)) {
        (false, false) => None,
        (true, false) => Some(Side::Right),
        (false, true) => Some(Side::Left),
        (true, true) => {
            let bounds = match (&mesh, &collider) {
                (Some(mesh), _) => mesh.local_aabb(),
                (None, Some(collider)) => collider.local_aabb(),
                (None, None) => return (Element::Marker, Element::Marker),
            };
            log::debug!("Both halves of an element are degenerate, keeping it whole.");
            Some(frame.classify(&bounds.center()))
        }
    };

    if let Some(side) = whole_side {
        let element = Element::from_parts(mesh, collider);
        return match side {
            Side::Left => (element, Element::Marker),
            Side::Right => (Element::Marker, element),
        };
    }

    let (mesh_lhs, mesh_rhs) = match (mesh, mesh_cut) {
        (Some(mesh), Some(cut)) => cut.distribute(mesh),
        _ => (None, None),
    };
    let (collider_lhs, collider_rhs) = match (collider, collider_cut) {
        (Some(collider), Some(cut)) => cut.distribute(collider),
        _ => (None, None),
    };

    (
        Element::from_parts(mesh_lhs, collider_lhs),
        Element::from_parts(mesh_rhs, collider_rhs),
    )
}

fn cut_mesh_part(mesh: &Mesh, frame: &PlaneFrame, config: &CutConfig) -> PartCut<Mesh> {
    match split_mesh(mesh, frame) {
        SplitResult::Pair(lhs, _) if is_sliver(&lhs, frame, config) => {
            log::debug!("Dropping a left mesh sliver.");
            PartCut::dropping(Side::Left)
        }
        SplitResult::Pair(_, rhs) if is_sliver(&rhs, frame, config) => {
            log::debug!("Dropping a right mesh sliver.");
            PartCut::dropping(Side::Right)
        }
        result => PartCut::kept(result),
    }
}

/// Is `mesh` thinner than the minimum fragment extent along one of the cut-frame axes?
fn is_sliver(mesh: &Mesh, frame: &PlaneFrame, config: &CutConfig) -> bool {
    let extents = Aabb::from_points(
        mesh.vertices
            .iter()
            .map(|pt| frame.transform_point(&pt.xy())),
    )
    .extents();
    extents.x < config.min_fragment_extent || extents.y < config.min_fragment_extent
}

fn cut_collider_part(collider: &Collider, frame: &PlaneFrame) -> PartCut<Collider> {
    match split_collider(collider, frame) {
        SplitResult::Left => PartCut::kept(SplitResult::Left),
        SplitResult::Right => PartCut::kept(SplitResult::Right),
        SplitResult::Pair(Some(lhs), Some(rhs)) => PartCut::kept(SplitResult::Pair(lhs, rhs)),
        SplitResult::Pair(None, Some(_)) => PartCut::dropping(Side::Left),
        SplitResult::Pair(Some(_), None) => PartCut::dropping(Side::Right),
        SplitResult::Pair(None, None) => {
            log::debug!("Both halves of a collider are degenerate, keeping it whole.");
            let side = frame.classify(&collider.local_aabb().center());
            PartCut::dropping(side.opposite())
        }
    }
}
