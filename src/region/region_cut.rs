use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::config::CutConfig;
use crate::region::{region_edges, RegionEdge};
use crate::scene::{CutError, Element, NodeDesc, ObjectId, RigidBody, Scene, Transform};
use arrayvec::ArrayVec;
use smallvec::SmallVec;

/// A notification emitted while cutting objects with a region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CutEvent {
    /// An object is a final result of a region cut.
    Finalized {
        /// The resulting object.
        fragment: ObjectId,
        /// Did the region actually cut the object in two?
        was_split: bool,
    },
    /// All the nodes of `from` were moved into `into`.
    Merged {
        /// The object receiving the nodes.
        into: ObjectId,
        /// The object the nodes came from. It is destroyed right after.
        from: ObjectId,
    },
    /// An object was removed from the scene by the cut.
    Destroyed(ObjectId),
}

/// The result of cutting one object with a rectangular region.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionCut {
    /// The part of the object inside of the region.
    pub inside: Option<ObjectId>,
    /// The part of the object outside of the region, merged into a single object.
    pub outside: Option<ObjectId>,
}

impl RegionCut {
    /// Was the object actually cut in two?
    pub fn was_split(&self) -> bool {
        self.inside.is_some() && self.outside.is_some()
    }
}

/// Cuts `object` with the world-space rectangle `region`.
///
/// The edges of `region` crossing the object are applied one after the other, each one
/// cutting what is left inside of the region by the previous ones. The pieces falling
/// outside are then merged into a single object. `on_event` is notified of every merge,
/// every destroyed object, and of the final inside and outside objects.
///
/// An object that does not overlap `region` is returned as the outside part, untouched.
/// An object whose bounds are contained in `region` is returned as the inside part,
/// untouched.
///
/// Note that the inside part is not necessarily `object`: an edge cut leaving the whole
/// object outside of its line replaces it by a copy.
pub fn cut_object_in_region(
    scene: &mut Scene,
    object: ObjectId,
    region: &Aabb,
    config: &CutConfig,
    mut on_event: impl FnMut(CutEvent),
) -> Result<RegionCut, CutError> {
    let mut cut = ObjectCut::start(scene, object, region)?;

    while !cut.is_done() {
        cut.step(scene, config, &mut on_event)?;
    }

    cut.finish(scene, &mut on_event)
}

/// The state of a region cut of a single object, applied one edge at a time.
#[derive(Clone, Debug)]
pub(crate) struct ObjectCut {
    object: ObjectId,
    inside: Option<ObjectId>,
    edges: ArrayVec<RegionEdge, 4>,
    next_edge: usize,
    outer: SmallVec<[ObjectId; 4]>,
}

impl ObjectCut {
    pub(crate) fn start(
        scene: &mut Scene,
        object: ObjectId,
        region: &Aabb,
    ) -> Result<Self, CutError> {
        let bounds = scene.total_bounds(object)?;
        let overlap = region
            .intersection(&bounds)
            .filter(|overlap| bounds.is_valid() && overlap.area() > 0.0);

        let mut cut = Self {
            object,
            inside: None,
            edges: ArrayVec::new(),
            next_edge: 0,
            outer: SmallVec::new(),
        };

        if overlap.is_none() {
            log::trace!("{object:?} does not overlap the cut region.");
            cut.outer.push(object);
        } else if region.contains(&bounds) {
            log::trace!("{object:?} is contained in the cut region.");
            cut.inside = Some(object);
        } else {
            cut.inside = Some(object);
            cut.edges = region_edges(region, &bounds);
            log::trace!("{object:?} is crossed by {} region edges.", cut.edges.len());
        }

        Ok(cut)
    }

    /// The object this cut started from.
    pub(crate) fn object(&self) -> ObjectId {
        self.object
    }

    pub(crate) fn is_done(&self) -> bool {
        self.inside.is_none() || self.next_edge == self.edges.len()
    }

    /// Applies the next edge cut.
    pub(crate) fn step(
        &mut self,
        scene: &mut Scene,
        config: &CutConfig,
        on_event: &mut impl FnMut(CutEvent),
    ) -> Result<(), CutError> {
        let Some(inside) = self.inside else {
            return Ok(());
        };
        let Some(edge) = self.edges.get(self.next_edge).copied() else {
            return Ok(());
        };
        self.next_edge += 1;

        let outcome =
            scene.split_on_plane(inside, edge.plane.anchor, edge.plane.dir, config)?;
        log::trace!("{:?} edge: {outcome:?}.", edge.side);

        if outcome.left != Some(inside) {
            on_event(CutEvent::Destroyed(inside));
        }

        self.inside = outcome.left;
        self.outer.extend(outcome.right);

        if self.inside.is_none() && self.next_edge < self.edges.len() {
            log::debug!(
                "Nothing left inside of the region, skipping {} edges.",
                self.edges.len() - self.next_edge
            );
        }

        Ok(())
    }

    /// Merges the outer pieces and reports the results.
    pub(crate) fn finish(
        self,
        scene: &mut Scene,
        on_event: &mut impl FnMut(CutEvent),
    ) -> Result<RegionCut, CutError> {
        let mut outer = self.outer.into_iter();
        let outside = outer.next();

        if let Some(into) = outside {
            for from in outer {
                merge_objects(scene, into, from)?;
                on_event(CutEvent::Merged { into, from });
                on_event(CutEvent::Destroyed(from));
            }
        }

        let result = RegionCut {
            inside: self.inside,
            outside,
        };

        for fragment in [result.inside, result.outside].into_iter().flatten() {
            on_event(CutEvent::Finalized {
                fragment,
                was_split: result.was_split(),
            });
        }

        Ok(result)
    }
}

/// Moves all the nodes of `from` into `into`, then destroys `from`.
///
/// Nodes keep their world pose and masses are summed.
fn merge_objects(scene: &mut Scene, into: ObjectId, from: ObjectId) -> Result<(), CutError> {
    let root_into = scene.try_object(into)?.root();
    let root_from = scene.try_object(from)?.root();

    for child in scene.root_children(from)?.to_vec() {
        scene.reparent(child, root_into)?;
    }

    // The root itself may carry geometry: keep it as a new child.
    let from_root = &scene[root_from];
    if from_root.element().has_geometry() {
        let to_into = scene
            .object_transform(into)?
            .try_inverse()
            .ok_or(CutError::SingularTransform(into))?;
        let pose = Transform::from_affine(&(to_into * scene.object_transform(from)?));
        let desc = NodeDesc::new(from_root.name())
            .with_transform(pose)
            .with_element(from_root.element().clone());
        let _ = scene.attach(root_into, desc)?;
        scene.set_element(root_from, Element::Marker)?;
    }

    let from_state = scene.try_object(from)?.clone();
    if let Some(into_state) = scene.object_mut(into) {
        into_state.is_split |= from_state.is_split();
        if let Some(from_body) = from_state.body {
            let body = into_state.body.get_or_insert(RigidBody {
                mass: 0.0,
                ..from_body
            });
            body.mass += from_body.mass;
        }
    }

    log::trace!("Merged {from:?} into {into:?}.");
    scene.destroy_object(from)
}
