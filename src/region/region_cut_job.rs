use crate::bounding_volume::Aabb;
use crate::config::CutConfig;
use crate::region::region_cut::ObjectCut;
use crate::region::{CutEvent, RegionCut};
use crate::scene::{CutError, ObjectId, Scene};
use alloc::collections::VecDeque;
use core::time::Duration;
use std::time::Instant;

/// The progress of a [`RegionCutJob`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JobStatus {
    /// Some objects remain to be cut.
    Pending,
    /// All the objects have been cut.
    Finished,
}

/// A region cut of many objects, spread over several calls.
///
/// Each call to [`RegionCutJob::advance`] applies edge cuts until its time budget is
/// spent, then returns so the caller can resume it later, typically on the next frame.
/// Work already done is never rolled back: dropping the job cancels the remaining cuts
/// and leaves the objects already cut in their final state.
///
/// The scene must not be modified by anything else while the job is pending, except
/// for destroying objects: queued objects that no longer exist are skipped.
#[derive(Clone, Debug)]
pub struct RegionCutJob {
    region: Aabb,
    config: CutConfig,
    queue: VecDeque<ObjectId>,
    in_flight: Option<ObjectCut>,
    results: Vec<(ObjectId, RegionCut)>,
}

impl RegionCutJob {
    /// A job cutting `objects`, in order, with `region`.
    pub fn new(
        objects: impl IntoIterator<Item = ObjectId>,
        region: Aabb,
        config: CutConfig,
    ) -> Self {
        Self {
            region,
            config,
            queue: objects.into_iter().collect(),
            in_flight: None,
            results: vec![],
        }
    }

    /// A job cutting all the objects of `scene` overlapping `region`.
    pub fn from_scene(scene: &mut Scene, region: Aabb, config: CutConfig) -> Self {
        Self::new(scene.objects_in_region(&region), region, config)
    }

    /// The world-space region cutting the objects.
    pub fn region(&self) -> &Aabb {
        &self.region
    }

    /// The parameters of the cuts.
    pub fn config(&self) -> &CutConfig {
        &self.config
    }

    /// The number of objects not fully cut yet.
    pub fn num_remaining(&self) -> usize {
        self.queue.len() + self.in_flight.is_some() as usize
    }

    /// Has every object been cut?
    pub fn is_finished(&self) -> bool {
        self.num_remaining() == 0
    }

    /// The results of the objects cut so far, each paired with the object it comes from.
    pub fn results(&self) -> &[(ObjectId, RegionCut)] {
        &self.results
    }

    /// Moves out the results of the objects cut so far.
    pub fn take_results(&mut self) -> Vec<(ObjectId, RegionCut)> {
        core::mem::take(&mut self.results)
    }

    /// Runs the job for roughly `budget`.
    ///
    /// At least one step (one edge cut, or the merge of an object's outer pieces) is
    /// performed, whatever the budget. The elapsed time is checked after every step.
    ///
    /// If an object fails to be cut, it is abandoned and the error is returned. Calling
    /// `advance` again resumes with the next object.
    pub fn advance(
        &mut self,
        scene: &mut Scene,
        budget: Duration,
        mut on_event: impl FnMut(CutEvent),
    ) -> Result<JobStatus, CutError> {
        let start = Instant::now();

        loop {
            if !self.step(scene, &mut on_event)? {
                return Ok(JobStatus::Finished);
            }

            if start.elapsed() >= budget {
                if self.is_finished() {
                    return Ok(JobStatus::Finished);
                }

                log::trace!(
                    "Region cut suspended after {:?}, {} objects remaining.",
                    start.elapsed(),
                    self.num_remaining()
                );
                return Ok(JobStatus::Pending);
            }
        }
    }

    /// Runs the job for roughly [`CutConfig::max_slice`].
    pub fn advance_with_config_budget(
        &mut self,
        scene: &mut Scene,
        on_event: impl FnMut(CutEvent),
    ) -> Result<JobStatus, CutError> {
        let budget = self.config.max_slice;
        self.advance(scene, budget, on_event)
    }

    /// Performs one step. Returns `false` if there was nothing left to do.
    fn step(
        &mut self,
        scene: &mut Scene,
        on_event: &mut impl FnMut(CutEvent),
    ) -> Result<bool, CutError> {
        if self.in_flight.is_none() {
            let Some(object) = self.next_live_object(scene) else {
                return Ok(false);
            };

            match ObjectCut::start(scene, object, &self.region) {
                Ok(cut) => self.in_flight = Some(cut),
                Err(err) => {
                    log::warn!("Abandoning the region cut of {object:?}: {err}");
                    return Err(err);
                }
            }
        }

        let Some(cut) = &mut self.in_flight else {
            return Ok(false);
        };

        if !cut.is_done() {
            if let Err(err) = cut.step(scene, &self.config, on_event) {
                log::warn!("Abandoning the region cut of {:?}: {err}", cut.object());
                self.in_flight = None;
                return Err(err);
            }
        } else if let Some(cut) = self.in_flight.take() {
            let object = cut.object();
            let result = cut.finish(scene, on_event)?;
            self.results.push((object, result));
        }

        Ok(true)
    }

    fn next_live_object(&mut self, scene: &Scene) -> Option<ObjectId> {
        while let Some(object) = self.queue.pop_front() {
            if scene.contains_object(object) {
                return Some(object);
            }

            log::debug!("Skipping {object:?}: it was destroyed before being cut.");
        }

        None
    }
}
