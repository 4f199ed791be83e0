//! # Transform Driver
//!
//! Per-frame pipeline that turns touch contacts into motion of one object:
//!
//! ```text
//! contacts -> centroid -> gesture mode -> collaborators -> delta blend
//!          -> inertial decay -> smoothing -> driven transform
//! ```
//!
//! ## Lifecycle
//!
//! Build with [`TransformDriver::builder`], call [`TransformDriver::activate`]
//! to subscribe to the touch source, then [`TransformDriver::update`] once per
//! frame. [`TransformDriver::deactivate`] releases the subscription.
//!
//! Configuration problems are settled at build time. A driver without a
//! touch source is built inert; a driver without a target drives a transform
//! of its own. Once built, updating never fails.

pub mod blend;
pub mod decay;
pub mod gesture;
pub mod smoothing;
pub mod target;

pub use blend::{remap_scale_ratio, BlendedDelta, DeltaBlender};
pub use decay::InertialDecay;
pub use gesture::{GestureMode, GestureSession, GestureStateMachine, GestureTrigger, Transition};
pub use smoothing::{TargetTransform, TransformSmoother};
pub use target::{DriveTarget, DrivenTransform, SharedTransform};

use thiserror::Error;

use crate::config::{ConfigError, ManipulationConfig};
use crate::foundation::collections::{average_vec3, SampleRing};
use crate::foundation::math::{Pose, Quat, Transform, Vec3};
use crate::input::{compute_centroid, SharedTouchSource, Subscription};
use crate::manipulation::{
    CentroidMoveLogic, MoveLogic, PinchScaleLogic, RotateLogic, ScaleLogic, TwoPointRotateLogic,
};

/// Number of per-frame delta samples kept for velocity estimates
pub const VELOCITY_SAMPLE_LIMIT: usize = 10;

/// Driver construction errors
#[derive(Debug, Error)]
pub enum DriverError {
    /// Configuration rejected
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Builder for [`TransformDriver`]
pub struct DriverBuilder {
    config: ManipulationConfig,
    input: Option<SharedTouchSource>,
    target: Option<SharedTransform>,
    move_logic: Option<Box<dyn MoveLogic>>,
    rotate_logic: Option<Box<dyn RotateLogic>>,
    scale_logic: Option<Box<dyn ScaleLogic>>,
}

impl DriverBuilder {
    /// Touch source to read contacts and notifications from
    pub fn input(mut self, input: SharedTouchSource) -> Self {
        self.input = Some(input);
        self
    }

    /// Transform to drive
    pub fn target(mut self, target: SharedTransform) -> Self {
        self.target = Some(target);
        self
    }

    /// Replace the stock centroid move logic
    pub fn move_logic(mut self, logic: Box<dyn MoveLogic>) -> Self {
        self.move_logic = Some(logic);
        self
    }

    /// Replace the stock two-contact rotate logic
    pub fn rotate_logic(mut self, logic: Box<dyn RotateLogic>) -> Self {
        self.rotate_logic = Some(logic);
        self
    }

    /// Replace the stock pinch scale logic
    pub fn scale_logic(mut self, logic: Box<dyn ScaleLogic>) -> Self {
        self.scale_logic = Some(logic);
        self
    }

    /// Validate and assemble the driver
    pub fn build(self) -> Result<TransformDriver, DriverError> {
        self.config.validate()?;

        if self.input.is_none() {
            log::error!("No input source found. Transform driver is disabled");
        }

        let target = if let Some(shared) = self.target {
            DriveTarget::External(shared)
        } else {
            log::warn!("No target transform assigned, driving the driver's own transform");
            DriveTarget::Owned(Transform::identity())
        };

        let blender = DeltaBlender::new(
            self.move_logic.unwrap_or_else(|| Box::new(CentroidMoveLogic::new())),
            self.rotate_logic.unwrap_or_else(|| Box::new(TwoPointRotateLogic::new())),
            self.scale_logic.unwrap_or_else(|| Box::new(PinchScaleLogic::new())),
        );

        let config = self.config;
        Ok(TransformDriver {
            enabled: self.input.is_some(),
            input: self.input,
            target,
            subscription: None,
            machine: GestureStateMachine::default(),
            blender,
            delta: BlendedDelta::identity(),
            decay: InertialDecay::new(config.transform_decay_time),
            smoother: smoother_for(&config),
            velocity_samples: SampleRing::new(),
            last_target: None,
            config,
        })
    }
}

fn smoother_for(config: &ManipulationConfig) -> TransformSmoother {
    TransformSmoother::new(
        config.transform_speed,
        config.rotation_smoothing_factor,
        !config.allow_roll_gesture,
    )
}

/// Drives one object's transform from touch gestures
pub struct TransformDriver {
    config: ManipulationConfig,
    input: Option<SharedTouchSource>,
    target: DriveTarget,
    subscription: Option<Subscription>,
    machine: GestureStateMachine,
    blender: DeltaBlender,
    delta: BlendedDelta,
    decay: InertialDecay,
    smoother: TransformSmoother,
    velocity_samples: SampleRing<Vec3, VELOCITY_SAMPLE_LIMIT>,
    last_target: Option<TargetTransform>,
    enabled: bool,
}

impl std::fmt::Debug for TransformDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformDriver")
            .field("enabled", &self.enabled)
            .field("active", &self.is_active())
            .field("mode", &self.machine.mode())
            .field("decay_factor", &self.decay.factor())
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl TransformDriver {
    /// Start building a driver with the given configuration
    pub fn builder(config: ManipulationConfig) -> DriverBuilder {
        DriverBuilder {
            config,
            input: None,
            target: None,
            move_logic: None,
            rotate_logic: None,
            scale_logic: None,
        }
    }

    /// Subscribe to the touch source and reference the current pose
    ///
    /// Returns whether the driver is active afterwards. Inert drivers never
    /// activate.
    pub fn activate(&mut self) -> bool {
        if self.is_active() {
            return true;
        }
        let Some(input) = self.input.as_ref() else {
            return false;
        };
        let Ok(mut source) = input.try_borrow_mut() else {
            log::warn!("Touch source is borrowed elsewhere; activation deferred");
            return false;
        };
        let Some(object) = self.target.snapshot() else {
            return false;
        };

        self.subscription = Some(source.subscribe());
        self.machine.reset(object.pose());
        self.delta = BlendedDelta::identity();
        self.velocity_samples.clear();
        self.last_target = None;
        log::info!("Transform driver activated at {:?}", object.position);
        true
    }

    /// Release the subscription and cancel any gesture in progress
    pub fn deactivate(&mut self) {
        if self.subscription.take().is_some() {
            self.machine.release();
            log::info!("Transform driver deactivated");
        }
    }

    /// Run one frame of the pipeline
    pub fn update(&mut self, delta_time: f32) {
        if !self.is_active() {
            return;
        }
        let delta_time = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };

        let Some(contacts) = self.read_contacts() else {
            return;
        };
        let Some(object) = self.target.snapshot() else {
            return;
        };

        self.process_notifications(&contacts, &object);
        self.blend_deltas(&contacts, &object);

        if contacts.is_empty()
            && self.machine.transition(GestureTrigger::AllContactsReleased) == Transition::Release
        {
            self.machine.release();
        }

        self.decay.tick(delta_time);

        let session = self.machine.session();
        let target = TargetTransform::from_delta(
            &object.position,
            &session.object_start_pose.rotation,
            &self.delta,
        );
        let next = self
            .smoother
            .apply(&object.pose(), &target, delta_time, self.decay.factor());

        log::trace!(
            "mode {:?} decay {:.3} -> position {:?}",
            self.machine.mode(),
            self.decay.factor(),
            next.position
        );

        self.last_target = Some(target);
        self.target.write(&next);
    }

    /// Swap configuration at runtime
    pub fn set_config(&mut self, config: ManipulationConfig) -> Result<(), DriverError> {
        config.validate()?;
        self.decay.set_duration(config.transform_decay_time);
        self.smoother = smoother_for(&config);
        self.config = config;
        Ok(())
    }

    /// Current configuration
    pub const fn config(&self) -> &ManipulationConfig {
        &self.config
    }

    /// Whether a touch source was supplied
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the driver holds a live subscription
    pub const fn is_active(&self) -> bool {
        self.enabled && self.subscription.is_some()
    }

    /// Current gesture mode
    pub const fn mode(&self) -> GestureMode {
        self.machine.mode()
    }

    /// Session of the current or most recent gesture
    pub const fn session(&self) -> &GestureSession {
        self.machine.session()
    }

    /// Current `[0, 1]` decay factor
    pub const fn decay_factor(&self) -> f32 {
        self.decay.factor()
    }

    /// Blended position delta
    pub const fn delta_position(&self) -> Vec3 {
        self.delta.position
    }

    /// Blended rotation delta
    pub const fn delta_rotation(&self) -> Quat {
        self.delta.rotation
    }

    /// Target computed on the last update, if any
    pub fn target_pose(&self) -> Option<Pose> {
        self.last_target.map(|t| Pose::new(t.position, t.rotation))
    }

    /// Mean of recent per-frame delta samples, zero when none
    pub fn average_velocity_direction(&self) -> Vec3 {
        average_vec3(&self.velocity_samples)
    }

    /// The self-driven transform when no external target was given
    pub const fn owned_transform(&self) -> Option<&Transform> {
        match &self.target {
            DriveTarget::Owned(transform) => Some(transform),
            DriveTarget::External(_) => None,
        }
    }

    fn read_contacts(&self) -> Option<Vec<Vec3>> {
        let input = self.input.as_ref()?;
        let Ok(source) = input.try_borrow() else {
            log::warn!("Touch source is borrowed elsewhere; skipping frame");
            return None;
        };
        Some(source.contacts().positions())
    }

    fn process_notifications(&mut self, contacts: &[Vec3], object: &Transform) {
        let events = self.subscription.as_ref().map(Subscription::drain).unwrap_or_default();

        for event in events {
            match self.machine.transition(event.into()) {
                Transition::Begin(mode) => self.begin_gesture(mode, contacts, object),
                Transition::Release | Transition::Ignore => {
                    log::trace!("{:?} ignored in {:?}", event, self.machine.mode());
                }
            }
        }
    }

    fn begin_gesture(&mut self, mode: GestureMode, contacts: &[Vec3], object: &Transform) {
        let session = GestureSession {
            mode,
            start_centroid: Pose::from_position(compute_centroid(contacts)),
            object_start_pose: object.pose(),
        };

        self.blender.setup(&session, contacts, object);
        self.velocity_samples.clear();
        self.decay.reset();
        self.machine.begin(session);
    }

    fn blend_deltas(&mut self, contacts: &[Vec3], object: &Transform) {
        if !self.machine.drives_frame(contacts.len()) {
            return;
        }

        let session = *self.machine.session();
        self.delta = match self.machine.mode() {
            GestureMode::Single => self.blender.single(&session, contacts, object, &self.config),
            GestureMode::Multi => self.blender.multi(&session, contacts, object, &self.config),
            GestureMode::None => return,
        };
        self.velocity_samples.push(self.delta.position);
    }
}
