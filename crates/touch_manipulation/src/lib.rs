//! # Touch Manipulation
//!
//! Turns a stream of multi-touch contacts into a smoothly animated 3D transform.
//!
//! ## Features
//!
//! - **One finger**: pans the driven object
//! - **Two fingers**: twists the object and dollies it along its forward axis (pinch/spread)
//! - **Inertial decay**: responsiveness fades out smoothly after each gesture starts
//! - **Frame-rate independent smoothing**: lerp/slerp toward the blended target
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use touch_manipulation::prelude::*;
//!
//! fn main() -> Result<(), DriverError> {
//!     let input = Rc::new(RefCell::new(TouchInput::new(1920.0, 1080.0)));
//!     let object = Rc::new(RefCell::new(Transform::identity()));
//!
//!     let mut driver = TransformDriver::builder(ManipulationConfig::default())
//!         .input(input.clone())
//!         .target(object.clone())
//!         .build()?;
//!     driver.activate();
//!
//!     // Every frame: feed raw touches, then update the driver.
//!     input.borrow_mut().update(&[Vec2::new(960.0, 540.0)]);
//!     driver.update(1.0 / 60.0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod driver;
pub mod foundation;
pub mod input;
pub mod manipulation;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError, ManipulationConfig};
pub use driver::{DriverError, TransformDriver};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ManipulationConfig},
        driver::{
            DriveTarget, DrivenTransform, DriverError, GestureMode, GestureSession,
            SharedTransform, TransformDriver,
        },
        foundation::math::{Pose, Quat, Transform, Vec2, Vec3},
        input::{
            ContactPoint, ContactSet, GestureEvent, SharedTouchSource, Subscription, TouchInput,
            TouchSource,
        },
        manipulation::{MoveLogic, RotateLogic, ScaleLogic},
    };
}
