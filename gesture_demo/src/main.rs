//! Headless gesture demo
//!
//! Replays a scripted sequence of touches against a [`TransformDriver`] at
//! 60 fps and logs where the driven object ends up. An optional TOML or RON
//! config path may be passed as the first argument.
//!
//! ```text
//! RUST_LOG=debug cargo run -p gesture_demo -- gesture_demo/manipulation.toml
//! ```

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_3;
use std::rc::Rc;

use rand::prelude::*;
use touch_manipulation::foundation::logging;
use touch_manipulation::prelude::*;

const SCREEN_WIDTH: f32 = 1280.0;
const SCREEN_HEIGHT: f32 = 720.0;
const FRAME_TIME: f32 = 1.0 / 60.0;
const LOG_INTERVAL: f32 = 0.25;
const JITTER_PIXELS: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pan,
    Lift,
    SpreadAndTwist,
    Pinch,
    Coast,
}

impl Phase {
    /// Script as (phase, seconds) in playback order
    const SCRIPT: [(Self, f32); 5] = [
        (Self::Pan, 1.0),
        (Self::Lift, 0.5),
        (Self::SpreadAndTwist, 1.0),
        (Self::Pinch, 1.0),
        (Self::Coast, 2.0),
    ];

    fn total_duration() -> f32 {
        Self::SCRIPT.iter().map(|(_, seconds)| seconds).sum()
    }

    /// Phase active at `time` and how far through it we are, in `[0, 1]`
    fn at(time: f32) -> Option<(Self, f32)> {
        let mut start = 0.0;
        for (phase, seconds) in Self::SCRIPT {
            if time < start + seconds {
                return Some((phase, (time - start) / seconds));
            }
            start += seconds;
        }
        None
    }

    /// Pixel positions of the fingers on screen
    fn touches(self, progress: f32, rng: &mut impl Rng) -> Vec<Vec2> {
        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
        let mut jitter = || {
            Vec2::new(
                rng.gen_range(-JITTER_PIXELS..JITTER_PIXELS),
                rng.gen_range(-JITTER_PIXELS..JITTER_PIXELS),
            )
        };

        match self {
            Self::Pan => vec![center + Vec2::new(200.0 * progress, 0.0) + jitter()],
            Self::Lift | Self::Coast => Vec::new(),
            Self::SpreadAndTwist => {
                let offset = finger_offset(60.0 + 120.0 * progress, FRAC_PI_3 * progress);
                vec![center - offset + jitter(), center + offset + jitter()]
            }
            Self::Pinch => {
                let offset = finger_offset(180.0 - 120.0 * progress, FRAC_PI_3);
                vec![center - offset + jitter(), center + offset + jitter()]
            }
        }
    }
}

fn finger_offset(radius: f32, angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * radius
}

fn load_config() -> Result<ManipulationConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let config = ManipulationConfig::load_from_file(&path)?;
            log::info!("Loaded configuration from {}", path);
            Ok(config)
        }
        None => Ok(ManipulationConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");

    let config = load_config()?;
    log::info!("Using {:?}", config);

    let input = Rc::new(RefCell::new(
        TouchInput::new(SCREEN_WIDTH, SCREEN_HEIGHT).with_debug_contacts(config.debug_contacts),
    ));
    let object = Rc::new(RefCell::new(Transform::from_position(Vec3::new(0.0, 0.0, 5.0))));

    let mut driver = TransformDriver::builder(config)
        .input(input.clone())
        .target(object.clone())
        .build()?;
    if !driver.activate() {
        return Err("transform driver failed to activate".into());
    }

    let mut rng = thread_rng();
    let mut time = 0.0;
    let mut since_log = 0.0;
    let mut last_phase = None;

    while time < Phase::total_duration() {
        let Some((phase, progress)) = Phase::at(time) else {
            break;
        };
        if last_phase != Some(phase) {
            log::info!("[{:>5.2}s] {:?}", time, phase);
            last_phase = Some(phase);
        }

        input.borrow_mut().update(&phase.touches(progress, &mut rng));
        driver.update(FRAME_TIME);

        since_log += FRAME_TIME;
        if since_log >= LOG_INTERVAL {
            since_log -= LOG_INTERVAL;
            let transform = object.borrow();
            let (roll, pitch, yaw) = transform.rotation.euler_angles();
            log::info!(
                "[{:>5.2}s] {:?} decay {:.2} position ({:.2}, {:.2}, {:.2}) euler ({:.1}, {:.1}, {:.1})",
                time,
                driver.mode(),
                driver.decay_factor(),
                transform.position.x,
                transform.position.y,
                transform.position.z,
                roll.to_degrees(),
                pitch.to_degrees(),
                yaw.to_degrees(),
            );
        }

        time += FRAME_TIME;
    }

    driver.deactivate();
    let transform = object.borrow();
    log::info!(
        "Finished at position {:?}, rotation {:.1} degrees",
        transform.position,
        transform.rotation.angle().to_degrees()
    );
    Ok(())
}
