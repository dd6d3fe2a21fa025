//! Host loop driving the engine from scripted collaborators into a snapshot channel

use comfort_vignette::config::{Config, SimulationConfig, EXAMPLE_CONFIG};
use comfort_vignette::engine::MotionVignetteEngine;
use comfort_vignette::channel::ChannelKind;
use comfort_vignette::host::VignetteHost;
use comfort_vignette::pose::{PoseSample, PoseSource};
use comfort_vignette::publish::snapshot_channel;
use comfort_vignette::simulation::{FixedClock, Scenario, ScriptedPoseSource};
use nalgebra::{Point3, UnitQuaternion};
use std::sync::{Arc, Mutex};

/// Pose source whose x position is set from outside the host
struct SharedPosition(Arc<Mutex<f64>>);

impl PoseSource for SharedPosition {
    fn current_pose(&mut self) -> PoseSample {
        let x = *self.0.lock().unwrap();
        PoseSample::tracked(Point3::new(x, 0.0, 0.0), UnitQuaternion::identity())
    }
}

fn walking_host(dropout_every: usize) -> VignetteHost<ScriptedPoseSource, FixedClock> {
    let mut config = Config::default();
    config.effect.velocity.enabled = true;
    let simulation = SimulationConfig {
        scenario: Scenario::Walk,
        tracking_dropout_every: dropout_every,
        ..SimulationConfig::default()
    };
    VignetteHost::new(
        MotionVignetteEngine::new(config.effect),
        ScriptedPoseSource::from_config(&simulation),
        FixedClock::from_fps(simulation.target_fps),
    )
}

#[test]
fn test_missing_sink_is_noop_until_attached() {
    let mut host = walking_host(0);
    let stats = host.run(10);
    assert_eq!(stats.skipped_no_sink, 10);
    assert_eq!(stats.published, 0);
    assert!(host.engine().last_output().is_none());

    let (publisher, mut receiver) = snapshot_channel(4);
    host.attach_sink(Box::new(publisher));
    let snapshot = host.step().unwrap();
    assert_eq!(snapshot.frame, 0);
    // Nothing was sampled while detached, so this is a priming frame
    assert_eq!(snapshot.output.radius, 1.5);
    assert_eq!(receiver.latest(), Some(snapshot));
}

#[test]
fn test_walking_closes_vignette() {
    let mut host = walking_host(0);
    let (publisher, mut receiver) = snapshot_channel(4);
    host.attach_sink(Box::new(publisher));

    let stats = host.run(180);
    assert_eq!(stats.published, 180);

    let last = receiver.latest().unwrap();
    assert_eq!(last.frame, 179);
    assert!(last.output.radius < 1.5);
    assert!(last.output.radius >= 0.25);
}

#[test]
fn test_dropouts_skip_frames_without_gaps_in_numbering() {
    let mut host = walking_host(4);
    let (publisher, mut receiver) = snapshot_channel(64);
    host.attach_sink(Box::new(publisher));

    let stats = host.run(40);
    assert_eq!(stats.skipped_untracked, 10);
    assert_eq!(stats.published, 30);
    assert_eq!(receiver.latest().map(|s| s.frame), Some(29));
}

#[test]
fn test_preset_appearance_reaches_receiver() {
    let config = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
    let mut host = walking_host(0);
    let (publisher, mut receiver) = snapshot_channel(4);
    host.attach_sink(Box::new(publisher));
    assert_eq!(receiver.latest_appearance(), Some(config.effect.appearance));

    let strong = config.preset("strong").unwrap();
    host.apply_preset(&strong);
    assert_eq!(receiver.latest_appearance(), Some(strong.config().appearance));

    assert!(host.clear_preset());
    assert_eq!(receiver.latest_appearance(), Some(config.effect.appearance));
}

#[test]
fn test_receiver_outlives_host() {
    let mut host = walking_host(0);
    let (publisher, mut receiver) = snapshot_channel(2);
    host.attach_sink(Box::new(publisher));
    host.run(5);
    drop(host);

    assert_eq!(receiver.latest().map(|s| s.frame), Some(4));
    assert_eq!(receiver.latest().map(|s| s.frame), Some(4));
}

#[test]
fn test_render_thread_reads_snapshots() {
    let (publisher, mut receiver) = snapshot_channel(4);
    let handle = std::thread::spawn(move || {
        let mut host = walking_host(0);
        host.attach_sink(Box::new(publisher));
        host.run(90)
    });

    let stats = handle.join().unwrap();
    assert_eq!(stats.published, 90);
    assert_eq!(receiver.latest().map(|s| s.frame), Some(89));
}

#[test]
fn test_reattach_after_movement_primes_again() {
    let mut config = Config::default();
    config.effect.velocity.enabled = true;
    let position = Arc::new(Mutex::new(0.0));
    let mut host = VignetteHost::new(
        MotionVignetteEngine::new(config.effect),
        SharedPosition(position.clone()),
        FixedClock::new(0.011),
    );

    let (publisher, _receiver) = snapshot_channel(4);
    host.attach_sink(Box::new(publisher));
    host.step();
    host.step();

    let sink = host.detach_sink().unwrap();
    assert!(host.step().is_none());
    *position.lock().unwrap() = 20.0;
    host.attach_sink(sink);

    // The move made while detached is not read as one-frame velocity
    let snapshot = host.step().unwrap();
    assert_eq!(snapshot.output.radius, 1.5);
    assert_eq!(host.engine().channel_state(ChannelKind::Velocity).last_raw(), 0.0);

    *position.lock().unwrap() = 20.011;
    host.step().unwrap();
    let raw = host.engine().channel_state(ChannelKind::Velocity).last_raw();
    assert!((raw - 1.0).abs() < 1e-9);
}

#[test]
fn test_reattach_without_skipped_frames_keeps_history() {
    let mut config = Config::default();
    config.effect.velocity.enabled = true;
    let position = Arc::new(Mutex::new(0.0));
    let mut host = VignetteHost::new(
        MotionVignetteEngine::new(config.effect),
        SharedPosition(position.clone()),
        FixedClock::new(0.011),
    );

    let (publisher, _receiver) = snapshot_channel(4);
    host.attach_sink(Box::new(publisher));
    host.step();
    let sink = host.detach_sink().unwrap();
    host.attach_sink(sink);

    *position.lock().unwrap() = 0.011;
    host.step().unwrap();
    let raw = host.engine().channel_state(ChannelKind::Velocity).last_raw();
    assert!((raw - 1.0).abs() < 1e-9);
}
