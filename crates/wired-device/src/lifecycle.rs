//! Device lifecycle controller.
//!
//! Orchestrates the ordered command sequence that pauses the platform's
//! runtime services before a filesystem mutation and brings them back up
//! afterwards: park the robot in a safe idle behavior, stop the top-level
//! target, stop the camera daemons, mutate (caller-controlled), start the
//! camera daemons, start the target.
//!
//! Pacing is fixed settle delays, not acknowledgments: the controller
//! submits each command and waits a constant duration for it to take
//! effect. Callers that need certainty use the readiness hooks
//! [`await_stopped`](DeviceLifecycle::await_stopped) /
//! [`await_running`](DeviceLifecycle::await_running) instead of trusting
//! the delays.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::channel::CommandChannel;
use crate::error::{DeviceError, Result};
use crate::services::{ServiceController, SubmitStatus};

/// Platform systemd units the controller sequences.
pub mod units {
    /// Top-level target that owns the robot's runtime services.
    pub const ROBOT_TARGET: &str = "anki-robot.target";
    /// Camera pipeline daemon.
    pub const ANKI_CAMERA: &str = "mm-anki-camera";
    /// Low-level camera daemon.
    pub const QCAMERA_DAEMON: &str = "mm-qcamera-daemon";
}

/// Engine behaviors the controller selects.
pub mod behaviors {
    /// Idle behavior that keeps the robot still and safe while services
    /// are being stopped.
    pub const SAFE_IDLE: &str = "DevBaseBehavior";
}

/// Fixed settle delays between lifecycle steps.
#[derive(Debug, Clone)]
pub struct LifecycleTiming {
    /// After the safe-idle behavior command, before stopping anything.
    pub behavior_settle: Duration,
    /// Between stopping the target and stopping the camera daemons.
    pub stop_gap: Duration,
    /// After the full stop batch has been submitted.
    pub stop_settle: Duration,
    /// Between starting the camera daemons and starting the target.
    pub start_gap: Duration,
    /// After the full start batch has been submitted.
    pub start_settle: Duration,
}

impl Default for LifecycleTiming {
    fn default() -> Self {
        Self {
            behavior_settle: Duration::from_secs(1),
            stop_gap: Duration::from_secs(1),
            stop_settle: Duration::from_secs(4),
            start_gap: Duration::from_secs(1),
            start_settle: Duration::from_secs(3),
        }
    }
}

impl LifecycleTiming {
    /// Zero delays. Test hook.
    pub fn immediate() -> Self {
        Self {
            behavior_settle: Duration::ZERO,
            stop_gap: Duration::ZERO,
            stop_settle: Duration::ZERO,
            start_gap: Duration::ZERO,
            start_settle: Duration::ZERO,
        }
    }
}

/// Interval between readiness probes.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Coarse state machine over the platform's services:
/// `Running -> Quiescing -> Stopped -> Starting -> Running`.
pub struct DeviceLifecycle {
    services: Arc<dyn ServiceController>,
    channel: CommandChannel,
    timing: LifecycleTiming,
}

impl DeviceLifecycle {
    pub fn new(services: Arc<dyn ServiceController>) -> Self {
        Self {
            services,
            channel: CommandChannel::new(),
            timing: LifecycleTiming::default(),
        }
    }

    pub fn with_channel(mut self, channel: CommandChannel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_timing(mut self, timing: LifecycleTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Quiesce the platform: select the safe idle behavior, then stop the
    /// top-level target followed by the camera daemons.
    ///
    /// Returns the aggregated submission status; the platform is not
    /// guaranteed stopped when this returns, only that every stop command
    /// has been submitted and the settle delays have elapsed.
    pub async fn quiesce(&self) -> SubmitStatus {
        self.channel.send_behavior(behaviors::SAFE_IDLE).await;
        sleep(self.timing.behavior_settle).await;

        let mut status = self.services.stop_unit(units::ROBOT_TARGET).await;
        sleep(self.timing.stop_gap).await;
        status = status.merge(self.services.stop_unit(units::ANKI_CAMERA).await);
        status = status.merge(self.services.stop_unit(units::QCAMERA_DAEMON).await);
        sleep(self.timing.stop_settle).await;
        status
    }

    /// Resume the platform: start the camera daemons, then the top-level
    /// target. Same submitted-not-confirmed contract as
    /// [`quiesce`](Self::quiesce).
    pub async fn resume(&self) -> SubmitStatus {
        let mut status = self.services.start_unit(units::QCAMERA_DAEMON).await;
        status = status.merge(self.services.start_unit(units::ANKI_CAMERA).await);
        sleep(self.timing.start_gap).await;
        status = status.merge(self.services.start_unit(units::ROBOT_TARGET).await);
        sleep(self.timing.start_settle).await;
        status
    }

    /// Restart without a mutation in between: [`quiesce`](Self::quiesce)
    /// immediately followed by [`resume`](Self::resume).
    pub async fn restart(&self) -> SubmitStatus {
        let stopped = self.quiesce().await;
        stopped.merge(self.resume().await)
    }

    /// Poll until every sequenced unit reports inactive.
    pub async fn await_stopped(&self, timeout: Duration) -> Result<()> {
        self.await_state(false, timeout, "stopped").await
    }

    /// Poll until every sequenced unit reports active.
    pub async fn await_running(&self, timeout: Duration) -> Result<()> {
        self.await_state(true, timeout, "running").await
    }

    async fn await_state(
        &self,
        wanted_active: bool,
        timeout: Duration,
        label: &'static str,
    ) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let mut settled = true;
            for unit in [units::ROBOT_TARGET, units::ANKI_CAMERA, units::QCAMERA_DAEMON] {
                if self.services.is_active(unit).await? != wanted_active {
                    settled = false;
                    break;
                }
            }
            if settled {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(DeviceError::Timeout(label));
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every submitted command in order.
    struct RecordingController {
        log: Mutex<Vec<String>>,
        active: Mutex<bool>,
    }

    impl RecordingController {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                log: Mutex::new(Vec::new()),
                active: Mutex::new(true),
            })
        }

        fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ServiceController for RecordingController {
        async fn stop_unit(&self, unit: &str) -> SubmitStatus {
            self.log.lock().unwrap().push(format!("stop:{unit}"));
            *self.active.lock().unwrap() = false;
            SubmitStatus::Confirmed
        }

        async fn start_unit(&self, unit: &str) -> SubmitStatus {
            self.log.lock().unwrap().push(format!("start:{unit}"));
            *self.active.lock().unwrap() = true;
            SubmitStatus::Confirmed
        }

        async fn is_active(&self, _unit: &str) -> Result<bool> {
            Ok(*self.active.lock().unwrap())
        }
    }

    fn lifecycle(services: Arc<RecordingController>) -> DeviceLifecycle {
        // Unreachable channel endpoint: behavior commands are dropped,
        // which must not disturb the sequencing under test.
        DeviceLifecycle::new(services)
            .with_channel(CommandChannel::with_url("ws://127.0.0.1:9/socket"))
            .with_timing(LifecycleTiming::immediate())
    }

    #[tokio::test]
    async fn quiesce_stops_target_before_cameras() {
        let services = RecordingController::new();
        let status = lifecycle(Arc::clone(&services)).quiesce().await;

        assert_eq!(status, SubmitStatus::Confirmed);
        assert_eq!(
            services.log(),
            vec![
                "stop:anki-robot.target",
                "stop:mm-anki-camera",
                "stop:mm-qcamera-daemon",
            ]
        );
    }

    #[tokio::test]
    async fn resume_starts_cameras_before_target() {
        let services = RecordingController::new();
        let status = lifecycle(Arc::clone(&services)).resume().await;

        assert_eq!(status, SubmitStatus::Confirmed);
        assert_eq!(
            services.log(),
            vec![
                "start:mm-qcamera-daemon",
                "start:mm-anki-camera",
                "start:anki-robot.target",
            ]
        );
    }

    #[tokio::test]
    async fn restart_is_quiesce_then_resume_with_nothing_between() {
        let services = RecordingController::new();
        lifecycle(Arc::clone(&services)).restart().await;

        assert_eq!(
            services.log(),
            vec![
                "stop:anki-robot.target",
                "stop:mm-anki-camera",
                "stop:mm-qcamera-daemon",
                "start:mm-qcamera-daemon",
                "start:mm-anki-camera",
                "start:anki-robot.target",
            ]
        );
    }

    #[tokio::test]
    async fn await_stopped_resolves_after_quiesce() {
        let services = RecordingController::new();
        let lifecycle = lifecycle(Arc::clone(&services));

        lifecycle.quiesce().await;
        lifecycle
            .await_stopped(Duration::from_secs(1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn await_stopped_times_out_while_running() {
        let services = RecordingController::new();
        let result = lifecycle(services)
            .await_stopped(Duration::ZERO)
            .await;
        assert!(matches!(result, Err(DeviceError::Timeout("stopped"))));
    }
}
