use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use vanesync_api::models::{CoverOptions, DeviceInfo};
use vanesync_bridge::cover::{LIFT_CLOSED, Motion, TiltingCover};
use vanesync_bridge::profiles::{
    BlindProfile, CMD_CLOSE_CCW, CMD_TILT_45, CMD_TILT_90, CMD_TILT_135, CoverCapabilities,
    LouvoliteVogue, TiltTimings,
};
use vanesync_bridge::transport::MockTransport;

const OPEN_TIME: Duration = Duration::from_secs(12);
const CLOSE_TIME: Duration = Duration::from_secs(15);
const TICK: Duration = Duration::from_millis(20);

fn options() -> CoverOptions {
    CoverOptions {
        open_seconds: 12.0,
        close_seconds: 15.0,
        custom_icon: false,
        colour_icon: false,
        partial_closed: false,
        signal_repetitions: 4,
        signal_repetitions_delay_ms: 200,
    }
}

fn vogue_cover(
    options: &CoverOptions,
) -> (TiltingCover<LouvoliteVogue, MockTransport>, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let device = DeviceInfo::new("0919130400A1DB010000", "Lounge Blind");
    let cover = TiltingCover::new(
        device,
        options,
        LouvoliteVogue::new(options),
        Arc::clone(&transport),
    );

    (cover, transport)
}

#[tokio::test(start_paused = true)]
async fn test_tilt_to_step_issues_mapped_commands() {
    let table = [
        (0u8, 0x00u8, Motion::Closing),
        (1, 0x02, Motion::Opening),
        (2, 0x03, Motion::Opening),
        (3, 0x04, Motion::Opening),
        (4, 0x01, Motion::Closing),
    ];

    for (target, command, motion) in table {
        let (cover, transport) = vogue_cover(&options());

        assert_eq!(cover.tilt_to_step(target, target).await, target);
        assert_eq!(transport.sent_commands().await, vec![command]);

        match motion {
            Motion::Opening => assert!(cover.is_opening().await, "target {target}"),
            Motion::Closing => assert!(cover.is_closing().await, "target {target}"),
            Motion::Idle => unreachable!(),
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_frames_carry_configured_repetitions() {
    let (cover, transport) = vogue_cover(&options());

    cover.tilt_to_step(1, 1).await;

    let sent = transport.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].device_id, "0919130400A1DB010000");
    assert_eq!(sent[0].command, CMD_TILT_45);
    assert_eq!(sent[0].repeats, 4);
    assert_eq!(sent[0].repeat_gap, Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn test_motion_guard_rejects_overlapping_commands() {
    let (cover, transport) = vogue_cover(&options());

    assert!(cover.motion_allowed().await);
    cover.tilt_to_step(2, 2).await;
    assert!(!cover.motion_allowed().await);

    // absorbed commands return the same values as accepted ones, send
    // nothing and leave the estimate untouched
    assert_eq!(cover.tilt_to_step(0, 0).await, 0);
    assert_eq!(cover.close().await, CLOSE_TIME);
    assert_eq!(cover.open().await, OPEN_TIME);
    assert_eq!(cover.tilt_to_mid().await, OPEN_TIME);
    assert_eq!(cover.set_tilt_position(100).await, 4);
    assert_eq!(transport.sent_commands().await, vec![CMD_TILT_90]);
    assert!(cover.is_opening().await);

    time::sleep(OPEN_TIME + TICK).await;

    // only the accepted command settled; none of the rejected ones left a
    // deferred transition behind
    assert!(cover.motion_allowed().await);
    assert_eq!(cover.tilt_step().await, 2);

    time::sleep(CLOSE_TIME).await;
    assert_eq!(cover.tilt_step().await, 2);
    assert_eq!(transport.sent_commands().await, vec![CMD_TILT_90]);

    // the guard releases after settling
    assert_eq!(cover.tilt_to_step(0, 0).await, 0);
    assert!(cover.is_closing().await);
    assert_eq!(
        transport.sent_commands().await,
        vec![CMD_TILT_90, CMD_CLOSE_CCW]
    );
}

#[tokio::test(start_paused = true)]
async fn test_settle_restores_idle_at_target() {
    let (cover, transport) = vogue_cover(&options());
    cover.set_state(Motion::Idle, LIFT_CLOSED, 1).await;

    assert_eq!(cover.tilt_to_step(3, 3).await, 3);
    assert_eq!(transport.sent_commands().await, vec![CMD_TILT_135]);

    // the estimate keeps the last settled step while the command is in flight
    assert!(cover.is_opening().await);
    assert_eq!(cover.tilt_step().await, 1);
    assert_eq!(cover.tilt_position().await, 25);

    // three steps ride the slower full-close travel profile
    time::sleep(OPEN_TIME + TICK).await;
    assert!(cover.is_opening().await);

    time::sleep(CLOSE_TIME - OPEN_TIME).await;
    assert!(cover.motion_allowed().await);
    assert_eq!(cover.tilt_step().await, 3);
    assert_eq!(cover.tilt_position().await, 75);
    assert!(!cover.is_closed().await);
}

#[tokio::test(start_paused = true)]
async fn test_mid_target_rides_open_profile() {
    let (cover, transport) = vogue_cover(&options());

    // percent entry point passes the target as the heuristic steps argument
    assert_eq!(cover.set_tilt_position(50).await, 2);
    assert!(cover.is_opening().await);
    assert_eq!(transport.sent_commands().await, vec![CMD_TILT_90]);

    time::sleep(OPEN_TIME - TICK).await;
    assert!(cover.is_opening().await);

    time::sleep(2 * TICK).await;
    assert!(cover.motion_allowed().await);
    assert_eq!(cover.tilt_position().await, 50);
}

#[tokio::test(start_paused = true)]
async fn test_close_settles_fully_closed() {
    let (cover, transport) = vogue_cover(&options());
    cover.set_state(Motion::Idle, LIFT_CLOSED, 2).await;

    assert_eq!(cover.close().await, CLOSE_TIME);
    assert!(cover.is_closing().await);
    assert_eq!(transport.sent_commands().await, vec![CMD_CLOSE_CCW]);

    time::sleep(CLOSE_TIME + TICK).await;
    assert!(cover.is_closed().await);
    assert_eq!(cover.tilt_step().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_open_and_mid_tilt_share_one_command() {
    let (cover, transport) = vogue_cover(&options());

    let open_wait = cover.open().await;
    time::sleep(open_wait + TICK).await;
    assert_eq!(cover.tilt_step().await, 2);

    let mid_wait = cover.tilt_to_mid().await;
    time::sleep(mid_wait + TICK).await;
    assert_eq!(cover.tilt_step().await, 2);

    assert_eq!(open_wait, mid_wait);
    assert_eq!(
        transport.sent_commands().await,
        vec![CMD_TILT_90, CMD_TILT_90]
    );
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_keeps_estimate() {
    let (cover, transport) = vogue_cover(&options());
    transport.fail_sends(true);

    assert_eq!(cover.tilt_to_step(2, 2).await, 2);
    assert!(cover.is_opening().await);
    assert!(transport.sent().await.is_empty());

    // no feedback channel exists, so the estimate settles regardless
    time::sleep(OPEN_TIME + TICK).await;
    assert!(cover.motion_allowed().await);
    assert_eq!(cover.tilt_step().await, 2);
}

#[tokio::test]
async fn test_construction_stamps_type_label() {
    let (cover, _transport) = vogue_cover(&options());

    assert_eq!(cover.device().type_label, "Vogue Vertical");
    assert_eq!(cover.device().name, "Lounge Blind");
    assert!(cover.capabilities().supports_mid_point);
    assert!(!cover.capabilities().supports_lift);
}

#[tokio::test]
async fn test_entity_picture_disabled_without_custom_icon() {
    let (cover, _transport) = vogue_cover(&options());

    assert_eq!(cover.entity_picture().await, None);

    cover.set_state(Motion::Opening, LIFT_CLOSED, 0).await;
    assert_eq!(cover.entity_picture().await, None);
}

#[tokio::test]
async fn test_entity_picture_follows_tilt_steps() {
    let mut options = options();
    options.custom_icon = true;
    options.colour_icon = true;
    let (cover, _transport) = vogue_cover(&options);

    let cases = [
        (0u8, "/local/vanesync/vertical/inactive/00.svg"),
        (1, "/local/vanesync/vertical/active/25.svg"),
        (2, "/local/vanesync/vertical/active/50.svg"),
        (3, "/local/vanesync/vertical/active/75.svg"),
        (4, "/local/vanesync/vertical/inactive/99.svg"),
    ];

    for (step, path) in cases {
        cover.set_state(Motion::Idle, LIFT_CLOSED, step).await;
        assert_eq!(cover.entity_picture().await.as_deref(), Some(path), "step {step}");
    }
}

#[tokio::test]
async fn test_entity_picture_caches_closed_while_moving() {
    let mut options = options();
    options.custom_icon = true;
    options.colour_icon = true;
    let (cover, _transport) = vogue_cover(&options);

    // a fresh estimate is classified closed, so the first moving read is too
    cover.set_state(Motion::Opening, LIFT_CLOSED, 0).await;
    assert_eq!(
        cover.entity_picture().await.as_deref(),
        Some("/local/vanesync/vertical/inactive/move.svg")
    );

    // settling at the mid point re-classifies to not closed
    cover.set_state(Motion::Idle, LIFT_CLOSED, 2).await;
    assert_eq!(
        cover.entity_picture().await.as_deref(),
        Some("/local/vanesync/vertical/active/50.svg")
    );

    cover.set_state(Motion::Closing, LIFT_CLOSED, 2).await;
    assert_eq!(
        cover.entity_picture().await.as_deref(),
        Some("/local/vanesync/vertical/active/move.svg")
    );
}

struct StubProfile {
    timings: TiltTimings,
    sync_on_mid_point: bool,
}

impl StubProfile {
    fn new(sync_on_mid_point: bool) -> Self {
        Self {
            timings: TiltTimings {
                open: Duration::from_secs(2),
                close: Duration::from_secs(3),
                step: Duration::from_secs(1),
                sync: Duration::from_secs(10),
            },
            sync_on_mid_point,
        }
    }
}

impl BlindProfile for StubProfile {
    fn type_label(&self) -> &'static str {
        "Stub Tilt"
    }

    fn mid_steps(&self) -> u8 {
        2
    }

    fn capabilities(&self) -> CoverCapabilities {
        CoverCapabilities {
            supports_mid_point: true,
            supports_lift: false,
            lift_on_open: false,
            sync_on_mid_point: self.sync_on_mid_point,
        }
    }

    fn timings(&self) -> &TiltTimings {
        &self.timings
    }

    fn target_command(&self, target: u8) -> (Motion, u8) {
        if target < self.mid_steps() {
            (Motion::Closing, 0x10)
        } else {
            (Motion::Opening, 0x11)
        }
    }

    fn close_command(&self) -> u8 {
        0x10
    }

    fn open_command(&self) -> u8 {
        0x11
    }

    fn mid_command(&self) -> u8 {
        0x11
    }
}

fn stub_cover(sync_on_mid_point: bool) -> TiltingCover<StubProfile, MockTransport> {
    let transport = Arc::new(MockTransport::new());
    let device = DeviceInfo::new("STUB-01", "Stub Blind");

    TiltingCover::new(device, &options(), StubProfile::new(sync_on_mid_point), transport)
}

#[tokio::test(start_paused = true)]
async fn test_generic_travel_time_scales_with_steps() {
    let cover = stub_cover(false);

    cover.tilt_to_step(3, 3).await;

    time::sleep(Duration::from_secs(3) - TICK).await;
    assert!(cover.is_opening().await);

    time::sleep(2 * TICK).await;
    assert!(cover.motion_allowed().await);
    assert_eq!(cover.tilt_step().await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_sync_floor_applies_at_mid_point() {
    let cover = stub_cover(true);

    // two one-second steps, but the mid target waits out the sync move
    cover.tilt_to_step(2, 2).await;

    time::sleep(Duration::from_secs(5)).await;
    assert!(cover.is_opening().await);

    time::sleep(Duration::from_secs(5) + TICK).await;
    assert!(cover.motion_allowed().await);
    assert_eq!(cover.tilt_step().await, 2);

    // targets off the mid point keep the per-step rule
    let cover = stub_cover(true);
    cover.tilt_to_step(1, 1).await;

    time::sleep(Duration::from_secs(1) + TICK).await;
    assert!(cover.motion_allowed().await);
    assert_eq!(cover.tilt_step().await, 1);
}
