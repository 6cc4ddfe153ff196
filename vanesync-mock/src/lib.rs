use std::sync::Arc;
use std::time::Duration;

use tokio::time;

use vanesync_api::models::CoverOptions;
use vanesync_bridge::cover::TiltingCover;
use vanesync_bridge::profiles::{BlindProfile, LouvoliteVogue};
use vanesync_bridge::transport::RfTransport;

use crate::settings::Settings;
use crate::transceiver::MockTransceiver;

pub mod settings;
mod transceiver;

/// Drives every configured cover through a scripted tilt scenario over a
/// simulated radio link.
pub async fn run(settings: &Arc<Settings>) {
    let transceiver = Arc::new(MockTransceiver::new());
    let gap = Duration::from_secs(settings.mock.action_gap_secs);

    for entry in &settings.cover {
        let profile = LouvoliteVogue::new(&entry.options);
        let cover = TiltingCover::new(
            entry.device(),
            &entry.options,
            profile,
            Arc::clone(&transceiver),
        );

        drive_blind(&cover, &entry.options, gap).await;
    }

    tracing::info!(
        "Scenario complete, {} frames on air",
        transceiver.history().await.len()
    );
}

async fn drive_blind<T>(
    cover: &TiltingCover<LouvoliteVogue, T>,
    options: &CoverOptions,
    gap: Duration,
) where
    T: RfTransport,
{
    let travel = Duration::from_secs_f32(options.open_seconds.max(options.close_seconds));

    let wait = cover.close().await;
    report(cover).await;
    time::sleep(wait + gap).await;
    report(cover).await;

    for percent in [25, 75] {
        let step = cover.set_tilt_position(percent).await;
        tracing::info!("Requested {}% tilt as step {}", percent, step);
        report(cover).await;
        time::sleep(travel + gap).await;
        report(cover).await;
    }

    let wait = cover.tilt_to_mid().await;
    // a command while the louvres are still turning is silently absorbed
    cover.close().await;
    report(cover).await;
    time::sleep(wait + gap).await;
    report(cover).await;

    let wait = cover.open().await;
    time::sleep(wait + gap).await;
    report(cover).await;
}

async fn report<P, T>(cover: &TiltingCover<P, T>)
where
    P: BlindProfile,
    T: RfTransport,
{
    let state = if cover.is_opening().await {
        "opening"
    } else if cover.is_closing().await {
        "closing"
    } else if cover.is_closed().await {
        "closed"
    } else {
        "open"
    };
    let device_id = &cover.device().device_id;
    let tilt = cover.tilt_position().await;

    match cover.entity_picture().await {
        Some(picture) => {
            tracing::info!("Blind {} at {}% tilt, {} ({})", device_id, tilt, state, picture)
        }
        None => tracing::info!("Blind {} at {}% tilt, {}", device_id, tilt, state),
    }
}
