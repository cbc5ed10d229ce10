use super::App;
use crate::event::Event;

impl App {
    pub(super) fn log_event(tick: u64, ev: &Event) {
        use crate::event::Event as E;
        match ev {
            E::Tick => {
                log::trace!(target: "events", "[tick {}] Tick", tick);
            }
            E::MovementRequested { dt_ms } => {
                log::trace!(target: "events", "[tick {}] MovementRequested dt_ms={:.1}", tick, dt_ms);
            }
            E::LookRequested { dx, dy } => {
                log::trace!(target: "events", "[tick {}] LookRequested dx={:.1} dy={:.1}", tick, dx, dy);
            }
            E::ZoomRequested { delta } => {
                log::debug!(target: "events", "[tick {}] ZoomRequested delta={:.1}", tick, delta);
            }
            E::EditRequested { action } => {
                log::info!(target: "events", "[tick {}] EditRequested {:?}", tick, action);
            }
            E::EscapePressed => {
                log::info!(target: "events", "[tick {}] EscapePressed", tick);
            }
            E::MenuActionRequested { action } => {
                log::info!(target: "events", "[tick {}] MenuActionRequested {:?}", tick, action);
            }
            E::CaptureChanged { captured } => {
                log::info!(
                    target: "events",
                    "[tick {}] CaptureChanged {}",
                    tick,
                    if *captured { "captured" } else { "released" }
                );
            }
            E::CaptureGraceExpired => {
                log::debug!(target: "events", "[tick {}] CaptureGraceExpired", tick);
            }
            E::BlockPlaced { coord, slot } => {
                log::info!(target: "events", "[tick {}] BlockPlaced {} slot={}", tick, coord, slot);
            }
            E::BlockRemoved { coord } => {
                log::info!(target: "events", "[tick {}] BlockRemoved {}", tick, coord);
            }
            E::EditRejected { action, reason } => {
                log::info!(target: "events", "[tick {}] EditRejected {:?}: {}", tick, action, reason);
            }
            E::ModeChanged { from, to } => {
                log::info!(target: "events", "[tick {}] ModeChanged {:?} -> {:?}", tick, from, to);
            }
            E::SettingsChanged {
                strafe_mode,
                pointer_sensitivity,
            } => {
                log::info!(
                    target: "events",
                    "[tick {}] SettingsChanged strafe={} sensitivity={}",
                    tick,
                    strafe_mode,
                    pointer_sensitivity
                );
            }
        }
    }
}
