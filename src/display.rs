//! Terminal rendering of the pinwheel and its readout

use chrono::{Local, NaiveDate};
use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;

use crate::animation::RotationState;
use crate::orchestrator::DisplayState;

const BLADES: [char; 4] = ['|', '/', '-', '\\'];

/// Glyph for the blade position at `rotation`
#[must_use]
pub fn blade(rotation: RotationState) -> char {
    // the glyph pattern repeats every 180°
    let slot = (rotation.angle_deg.rem_euclid(180.0) / 45.0) as usize;
    BLADES[slot.min(BLADES.len() - 1)]
}

/// One status line: place, pinwheel, speed, direction and a status note.
///
/// Future dates are flagged as unpredictable. Past dates show a searching
/// note while their reading loads.
#[must_use]
pub fn render_line(state: &DisplayState, rotation: RotationState, today: NaiveDate) -> String {
    let result = &state.result;
    let mut line = format!(
        "{} [{}] {}  {} ({})  {}",
        result.location_name,
        blade(rotation),
        result.format_speed(),
        result.format_direction(),
        result.cardinal(),
        state.query.date,
    );
    if result.failed && !state.loading {
        line.push_str("  Could not reach the weather service");
    } else if state.query.is_future(today) {
        line.push_str("  Future is unpredictable!");
    } else if state.loading {
        line.push_str("  Searching archive...");
    }
    line
}

/// Redraw the status line in place every `period` until `stop` resolves.
pub async fn draw_until<W: Write>(
    out: &mut W,
    states: &watch::Receiver<DisplayState>,
    rotation: &watch::Receiver<RotationState>,
    period: Duration,
    stop: impl Future<Output = ()>,
) -> std::io::Result<()> {
    let mut redraw = tokio::time::interval(period);
    tokio::pin!(stop);

    loop {
        tokio::select! {
            biased;
            () = &mut stop => break,
            _ = redraw.tick() => {
                let line = render_line(&states.borrow(), *rotation.borrow(), Local::now().date_naive());
                write!(out, "\r\x1b[2K{line}")?;
                out.flush()?;
            }
        }
    }
    writeln!(out)
}
