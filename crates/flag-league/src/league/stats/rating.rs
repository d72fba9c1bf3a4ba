use serde::Serialize;

const COMPONENT_CAP: f64 = 2.375;

fn clamp_component(value: f64) -> f64 {
    value.clamp(0.0, COMPONENT_CAP)
}

/// Passer rating without the yards-per-attempt component.
///
/// Each component is clamped to [0, 2.375] before averaging; zero attempts
/// rate 0.
pub fn passer_rating(completions: u32, attempts: u32, touchdowns: u32, interceptions: u32) -> f64 {
    if attempts == 0 {
        return 0.0;
    }

    let attempts = f64::from(attempts);
    let completion = clamp_component((f64::from(completions) / attempts - 0.3) * 5.0);
    let touchdown = clamp_component(f64::from(touchdowns) / attempts * 20.0);
    let interception = clamp_component(COMPONENT_CAP - f64::from(interceptions) / attempts * 25.0);

    (completion + touchdown + interception) / 3.0 * 100.0
}

/// Passing counters accumulated for one quarterback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassingTotals {
    pub completions: u32,
    pub attempts: u32,
    pub touchdowns: u32,
    pub interceptions: u32,
}

impl PassingTotals {
    pub fn rating(&self) -> f64 {
        passer_rating(
            self.completions,
            self.attempts,
            self.touchdowns,
            self.interceptions,
        )
    }
}
