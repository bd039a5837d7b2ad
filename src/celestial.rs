//! Celestial reference table
//!
//! Static orbital facts used as animation-speed inputs and as flavor text.
//! Nothing here is mutated at runtime.

use serde::Serialize;

const HOURS_PER_DAY: f64 = 24.0;
const HOURS_PER_YEAR: f64 = 8760.0;

/// What kind of object a body is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Moon,
    Planet,
}

/// Display-only attributes handed to the renderer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DisplayMetadata {
    pub color: &'static str,
    pub radius: f64,
    pub orbit_radius: f64,
    pub kind: BodyKind,
}

/// A body with its real sidereal orbital period
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CelestialBody {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    pub orbital_period_hours: f64,
    pub display: DisplayMetadata,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Comet {
    pub name: &'static str,
    pub period_years: f64,
    pub next_perihelion_year: u16,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Spacecraft {
    pub name: &'static str,
    pub distance_km: f64,
    pub speed_km_s: f64,
}

/// Number of bodies in the reference table
pub const BODY_COUNT: usize = 6;

/// Reference bodies, fastest orbital period first
pub const BODIES: [CelestialBody; BODY_COUNT] = [
    CelestialBody {
        name: "Phobos",
        parent: Some("Mars"),
        orbital_period_hours: 7.654,
        display: DisplayMetadata { color: "#b08d74", radius: 0.12, orbit_radius: 1.6, kind: BodyKind::Moon },
    },
    CelestialBody {
        name: "Io",
        parent: Some("Jupiter"),
        orbital_period_hours: 42.456,
        display: DisplayMetadata { color: "#e8d36a", radius: 0.18, orbit_radius: 2.3, kind: BodyKind::Moon },
    },
    CelestialBody {
        name: "Europa",
        parent: Some("Jupiter"),
        orbital_period_hours: 85.228,
        display: DisplayMetadata { color: "#c9b89a", radius: 0.16, orbit_radius: 3.0, kind: BodyKind::Moon },
    },
    CelestialBody {
        name: "Moon",
        parent: Some("Earth"),
        orbital_period_hours: 655.72,
        display: DisplayMetadata { color: "#bfbfbf", radius: 0.22, orbit_radius: 3.8, kind: BodyKind::Moon },
    },
    CelestialBody {
        name: "Mercury",
        parent: Some("Sun"),
        orbital_period_hours: 2111.28,
        display: DisplayMetadata { color: "#8c7f77", radius: 0.25, orbit_radius: 4.7, kind: BodyKind::Planet },
    },
    CelestialBody {
        name: "Earth",
        parent: Some("Sun"),
        orbital_period_hours: 8766.15,
        display: DisplayMetadata { color: "#3d7bd9", radius: 0.35, orbit_radius: 5.8, kind: BodyKind::Planet },
    },
];

pub const COMETS: [Comet; 3] = [
    Comet { name: "Halley", period_years: 75.3, next_perihelion_year: 2061 },
    Comet { name: "Encke", period_years: 3.3, next_perihelion_year: 2027 },
    Comet { name: "Swift-Tuttle", period_years: 133.3, next_perihelion_year: 2126 },
];

pub const SPACECRAFT: Spacecraft = Spacecraft {
    name: "Voyager 1",
    distance_km: 24.9e9,
    speed_km_s: 16.9,
};

/// Format an orbital period with the largest sensible unit (h, d or yr)
pub fn format_orbital_period(hours: f64) -> String {
    if hours < HOURS_PER_DAY {
        format!("{:.2}h", hours)
    } else if hours < HOURS_PER_YEAR {
        format!("{:.1}d", hours / HOURS_PER_DAY)
    } else {
        format!("{:.1}yr", hours / HOURS_PER_YEAR)
    }
}

/// How many revolutions `body` completes in `elapsed_seconds`
pub fn orbits_completed(body: &CelestialBody, elapsed_seconds: f64) -> f64 {
    elapsed_seconds / (body.orbital_period_hours * 3600.0)
}

/// Fact appended to the countdown completion alert
pub fn completion_fact() -> String {
    let body = &BODIES[0];
    let comet = &COMETS[0];
    format!(
        "{} completes an orbit of {} every {}. {} returns to perihelion in {}.",
        body.name,
        body.parent.unwrap_or("its primary"),
        format_orbital_period(body.orbital_period_hours),
        comet.name,
        comet.next_perihelion_year,
    )
}

/// Moons in the table with their formatted periods, for prompt text
pub fn moon_periods() -> impl Iterator<Item = (&'static str, String)> {
    BODIES
        .iter()
        .filter(|body| body.display.kind == BodyKind::Moon)
        .map(|body| (body.name, format_orbital_period(body.orbital_period_hours)))
}
