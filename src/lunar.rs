//! Named lunar phases and the fixed set of phases the diagrams are rendered for.
//!
//! A phase is a fraction of the synodic cycle: 0.0 = new moon, 0.5 = full moon,
//! wrapping back to new at 1.0.

use core::f32::consts::TAU;
use core::fmt;

/// One of the eight traditional phase names, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseName {
    NewMoon,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    FullMoon,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    /// All phases in cycle order, starting at new moon.
    pub const ALL: [PhaseName; 8] = [
        PhaseName::NewMoon,
        PhaseName::WaxingCrescent,
        PhaseName::FirstQuarter,
        PhaseName::WaxingGibbous,
        PhaseName::FullMoon,
        PhaseName::WaningGibbous,
        PhaseName::LastQuarter,
        PhaseName::WaningCrescent,
    ];

    /// Bucket a phase fraction into one of eight equal intervals.
    ///
    /// `floor(phase × 8) mod 8`; out-of-range fractions wrap, so -0.1 is a
    /// waning crescent and 1.0 is a new moon again.
    pub fn from_fraction(phase: f32) -> Self {
        let index = ((phase * 8.0).floor() as i64).rem_euclid(8) as usize;
        Self::ALL[index]
    }

    /// Position in the cycle (0 = new, 4 = full).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Representative fraction for this phase: the start of its interval.
    pub fn fraction(self) -> f32 {
        self.index() as f32 / 8.0
    }

    /// Display label, e.g. "Waxing Gibbous".
    pub fn label(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }

    /// Output file stem, e.g. "waxing_gibbous".
    pub fn file_stem(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "new_moon",
            PhaseName::WaxingCrescent => "waxing_crescent",
            PhaseName::FirstQuarter => "first_quarter",
            PhaseName::WaxingGibbous => "waxing_gibbous",
            PhaseName::FullMoon => "full_moon",
            PhaseName::WaningGibbous => "waning_gibbous",
            PhaseName::LastQuarter => "last_quarter",
            PhaseName::WaningCrescent => "waning_crescent",
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed `(file stem, fraction)` list the driver renders.
pub fn reference_phases() -> impl Iterator<Item = (&'static str, f32)> {
    PhaseName::ALL
        .into_iter()
        .map(|name| (name.file_stem(), name.fraction()))
}

/// Illuminated fraction of the disc (0–1), simple cosine model.
pub fn illuminated_fraction(phase: f32) -> f32 {
    (1.0 - (phase * TAU).cos()) / 2.0
}
