use serde::{Deserialize, Serialize};

use crate::card::rest_angle;
use crate::*;

/// A single card flip, sampled against the board clock.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flip {
    cell: Cell,
    from: f64,
    reveal: bool,
    started_at: Millis,
    duration: Millis,
}

impl Flip {
    pub fn new(cell: Cell, from: f64, reveal: bool, started_at: Millis, duration: Millis) -> Self {
        Self {
            cell,
            from,
            reveal,
            started_at,
            duration: duration.max(0.),
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn reveals(&self) -> bool {
        self.reveal
    }

    pub fn ends_at(&self) -> Millis {
        self.started_at + self.duration
    }

    pub fn is_done(&self, now: Millis) -> bool {
        now >= self.ends_at()
    }

    /// Angle at `now`, moving monotonically from the starting angle to the target rest angle.
    pub fn angle_at(&self, now: Millis) -> f64 {
        let target = rest_angle(self.reveal);
        if self.duration <= 0. {
            return target;
        }
        let t = ((now - self.started_at) / self.duration).clamp(0., 1.);
        self.from + (target - self.from) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    #[test]
    fn reveal_goes_from_zero_to_pi() {
        let flip = Flip::new((0, 0), 0., true, 100., 500.);

        assert_eq!(flip.angle_at(50.), 0.);
        assert_eq!(flip.angle_at(100.), 0.);
        assert!((flip.angle_at(350.) - PI / 2.).abs() < 1e-12);
        assert_eq!(flip.angle_at(600.), PI);
        assert_eq!(flip.angle_at(10_000.), PI);
        assert!(!flip.is_done(599.));
        assert!(flip.is_done(600.));
    }

    #[test]
    fn hide_starts_from_current_angle() {
        let flip = Flip::new((1, 2), PI / 2., false, 0., 500.);

        assert_eq!(flip.angle_at(0.), PI / 2.);
        assert!((flip.angle_at(250.) - PI / 4.).abs() < 1e-12);
        assert_eq!(flip.angle_at(500.), 0.);
    }

    #[test]
    fn angle_is_monotonic() {
        let flip = Flip::new((0, 0), 0., true, 0., 500.);
        let samples: Vec<f64> = (0..=60).map(|i| flip.angle_at(f64::from(i) * 10.)).collect();

        assert!(samples.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn zero_duration_snaps_to_target() {
        let flip = Flip::new((0, 0), 0., true, 10., 0.);

        assert_eq!(flip.angle_at(10.), PI);
        assert!(flip.is_done(10.));
    }
}
