//! Sources of randomness for rolling.

use rand::Rng;
use rand::rngs::StdRng;

/// Something that yields uniform values in `[0, 1)`.
///
/// A die of `n` sides is drawn as `floor(unit * n) + 1`. Rolling is a pure
/// function of the expression and the values drawn, so a fixed source gives
/// fully deterministic results.
pub trait DieSource {
    /// Draw the next value in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

impl DieSource for StdRng {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl<S: DieSource + ?Sized> DieSource for &mut S {
    fn unit(&mut self) -> f64 {
        (**self).unit()
    }
}

/// A source that replays a fixed sequence, wrapping around at the end.
///
/// Used for tests and for replaying a recorded roll.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    units: Vec<f64>,
    next: usize,
}

impl Scripted {
    /// Replay raw unit values.
    pub fn new(units: Vec<f64>) -> Self {
        Self { units, next: 0 }
    }

    /// Replay values that draw exactly `faces` on dice of `sides` sides.
    pub fn faces(sides: u32, faces: &[u32]) -> Self {
        Self::default().then_faces(sides, faces)
    }

    /// Append values that draw exactly `faces` on dice of `sides` sides.
    pub fn then_faces(mut self, sides: u32, faces: &[u32]) -> Self {
        let sides = f64::from(sides.max(1));
        self.units
            .extend(faces.iter().map(|&face| (f64::from(face) - 0.5) / sides));
        self
    }

    /// How many values have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl DieSource for Scripted {
    fn unit(&mut self) -> f64 {
        if self.units.is_empty() {
            return 0.0;
        }
        let value = self.units[self.next % self.units.len()];
        self.next += 1;
        value
    }
}
