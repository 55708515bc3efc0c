use rand::{rngs::StdRng, Rng, SeedableRng};

/// The single seam through which the engine draws randomness.
///
/// Generators never touch a global RNG; they take `&mut impl RandomSource`,
/// so tests can replay an exact sequence.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Seeded when `seed` is given, entropy-backed otherwise.
pub fn source_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

/// Replays a fixed list of draws, wrapping around when it runs out.
///
/// Values outside `[0, 1)` are clamped into range.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        ScriptedSource { values: values.into(), cursor: 0 }
    }

    /// Draws handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0 - f64::EPSILON)
        }
    }
}
