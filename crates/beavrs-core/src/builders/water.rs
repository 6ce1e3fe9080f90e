use crate::common::constants::{
    AVOGADRO, B10_ABUNDANCE, B11_ABUNDANCE, BORON_MASS, CONTINUOUS_XS, H1_ABUNDANCE,
    H2_ABUNDANCE, O16_ABUNDANCE, O17_ABUNDANCE, O18_ABUNDANCE, WATER_MASS,
};
use crate::domain::Nuclide;

/// Atom densities (atoms/b-cm) of light water carrying dissolved boron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoratedWater {
    /// Mixture density in g/cc.
    pub density: f64,
    pub b10: f64,
    pub b11: f64,
    pub h1: f64,
    pub h2: f64,
    pub o16: f64,
    pub o17: f64,
    pub o18: f64,
}

impl BoratedWater {
    /// `density` is the mixture density; `boron_ppm` is parts per million of
    /// natural boron by weight.
    pub fn new(density: f64, boron_ppm: f64) -> Self {
        let boron_fraction = boron_ppm * 1.0e-6;
        let molecules = density * (1.0 - boron_fraction) * AVOGADRO / WATER_MASS;
        let boron = density * boron_fraction * AVOGADRO / BORON_MASS;

        Self {
            density,
            b10: boron * B10_ABUNDANCE,
            b11: boron * B11_ABUNDANCE,
            h1: 2.0 * molecules * H1_ABUNDANCE,
            h2: 2.0 * molecules * H2_ABUNDANCE,
            o16: molecules * O16_ABUNDANCE,
            o17: molecules * O17_ABUNDANCE,
            o18: molecules * O18_ABUNDANCE,
        }
    }

    /// Nuclide list with O-18 folded into O-17, which has no O-18 library.
    pub fn nuclides(&self) -> Vec<Nuclide> {
        [
            ("B-10", self.b10),
            ("B-11", self.b11),
            ("H-1", self.h1),
            ("H-2", self.h2),
            ("O-16", self.o16),
            ("O-17", self.o17 + self.o18),
        ]
        .into_iter()
        .map(|(name, density)| Nuclide::atom(name, CONTINUOUS_XS, density))
        .collect()
    }

    pub fn total(&self) -> f64 {
        self.b10 + self.b11 + self.h1 + self.h2 + self.o16 + self.o17 + self.o18
    }
}

#[cfg(test)]
mod tests {
    use super::BoratedWater;

    #[test]
    fn boron_isotopes_follow_natural_abundance() {
        let water = BoratedWater::new(0.73986, 975.0);
        let boron = water.b10 + water.b11;
        assert!((water.b10 / boron - 0.199).abs() <= 1.0e-12);
        assert!(water.b10 > 0.0);
    }

    #[test]
    fn hydrogen_is_twice_oxygen() {
        let water = BoratedWater::new(0.73986, 975.0);
        let hydrogen = water.h1 + water.h2;
        let oxygen = water.o16 + water.o17 + water.o18;
        assert!((hydrogen - 2.0 * oxygen).abs() <= 1.0e-12);
        assert!((oxygen - 0.02472).abs() <= 5.0e-5, "oxygen {oxygen}");
    }

    #[test]
    fn unborated_water_has_no_boron() {
        let water = BoratedWater::new(1.0, 0.0);
        assert_eq!(water.b10, 0.0);
        assert_eq!(water.b11, 0.0);
        assert!((water.total() - 3.0 * 0.602_214_129 / 18.015_28).abs() <= 1.0e-12);
    }

    #[test]
    fn nuclide_list_folds_oxygen_18() {
        let water = BoratedWater::new(0.73986, 975.0);
        let nuclides = water.nuclides();
        let names: Vec<_> = nuclides.iter().map(|nuclide| nuclide.name.as_str()).collect();
        assert_eq!(names, ["B-10", "B-11", "H-1", "H-2", "O-16", "O-17"]);
        assert!((nuclides[5].fraction - (water.o17 + water.o18)).abs() <= 1.0e-18);
    }
}
