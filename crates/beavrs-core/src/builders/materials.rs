use super::loading::{CORE_LOADING, Enrichment};
use super::water::BoratedWater;
use crate::common::config::WaterConfig;
use crate::common::constants::{CONTINUOUS_XS, LIGHT_WATER_SAB, LIGHT_WATER_SAB_XS};
use crate::domain::{BuildResult, Density, Material, MaterialId, Nuclide};
use crate::model::ModelContext;
use std::collections::HashMap;
use tracing::info;

/// Ids of every material the core model uses.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialLibrary {
    pub water_mod: MaterialId,
    /// Coolant per core position label.
    pub coolant: HashMap<&'static str, MaterialId>,
    pub helium: MaterialId,
    pub air: MaterialId,
    pub inconel: MaterialId,
    pub ss304: MaterialId,
    pub carbon_steel: MaterialId,
    pub zirc: MaterialId,
    pub uo2_16: MaterialId,
    pub uo2_24: MaterialId,
    pub uo2_31: MaterialId,
    pub control_rod: MaterialId,
    pub borosilicate: MaterialId,
}

impl MaterialLibrary {
    pub fn fuel(&self, enrichment: Enrichment) -> MaterialId {
        match enrichment {
            Enrichment::Low => self.uo2_16,
            Enrichment::Medium => self.uo2_24,
            Enrichment::High => self.uo2_31,
        }
    }

    /// Coolant of `position`, or the moderator for labels outside the core.
    pub fn coolant_for(&self, position: &str) -> MaterialId {
        self.coolant
            .get(position)
            .copied()
            .unwrap_or(self.water_mod)
    }
}

const HELIUM: &[(&str, f64)] = &[
    ("He-4", 2.4044e-04),
];

const AIR: &[(&str, f64)] = &[
    ("C-Nat", 6.8296e-09),
    ("O-16", 5.2864e-06),
    ("O-17", 1.2877e-08),
    ("N-14", 1.9681e-05),
    ("N-15", 7.1900e-08),
    ("Ar-36", 7.9414e-10),
    ("Ar-38", 1.4915e-10),
    ("Ar-40", 2.3506e-07),
];

const INCONEL_718: &[(&str, f64)] = &[
    ("Si-28", 5.6753e-04),
    ("Si-29", 2.8831e-05),
    ("Si-30", 1.9028e-05),
    ("Cr-50", 7.8239e-04),
    ("Cr-52", 1.5088e-02),
    ("Cr-53", 1.7108e-03),
    ("Cr-54", 4.2586e-04),
    ("Mn-55", 7.8201e-04),
    ("Fe-54", 1.4797e-03),
    ("Fe-56", 2.3229e-02),
    ("Fe-57", 5.3645e-04),
    ("Fe-58", 7.1392e-05),
    ("Ni-58", 2.9320e-02),
    ("Ni-60", 1.1294e-02),
    ("Ni-61", 4.9094e-04),
    ("Ni-62", 1.5653e-03),
    ("Ni-64", 3.9864e-04),
];

const SS304: &[(&str, f64)] = &[
    ("Si-28", 9.5274e-04),
    ("Si-29", 4.8400e-05),
    ("Si-30", 3.1943e-05),
    ("Cr-50", 7.6778e-04),
    ("Cr-52", 1.4806e-02),
    ("Cr-53", 1.6789e-03),
    ("Cr-54", 4.1791e-04),
    ("Mn-55", 1.7604e-03),
    ("Fe-54", 3.4620e-03),
    ("Fe-56", 5.4345e-02),
    ("Fe-57", 1.2551e-03),
    ("Fe-58", 1.6703e-04),
    ("Ni-58", 5.6089e-03),
    ("Ni-60", 2.1605e-03),
    ("Ni-61", 9.3917e-05),
    ("Ni-62", 2.9945e-04),
    ("Ni-64", 7.6261e-05),
];

const CARBON_STEEL: &[(&str, f64)] = &[
    ("C-Nat", 9.7772e-04),
    ("Si-28", 4.2417e-04),
    ("Si-29", 2.1548e-05),
    ("Si-30", 1.4221e-05),
    ("Mn-55", 1.1329e-03),
    ("P-31", 3.7913e-05),
    ("Mo-92", 3.7965e-05),
    ("Mo-94", 2.3725e-05),
    ("Mo-96", 4.2875e-05),
    ("Mo-97", 2.4573e-05),
    ("Mo-98", 6.2179e-05),
    ("Mo-100", 2.4856e-05),
    ("Fe-54", 4.7714e-03),
    ("Fe-56", 7.4900e-02),
    ("Fe-57", 1.7298e-03),
    ("Fe-58", 2.3020e-04),
    ("Ni-58", 2.9965e-04),
    ("Ni-60", 1.1543e-04),
    ("Ni-61", 5.0175e-06),
    ("Ni-62", 1.5998e-05),
    ("Ni-64", 4.0742e-06),
];

const ZIRCALOY_4: &[(&str, f64)] = &[
    ("O-16", 3.0743e-04),
    ("O-17", 7.4887e-07),
    ("Cr-50", 3.2962e-06),
    ("Cr-52", 6.3564e-05),
    ("Cr-53", 7.2076e-06),
    ("Cr-54", 1.7941e-06),
    ("Fe-54", 8.6699e-06),
    ("Fe-56", 1.3610e-04),
    ("Fe-57", 3.1431e-06),
    ("Fe-58", 4.1829e-07),
    ("Zr-90", 2.1827e-02),
    ("Zr-91", 4.7600e-03),
    ("Zr-92", 7.2758e-03),
    ("Zr-94", 7.3734e-03),
    ("Zr-96", 1.1879e-03),
    ("Sn-112", 4.6735e-06),
    ("Sn-114", 3.1799e-06),
    ("Sn-115", 1.6381e-06),
    ("Sn-116", 7.0055e-05),
    ("Sn-117", 3.7003e-05),
    ("Sn-118", 1.1669e-04),
    ("Sn-119", 4.1387e-05),
    ("Sn-120", 1.5697e-04),
    ("Sn-122", 2.2308e-05),
    ("Sn-124", 2.7897e-05),
];

const UO2_16: &[(&str, f64)] = &[
    ("U-234", 3.0131e-06),
    ("U-235", 3.7503e-04),
    ("U-238", 2.2626e-02),
    ("O-16", 4.5896e-02),
    ("O-17", 1.1180e-04),
];

const UO2_24: &[(&str, f64)] = &[
    ("U-234", 4.4843e-06),
    ("U-235", 5.5815e-04),
    ("U-238", 2.2408e-02),
    ("O-16", 4.5829e-02),
    ("O-17", 1.1164e-04),
];

const UO2_31: &[(&str, f64)] = &[
    ("U-234", 5.7988e-06),
    ("U-235", 7.2176e-04),
    ("U-238", 2.2254e-02),
    ("O-16", 4.5851e-02),
    ("O-17", 1.1169e-04),
];

const AG_IN_CD: &[(&str, f64)] = &[
    ("Ag-107", 2.3523e-02),
    ("Ag-109", 2.1854e-02),
    ("In-113", 3.4291e-04),
    ("In-115", 7.6504e-03),
    ("Cd-106", 3.4019e-05),
    ("Cd-108", 2.4221e-05),
    ("Cd-110", 3.3991e-04),
    ("Cd-111", 3.4835e-04),
    ("Cd-112", 6.5669e-04),
    ("Cd-113", 3.3257e-04),
    ("Cd-114", 7.8188e-04),
    ("Cd-116", 2.0384e-04),
];

const BOROSILICATE_GLASS: &[(&str, f64)] = &[
    ("B-10", 9.6506e-04),
    ("B-11", 3.9189e-03),
    ("O-16", 4.6511e-02),
    ("O-17", 1.1330e-04),
    ("Al-27", 1.7352e-03),
    ("Si-28", 1.6924e-02),
    ("Si-29", 8.5977e-04),
    ("Si-30", 5.6743e-04),
];

fn solid(
    ctx: &mut ModelContext,
    key: &str,
    comment: &str,
    density: f64,
    nuclides: &[(&str, f64)],
) -> BuildResult<MaterialId> {
    ctx.add_material(key, |id| {
        Material::new(id, comment, Density::new(density)).with_nuclides(
            nuclides
                .iter()
                .map(|(name, fraction)| Nuclide::atom(*name, CONTINUOUS_XS, *fraction))
                .collect(),
        )
    })
}

fn water(
    ctx: &mut ModelContext,
    key: &str,
    comment: &str,
    composition: &BoratedWater,
) -> BuildResult<MaterialId> {
    ctx.add_material(key, |id| {
        Material::new(id, comment, Density::fixed(composition.density, 6))
            .with_nuclides(composition.nuclides())
            .with_sab(LIGHT_WATER_SAB, LIGHT_WATER_SAB_XS)
    })
}

/// Registers the moderator, one coolant per core position (in loading
/// order) and the structural, fuel and absorber materials.
pub fn build_materials(ctx: &mut ModelContext, config: &WaterConfig) -> BuildResult<MaterialLibrary> {
    let composition = BoratedWater::new(config.density, config.boron_ppm);

    let water_mod = water(ctx, "water-mod", "Moderator", &composition)?;
    let mut coolant = HashMap::with_capacity(CORE_LOADING.len());
    for slot in &CORE_LOADING {
        let id = water(
            ctx,
            &format!("water-cool{}", slot.position),
            &format!("Coolant Bundle {}", slot.position),
            &composition,
        )?;
        coolant.insert(slot.position, id);
    }

    let library = MaterialLibrary {
        water_mod,
        coolant,
        helium: solid(ctx, "helium", "Helium for gap", 0.001598, HELIUM)?,
        air: solid(ctx, "air", "Air for instrument tubes", 0.006160, AIR)?,
        inconel: solid(ctx, "inconel", "Inconel 718", 8.2, INCONEL_718)?,
        ss304: solid(ctx, "SS304", "Stainless Steel 304", 8.03, SS304)?,
        carbon_steel: solid(
            ctx,
            "carbon steel",
            "Carbon Steel ASTM A533 Grade B",
            7.8,
            CARBON_STEEL,
        )?,
        zirc: solid(ctx, "zirc", "Zircaloy-4", 6.55, ZIRCALOY_4)?,
        uo2_16: solid(ctx, "UO2 1.6", "UO2 Fuel 1.6 w/o", 10.31362, UO2_16)?,
        uo2_24: solid(ctx, "UO2 2.4", "UO2 Fuel 2.4 w/o", 10.29769, UO2_24)?,
        uo2_31: solid(ctx, "UO2 3.1", "UO2 Fuel 3.1 w/o", 10.30187, UO2_31)?,
        control_rod: solid(ctx, "control rod", "Ag-In-Cd Control Rod", 10.16, AG_IN_CD)?,
        borosilicate: solid(
            ctx,
            "borosilicate",
            "Borosilicate Glass in BA rod",
            2.26,
            BOROSILICATE_GLASS,
        )?,
    };

    info!(
        materials = ctx.materials.len(),
        boron_ppm = config.boron_ppm,
        "registered materials"
    );
    Ok(library)
}
