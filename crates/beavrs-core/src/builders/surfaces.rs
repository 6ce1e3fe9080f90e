use super::assembly::LatticeBox;
use crate::common::config::ModelConfig;
use crate::common::constants::ASSEMBLY_DIMENSION;
use crate::common::format::{coefficient, general_float};
use crate::domain::{BoundaryCondition, BuildResult, Surface, SurfaceId, SurfaceKind};
use crate::model::ModelContext;
use std::f64::consts::PI;
use tracing::info;

/// The four planes cutting the neutron shield into panels, named by the
/// compass octants each one separates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShieldPlanes {
    pub nw_bot_se_top: SurfaceId,
    pub nw_top_se_bot: SurfaceId,
    pub ne_bot_sw_top: SurfaceId,
    pub ne_top_sw_bot: SurfaceId,
}

/// Every shared surface of the model except the baffle planes.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceCatalogue {
    pub dummy_outer: SurfaceId,
    pub pellet_or: SurfaceId,
    pub plenum_spring_or: SurfaceId,
    pub clad_ir: SurfaceId,
    pub clad_or: SurfaceId,
    pub guide_tube_ir: SurfaceId,
    pub guide_tube_or: SurfaceId,
    pub guide_tube_dash_ir: SurfaceId,
    pub guide_tube_dash_or: SurfaceId,
    pub burnable_absorber: [SurfaceId; 8],
    pub instrument_tube_ir: SurfaceId,
    pub instrument_tube_or: SurfaceId,
    pub lattice_box: LatticeBox,
    pub lowest_extent: SurfaceId,
    pub highest_extent: SurfaceId,
    pub core_barrel_ir: SurfaceId,
    pub core_barrel_or: SurfaceId,
    pub neutron_shield_or: SurfaceId,
    pub shield_planes: ShieldPlanes,
    pub rpv_ir: SurfaceId,
    pub rpv_or: SurfaceId,
    pub upper_bound: SurfaceId,
    pub lower_bound: SurfaceId,
}

fn cylinder(
    ctx: &mut ModelContext,
    key: &str,
    comment: &str,
    radius: f64,
) -> BuildResult<SurfaceId> {
    ctx.add_surface(key, |id| {
        Surface::new(
            id,
            SurfaceKind::ZCylinder,
            format!("0.0 0.0 {}", coefficient(radius)),
        )
        .with_comment(comment)
    })
}

fn plane(
    ctx: &mut ModelContext,
    key: &str,
    kind: SurfaceKind,
    coeffs: String,
    comment: Option<&str>,
) -> BuildResult<SurfaceId> {
    ctx.add_surface(key, |id| {
        let surface = Surface::new(id, kind, coeffs);
        match comment {
            Some(comment) => surface.with_comment(comment),
            None => surface,
        }
    })
}

/// Plane through the z axis at angle `theta` from the y axis: `x + tan(theta) y = 0`.
fn shield_plane_coeffs(theta: f64) -> String {
    format!("1 {} 0 0", general_float(theta.tan(), 12))
}

/// Instrument-tube radii reuse the absorber surface of the same radius
/// when one exists; otherwise they get their own cylinder.
fn instrument_radius(
    ctx: &mut ModelContext,
    key: &str,
    comment: &str,
    radius: f64,
    absorber_radii: &[f64; 8],
    absorber_surfaces: &[SurfaceId; 8],
) -> BuildResult<SurfaceId> {
    let shared = absorber_radii
        .iter()
        .position(|candidate| coefficient(*candidate) == coefficient(radius));
    match shared {
        Some(index) => ctx.alias_surface(key, absorber_surfaces[index], comment),
        None => cylinder(ctx, key, comment, radius),
    }
}

/// Registers the pin, lattice, axial and vessel surfaces in document order.
pub fn build_surfaces(ctx: &mut ModelContext, config: &ModelConfig) -> BuildResult<SurfaceCatalogue> {
    let pin = &config.pin;
    let axial = &config.axial;
    let radial = &config.radial;

    let dummy_outer = ctx.add_surface("dummy outer", |id| {
        Surface::new(id, SurfaceKind::Sphere, "0.0 0.0 0.0 4000")
            .with_section("Pincell surfaces")
            .with_comment("dummy outer boundary")
    })?;
    let pellet_or = cylinder(ctx, "pellet OR", "pellet OR", pin.pellet_or)?;
    let plenum_spring_or = cylinder(
        ctx,
        "plenum spring OR",
        "fuel rod plenum spring OR",
        pin.plenum_spring_or,
    )?;
    let clad_ir = cylinder(ctx, "clad IR", "clad IR", pin.clad_ir)?;
    let clad_or = cylinder(ctx, "clad OR", "clad OR", pin.clad_or)?;
    let guide_tube_ir = cylinder(
        ctx,
        "guide tube IR",
        "guide tube IR above dashpot",
        pin.guide_tube_ir,
    )?;
    let guide_tube_or = cylinder(
        ctx,
        "guide tube OR",
        "guide tube OR above dashpot",
        pin.guide_tube_or,
    )?;
    let guide_tube_dash_ir = cylinder(
        ctx,
        "GT dashpot IR",
        "guide tube IR at dashpot",
        pin.guide_tube_dash_ir,
    )?;
    let guide_tube_dash_or = cylinder(
        ctx,
        "GT dashpot OR",
        "guide tube OR at dashpot",
        pin.guide_tube_dash_or,
    )?;

    let mut burnable_absorber = [dummy_outer; 8];
    for (index, radius) in pin.burnable_absorber.iter().enumerate() {
        burnable_absorber[index] = cylinder(
            ctx,
            &format!("burnabs rad {}", index + 1),
            &format!("burnable absorber rod inner radius {}", index + 1),
            *radius,
        )?;
    }
    let instrument_tube_ir = instrument_radius(
        ctx,
        "instr tube IR",
        "instrument tube IR",
        pin.instrument_tube_ir,
        &pin.burnable_absorber,
        &burnable_absorber,
    )?;
    let instrument_tube_or = instrument_radius(
        ctx,
        "instr tube OR",
        "instrument tube OR",
        pin.instrument_tube_or,
        &pin.burnable_absorber,
        &burnable_absorber,
    )?;

    let half_box = ASSEMBLY_DIMENSION as f64 * config.lattice.pin_pitch / 2.0;
    let x_max = ctx.add_surface("lat box xtop", |id| {
        Surface::new(id, SurfaceKind::XPlane, coefficient(half_box))
            .with_section("Lattice surfaces")
            .with_comment("lattice X max")
    })?;
    let x_min = plane(
        ctx,
        "lat box xbot",
        SurfaceKind::XPlane,
        format!("-{}", coefficient(half_box)),
        Some("lattice X min"),
    )?;
    let y_max = plane(
        ctx,
        "lat box ytop",
        SurfaceKind::YPlane,
        coefficient(half_box),
        Some("lattice Y max"),
    )?;
    let y_min = plane(
        ctx,
        "lat box ybot",
        SurfaceKind::YPlane,
        format!("-{}", coefficient(half_box)),
        Some("lattice Y min"),
    )?;

    let lowest_extent = ctx.add_surface("lowest extent", |id| {
        Surface::new(id, SurfaceKind::ZPlane, coefficient(axial.lowest_extent))
            .with_section("Axial surfaces")
            .with_comment("lowest extent")
    })?;
    let highest_extent = plane(
        ctx,
        "highest extent",
        SurfaceKind::ZPlane,
        coefficient(axial.highest_extent),
        Some("highest extent"),
    )?;

    let core_barrel_ir = cylinder(ctx, "core barrel IR", "core barrel IR", radial.core_barrel_ir)?;
    let core_barrel_or = cylinder(ctx, "core barrel OR", "core barrel OR", radial.core_barrel_or)?;
    let neutron_shield_or = cylinder(
        ctx,
        "neut shield OR",
        "neutron shield OR",
        radial.neutron_shield_or,
    )?;
    let shield_planes = ShieldPlanes {
        nw_bot_se_top: plane(
            ctx,
            "neut shield NWbot SEtop",
            SurfaceKind::Plane,
            shield_plane_coeffs(PI / 3.0),
            Some("neutron shield planes"),
        )?,
        nw_top_se_bot: plane(
            ctx,
            "neut shield NWtop SEbot",
            SurfaceKind::Plane,
            shield_plane_coeffs(PI / 6.0),
            None,
        )?,
        ne_bot_sw_top: plane(
            ctx,
            "neut shield NEbot SWtop",
            SurfaceKind::Plane,
            shield_plane_coeffs(-PI / 3.0),
            None,
        )?,
        ne_top_sw_bot: plane(
            ctx,
            "neut shield NEtop SWbot",
            SurfaceKind::Plane,
            shield_plane_coeffs(-PI / 6.0),
            None,
        )?,
    };
    let rpv_ir = cylinder(ctx, "RPV IR", "RPV IR", radial.rpv_ir)?;
    let rpv_or = ctx.add_surface("RPV OR", |id| {
        Surface::new(
            id,
            SurfaceKind::ZCylinder,
            format!("0.0 0.0 {}", coefficient(radial.rpv_or)),
        )
        .with_comment("RPV OR")
        .with_boundary(BoundaryCondition::Vacuum)
    })?;

    let (lower, upper, boundary) = if config.is_three_d() {
        (
            axial.lowest_extent,
            axial.highest_extent,
            BoundaryCondition::Vacuum,
        )
    } else {
        (
            config.two_d_bounds.lower,
            config.two_d_bounds.upper,
            BoundaryCondition::Reflective,
        )
    };
    let upper_bound = ctx.add_surface("upper bound", |id| {
        Surface::new(id, SurfaceKind::ZPlane, coefficient(upper))
            .with_comment("upper problem boundary")
            .with_boundary(boundary)
    })?;
    let lower_bound = ctx.add_surface("lower bound", |id| {
        Surface::new(id, SurfaceKind::ZPlane, coefficient(lower))
            .with_comment("lower problem boundary")
            .with_boundary(boundary)
    })?;

    info!(
        surfaces = ctx.surfaces.len(),
        boundary = boundary.as_str(),
        "registered shared surfaces"
    );

    Ok(SurfaceCatalogue {
        dummy_outer,
        pellet_or,
        plenum_spring_or,
        clad_ir,
        clad_or,
        guide_tube_ir,
        guide_tube_or,
        guide_tube_dash_ir,
        guide_tube_dash_or,
        burnable_absorber,
        instrument_tube_ir,
        instrument_tube_or,
        lattice_box: LatticeBox {
            x_max,
            x_min,
            y_max,
            y_min,
        },
        lowest_extent,
        highest_extent,
        core_barrel_ir,
        core_barrel_or,
        neutron_shield_or,
        shield_planes,
        rpv_ir,
        rpv_or,
        upper_bound,
        lower_bound,
    })
}
