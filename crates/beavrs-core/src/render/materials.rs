use super::{close_document, open_document, xml_comment};
use crate::common::format::{fixed_float, shortest_float};
use crate::domain::Density;
use crate::model::ModelContext;

fn density_text(density: Density) -> String {
    match density.decimals {
        Some(decimals) => fixed_float(density.grams_per_cc, decimals),
        None => shortest_float(density.grams_per_cc),
    }
}

/// One `<material>` block per material in registration order, each
/// preceded by its comment.
pub fn render_materials(ctx: &ModelContext) -> String {
    let mut content = open_document("materials");
    for (_, material) in ctx.materials.ordered() {
        content.push_str(&xml_comment(&material.comment));
        content.push('\n');
        content.push_str(&format!("  <material id=\"{}\">\n", material.id));
        content.push_str(&format!(
            "    <density value=\"{}\" units=\"g/cc\" />\n",
            density_text(material.density)
        ));
        for nuclide in &material.nuclides {
            content.push_str(&format!(
                "    <nuclide name=\"{}\" xs=\"{}\" {}=\"{}\" />\n",
                nuclide.name,
                nuclide.xs,
                nuclide.basis.attribute(),
                shortest_float(nuclide.fraction)
            ));
        }
        for sab in &material.sab {
            content.push_str(&format!(
                "    <sab name=\"{}\" xs=\"{}\" />\n",
                sab.name, sab.xs
            ));
        }
        content.push_str("  </material>\n\n");
    }
    close_document(&mut content, "materials");
    content
}

#[cfg(test)]
mod tests {
    use super::render_materials;
    use crate::domain::{Density, FractionBasis, Material, Nuclide};
    use crate::model::ModelContext;

    #[test]
    fn materials_render_in_registration_order_with_sab() {
        let mut ctx = ModelContext::default();
        ctx.add_material("zirc", |id| {
            Material::new(id, "Zircaloy-4", Density::fixed(6.55, 2)).with_nuclides(vec![
                Nuclide::atom("Zr-90", "71c", 2.1827e-02),
            ])
        })
        .expect("zirc");
        ctx.add_material("water", |id| {
            Material::new(id, "Water", Density::new(0.73986))
                .with_nuclides(vec![Nuclide {
                    name: "H-1".to_string(),
                    xs: "71c".to_string(),
                    basis: FractionBasis::Weight,
                    fraction: 0.1119,
                }])
                .with_sab("lwtr", "15t")
        })
        .expect("water");

        let text = render_materials(&ctx);

        let zirc = text.find("<!-- Zircaloy-4 -->").expect("zirc comment");
        let water = text.find("<!-- Water -->").expect("water comment");
        assert!(zirc < water);
        assert!(text.contains("  <material id=\"1\">\n    <density value=\"6.55\" units=\"g/cc\" />"));
        assert!(text.contains("<nuclide name=\"Zr-90\" xs=\"71c\" ao=\"0.021827\" />"));
        assert!(text.contains("<density value=\"0.73986\" units=\"g/cc\" />"));
        assert!(text.contains("<nuclide name=\"H-1\" xs=\"71c\" wo=\"0.1119\" />"));
        assert!(text.contains("<sab name=\"lwtr\" xs=\"15t\" />"));
        assert!(text.ends_with("</materials>\n"));
    }
}
