use super::{close_document, open_document};
use crate::common::format::float_list;
use crate::domain::Plot;

fn plot_block(plot: &Plot) -> String {
    let [width_x, width_y] = plot.width;
    let [pixels_x, pixels_y] = plot.pixels;
    let mut block = format!(
        "  <plot id=\"{}\" filename=\"{}\" color=\"{}\" type=\"slice\" basis=\"xy\" background=\"{}\">\n",
        plot.id,
        plot.filename,
        plot.color_by.as_str(),
        plot.background
    );
    block.push_str(&format!("    <origin>{}</origin>\n", float_list(&plot.origin)));
    block.push_str(&format!(
        "    <width>{}</width>\n",
        float_list(&[width_x, width_y])
    ));
    block.push_str(&format!("    <pixels>{pixels_x} {pixels_y}</pixels>\n"));
    for (id, rgb) in &plot.colors {
        block.push_str(&format!("    <col_spec id=\"{id}\" rgb=\"{rgb}\" />\n"));
    }
    if let Some(mask) = &plot.mask {
        let components: Vec<_> = mask.components.iter().map(u32::to_string).collect();
        block.push_str(&format!(
            "    <mask components=\"{}\" background=\"{}\" />\n",
            components.join(" "),
            mask.background
        ));
    }
    block.push_str("  </plot>\n\n");
    block
}

pub fn render_plots(plots: &[Plot]) -> String {
    let mut content = open_document("plots");
    for plot in plots {
        content.push_str(&plot_block(plot));
    }
    close_document(&mut content, "plots");
    content
}

#[cfg(test)]
mod tests {
    use super::render_plots;
    use crate::domain::{Plot, PlotColorBy, PlotId, PlotMask, Rgb};

    fn plot(mask: Option<PlotMask>) -> Plot {
        Plot {
            id: PlotId::new(1),
            filename: "center_mats".to_string(),
            color_by: PlotColorBy::Material,
            background: Rgb::WHITE,
            origin: [0.0, 0.0, 227.722],
            width: [513.8, 513.8],
            pixels: [6000, 6000],
            colors: vec![(3, Rgb(198, 226, 255))],
            mask,
        }
    }

    #[test]
    fn plot_blocks_carry_colour_specs() {
        let text = render_plots(&[plot(None)]);

        assert!(text.contains(
            "<plot id=\"1\" filename=\"center_mats\" color=\"mat\" type=\"slice\" basis=\"xy\" background=\"255 255 255\">"
        ));
        assert!(text.contains("<origin>0.0 0.0 227.722</origin>"));
        assert!(text.contains("<pixels>6000 6000</pixels>"));
        assert!(text.contains("<col_spec id=\"3\" rgb=\"198 226 255\" />"));
        assert!(!text.contains("<mask"));
    }

    #[test]
    fn masks_list_their_components() {
        let text = render_plots(&[plot(Some(PlotMask {
            components: vec![12, 40],
            background: Rgb::WHITE,
        }))]);

        assert!(text.contains("<mask components=\"12 40\" background=\"255 255 255\" />"));
    }
}
