use super::{close_document, open_document};
use crate::common::format::float_list;
use crate::domain::RunSettings;

pub fn render_settings(settings: &RunSettings) -> String {
    let mut content = open_document("settings");
    content.push_str("  <eigenvalue>\n");
    content.push_str(&format!("    <batches>{}</batches>\n", settings.batches));
    content.push_str(&format!("    <inactive>{}</inactive>\n", settings.inactive));
    content.push_str(&format!("    <particles>{}</particles>\n", settings.particles));
    content.push_str("  </eigenvalue>\n\n");

    content.push_str(&format!(
        "  <cross_sections>{}</cross_sections>\n",
        settings.cross_sections
    ));
    content.push_str(&format!("  <verbosity value=\"{}\" />\n\n", settings.verbosity));

    let entropy = &settings.entropy;
    let [nx, ny, nz] = entropy.dimension;
    content.push_str("  <entropy>\n");
    content.push_str(&format!("    <dimension>{nx} {ny} {nz}</dimension>\n"));
    content.push_str(&format!(
        "    <lower_left>{}</lower_left>\n",
        float_list(&entropy.extent.lower_left)
    ));
    content.push_str(&format!(
        "    <upper_right>{}</upper_right>\n",
        float_list(&entropy.extent.upper_right)
    ));
    content.push_str("  </entropy>\n\n");

    let source = &settings.source;
    content.push_str("  <source>\n");
    content.push_str("    <space type=\"box\">\n");
    content.push_str(&format!(
        "      <parameters>{} {}</parameters>\n",
        float_list(&source.lower_left),
        float_list(&source.upper_right)
    ));
    content.push_str("    </space>\n");
    content.push_str("  </source>\n\n");

    close_document(&mut content, "settings");
    content
}
