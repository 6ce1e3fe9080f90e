use super::{close_document, open_document};
use crate::common::format::{float_list, shortest_float};
use crate::domain::CmfdSettings;

pub fn render_cmfd(cmfd: &CmfdSettings) -> String {
    let [nx, ny, nz] = cmfd.dimension;
    let mut content = open_document("cmfd");
    content.push_str("  <mesh>\n");
    content.push_str(&format!(
        "    <lower_left>{}</lower_left>\n",
        float_list(&cmfd.lower_left)
    ));
    content.push_str(&format!(
        "    <upper_right>{}</upper_right>\n",
        float_list(&cmfd.upper_right)
    ));
    content.push_str(&format!("    <dimension>{nx} {ny} {nz}</dimension>\n"));
    content.push_str(&format!("    <albedo>{}</albedo>\n", cmfd.albedo));
    content.push_str(&format!("    <energy>{}</energy>\n", cmfd.energy));
    content.push_str("    <map>\n");
    for line in cmfd.map.lines() {
        content.push_str(&format!("      {line}\n"));
    }
    content.push_str("    </map>\n");
    content.push_str("  </mesh>\n");
    content.push_str(&format!("  <begin>{}</begin>\n", cmfd.begin));
    content.push_str(&format!(
        "  <active_flush>{}</active_flush>\n",
        cmfd.active_flush
    ));
    content.push_str(&format!(
        "  <keff_tol>{}</keff_tol>\n",
        shortest_float(cmfd.keff_tol)
    ));
    content.push_str(&format!("  <feedback>{}</feedback>\n\n", cmfd.feedback));
    close_document(&mut content, "cmfd");
    content
}
