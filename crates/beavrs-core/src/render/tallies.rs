use super::{close_document, open_document};
use crate::common::format::float_list;
use crate::domain::{Tally, TallyMesh};

pub fn render_tallies(meshes: &[TallyMesh], tallies: &[Tally]) -> String {
    let mut content = open_document("tallies");
    for mesh in meshes {
        let [nx, ny] = mesh.dimension;
        content.push_str(&format!("  <mesh id=\"{}\">\n", mesh.id));
        content.push_str("    <type>rectangular</type>\n");
        content.push_str(&format!("    <dimension>{nx} {ny}</dimension>\n"));
        content.push_str(&format!(
            "    <lower_left>{}</lower_left>\n",
            float_list(&mesh.lower_left)
        ));
        content.push_str(&format!("    <width>{}</width>\n", float_list(&mesh.width)));
        content.push_str("  </mesh>\n\n");
    }
    for tally in tallies {
        content.push_str(&format!("  <tally id=\"{}\">\n", tally.id));
        content.push_str(&format!(
            "    <filter type=\"mesh\" bins=\"{}\" />\n",
            tally.mesh
        ));
        content.push_str(&format!("    <scores>{}</scores>\n", tally.scores.join(" ")));
        content.push_str("  </tally>\n\n");
    }
    close_document(&mut content, "tallies");
    content
}
