//! XML solver documents rendered from a finished [`ReactorModel`].

pub mod cmfd;
pub mod geometry;
pub mod materials;
pub mod plots;
pub mod settings;
pub mod tallies;

use crate::builders::ReactorModel;
use crate::builders::core_lattice::coolant_index_text;
use crate::domain::{BuildError, BuildResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const COOLANT_MAP_FILE: &str = "coolant_map.txt";

const STAGING_SUFFIX: &str = ".partial";

const GENERATED_NOTE: &str = "This file auto-generated by beavrs";

/// One rendered document and the file name it is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: &'static str,
    pub content: String,
}

/// `<!-- text -->`, with any `--` inside the text broken up.
pub(crate) fn xml_comment(text: &str) -> String {
    format!("<!-- {} -->", text.replace("--", "- -"))
}

/// Appends ` <!-- comment -->` when a comment is present.
pub(crate) fn trailing_comment(comment: Option<&str>) -> String {
    match comment {
        Some(comment) if !comment.is_empty() => format!(" {}", xml_comment(comment)),
        _ => String::new(),
    }
}

pub(crate) fn open_document(root: &str) -> String {
    let mut content = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    content.push_str(&format!("<{root}>\n\n"));
    content.push_str(&xml_comment(GENERATED_NOTE));
    content.push_str("\n\n");
    content
}

pub(crate) fn close_document(content: &mut String, root: &str) {
    content.push_str(&format!("</{root}>\n"));
}

/// Every solver document of `model`, in writing order.
pub fn render_documents(model: &ReactorModel) -> Vec<RenderedDocument> {
    vec![
        RenderedDocument {
            file_name: "materials.xml",
            content: materials::render_materials(&model.ctx),
        },
        RenderedDocument {
            file_name: "geometry.xml",
            content: geometry::render_geometry(&model.ctx),
        },
        RenderedDocument {
            file_name: "settings.xml",
            content: settings::render_settings(&model.run.settings),
        },
        RenderedDocument {
            file_name: "plots.xml",
            content: plots::render_plots(&model.run.plots),
        },
        RenderedDocument {
            file_name: "tallies.xml",
            content: tallies::render_tallies(&model.run.meshes, &model.run.tallies),
        },
        RenderedDocument {
            file_name: "cmfd.xml",
            content: cmfd::render_cmfd(&model.run.cmfd),
        },
    ]
}

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

pub fn write_text_artifact(path: &Path, content: &str) -> BuildResult<()> {
    fs::write(path, normalize_text_artifact(content)).map_err(|source| BuildError::io(path, &source))
}

/// Renders every document before touching the disk, then writes them into
/// `output_dir` (created if missing). Each file is first written under a
/// staging name; the final names only appear once every write succeeded, and
/// a failed write removes the staged files. Returns the written paths.
pub fn write_documents(
    model: &ReactorModel,
    output_dir: &Path,
    coolant_map: bool,
) -> BuildResult<Vec<PathBuf>> {
    let mut documents = render_documents(model);
    if coolant_map {
        documents.push(RenderedDocument {
            file_name: COOLANT_MAP_FILE,
            content: coolant_index_text(),
        });
    }

    fs::create_dir_all(output_dir).map_err(|source| BuildError::io(output_dir, &source))?;
    let mut staged = Vec::with_capacity(documents.len());
    for document in &documents {
        let path = output_dir.join(document.file_name);
        let staging = staging_path(&path);
        if let Err(error) = write_text_artifact(&staging, &document.content) {
            discard_staged(&staged);
            return Err(error);
        }
        staged.push((staging, path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (index, (staging, path)) in staged.iter().enumerate() {
        if let Err(source) = fs::rename(staging, path) {
            discard_staged(&staged[index..]);
            return Err(BuildError::io(path, &source));
        }
        debug!(path = %path.display(), "wrote document");
        written.push(path.clone());
    }
    Ok(written)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}

fn discard_staged(staged: &[(PathBuf, PathBuf)]) {
    for (staging, _) in staged {
        if let Err(error) = fs::remove_file(staging) {
            debug!(path = %staging.display(), %error, "could not remove staged document");
        }
    }
}
