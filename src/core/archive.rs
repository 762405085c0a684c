// zip export - downloadable snapshot of the project tree

use std::io::{Seek, Write};
use std::path::PathBuf;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::tree::{FileTree, NodeKind};
use crate::error::Error;

/// Streams the tree into a zip: folders become directory entries, files
/// are deflated, entry names keep the tree's depth-first order. Returns
/// the number of file entries written.
pub fn write_zip<W: Write + Seek>(tree: &FileTree, writer: W) -> Result<usize, Error> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut files = 0;
    for node in tree.nodes() {
        let entry = node.path.trim_start_matches('/');
        match node.kind {
            NodeKind::Folder => {
                zip.add_directory(entry, options)?;
            }
            NodeKind::File => {
                zip.start_file(entry, options)?;
                zip.write_all(node.content.as_bytes())?;
                files += 1;
            }
        }
    }
    zip.finish()?;
    Ok(files)
}

/// Writes `{name}_{timestamp}.zip` into the working directory and returns
/// its path.
pub fn export_zip(tree: &FileTree, project_name: &str) -> Result<PathBuf, Error> {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = PathBuf::from(format!("{}_{stamp}.zip", slug(project_name)));
    let file = std::fs::File::create(&path)?;
    write_zip(tree, file)?;
    Ok(path)
}

// "My Cool Site" -> "my_cool_site"
fn slug(name: &str) -> String {
    let slug: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if slug.is_empty() {
        "project".to_string()
    } else {
        slug
    }
}
