//! Docker-archive rewriting.
//!
//! `ctr images import` names the imported image after the tags recorded in
//! the archive itself, so the archive is rewritten to carry `target` before
//! it is streamed to the nodes.

use std::io::{Cursor, Read};

use anyhow::{Context, Result};
use kindpush_common::ImageRef;
use serde_json::Value;

const MANIFEST: &str = "manifest.json";
const OCI_INDEX: &str = "index.json";
const LEGACY_REPOSITORIES: &str = "repositories";

/// Annotation containerd reads the image name from in OCI-layout archives.
pub const CONTAINERD_IMAGE_NAME: &str = "io.containerd.image.name";

/// Copy the tar in `raw`, renaming the single image it holds to `target`.
///
/// # Errors
///
/// Returns an error if `raw` is not a tar archive, has no `manifest.json`,
/// or its manifest does not describe exactly one image.
pub fn retarget_archive(raw: &[u8], target: &ImageRef) -> Result<Vec<u8>> {
    let mut archive = tar::Archive::new(Cursor::new(raw));
    let mut builder = tar::Builder::new(Vec::with_capacity(raw.len()));
    let mut saw_manifest = false;

    for entry in archive.entries().context("reading image archive")? {
        let mut entry = entry.context("reading archive entry")?;
        let path = entry.path().context("reading entry path")?.into_owned();
        let name = path.to_string_lossy().trim_start_matches("./").to_string();
        let mut header = entry.header().clone();

        match name.as_str() {
            LEGACY_REPOSITORIES => continue,
            MANIFEST | OCI_INDEX => {
                let mut body = Vec::new();
                entry
                    .read_to_end(&mut body)
                    .with_context(|| format!("reading {name}"))?;
                let body = if name == MANIFEST {
                    saw_manifest = true;
                    rewrite_manifest(&body, target)?
                } else {
                    rewrite_index(&body, target)?
                };
                header.set_size(body.len() as u64);
                header.set_cksum();
                builder
                    .append_data(&mut header, &path, body.as_slice())
                    .with_context(|| format!("writing {name}"))?;
            }
            _ => {
                builder
                    .append_data(&mut header, &path, &mut entry)
                    .with_context(|| format!("copying {name}"))?;
            }
        }
    }

    anyhow::ensure!(saw_manifest, "image archive has no {MANIFEST}");
    builder.into_inner().context("finishing image archive")
}

fn rewrite_manifest(body: &[u8], target: &ImageRef) -> Result<Vec<u8>> {
    let mut manifest: Vec<Value> =
        serde_json::from_slice(body).with_context(|| format!("parsing {MANIFEST}"))?;
    anyhow::ensure!(
        manifest.len() == 1,
        "image archive must hold exactly one image, found {}",
        manifest.len()
    );
    let image = manifest[0]
        .as_object_mut()
        .with_context(|| format!("{MANIFEST} entry is not an object"))?;
    image.insert("RepoTags".into(), Value::from(vec![target.to_string()]));
    serde_json::to_vec(&manifest).with_context(|| format!("serializing {MANIFEST}"))
}

fn rewrite_index(body: &[u8], target: &ImageRef) -> Result<Vec<u8>> {
    let mut index: Value =
        serde_json::from_slice(body).with_context(|| format!("parsing {OCI_INDEX}"))?;
    if let Some(manifests) = index.get_mut("manifests").and_then(Value::as_array_mut) {
        for descriptor in manifests.iter_mut().filter_map(Value::as_object_mut) {
            let annotations = descriptor
                .entry("annotations")
                .or_insert_with(|| Value::Object(serde_json::Map::new()));
            if let Some(annotations) = annotations.as_object_mut() {
                annotations.insert(CONTAINERD_IMAGE_NAME.into(), Value::from(target.to_string()));
            }
        }
    }
    serde_json::to_vec(&index).with_context(|| format!("serializing {OCI_INDEX}"))
}
