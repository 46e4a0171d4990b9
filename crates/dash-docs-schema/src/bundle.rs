// crates/dash-docs-schema/src/bundle.rs
// ============================================================================
// Module: Schema Bundle
// Description: Generator for on-disk schema artifacts.
// Purpose: Export the registry deterministically and verify exported copies.
// Dependencies: cap-std, serde, sha2
// ============================================================================

//! ## Overview
//! The bundle builder renders every registered document to the path it is
//! served from (without the leading slash), optionally adds a YAML rendition
//! under `yaml/` for the content collection, and writes an `index.json`
//! manifest carrying a SHA-256 digest per artifact. Artifacts are sorted by
//! path so two generations of the same registry are byte-identical, and
//! [`SchemaBundleBuilder::verify_output`] detects drift, tampering, and
//! stray files.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use cap_primitives::fs::FollowSymlinks;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use cap_std::fs::OpenOptions;
use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;

use crate::BundleError;
use crate::registry::SchemaRegistry;
use crate::registry::render_json;
use crate::registry::render_yaml;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File name of the bundle manifest.
pub const MANIFEST_FILE: &str = "index.json";
/// Directory holding YAML renditions inside the bundle.
pub const YAML_DIR: &str = "yaml";
/// Digest algorithm label recorded in the manifest.
pub const DIGEST_ALGORITHM: &str = "sha256";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Serialization formats a bundle can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleFormat {
    /// Canonical pretty JSON, served verbatim by the site.
    Json,
    /// YAML rendition consumed by the schema content collection.
    Yaml,
}

impl BundleFormat {
    /// Returns the MIME content type for the format.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Yaml => "application/yaml",
        }
    }
}

/// Rendered artifact with content bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleArtifact {
    /// Relative artifact path under the output directory.
    pub path: String,
    /// Artifact format.
    pub format: BundleFormat,
    /// Serialized artifact bytes.
    pub bytes: Vec<u8>,
}

/// Content digest for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDigest {
    /// Digest algorithm label.
    pub algorithm: String,
    /// Lowercase hex digest.
    pub value: String,
}

/// Manifest entry describing one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Relative artifact path under the output directory.
    pub path: String,
    /// MIME content type.
    pub content_type: String,
    /// Digest of the artifact bytes.
    pub digest: ArtifactDigest,
}

/// Manifest describing the generated bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Bundle version identifier (matches the crate version).
    pub bundle_version: String,
    /// Artifacts in the bundle, ordered by path.
    pub artifacts: Vec<ManifestEntry>,
}

/// Generated bundle with artifacts and manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaBundle {
    /// Manifest describing the artifacts.
    pub manifest: BundleManifest,
    /// Artifact payloads, ordered by path.
    pub artifacts: Vec<BundleArtifact>,
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for on-disk schema bundles.
#[derive(Debug, Clone)]
pub struct SchemaBundleBuilder {
    /// Registry being exported.
    registry: SchemaRegistry,
    /// Whether YAML renditions are included.
    include_yaml: bool,
}

impl SchemaBundleBuilder {
    /// Creates a JSON-only builder for `registry`.
    #[must_use]
    pub const fn new(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            include_yaml: false,
        }
    }

    /// Includes or omits YAML renditions.
    #[must_use]
    pub const fn with_yaml(mut self, include_yaml: bool) -> Self {
        self.include_yaml = include_yaml;
        self
    }

    /// Returns the default output directory for generated artifacts.
    #[must_use]
    pub fn default_output_dir() -> PathBuf {
        PathBuf::from("public")
    }

    /// Builds the bundle without writing to disk.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] when the registry is invalid or rendering fails.
    pub fn build(&self) -> Result<SchemaBundle, BundleError> {
        self.registry.validate()?;
        let mut artifacts = Vec::new();
        for document in self.registry.documents() {
            let relative = document.path.trim_start_matches('/');
            artifacts.push(BundleArtifact {
                path: relative.to_string(),
                format: BundleFormat::Json,
                bytes: render_json(&document.node)?,
            });
            if self.include_yaml {
                let stem = relative.strip_suffix(".json").unwrap_or(relative);
                artifacts.push(BundleArtifact {
                    path: format!("{YAML_DIR}/{stem}.yaml"),
                    format: BundleFormat::Yaml,
                    bytes: render_yaml(&document.node)?.into_bytes(),
                });
            }
        }

        artifacts.sort_by(|lhs, rhs| lhs.path.cmp(&rhs.path));
        ensure_unique_paths(&artifacts)?;

        let manifest = build_manifest(&artifacts);
        Ok(SchemaBundle {
            manifest,
            artifacts,
        })
    }

    /// Writes the bundle to `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] when building or writing fails.
    pub fn write_to(&self, output_dir: &Path) -> Result<BundleManifest, BundleError> {
        let bundle = self.build()?;
        let output = open_output_dir(output_dir, true)?;
        for artifact in &bundle.artifacts {
            let relative = validate_relative_path(&artifact.path)?;
            write_artifact_bytes(&output, &relative, &artifact.bytes)?;
        }
        let manifest_bytes = render_json(&bundle.manifest)?;
        write_artifact_bytes(&output, Path::new(MANIFEST_FILE), &manifest_bytes)?;
        Ok(bundle.manifest)
    }

    /// Verifies the bundle on disk matches a fresh generation.
    ///
    /// Symlinks anywhere under the output directory are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError::Mismatch`] on the first differing, missing, or
    /// unexpected file, [`BundleError::OutputPath`] for symlinked or
    /// non-regular entries, and [`BundleError::Io`] when reading fails.
    pub fn verify_output(&self, output_dir: &Path) -> Result<(), BundleError> {
        let bundle = self.build()?;
        let output = open_output_dir(output_dir, false)?;
        for artifact in &bundle.artifacts {
            let relative = validate_relative_path(&artifact.path)?;
            let bytes = read_expected_bytes(&output, &relative, artifact.bytes.len())?;
            if bytes != artifact.bytes {
                return Err(BundleError::Mismatch(format!("artifact differs: {}", artifact.path)));
            }
        }
        let manifest_bytes = render_json(&bundle.manifest)?;
        let actual_manifest =
            read_expected_bytes(&output, Path::new(MANIFEST_FILE), manifest_bytes.len())?;
        if actual_manifest != manifest_bytes {
            return Err(BundleError::Mismatch(format!("manifest differs: {MANIFEST_FILE}")));
        }
        let expected = expected_paths(&bundle);
        for path in collect_output_files(&output)? {
            if !expected.contains(&path) {
                return Err(BundleError::Mismatch(format!("unexpected artifact: {path}")));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Manifest Helpers
// ============================================================================

/// Builds the manifest from generated artifacts.
fn build_manifest(artifacts: &[BundleArtifact]) -> BundleManifest {
    let entries = artifacts
        .iter()
        .map(|artifact| ManifestEntry {
            path: artifact.path.clone(),
            content_type: artifact.format.content_type().to_string(),
            digest: sha256_digest(&artifact.bytes),
        })
        .collect();
    BundleManifest {
        bundle_version: env!("CARGO_PKG_VERSION").to_string(),
        artifacts: entries,
    }
}

/// Hashes bytes with SHA-256.
fn sha256_digest(bytes: &[u8]) -> ArtifactDigest {
    let digest = Sha256::digest(bytes);
    ArtifactDigest {
        algorithm: DIGEST_ALGORITHM.to_string(),
        value: hex_encode(&digest),
    }
}

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(char::from(HEX[usize::from(byte >> 4)]));
        out.push(char::from(HEX[usize::from(byte & 0x0f)]));
    }
    out
}

/// Ensures artifact paths are unique.
fn ensure_unique_paths(artifacts: &[BundleArtifact]) -> Result<(), BundleError> {
    let mut seen = BTreeSet::new();
    for artifact in artifacts {
        if !seen.insert(&artifact.path) {
            return Err(BundleError::Mismatch(format!("duplicate artifact path: {}", artifact.path)));
        }
    }
    Ok(())
}

/// Collects the expected output paths, manifest included.
fn expected_paths(bundle: &SchemaBundle) -> BTreeSet<String> {
    let mut expected = BTreeSet::new();
    expected.insert(MANIFEST_FILE.to_string());
    for artifact in &bundle.artifacts {
        expected.insert(artifact.path.clone());
    }
    expected
}

// ============================================================================
// SECTION: Filesystem Helpers
// ============================================================================

/// Opens the output directory as a capability handle.
///
/// Every component below the filesystem anchor is opened without following
/// symlinks; missing components are created when `create_missing` is set.
fn open_output_dir(output_dir: &Path, create_missing: bool) -> Result<Dir, BundleError> {
    if output_dir.as_os_str().is_empty() {
        return Err(BundleError::OutputPath(output_dir.to_path_buf()));
    }
    let absolute = if output_dir.is_absolute() {
        output_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(output_dir))
            .map_err(|err| BundleError::Io(err.to_string()))?
    };
    let (anchor, components) = split_anchor(&absolute)?;
    if components.is_empty() {
        return Err(BundleError::OutputPath(absolute));
    }
    let mut current = Dir::open_ambient_dir(&anchor, ambient_authority())
        .map_err(|err| BundleError::Io(err.to_string()))?;
    for component in components {
        current = open_or_create_child_dir(&current, Path::new(&component), create_missing)
            .map_err(|err| map_open_error(&err, output_dir))?;
    }
    Ok(current)
}

/// Splits an absolute path into its root anchor and normal components.
fn split_anchor(path: &Path) -> Result<(PathBuf, Vec<OsString>), BundleError> {
    let mut anchor = PathBuf::new();
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component.as_os_str()),
            Component::CurDir => {}
            Component::Normal(value) => components.push(value.to_os_string()),
            Component::ParentDir => return Err(BundleError::OutputPath(path.to_path_buf())),
        }
    }
    if anchor.as_os_str().is_empty() {
        return Err(BundleError::OutputPath(path.to_path_buf()));
    }
    Ok((anchor, components))
}

/// Opens a child directory without following symlinks.
fn open_child_dir(parent: &Dir, child: &Path) -> io::Result<Dir> {
    let mut options = OpenOptions::new();
    options.read(true);
    options._cap_fs_ext_follow(FollowSymlinks::No);
    let file = parent.open_with(child, &options)?;
    if !file.metadata()?.is_dir() {
        return Err(io::Error::new(ErrorKind::InvalidInput, "path component is not a directory"));
    }
    Ok(Dir::from_std_file(file.into_std()))
}

/// Opens a child directory, creating it first when allowed.
fn open_or_create_child_dir(parent: &Dir, child: &Path, create_missing: bool) -> io::Result<Dir> {
    match open_child_dir(parent, child) {
        Ok(dir) => Ok(dir),
        Err(err) if err.kind() == ErrorKind::NotFound && create_missing => {
            parent.create_dir(child)?;
            open_child_dir(parent, child)
        }
        Err(err) => Err(err),
    }
}

/// Maps open failures on unsafe or absent paths to [`BundleError::OutputPath`].
fn map_open_error(err: &io::Error, path: &Path) -> BundleError {
    if matches!(
        err.kind(),
        ErrorKind::NotFound
            | ErrorKind::InvalidInput
            | ErrorKind::PermissionDenied
            | ErrorKind::NotADirectory
            | ErrorKind::Unsupported
    ) {
        return BundleError::OutputPath(path.to_path_buf());
    }
    // ELOOP: the final component is a symlink opened with no-follow.
    #[cfg(unix)]
    if err.raw_os_error() == Some(40) {
        return BundleError::OutputPath(path.to_path_buf());
    }
    BundleError::Io(err.to_string())
}

/// Walks `relative` down from `output_dir`, returning the parent directory
/// handle, the final file name, and the path used in errors.
fn open_parent_dir(
    output_dir: &Dir,
    relative: &Path,
    create_missing: bool,
) -> Result<(Dir, OsString, PathBuf), BundleError> {
    let mut current = output_dir.try_clone().map_err(|err| BundleError::Io(err.to_string()))?;
    let mut components = relative.components().peekable();
    while let Some(component) = components.next() {
        let Component::Normal(name) = component else {
            return Err(BundleError::OutputPath(relative.to_path_buf()));
        };
        if components.peek().is_none() {
            return Ok((current, name.to_os_string(), relative.to_path_buf()));
        }
        current = open_or_create_child_dir(&current, Path::new(name), create_missing)
            .map_err(|err| map_open_error(&err, relative))?;
    }
    Err(BundleError::OutputPath(relative.to_path_buf()))
}

/// Validates that the artifact path is relative and stays under the output.
fn validate_relative_path(path: &str) -> Result<PathBuf, BundleError> {
    let candidate = PathBuf::from(path);
    if path.trim().is_empty() || candidate.is_absolute() {
        return Err(BundleError::OutputPath(candidate));
    }
    for component in candidate.components() {
        if matches!(component, Component::ParentDir | Component::RootDir | Component::Prefix(_)) {
            return Err(BundleError::OutputPath(candidate));
        }
    }
    Ok(candidate)
}

/// Writes bytes through a no-follow temp sibling and renames into place.
fn write_artifact_bytes(
    output_dir: &Dir,
    relative: &Path,
    bytes: &[u8],
) -> Result<(), BundleError> {
    let (parent, file_name, file_path) = open_parent_dir(output_dir, relative, true)?;
    let target = Path::new(&file_name);
    for attempt in 0 .. 64_u32 {
        let mut temp_name = OsString::from(".tmp-");
        temp_name.push(&file_name);
        temp_name.push(format!(".{}.{attempt}", std::process::id()));
        let temp = Path::new(&temp_name);
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        options._cap_fs_ext_follow(FollowSymlinks::No);
        match parent.open_with(temp, &options) {
            Ok(mut file) => {
                let written = file
                    .write_all(bytes)
                    .and_then(|()| file.sync_all())
                    .and_then(|()| parent.rename(temp, &parent, target));
                if let Err(err) = written {
                    let _ = parent.remove_file(temp);
                    return Err(BundleError::Io(err.to_string()));
                }
                return Ok(());
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(map_open_error(&err, &file_path)),
        }
    }
    Err(BundleError::Io(format!("no free temporary name for {}", file_path.display())))
}

/// Reads an artifact without following symlinks, checking its size first.
fn read_expected_bytes(
    output_dir: &Dir,
    relative: &Path,
    expected_len: usize,
) -> Result<Vec<u8>, BundleError> {
    let (parent, file_name, file_path) = open_parent_dir(output_dir, relative, false)?;
    let mut options = OpenOptions::new();
    options.read(true);
    options._cap_fs_ext_follow(FollowSymlinks::No);
    let mut file = match parent.open_with(Path::new(&file_name), &options) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(BundleError::Mismatch(format!(
                "missing artifact: {}",
                file_path.display()
            )));
        }
        Err(err) => return Err(map_open_error(&err, &file_path)),
    };
    let metadata = file.metadata().map_err(|err| BundleError::Io(err.to_string()))?;
    if !metadata.is_file() {
        return Err(BundleError::OutputPath(file_path));
    }
    let expected_len =
        u64::try_from(expected_len).map_err(|err| BundleError::Io(err.to_string()))?;
    if metadata.len() != expected_len {
        return Err(BundleError::Mismatch(format!("artifact differs: {}", file_path.display())));
    }
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|err| BundleError::Io(err.to_string()))?;
    Ok(bytes)
}

/// Recursively collects file paths under the output directory.
fn collect_output_files(output_dir: &Dir) -> Result<BTreeSet<String>, BundleError> {
    let mut files = BTreeSet::new();
    collect_files_recursive(output_dir, Path::new(""), &mut files)?;
    Ok(files)
}

/// Recursively collects file paths relative to the output root.
fn collect_files_recursive(
    current: &Dir,
    prefix: &Path,
    files: &mut BTreeSet<String>,
) -> Result<(), BundleError> {
    let entries = current.entries().map_err(|err| BundleError::Io(err.to_string()))?;
    for entry in entries {
        let entry = entry.map_err(|err| BundleError::Io(err.to_string()))?;
        let relative = prefix.join(entry.file_name());
        let file_type = entry.file_type().map_err(|err| BundleError::Io(err.to_string()))?;
        if file_type.is_symlink() {
            return Err(BundleError::OutputPath(relative));
        }
        if file_type.is_dir() {
            let directory = entry.open_dir().map_err(|err| BundleError::Io(err.to_string()))?;
            collect_files_recursive(&directory, &relative, files)?;
        } else if file_type.is_file() {
            let text =
                relative.to_str().ok_or_else(|| BundleError::OutputPath(relative.clone()))?;
            files.insert(text.replace('\\', "/"));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
