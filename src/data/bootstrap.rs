use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;

use super::loader::{self, ReferenceTable};
use super::model::FeatureColumns;
use crate::config::ArtifactPaths;
use crate::error::{BootstrapError, Result};
use crate::estimator::{FeatureScaler, ModelRuntime, OnnxRuntime, Regressor};

// ---------------------------------------------------------------------------
// Decompression
// ---------------------------------------------------------------------------

/// What [`decompress_if_missing`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompressOutcome {
    /// The target already existed and was left untouched.
    Skipped,
    /// The target was written with this many bytes.
    Decompressed { bytes: u64 },
}

/// Inflate the gzip file `src` into `dst` unless `dst` already exists.
///
/// Output goes to a sibling `.part` file first and is renamed into place, so
/// an interrupted run never leaves a truncated `dst` behind.
pub fn decompress_if_missing(src: &Path, dst: &Path) -> Result<DecompressOutcome> {
    if dst.exists() {
        return Ok(DecompressOutcome::Skipped);
    }

    let part = dst.with_extension("part");
    let result = inflate(src, &part).and_then(|bytes| {
        fs::rename(&part, dst)?;
        Ok(bytes)
    });

    match result {
        Ok(bytes) => Ok(DecompressOutcome::Decompressed { bytes }),
        Err(source) => {
            let _ = fs::remove_file(&part);
            Err(BootstrapError::Decompress {
                src: src.to_path_buf(),
                dst: dst.to_path_buf(),
                source,
            })
        }
    }
}

fn inflate(src: &Path, out: &Path) -> io::Result<u64> {
    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut decoder = GzDecoder::new(BufReader::new(File::open(src)?));
    let mut writer = BufWriter::new(File::create(out)?);
    let bytes = io::copy(&mut decoder, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// The two CSV datasets shipped next to the model.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub cleaned: ReferenceTable,
    pub encoded: ReferenceTable,
}

/// Everything loaded at startup. Read-only for the rest of the process.
pub struct LoadedArtifacts {
    pub columns: FeatureColumns,
    pub scaler: Box<dyn FeatureScaler>,
    pub model: Box<dyn Regressor>,
    pub reference: ReferenceData,
}

fn load<T>(
    artifact: &'static str,
    path: &Path,
    f: impl FnOnce(&Path) -> anyhow::Result<T>,
) -> Result<T> {
    f(path).map_err(|source| BootstrapError::Load {
        artifact,
        path: path.to_path_buf(),
        source,
    })
}

/// Fail unless an artifact that declares its input width matches the
/// feature list.
fn check_width(
    artifact: &'static str,
    columns: &FeatureColumns,
    found: Option<usize>,
) -> Result<()> {
    match found {
        Some(found) if found != columns.len() => Err(BootstrapError::Mismatch {
            artifact,
            expected: columns.len(),
            found,
        }),
        Some(_) => Ok(()),
        None => {
            log::debug!("The {artifact} does not declare its input width");
            Ok(())
        }
    }
}

/// Decompress the model if needed, then load every artifact with ONNX Runtime.
pub fn bootstrap(paths: &ArtifactPaths) -> Result<LoadedArtifacts> {
    bootstrap_with(paths, &OnnxRuntime)
}

/// [`bootstrap`] with the scaler and model loaded by `runtime`.
pub fn bootstrap_with(
    paths: &ArtifactPaths,
    runtime: &dyn ModelRuntime,
) -> Result<LoadedArtifacts> {
    match decompress_if_missing(&paths.compressed_model, &paths.model)? {
        DecompressOutcome::Skipped => {
            log::info!("Using existing model file {}", paths.model.display())
        }
        DecompressOutcome::Decompressed { bytes } => log::info!(
            "Decompressed {} into {} ({bytes} bytes)",
            paths.compressed_model.display(),
            paths.model.display()
        ),
    }

    let model = load("model", &paths.model, |p| runtime.load_model(p))?;
    let scaler = load("scaler", &paths.scaler, |p| runtime.load_scaler(p))?;
    let columns = load("feature columns", &paths.feature_columns, loader::load_feature_columns)?;
    let reference = ReferenceData {
        cleaned: load("cleaned dataset", &paths.cleaned_data, loader::load_csv)?,
        encoded: load("encoded dataset", &paths.encoded_data, loader::load_csv)?,
    };

    check_width("scaler", &columns, scaler.n_features())?;
    check_width("model", &columns, model.n_features())?;

    log::info!(
        "Loaded {} feature columns, reference data {}x{} / {}x{}",
        columns.len(),
        reference.cleaned.len(),
        reference.cleaned.headers.len(),
        reference.encoded.len(),
        reference.encoded.headers.len()
    );

    Ok(LoadedArtifacts {
        columns,
        scaler,
        model,
        reference,
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Context;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::tempdir;

    use super::*;
    use crate::data::model::{AlignedRow, ScaledVector};

    /// Stands in for a fitted graph; the artifact file holds its input width.
    struct Fixed(usize);

    impl FeatureScaler for Fixed {
        fn n_features(&self) -> Option<usize> {
            Some(self.0)
        }
        fn transform(&self, row: &AlignedRow) -> anyhow::Result<ScaledVector> {
            Ok(ScaledVector(row.0.clone()))
        }
    }

    impl Regressor for Fixed {
        fn n_features(&self) -> Option<usize> {
            Some(self.0)
        }
        fn predict_row(&self, row: &ScaledVector) -> anyhow::Result<f64> {
            Ok(row.0.iter().sum())
        }
    }

    struct WidthFiles;

    fn read_width(path: &Path) -> anyhow::Result<Fixed> {
        let text = fs::read_to_string(path).context("reading graph")?;
        let width = text.trim().parse().context("parsing graph")?;
        Ok(Fixed(width))
    }

    impl ModelRuntime for WidthFiles {
        fn load_scaler(&self, path: &Path) -> anyhow::Result<Box<dyn FeatureScaler>> {
            Ok(Box::new(read_width(path)?))
        }
        fn load_model(&self, path: &Path) -> anyhow::Result<Box<dyn Regressor>> {
            Ok(Box::new(read_width(path)?))
        }
    }

    fn write_gz(path: &Path, data: &[u8]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap();
    }

    fn write(path: &Path, data: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, data).unwrap();
    }

    fn write_artifacts(root: &Path) -> ArtifactPaths {
        let paths = ArtifactPaths::under(root);
        write_gz(&paths.compressed_model, b"2");
        write(&paths.scaler, "2");
        write(&paths.feature_columns, r#"["Rooms", "Size"]"#);
        write(&paths.cleaned_data, "Rooms,Size,Price\n2,1500,600000\n");
        write(&paths.encoded_data, "Rooms,Size\n2,1500\n");
        paths
    }

    fn mismatch(err: BootstrapError) -> (&'static str, usize, usize) {
        match err {
            BootstrapError::Mismatch {
                artifact,
                expected,
                found,
            } => (artifact, expected, found),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decompresses_byte_for_byte() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("m.onnx.gz");
        let dst = dir.path().join("out/m.onnx");
        let payload: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        write_gz(&src, &payload);

        let outcome = decompress_if_missing(&src, &dst).unwrap();
        assert_eq!(outcome, DecompressOutcome::Decompressed { bytes: 10_000 });
        assert_eq!(fs::read(&dst).unwrap(), payload);
        assert!(!dst.with_extension("part").exists());
    }

    #[test]
    fn second_run_is_a_no_op() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("m.onnx.gz");
        let dst = dir.path().join("m.onnx");
        write_gz(&src, b"model bytes");

        decompress_if_missing(&src, &dst).unwrap();
        let first = fs::read(&dst).unwrap();

        // Even with the source gone the existing file is reused untouched.
        fs::remove_file(&src).unwrap();
        let outcome = decompress_if_missing(&src, &dst).unwrap();
        assert_eq!(outcome, DecompressOutcome::Skipped);
        assert_eq!(fs::read(&dst).unwrap(), first);
    }

    #[test]
    fn corrupt_archive_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("m.onnx.gz");
        let dst = dir.path().join("m.onnx");
        fs::write(&src, b"definitely not gzip").unwrap();

        let err = decompress_if_missing(&src, &dst).unwrap_err();
        assert!(matches!(err, BootstrapError::Decompress { .. }));
        assert!(!dst.exists());
        assert!(!dst.with_extension("part").exists());
    }

    #[test]
    fn missing_archive_is_a_decompress_error() {
        let dir = tempdir().unwrap();
        let err = decompress_if_missing(&dir.path().join("nope.gz"), &dir.path().join("m.onnx"))
            .err()
            .unwrap();
        assert!(err.to_string().starts_with("Error decompressing the model file"));
    }

    #[test]
    fn bootstraps_full_artifact_set() {
        let dir = tempdir().unwrap();
        let paths = write_artifacts(dir.path());

        let artifacts = bootstrap_with(&paths, &WidthFiles).unwrap();
        assert!(artifacts.columns.iter().eq(["Rooms", "Size"]));
        assert_eq!(artifacts.model.n_features(), Some(2));
        assert_eq!(artifacts.reference.cleaned.len(), 1);
        assert_eq!(artifacts.reference.encoded.headers, ["Rooms", "Size"]);
        assert_eq!(fs::read_to_string(&paths.model).unwrap(), "2");

        // Restart with the decompressed file in place.
        fs::remove_file(&paths.compressed_model).unwrap();
        let again = bootstrap_with(&paths, &WidthFiles).unwrap();
        assert_eq!(again.scaler.n_features(), Some(2));
    }

    #[test]
    fn unreadable_model_is_a_load_error() {
        let dir = tempdir().unwrap();
        let paths = write_artifacts(dir.path());
        write(&paths.model, "not a graph");

        match bootstrap_with(&paths, &WidthFiles).err().unwrap() {
            BootstrapError::Load { artifact, .. } => assert_eq!(artifact, "model"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_dataset_is_fatal() {
        let dir = tempdir().unwrap();
        let paths = write_artifacts(dir.path());
        fs::remove_file(&paths.encoded_data).unwrap();

        match bootstrap_with(&paths, &WidthFiles).err().unwrap() {
            BootstrapError::Load { artifact, .. } => assert_eq!(artifact, "encoded dataset"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn scaler_width_must_match_feature_list() {
        let dir = tempdir().unwrap();
        let paths = write_artifacts(dir.path());
        write(&paths.feature_columns, r#"["Rooms", "Size", "Bathrooms"]"#);

        let err = bootstrap_with(&paths, &WidthFiles).err().unwrap();
        assert_eq!(mismatch(err), ("scaler", 3, 2));
    }

    #[test]
    fn model_width_must_match_feature_list() {
        let dir = tempdir().unwrap();
        let paths = write_artifacts(dir.path());
        // Scaler and feature list agree on two columns; the model wants three.
        write_gz(&paths.compressed_model, b"3");

        let err = bootstrap_with(&paths, &WidthFiles).err().unwrap();
        assert_eq!(mismatch(err), ("model", 2, 3));
    }

    #[test]
    fn undeclared_width_is_accepted() {
        let columns = FeatureColumns::new(vec!["Rooms".into()]);
        assert!(check_width("model", &columns, None).is_ok());
        assert!(check_width("model", &columns, Some(1)).is_ok());
        assert_eq!(
            mismatch(check_width("model", &columns, Some(4)).unwrap_err()),
            ("model", 1, 4)
        );
    }
}
