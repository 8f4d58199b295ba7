/// Data layer: artifact bootstrap, core types, and feature encoding.
///
/// Architecture:
/// ```text
///  rf_model.onnx.gz ──decompress (first run)──► rf_model.onnx
///                                                   │
///  scaler.onnx, feature_columns.json, *.csv ────────┤
///                                                   ▼
///                                           ┌──────────────┐
///                                           │  bootstrap    │  → LoadedArtifacts
///                                           └──────────────┘
///                                                   │
///                                                   ▼
///                                           ┌──────────────┐
///                                           │   encode      │  options, one-hot, reindex
///                                           └──────────────┘
/// ```

pub mod bootstrap;
pub mod encode;
pub mod loader;
pub mod model;
