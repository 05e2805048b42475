//! Model registry and inference components

pub mod inference;
pub mod loader;
pub mod registry;
pub mod regressor;
pub mod vocabulary;

pub use inference::{predict_from_args, run_pipeline, InferencePipeline};
pub use loader::{ModelLoader, OnnxRegressor};
pub use registry::ModelRegistry;
pub use regressor::{Regressor, Target};
pub use vocabulary::BodyTypeVocabulary;
