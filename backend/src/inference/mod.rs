pub mod labels;
pub mod model;
pub mod preprocess;

pub use labels::Diagnosis;
pub use model::Classifier;
