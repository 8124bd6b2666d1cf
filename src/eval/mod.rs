// Evaluation module - deterministic dataset split and batch evaluation harness

pub mod dataset;
pub mod harness;
pub mod split;
pub mod training;

pub use dataset::{load_dataset, load_labeled_dataset};
pub use harness::{evaluate_rows, evaluate_test_set, write_predictions, PredictionRecord};
pub use split::{split_rows, train_test_split};
pub use training::{build_training_database, write_database};
