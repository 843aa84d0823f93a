//! Unit test modules.

mod recognizer_test;
mod segmentation_test;
