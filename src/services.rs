//! Synchronous endpoints: file storage, field management and text
//! normalization.

pub mod fields;
pub mod files;
pub mod normalization;

pub use fields::Fields;
pub use files::Files;
pub use normalization::Normalization;
