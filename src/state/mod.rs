/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures for source/edited images (data.rs)
/// - The edit request lifecycle status (status.rs)

pub mod data;
pub mod status;
