//! Rendering adapters. They only read view-models and session state.

pub mod html;
pub mod text;
