//! Feature Service Renderer Library
//!
//! Loads providers and templates from configuration and renders
//! ArcGIS Feature Service resources from the command line.

pub mod commands;
pub mod config;
pub mod state;
