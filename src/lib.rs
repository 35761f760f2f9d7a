//! pluto - terminal client for a document analysis pipeline.
//!
//! Submits keywords and documents to the analysis service, simulates
//! pipeline progress while it runs, and turns the result into ranked key
//! terms, topic clusters and an extractive summary.

pub mod client;
pub mod config;
pub mod models;
pub mod presenters;
pub mod services;
pub mod view;
