//! Spending-behavior segmentation service.
//!
//! Loads a pre-trained k-means pipeline artifact at startup and serves
//! `POST /api/segment`. A lite commitments payload is labeled by the burden
//! heuristic, a full feature payload goes through the trained pipeline, and
//! either label is mapped to a normalized budget-ratio allocation.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
