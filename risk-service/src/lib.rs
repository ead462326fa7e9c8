//! Health-risk assessment service.
//!
//! Loads a pre-trained scaler and clustering model at startup and serves
//! `POST /api/predict_risk`: a fixed health/lifestyle questionnaire is
//! binary-encoded, reordered to the scaler's expected column order, scaled,
//! clustered, and mapped to a textual risk level.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
