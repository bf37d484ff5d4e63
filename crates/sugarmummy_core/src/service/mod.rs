//! Core use-case services.
//!
//! # Responsibility
//! - Aggregate entity stores behind the model façade.
//! - Provide read-only derived views (averages, recommendations,
//!   achievements) over model contents without mutating it.

pub mod achievement_service;
pub mod average_service;
pub mod model_manager;
pub mod recommendation_service;
