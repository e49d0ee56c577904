//! API client library for flixx.
//!
//! Provides a typed client for The Movie Database (TMDB) REST API.

/// TMDB API client.
pub mod tmdb;
