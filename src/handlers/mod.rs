//! HTTP handlers for the album REST resource and the album view routes.

pub mod album;
pub mod view;
