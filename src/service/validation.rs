//! Request validation for album payloads.

use crate::error::AppError;
use crate::model::Album;

pub const TITLE_MAX_LENGTH: usize = 255;
pub const ARTIST_MAX_LENGTH: usize = 255;

pub struct AlbumValidator;

impl AlbumValidator {
    /// Validate the editable fields. Id presence is checked by the caller (create vs update differ).
    pub fn validate(album: &Album) -> Result<(), AppError> {
        if album.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".into()));
        }
        max_length("title", &album.title, TITLE_MAX_LENGTH)?;
        if let Some(artist) = &album.artist {
            max_length("artist", artist, ARTIST_MAX_LENGTH)?;
        }
        Ok(())
    }
}

fn max_length(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
