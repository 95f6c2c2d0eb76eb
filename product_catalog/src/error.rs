use std::{error::Error, fmt::Debug};

#[derive(thiserror::Error)]
pub enum CatalogError {
    #[error("Data could not be retrieved from the database")]
    DataAccess(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl Debug for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        if let Some(source) = self.source() {
            write!(f, " (Caused by: {})", source)?;
        }
        Ok(())
    }
}
