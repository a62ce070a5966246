//! Spare part inventory service

use crate::{
    error::AppResult,
    models::spare_part::{CreateSparePart, SparePart, UpdateSparePart},
    repository::Repository,
};

#[derive(Clone)]
pub struct SparePartsService {
    repository: Repository,
}

impl SparePartsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<SparePart>> {
        self.repository.spare_parts.list().await
    }

    pub async fn list_low_stock(&self) -> AppResult<Vec<SparePart>> {
        self.repository.spare_parts.list_low_stock().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<SparePart> {
        self.repository.spare_parts.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateSparePart) -> AppResult<SparePart> {
        self.repository.spare_parts.create(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateSparePart) -> AppResult<SparePart> {
        self.repository.spare_parts.update(id, data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.spare_parts.delete(id).await
    }
}
