//! API DTOs

pub mod query_dto;
pub mod recipe_dto;
