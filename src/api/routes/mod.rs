//! API route declarations (e.g., /api/v1/*)

pub mod recipe_routes;
