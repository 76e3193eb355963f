// Job recommendation: the catalog store behind a trait, the ranking algorithm,
// and the HTTP handlers for recommendations and catalog CRUD.

pub mod catalog;
pub mod handlers;
pub mod recommender;
