pub mod attribute_row_entity;
pub mod position_column_entity;
pub mod position_mongo_adapter;
pub mod position_repository;
pub mod position_repository_trait;
