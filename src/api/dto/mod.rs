pub mod position_query_dto;
