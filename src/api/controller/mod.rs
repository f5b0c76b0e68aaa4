//! HTTP controllers

pub mod position;
