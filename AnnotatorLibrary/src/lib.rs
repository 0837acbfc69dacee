#![allow(non_snake_case)]

pub mod annotation;
pub mod utils;
pub mod web;
