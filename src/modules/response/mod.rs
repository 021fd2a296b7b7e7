use crate::prelude::*;

pub mod controller;
pub mod hello_data;

pub use controller::ResponseBodyController;
pub use hello_data::HelloData;

#[module(
    controllers = [ResponseBodyController],
)]
pub struct ResponseModule;
