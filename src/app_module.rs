use crate::modules::response::ResponseModule;
use crate::prelude::*;

/// Root application module
#[module(
    imports = [ResponseModule],
)]
pub struct AppModule;
