mod entity;
mod writer;

pub use entity::ResponseEntity;
pub use writer::ResponseWriter;
