// Domain layer: row model, positional schema and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod schema;
