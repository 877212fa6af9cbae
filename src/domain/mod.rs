/// Domain layer: the records produced by the parsers and the value objects
/// used to build commands
pub mod entities;
pub mod value_objects;
