pub mod boolean;
pub mod clip;
pub mod triangulate;
