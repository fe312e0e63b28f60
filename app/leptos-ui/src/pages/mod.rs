pub mod pipeline;
pub mod sellers;
