pub mod renderer;
pub mod scheduled;
