mod render;

pub use render::draw;
