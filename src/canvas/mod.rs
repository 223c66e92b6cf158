mod uniform;

pub use uniform::Uniforms;
