pub mod boundary;
pub mod periodic;
pub mod rotate;
pub mod roughness;
pub mod sweep;
