pub mod frame;
pub mod params;
pub mod roots;
