pub mod file_io;
pub mod image_utils;
pub mod point_render;
pub mod stopwatch;
pub mod task_graph;
pub mod video;
