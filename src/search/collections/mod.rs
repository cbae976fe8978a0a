pub mod dijkstra_data;
pub mod radix_queue;
pub mod vertex_distance_queue;
