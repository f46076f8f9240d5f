pub mod detection_gate;
pub mod pipeline_state;
pub mod stream_controller;
