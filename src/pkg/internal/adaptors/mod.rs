pub mod openings;
pub mod submissions;
