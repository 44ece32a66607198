pub mod admin;
pub mod notify;
pub mod openings;
pub mod probes;
pub mod submissions;
