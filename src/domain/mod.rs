pub mod email;
pub mod reply;
