//! External process execution

pub mod redirect;
pub mod subprocess;

pub use redirect::Redirection;
pub use subprocess::{ProcessRunner, ProcessSpec, SystemRunner};
