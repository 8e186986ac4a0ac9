pub(crate) mod common;
mod session;
