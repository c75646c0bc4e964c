mod master;

pub use master::handle;
