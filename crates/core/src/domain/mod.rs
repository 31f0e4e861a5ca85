pub mod lenient;
pub mod provider;
pub mod selection;
