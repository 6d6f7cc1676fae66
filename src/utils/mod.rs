pub mod element;
pub mod javascript;
pub mod timestamp;

pub use javascript::JavaScriptRunner;
