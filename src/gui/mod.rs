pub mod app;
pub mod keysig;
pub mod theme;
pub mod wheel;
