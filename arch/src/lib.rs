pub mod comp;
pub mod dest;
pub mod inst;
pub mod jump;
pub mod mem;
