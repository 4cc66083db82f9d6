pub mod apply;
pub mod dispatch;
pub mod extract;
pub mod refs;
pub mod shared;
pub mod upgrade;
