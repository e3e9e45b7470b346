pub mod callbacks;
pub mod charts;
pub mod health;
pub mod layout;
pub mod options;
pub mod page;
