pub mod carousel;
pub mod detail;
pub mod forms;
pub mod grid;
pub mod page;
pub mod selector;
