pub mod gres;
pub mod nodes;
