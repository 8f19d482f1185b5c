//! UI components.

pub mod prereq_tree;
