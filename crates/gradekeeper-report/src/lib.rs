//! Report rendering for gradekeeper.
//!
//! `html` turns a [`gradekeeper_core::report::BlockReport`] into a
//! self-contained page; `color` holds the helpers it uses to shade course
//! colours and keep their labels readable.

pub mod color;
pub mod html;
