// Parser module for extracting structure from Python source files

pub mod ast;
mod python;

pub use ast::*;
pub use python::PythonParser;
