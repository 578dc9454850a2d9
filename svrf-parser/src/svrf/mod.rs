pub mod analysis;
pub mod ast;
pub mod classification;
pub mod diagnostics;
pub mod expression;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod token;
pub mod transforms;
