//! Detached element trees and the position-paired reconciler that patches
//! a rendered [`Region`] toward new markup.

mod node;
mod parse;
mod reconcile;

pub use node::{ancestry, elements, to_markup, Element, Node};
pub use parse::parse_markup;
pub use reconcile::{apply, diff, Patch, Region};
